//! PDF page counting backed by lopdf.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use lopdf::Document as LopdfDocument;

use super::PageCounter;
use crate::error::{Error, Result};

/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";
const VERSION_LEN: usize = 3; // e.g., "1.7"

/// Page counter that loads the PDF with `lopdf`.
#[derive(Debug, Clone, Default)]
pub struct LopdfPageCounter {
    _private: (),
}

impl LopdfPageCounter {
    /// Create a new page counter.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl PageCounter for LopdfPageCounter {
    fn count_pages(&self, path: &Path) -> Result<usize> {
        let mut header = [0u8; PDF_MAGIC.len() + VERSION_LEN];
        File::open(path)?
            .read_exact(&mut header)
            .map_err(|_| Error::UnknownFormat)?;
        check_pdf_header(&header)?;

        let doc = LopdfDocument::load(path)?;
        Ok(doc.get_pages().len())
    }
}

/// Check that `data` starts with a `%PDF-x.y` header and return the version.
pub fn check_pdf_header(data: &[u8]) -> Result<String> {
    if data.len() < PDF_MAGIC.len() + VERSION_LEN || !data.starts_with(PDF_MAGIC) {
        return Err(Error::UnknownFormat);
    }

    let version = &data[PDF_MAGIC.len()..PDF_MAGIC.len() + VERSION_LEN];
    match version {
        [major, b'.', minor] if major.is_ascii_digit() && minor.is_ascii_digit() => {
            Ok(String::from_utf8_lossy(version).into_owned())
        }
        _ => Err(Error::UnknownFormat),
    }
}
