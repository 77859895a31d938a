//! External collaborators: fixed-page conversion and page counting.
//!
//! The fit loop only talks to these through the [`DocumentConverter`] and
//! [`PageCounter`] traits, so the concrete LibreOffice / lopdf backends can
//! be swapped out.
//!
//! # Example
//!
//! ```no_run
//! use onepage::convert::{DocumentConverter, LibreOfficeConverter, LopdfPageCounter, PageCounter};
//! use std::path::Path;
//!
//! fn main() -> onepage::Result<()> {
//!     let converter = LibreOfficeConverter::locate()?;
//!     converter.convert(Path::new("resume.docx"), Path::new("resume.pdf"))?;
//!
//!     let pages = LopdfPageCounter::new().count_pages(Path::new("resume.pdf"))?;
//!     println!("{} page(s)", pages);
//!     Ok(())
//! }
//! ```

mod pdf;
mod soffice;

pub use pdf::{check_pdf_header, LopdfPageCounter};
pub use soffice::LibreOfficeConverter;

use crate::error::Result;
use std::path::Path;

/// Converts a rich-text document into a fixed-page document.
pub trait DocumentConverter {
    /// Get the name of this converter.
    fn name(&self) -> &str;

    /// Convert `source` and leave the result at `target`.
    ///
    /// Blocks until the conversion has finished. Fails if `target` does
    /// not exist afterwards.
    fn convert(&self, source: &Path, target: &Path) -> Result<()>;
}

/// Counts the pages of a fixed-page document.
pub trait PageCounter {
    /// Return the number of pages in the document at `path`.
    fn count_pages(&self, path: &Path) -> Result<usize>;
}

impl<T: DocumentConverter + ?Sized> DocumentConverter for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn convert(&self, source: &Path, target: &Path) -> Result<()> {
        (**self).convert(source, target)
    }
}

impl<T: PageCounter + ?Sized> PageCounter for Box<T> {
    fn count_pages(&self, path: &Path) -> Result<usize> {
        (**self).count_pages(path)
    }
}
