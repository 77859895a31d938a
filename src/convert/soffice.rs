//! DOCX → PDF conversion through a headless LibreOffice process.

use std::env;
use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use log::debug;

use super::DocumentConverter;
use crate::error::{Error, Result};

/// Well-known install locations, checked before `PATH`.
const INSTALL_CANDIDATES: &[&str] = &[
    r"C:\Program Files\LibreOffice\program\soffice.exe",
    r"C:\Program Files\LibreOffice\program\soffice.com",
    r"C:\Program Files (x86)\LibreOffice\program\soffice.exe",
    r"C:\Program Files (x86)\LibreOffice\program\soffice.com",
    "/Applications/LibreOffice.app/Contents/MacOS/soffice",
    "/usr/lib/libreoffice/program/soffice",
    "/opt/libreoffice/program/soffice",
];

/// Executable names searched for on `PATH`.
const PATH_NAMES: &[&str] = &["soffice", "soffice.exe", "soffice.com", "libreoffice"];

/// Converter that shells out to `soffice --headless --convert-to pdf`.
#[derive(Debug, Clone)]
pub struct LibreOfficeConverter {
    binary: PathBuf,
}

impl LibreOfficeConverter {
    /// Use the given `soffice` binary.
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Find LibreOffice in the usual install locations or on `PATH`.
    pub fn locate() -> Result<Self> {
        let binary = find_soffice(INSTALL_CANDIDATES, env::var_os("PATH").as_deref())
            .ok_or(Error::ConverterNotFound)?;
        debug!("Using LibreOffice at {}", binary.display());
        Ok(Self::new(binary))
    }

    /// Use `binary` when given and present, otherwise [`locate`](Self::locate).
    pub fn with_override(binary: Option<&Path>) -> Result<Self> {
        match binary {
            Some(path) if path.is_file() => Ok(Self::new(path)),
            Some(_) => Err(Error::ConverterNotFound),
            None => Self::locate(),
        }
    }

    /// Path of the binary this converter runs.
    pub fn binary(&self) -> &Path {
        &self.binary
    }
}

impl DocumentConverter for LibreOfficeConverter {
    fn name(&self) -> &str {
        "libreoffice"
    }

    fn convert(&self, source: &Path, target: &Path) -> Result<()> {
        let outdir = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&outdir)?;

        // Leftovers from an earlier attempt must not pass for fresh output.
        let generated = generated_path(source, &outdir)?;
        remove_stale(&generated)?;
        if !same_file(&generated, target) {
            remove_stale(target)?;
        }

        debug!(
            "Converting {} into {}",
            source.display(),
            outdir.display()
        );
        let status = Command::new(&self.binary)
            .args(["--headless", "--nologo", "--nofirststartwizard"])
            .args(["--convert-to", "pdf", "--outdir"])
            .arg(&outdir)
            .arg(source)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|e| Error::Conversion(format!("failed to run {}: {}", self.binary.display(), e)))?;

        if !status.success() {
            return Err(Error::Conversion(format!(
                "{} exited with {}",
                self.binary.display(),
                status
            )));
        }

        if !generated.exists() {
            return Err(Error::Conversion(
                "LibreOffice conversion ran, but PDF was not created.".to_string(),
            ));
        }
        if !same_file(&generated, target) {
            fs::rename(&generated, target)?;
        }
        Ok(())
    }
}

/// Where LibreOffice writes its output: `<outdir>/<source stem>.pdf`.
fn generated_path(source: &Path, outdir: &Path) -> Result<PathBuf> {
    let stem = source
        .file_stem()
        .ok_or_else(|| Error::Conversion(format!("invalid source path: {}", source.display())))?;
    let mut name = stem.to_os_string();
    name.push(".pdf");
    Ok(outdir.join(name))
}

fn remove_stale(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e.into()),
        _ => Ok(()),
    }
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

fn find_soffice(candidates: &[&str], path_var: Option<&OsStr>) -> Option<PathBuf> {
    candidates
        .iter()
        .map(PathBuf::from)
        .find(|candidate| candidate.is_file())
        .or_else(|| {
            let path_var = path_var?;
            env::split_paths(path_var).find_map(|dir| {
                PATH_NAMES
                    .iter()
                    .map(|name| dir.join(name))
                    .find(|candidate| candidate.is_file())
            })
        })
}
