//! Error types for onepage library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for onepage operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while fitting a resume.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The source Markdown file does not exist.
    #[error("Markdown not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    /// No LibreOffice binary could be located.
    #[error("LibreOffice not found. Install LibreOffice or add soffice to PATH.")]
    ConverterNotFound,

    /// The external converter failed or produced no output.
    #[error("Conversion failed: {0}")]
    Conversion(String),

    /// The converted output is not a PDF file.
    #[error("Unknown file format: not a valid PDF")]
    UnknownFormat,

    /// Error reading the PDF structure while counting pages.
    #[error("PDF parsing error: {0}")]
    PdfParse(String),

    /// Error writing the DOCX package.
    #[error("DOCX packaging error: {0}")]
    Package(String),

    /// Invalid or unreadable configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        Error::PdfParse(err.to_string())
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(e) => Error::Io(e),
            _ => Error::Package(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Config(err.to_string())
    }
}
