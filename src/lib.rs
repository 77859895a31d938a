//! # onepage
//!
//! Fit a Markdown resume onto exactly one printed page.
//!
//! The resume is rendered to DOCX, converted to PDF with LibreOffice and
//! its pages counted. While the PDF runs long, the crate tightens the
//! formatting profile and applies content reduction rules until the
//! document fits or every option has been tried.
//!
//! ## Quick Start
//!
//! ```no_run
//! use onepage::{fit_file, FitOutcome};
//!
//! fn main() -> onepage::Result<()> {
//!     match fit_file("resume.md", "out/resume.docx", "out/resume.pdf")? {
//!         FitOutcome::Fitted { attempts, .. } => println!("fit after {} attempt(s)", attempts),
//!         FitOutcome::Exhausted { pages, .. } => println!("still {} pages", pages),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Line model**: classifies Markdown lines and normalizes whitespace
//! - **Inline spans**: bold markup plus clickable email, phone and URL links
//! - **Reduction rules**: drop or trim subsections, least destructive first
//! - **Profiles**: spacing/size presets, loadable from JSON
//! - **Pluggable collaborators**: converter and page counter behind traits

pub mod config;
pub mod convert;
pub mod error;
pub mod fit;
pub mod model;
pub mod parser;
pub mod reduce;
pub mod render;

// Re-export commonly used types
pub use config::FitConfig;
pub use convert::{DocumentConverter, LibreOfficeConverter, LopdfPageCounter, PageCounter};
pub use error::{Error, Result};
pub use fit::{FitController, FitOutcome};
pub use model::{Document, Paragraph, TextRun};
pub use parser::{Line, LineKind};
pub use reduce::ReductionRule;
pub use render::FormatProfile;

use std::fs;
use std::path::{Path, PathBuf};

/// Read a Markdown resume into a normalized line sequence.
///
/// # Example
///
/// ```no_run
/// let lines = onepage::read_resume("resume.md").unwrap();
/// println!("{} lines", lines.len());
/// ```
pub fn read_resume<P: AsRef<Path>>(path: P) -> Result<Vec<Line>> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(Error::SourceNotFound(path.to_path_buf()));
    }
    let source = fs::read_to_string(path)?;
    Ok(parser::parse(&source))
}

/// Render Markdown source straight to DOCX bytes with one profile.
///
/// No reduction is applied and no converter is needed.
///
/// ```
/// use onepage::{render_docx, FormatProfile};
///
/// let bytes = render_docx("# Jane Doe\n## SKILLS\n- Rust", &FormatProfile::standard()).unwrap();
/// assert_eq!(&bytes[..2], b"PK");
/// ```
pub fn render_docx(source: &str, profile: &FormatProfile) -> Result<Vec<u8>> {
    let lines = parser::parse(source);
    render::to_docx_bytes(&render::assemble(&lines, profile))
}

/// Fit the resume at `source` onto one page with the built-in settings,
/// locating LibreOffice automatically.
pub fn fit_file<S, D, P>(source: S, docx: D, pdf: P) -> Result<FitOutcome>
where
    S: AsRef<Path>,
    D: AsRef<Path>,
    P: AsRef<Path>,
{
    OnePage::new().fit(source, docx, pdf)
}

/// Builder for a fit run.
///
/// # Example
///
/// ```no_run
/// use onepage::{FitConfig, OnePage};
///
/// let outcome = OnePage::new()
///     .with_config(FitConfig::load("onepage.json")?)
///     .with_soffice("/opt/libreoffice/program/soffice")
///     .fit("resume.md", "resume.docx", "resume.pdf")?;
/// println!("{}", outcome);
/// # Ok::<(), onepage::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct OnePage {
    config: FitConfig,
    soffice: Option<PathBuf>,
}

impl OnePage {
    /// Create a builder with the built-in profiles and rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom configuration.
    pub fn with_config(mut self, config: FitConfig) -> Self {
        self.config = config;
        self
    }

    /// Use an explicit LibreOffice binary instead of searching for one.
    pub fn with_soffice(mut self, binary: impl Into<PathBuf>) -> Self {
        self.soffice = Some(binary.into());
        self
    }

    /// Configuration this builder will run with.
    pub fn config(&self) -> &FitConfig {
        &self.config
    }

    /// Run the fit loop.
    ///
    /// The source is checked before LibreOffice is looked up, so a missing
    /// resume is reported as [`Error::SourceNotFound`].
    pub fn fit<S, D, P>(self, source: S, docx: D, pdf: P) -> Result<FitOutcome>
    where
        S: AsRef<Path>,
        D: AsRef<Path>,
        P: AsRef<Path>,
    {
        let lines = read_resume(source)?;
        let converter = LibreOfficeConverter::with_override(self.soffice.as_deref())?;
        FitController::new(self.config, converter, LopdfPageCounter::new()).run(
            &lines,
            docx.as_ref(),
            pdf.as_ref(),
        )
    }
}
