//! Fit-to-one-page controller.
//!
//! Tries each formatting profile in turn. Within a profile, renders the
//! resume, converts it and counts pages; while the result is longer than
//! one page, applies the next reduction rule on top of the previous ones
//! and tries again. Every profile starts over from the unreduced lines.

use std::fmt;
use std::path::Path;

use log::{debug, info, warn};

use crate::config::FitConfig;
use crate::convert::{DocumentConverter, PageCounter};
use crate::error::Result;
use crate::parser::{normalize, Line};
use crate::reduce::ReductionRule;
use crate::render::{assemble, write_docx, FormatProfile};

/// Terminal state of a fit run.
#[derive(Debug, Clone, PartialEq)]
pub enum FitOutcome {
    /// The PDF has exactly one page.
    Fitted {
        /// Number of render/convert/count cycles performed
        attempts: usize,
        /// Name of the profile that fit
        profile: String,
        /// Last rule applied before the fit, if any
        rule: Option<ReductionRule>,
    },

    /// Every profile and rule was tried without reaching one page.
    ///
    /// The artifacts of the final attempt are left on disk.
    Exhausted {
        /// Number of render/convert/count cycles performed
        attempts: usize,
        /// Page count of the final attempt
        pages: usize,
    },
}

impl FitOutcome {
    /// Number of attempts made.
    pub fn attempts(&self) -> usize {
        match self {
            FitOutcome::Fitted { attempts, .. } | FitOutcome::Exhausted { attempts, .. } => {
                *attempts
            }
        }
    }

    /// Whether the run ended with a one-page PDF.
    pub fn is_fitted(&self) -> bool {
        matches!(self, FitOutcome::Fitted { .. })
    }
}

impl fmt::Display for FitOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FitOutcome::Fitted {
                attempts,
                profile,
                rule: Some(rule),
            } => write!(
                f,
                "fit on one page after {} attempt(s) with profile \"{}\" ({})",
                attempts, profile, rule
            ),
            FitOutcome::Fitted {
                attempts, profile, ..
            } => write!(
                f,
                "fit on one page after {} attempt(s) with profile \"{}\"",
                attempts, profile
            ),
            FitOutcome::Exhausted { attempts, pages } => write!(
                f,
                "still {} page(s) after {} attempt(s)",
                pages, attempts
            ),
        }
    }
}

/// Drives the render → convert → count loop.
pub struct FitController<C, P> {
    config: FitConfig,
    converter: C,
    counter: P,
}

impl<C: DocumentConverter, P: PageCounter> FitController<C, P> {
    /// Create a controller from a configuration and its collaborators.
    pub fn new(config: FitConfig, converter: C, counter: P) -> Self {
        Self {
            config,
            converter,
            counter,
        }
    }

    /// Configuration in use.
    pub fn config(&self) -> &FitConfig {
        &self.config
    }

    /// Fit `lines` onto one page, writing the DOCX to `docx` and the PDF
    /// to `pdf` on every attempt.
    ///
    /// Collaborator failures abort the run with their error.
    pub fn run(&self, lines: &[Line], docx: &Path, pdf: &Path) -> Result<FitOutcome> {
        self.config.validate()?;

        let original = normalize(lines.iter().cloned());
        let mut attempts = 0;
        let mut pages = 0;

        for profile in &self.config.profiles {
            let mut current = original.clone();
            let mut applied: Option<&ReductionRule> = None;
            let mut rules = self.config.rules.iter();

            loop {
                pages = self.attempt(&current, profile, docx, pdf)?;
                attempts += 1;
                match applied {
                    Some(rule) => info!(
                        "Attempt {}: profile \"{}\", {} -> {} page(s)",
                        attempts, profile.name, rule, pages
                    ),
                    None => info!(
                        "Attempt {}: profile \"{}\" -> {} page(s)",
                        attempts, profile.name, pages
                    ),
                }

                if pages == 1 {
                    return Ok(FitOutcome::Fitted {
                        attempts,
                        profile: profile.name.clone(),
                        rule: applied.cloned(),
                    });
                }

                match rules.next() {
                    Some(rule) => {
                        current = rule.apply(&current);
                        applied = Some(rule);
                    }
                    None => break,
                }
            }
        }

        warn!(
            "Could not fit on one page: {} page(s) after {} attempt(s)",
            pages, attempts
        );
        Ok(FitOutcome::Exhausted { attempts, pages })
    }

    fn attempt(
        &self,
        lines: &[Line],
        profile: &FormatProfile,
        docx: &Path,
        pdf: &Path,
    ) -> Result<usize> {
        let doc = assemble(lines, profile);
        write_docx(&doc, docx)?;
        debug!(
            "Converting with {}: {} -> {}",
            self.converter.name(),
            docx.display(),
            pdf.display()
        );
        self.converter.convert(docx, pdf)?;
        self.counter.count_pages(pdf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::parser::parse;
    use std::cell::{Cell, RefCell};
    use std::collections::VecDeque;
    use std::fs;

    struct CopyConverter {
        calls: Cell<usize>,
    }

    impl DocumentConverter for CopyConverter {
        fn name(&self) -> &str {
            "copy"
        }

        fn convert(&self, source: &Path, target: &Path) -> Result<()> {
            self.calls.set(self.calls.get() + 1);
            fs::copy(source, target)?;
            Ok(())
        }
    }

    struct ScriptedCounter {
        pages: RefCell<VecDeque<usize>>,
        fallback: usize,
    }

    impl ScriptedCounter {
        fn new(pages: &[usize], fallback: usize) -> Self {
            Self {
                pages: RefCell::new(pages.iter().copied().collect()),
                fallback,
            }
        }
    }

    impl PageCounter for ScriptedCounter {
        fn count_pages(&self, _path: &Path) -> Result<usize> {
            Ok(self.pages.borrow_mut().pop_front().unwrap_or(self.fallback))
        }
    }

    struct FailingConverter;

    impl DocumentConverter for FailingConverter {
        fn name(&self) -> &str {
            "failing"
        }

        fn convert(&self, _source: &Path, _target: &Path) -> Result<()> {
            Err(Error::Conversion("boom".to_string()))
        }
    }

    fn resume() -> Vec<Line> {
        parse("# Jane Doe\njane@example.com\n\n## EXPERIENCE\n### Acme\n- one\n- two\n")
    }

    fn controller(
        config: FitConfig,
        pages: &[usize],
        fallback: usize,
    ) -> FitController<CopyConverter, ScriptedCounter> {
        FitController::new(
            config,
            CopyConverter {
                calls: Cell::new(0),
            },
            ScriptedCounter::new(pages, fallback),
        )
    }

    #[test]
    fn test_fits_first_try() {
        let dir = tempfile::tempdir().unwrap();
        let (docx, pdf) = (dir.path().join("r.docx"), dir.path().join("r.pdf"));

        let outcome = controller(FitConfig::default(), &[1], 1)
            .run(&resume(), &docx, &pdf)
            .unwrap();
        assert_eq!(
            outcome,
            FitOutcome::Fitted {
                attempts: 1,
                profile: "standard".to_string(),
                rule: None,
            }
        );
        assert!(docx.exists());
        assert!(pdf.exists());
    }

    #[test]
    fn test_fits_after_first_rule() {
        let dir = tempfile::tempdir().unwrap();
        let (docx, pdf) = (dir.path().join("r.docx"), dir.path().join("r.pdf"));
        let config = FitConfig::default();
        let first = config.rules[0].clone();

        let outcome = controller(config, &[2, 1], 1)
            .run(&resume(), &docx, &pdf)
            .unwrap();
        assert_eq!(outcome.attempts(), 2);
        match outcome {
            FitOutcome::Fitted { rule, profile, .. } => {
                assert_eq!(rule, Some(first));
                assert_eq!(profile, "standard");
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_moves_to_next_profile() {
        let dir = tempfile::tempdir().unwrap();
        let (docx, pdf) = (dir.path().join("r.docx"), dir.path().join("r.pdf"));
        let config = FitConfig::default().with_rules(vec![ReductionRule::keep_projects(1)]);

        // standard: base + 1 rule, then tight base fits.
        let outcome = controller(config, &[2, 2, 1], 1)
            .run(&resume(), &docx, &pdf)
            .unwrap();
        assert_eq!(
            outcome,
            FitOutcome::Fitted {
                attempts: 3,
                profile: "tight".to_string(),
                rule: None,
            }
        );
    }

    #[test]
    fn test_exhausted_leaves_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let (docx, pdf) = (dir.path().join("r.docx"), dir.path().join("r.pdf"));
        let config = FitConfig::default();
        let expected = config.profiles.len() * (config.rules.len() + 1);

        let ctl = controller(config, &[], 2);
        let outcome = ctl.run(&resume(), &docx, &pdf).unwrap();
        assert_eq!(
            outcome,
            FitOutcome::Exhausted {
                attempts: expected,
                pages: 2,
            }
        );
        assert_eq!(ctl.converter.calls.get(), expected);
        assert!(docx.exists());
        assert!(pdf.exists());
    }

    #[test]
    fn test_zero_pages_is_not_a_fit() {
        let dir = tempfile::tempdir().unwrap();
        let (docx, pdf) = (dir.path().join("r.docx"), dir.path().join("r.pdf"));
        let config = FitConfig::default().with_rules(Vec::new());

        let outcome = controller(config, &[], 0)
            .run(&resume(), &docx, &pdf)
            .unwrap();
        assert!(!outcome.is_fitted());
        assert_eq!(outcome.attempts(), 2);
    }

    #[test]
    fn test_converter_error_aborts() {
        let dir = tempfile::tempdir().unwrap();
        let ctl = FitController::new(
            FitConfig::default(),
            FailingConverter,
            ScriptedCounter::new(&[], 1),
        );
        let result = ctl.run(
            &resume(),
            &dir.path().join("r.docx"),
            &dir.path().join("r.pdf"),
        );
        assert!(matches!(result, Err(Error::Conversion(_))));
    }

    #[test]
    fn test_empty_profiles_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let config = FitConfig::default().with_profiles(Vec::new());
        let result = controller(config, &[1], 1).run(
            &resume(),
            &dir.path().join("r.docx"),
            &dir.path().join("r.pdf"),
        );
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_outcome_display() {
        let fitted = FitOutcome::Fitted {
            attempts: 3,
            profile: "tight".to_string(),
            rule: Some(ReductionRule::drop_section("Foo")),
        };
        assert!(fitted.to_string().contains("3 attempt(s)"));
        assert!(fitted.to_string().contains("tight"));

        let exhausted = FitOutcome::Exhausted {
            attempts: 14,
            pages: 2,
        };
        assert_eq!(exhausted.to_string(), "still 2 page(s) after 14 attempt(s)");
    }
}
