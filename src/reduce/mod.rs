//! Content reduction engine.
//!
//! A [`ReductionRule`] removes content from a line sequence. Rules are
//! applied cumulatively in list order, least destructive first, with a
//! whitespace normalization pass after each one.
//!
//! # Example
//!
//! ```
//! use onepage::parser::parse;
//! use onepage::reduce::ReductionRule;
//!
//! let lines = parse("## WORK\n### Acme\n- a\n- b\n- c");
//! let rule = ReductionRule::KeepFirstBullets {
//!     subsection: "Acme".to_string(),
//!     keep: 1,
//! };
//! let reduced = rule.apply(&lines);
//! assert_eq!(reduced.len(), 3);
//! ```

mod ops;

pub use ops::{drop_section, keep_first_bullets, keep_first_subsections};

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::parser::{normalize, Line};

/// Section marker used by [`ReductionRule::KeepFirstSubsections`] when none is given.
pub const DEFAULT_PROJECT_MARKER: &str = "TECHNICAL PROJECT";

/// A content-removing transformation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum ReductionRule {
    /// Drop a named subsection and its body.
    DropSection {
        /// Subsection title (bold markup ignored)
        title: String,
    },

    /// Keep the first `keep` subsections of the section matching `section`.
    KeepFirstSubsections {
        /// Case-insensitive substring of the section header
        #[serde(default = "default_marker")]
        section: String,
        /// Number of subsections to keep
        keep: usize,
    },

    /// Keep the first `keep` bullets of a named subsection.
    KeepFirstBullets {
        /// Subsection title (bold markup ignored)
        subsection: String,
        /// Number of bullets to keep
        keep: usize,
    },
}

fn default_marker() -> String {
    DEFAULT_PROJECT_MARKER.to_string()
}

impl ReductionRule {
    /// Drop the subsection titled `title`.
    pub fn drop_section(title: impl Into<String>) -> Self {
        Self::DropSection {
            title: title.into(),
        }
    }

    /// Keep the first `keep` project subsections.
    pub fn keep_projects(keep: usize) -> Self {
        Self::KeepFirstSubsections {
            section: default_marker(),
            keep,
        }
    }

    /// Keep the first `keep` bullets under `subsection`.
    pub fn keep_bullets(subsection: impl Into<String>, keep: usize) -> Self {
        Self::KeepFirstBullets {
            subsection: subsection.into(),
            keep,
        }
    }

    /// Apply the rule and re-normalize whitespace.
    pub fn apply(&self, lines: &[Line]) -> Vec<Line> {
        let reduced = match self {
            Self::DropSection { title } => drop_section(lines, title),
            Self::KeepFirstSubsections { section, keep } => {
                keep_first_subsections(lines, section, *keep)
            }
            Self::KeepFirstBullets { subsection, keep } => {
                keep_first_bullets(lines, subsection, *keep)
            }
        };
        normalize(reduced)
    }
}

impl fmt::Display for ReductionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DropSection { title } => write!(f, "drop section \"{}\"", title),
            Self::KeepFirstSubsections { section, keep } => {
                write!(f, "keep first {} subsections of \"{}\"", keep, section)
            }
            Self::KeepFirstBullets { subsection, keep } => {
                write!(f, "keep first {} bullets under \"{}\"", keep, subsection)
            }
        }
    }
}

/// The built-in rule list, least destructive first.
pub fn default_rules() -> Vec<ReductionRule> {
    vec![
        ReductionRule::drop_section("Other Professional Experience"),
        ReductionRule::keep_projects(2),
        ReductionRule::keep_bullets("Technical & IT Support Roles", 3),
        ReductionRule::keep_bullets("Windows Event Monitoring & Mini SOC Lab", 2),
        ReductionRule::keep_bullets("pfSense Firewall & Network Segmentation Lab", 2),
        ReductionRule::keep_bullets("Small Business IT & Security Assessments", 1),
    ]
}
