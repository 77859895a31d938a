//! The three content-reducing transformations.
//!
//! All of them are pure and idempotent, and keep the relative order of the
//! lines they retain.

use crate::parser::{Line, LineKind};

/// Remove every subsection titled `title` together with its body.
///
/// The title is compared with bold markup stripped. A body runs until the
/// next subsection or section header.
pub fn drop_section(lines: &[Line], title: &str) -> Vec<Line> {
    let mut out = Vec::with_capacity(lines.len());
    let mut dropping = false;

    for line in lines {
        let kind = line.kind();
        if kind.is_header() {
            dropping = kind == LineKind::SubsectionHeader && line.plain_content() == title;
        }
        if !dropping {
            out.push(line.clone());
        }
    }

    out
}

/// Keep only the first `keep` subsections of every section whose header
/// contains `marker` (case-insensitive).
pub fn keep_first_subsections(lines: &[Line], marker: &str, keep: usize) -> Vec<Line> {
    let marker = marker.to_uppercase();
    let mut out = Vec::with_capacity(lines.len());
    let mut in_target = false;
    let mut seen = 0usize;
    let mut skipping = false;

    for line in lines {
        match line.kind() {
            LineKind::SectionHeader => {
                in_target = line.content().to_uppercase().contains(&marker);
                seen = 0;
                skipping = false;
            }
            LineKind::SubsectionHeader if in_target => {
                seen += 1;
                skipping = seen > keep;
            }
            _ => {}
        }
        if !skipping {
            out.push(line.clone());
        }
    }

    out
}

/// Keep the first `keep` bullets under each subsection titled `title`.
///
/// Non-bullet lines in scope are always kept.
pub fn keep_first_bullets(lines: &[Line], title: &str, keep: usize) -> Vec<Line> {
    let mut out = Vec::with_capacity(lines.len());
    let mut in_target = false;
    let mut kept = 0usize;

    for line in lines {
        match line.kind() {
            LineKind::SectionHeader => in_target = false,
            LineKind::SubsectionHeader => {
                in_target = line.plain_content() == title;
                kept = 0;
            }
            LineKind::Bullet if in_target => {
                kept += 1;
                if kept > keep {
                    continue;
                }
            }
            _ => {}
        }
        out.push(line.clone());
    }

    out
}
