//! Line-oriented Markdown model.
//!
//! A resume is read as a flat sequence of [`Line`]s. Each line's
//! [`LineKind`] is derived from its leading marker every time it is asked
//! for, so a sequence stays consistent however it is cut down. Section and
//! subsection nesting is positional: a subsection runs until the next
//! subsection or section header.

use once_cell::sync::Lazy;
use regex::Regex;

static HR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*-{3,}\s*$").expect("valid regex"));
static TITLE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#\s+(.+)$").expect("valid regex"));
static H2_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^##\s+(.+)$").expect("valid regex"));
static H3_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^###\s+(.+)$").expect("valid regex"));
static BULLET_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*-\s+(.+)$").expect("valid regex"));
static BOLD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("valid regex"));

/// Structural role of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// `# Name`
    Title,
    /// `## Section`
    SectionHeader,
    /// `### Subsection`
    SubsectionHeader,
    /// `- item`
    Bullet,
    /// Any other non-blank text
    Paragraph,
    /// `---` (three or more dashes)
    HorizontalRule,
    /// Empty or whitespace-only
    Blank,
}

impl LineKind {
    /// Whether this kind opens a new subsection scope boundary.
    pub fn is_header(self) -> bool {
        matches!(self, LineKind::SectionHeader | LineKind::SubsectionHeader)
    }
}

/// A single source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    text: String,
}

impl Line {
    /// Create a line from raw text.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Raw text, marker included.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Classify the line by its leading marker.
    pub fn kind(&self) -> LineKind {
        classify(&self.text).0
    }

    /// Text after the leading marker, trimmed. Bold markup is kept.
    pub fn content(&self) -> &str {
        classify(&self.text).1
    }

    /// [`content`](Self::content) with `**bold**` markers removed, for comparisons.
    pub fn plain_content(&self) -> String {
        strip_bold(self.content())
    }

    /// Check if the line is blank.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

impl From<&str> for Line {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

fn classify(text: &str) -> (LineKind, &str) {
    if text.trim().is_empty() {
        return (LineKind::Blank, "");
    }
    if HR_RE.is_match(text) {
        return (LineKind::HorizontalRule, "");
    }

    let captured = |re: &Regex| {
        re.captures(text)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().trim())
    };

    if let Some(content) = captured(&TITLE_RE) {
        return (LineKind::Title, content);
    }
    if let Some(content) = captured(&H2_RE) {
        return (LineKind::SectionHeader, content);
    }
    if let Some(content) = captured(&H3_RE) {
        return (LineKind::SubsectionHeader, content);
    }
    if let Some(content) = captured(&BULLET_RE) {
        return (LineKind::Bullet, content);
    }
    (LineKind::Paragraph, text.trim())
}

/// Remove `**bold**` markers, keeping their inner text.
pub fn strip_bold(text: &str) -> String {
    BOLD_RE.replace_all(text, "$1").trim().to_string()
}

/// Parse Markdown source into a normalized line sequence.
pub fn parse(source: &str) -> Vec<Line> {
    normalize(source.lines().map(Line::new))
}

/// Whitespace normalization.
///
/// Trailing whitespace (including a forced line-break marker of two or more
/// spaces) is removed, horizontal rules are dropped, and runs of blank lines
/// collapse to a single blank line. Idempotent.
pub fn normalize<I>(lines: I) -> Vec<Line>
where
    I: IntoIterator<Item = Line>,
{
    let mut cleaned: Vec<Line> = Vec::new();
    let mut previous_blank = false;

    for line in lines {
        let text = line.text.trim_end();
        if HR_RE.is_match(text) {
            continue;
        }
        if text.is_empty() {
            if !previous_blank {
                cleaned.push(Line::new(""));
            }
            previous_blank = true;
        } else {
            previous_blank = false;
            cleaned.push(Line::new(text));
        }
    }

    cleaned
}

/// Join lines back into Markdown text.
pub fn join(lines: &[Line]) -> String {
    lines
        .iter()
        .map(Line::text)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(lines: &[Line]) -> Vec<LineKind> {
        lines.iter().map(Line::kind).collect()
    }

    #[test]
    fn test_classify_markers() {
        assert_eq!(Line::new("# Jane Doe").kind(), LineKind::Title);
        assert_eq!(Line::new("## EXPERIENCE").kind(), LineKind::SectionHeader);
        assert_eq!(Line::new("### **Acme** | Tech").kind(), LineKind::SubsectionHeader);
        assert_eq!(Line::new("- did things").kind(), LineKind::Bullet);
        assert_eq!(Line::new("  - nested").kind(), LineKind::Bullet);
        assert_eq!(Line::new("---").kind(), LineKind::HorizontalRule);
        assert_eq!(Line::new("  -----  ").kind(), LineKind::HorizontalRule);
        assert_eq!(Line::new("   ").kind(), LineKind::Blank);
        assert_eq!(Line::new("Omaha, NE").kind(), LineKind::Paragraph);
        assert_eq!(Line::new("#### deep").kind(), LineKind::Paragraph);
        assert_eq!(Line::new("#hashtag").kind(), LineKind::Paragraph);
    }

    #[test]
    fn test_content_strips_marker() {
        assert_eq!(Line::new("# Jane Doe ").content(), "Jane Doe");
        assert_eq!(Line::new("##  Skills").content(), "Skills");
        assert_eq!(Line::new("- item").content(), "item");
        assert_eq!(Line::new("  plain  ").content(), "plain");
    }

    #[test]
    fn test_plain_content_drops_bold() {
        let line = Line::new("### **Help Desk** | Acme");
        assert_eq!(line.content(), "**Help Desk** | Acme");
        assert_eq!(line.plain_content(), "Help Desk | Acme");
    }

    #[test]
    fn test_parse_drops_rules_and_collapses_blanks() {
        let source = "# Jane\n\n\n\nOmaha  \n---\n## Skills\n\n\n- Rust   \n";
        let lines = parse(source);
        assert_eq!(
            lines.iter().map(Line::text).collect::<Vec<_>>(),
            vec!["# Jane", "", "Omaha", "## Skills", "", "- Rust"]
        );
        assert_eq!(
            kinds(&lines),
            vec![
                LineKind::Title,
                LineKind::Blank,
                LineKind::Paragraph,
                LineKind::SectionHeader,
                LineKind::Blank,
                LineKind::Bullet,
            ]
        );
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let source = "a  \n\n\n \t\nb\n---\n\n- c \n\n";
        let once = parse(source);
        let twice = normalize(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_parse_handles_crlf() {
        let lines = parse("# Jane\r\n- one\r\n");
        assert_eq!(kinds(&lines), vec![LineKind::Title, LineKind::Bullet]);
        assert_eq!(lines[1].content(), "one");
    }

    #[test]
    fn test_join_round_trip() {
        let lines = parse("# A\n\n- b");
        assert_eq!(join(&lines), "# A\n\n- b");
    }
}
