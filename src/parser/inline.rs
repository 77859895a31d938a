//! Inline span scanning: `**bold**` markup plus email, phone and URL tokens.
//!
//! Scanning is strictly left to right. At each position the earliest token
//! wins; when several token classes start at the same offset, email beats
//! phone beats URL. A consumed token is never revisited.

use once_cell::sync::Lazy;
use regex::{Match, Regex};

use crate::model::{TextRun, TextStyle};

static BOLD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("valid regex"));

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}").expect("valid regex")
});

// North-American numbers: optional +1 / 1 prefix, optional parenthesized
// area code, separators of space, dot or dash.
static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:\+?1[\s.\-]?)?(?:\(\d{3}\)\s?|\d{3}[\s.\-]?)\d{3}[\s.\-]?\d{4}")
        .expect("valid regex")
});

// Bare domain or scheme-prefixed URL; the path stops at whitespace, pipe,
// comma or closing paren.
static URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:https?://)?(?:www\.)?[A-Za-z0-9.\-]+\.[A-Za-z]{2,}(?:/[^\s|,)]+)?")
        .expect("valid regex")
});

/// Kind of a recognized inline token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Email address
    Email,
    /// Phone number
    Phone,
    /// Web address
    Url,
}

/// A recognized token inside a line of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    /// Token class
    pub kind: TokenKind,
    /// The matched text, exactly as written
    pub text: &'a str,
}

impl Token<'_> {
    /// Link target for the token (`mailto:`, `tel:` or an absolute URL).
    pub fn target(&self) -> String {
        match self.kind {
            TokenKind::Email => format!("mailto:{}", self.text),
            TokenKind::Phone => format!("tel:{}", normalize_phone(self.text)),
            TokenKind::Url => normalize_url(self.text),
        }
    }
}

/// A piece of scanned text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Plain text between tokens
    Text(&'a str),
    /// A linkable token
    Token(Token<'a>),
}

/// Split `text` into plain text and tokens, left to right.
pub fn scan(text: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut pos = 0;

    while pos < text.len() {
        let Some((kind, m)) = next_match(text, pos) else {
            segments.push(Segment::Text(&text[pos..]));
            break;
        };

        if m.start() > pos {
            segments.push(Segment::Text(&text[pos..m.start()]));
        }

        // A URL-shaped match carrying '@' belongs to the email pattern.
        if kind == TokenKind::Url && m.as_str().contains('@') {
            segments.push(Segment::Text(m.as_str()));
        } else {
            segments.push(Segment::Token(Token {
                kind,
                text: m.as_str(),
            }));
        }

        pos = m.end();
    }

    segments
}

/// Collect only the tokens of `text`.
pub fn tokens(text: &str) -> Vec<Token<'_>> {
    scan(text)
        .into_iter()
        .filter_map(|segment| match segment {
            Segment::Token(token) => Some(token),
            Segment::Text(_) => None,
        })
        .collect()
}

/// Whether `text` holds anything email-, phone- or URL-shaped, including
/// URL-shaped text that [`scan`] leaves unlinked.
pub fn has_contact_shape(text: &str) -> bool {
    next_match(text, 0).is_some()
}

fn next_match(text: &str, pos: usize) -> Option<(TokenKind, Match<'_>)> {
    let candidates = [
        (TokenKind::Email, EMAIL_RE.find_at(text, pos)),
        (TokenKind::Phone, find_phone(text, pos)),
        (TokenKind::Url, URL_RE.find_at(text, pos)),
    ];

    let mut best: Option<(TokenKind, Match<'_>)> = None;
    for (kind, found) in candidates {
        let Some(m) = found else { continue };
        match best {
            Some((_, current)) if current.start() <= m.start() => {}
            _ => best = Some((kind, m)),
        }
    }
    best
}

fn find_phone(text: &str, mut pos: usize) -> Option<Match<'_>> {
    let bytes = text.as_bytes();
    while pos <= text.len() {
        let m = PHONE_RE.find_at(text, pos)?;
        let digit_before = m.start() > 0 && bytes[m.start() - 1].is_ascii_digit();
        let digit_after = bytes.get(m.end()).is_some_and(u8::is_ascii_digit);
        if !digit_before && !digit_after {
            return Some(m);
        }
        // Phone matches always start on an ASCII byte.
        pos = m.start() + 1;
    }
    None
}

/// Normalize a North-American phone number to `+1XXXXXXXXXX`.
pub fn normalize_phone(raw: &str) -> String {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.len() == 10 {
        format!("+1{}", digits)
    } else {
        format!("+{}", digits)
    }
}

/// Prefix `https://` unless the URL already carries a scheme.
pub fn normalize_url(raw: &str) -> String {
    let url = raw.trim();
    let lower = url.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{}", url)
    }
}

/// Render one line of text into styled runs.
///
/// `force_bold` makes every run bold (subsection headers); `font_size`
/// is attached to every run when given.
pub fn render_runs(text: &str, force_bold: bool, font_size: Option<f32>) -> Vec<TextRun> {
    let mut runs = Vec::new();

    for (is_bold, segment) in split_bold(text) {
        let style = TextStyle {
            bold: force_bold || is_bold,
            font_size,
        };

        for piece in scan(segment) {
            match piece {
                Segment::Text(plain) if plain.is_empty() => {}
                Segment::Text(plain) => runs.push(TextRun::styled(plain, style)),
                Segment::Token(token) => runs.push(
                    TextRun::styled(token.text, style).with_link(token.target()),
                ),
            }
        }
    }

    runs
}

/// Split text into alternating `(is_bold, text)` segments.
fn split_bold(text: &str) -> Vec<(bool, &str)> {
    let mut segments = Vec::new();
    let mut last = 0;

    for caps in BOLD_RE.captures_iter(text) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        if whole.start() > last {
            segments.push((false, &text[last..whole.start()]));
        }
        segments.push((true, inner.as_str()));
        last = whole.end();
    }
    if last < text.len() {
        segments.push((false, &text[last..]));
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linked(runs: &[TextRun]) -> Vec<(&str, &str)> {
        runs.iter()
            .filter_map(|r| r.link.as_deref().map(|l| (r.text.as_str(), l)))
            .collect()
    }

    fn joined(runs: &[TextRun]) -> String {
        runs.iter().map(|r| r.text.as_str()).collect()
    }

    #[test]
    fn test_plain_text_round_trip() {
        let text = "Resolved 40+ tickets per week across three offices";
        let runs = render_runs(text, false, None);
        assert_eq!(joined(&runs), text);
        assert!(runs.iter().all(|r| r.link.is_none() && !r.style.bold));
    }

    #[test]
    fn test_email_and_url_in_order() {
        let runs = render_runs("reach me at a@b.com or see example.com", false, None);
        assert_eq!(
            linked(&runs),
            vec![
                ("a@b.com", "mailto:a@b.com"),
                ("example.com", "https://example.com")
            ]
        );
        assert_eq!(joined(&runs), "reach me at a@b.com or see example.com");
    }

    #[test]
    fn test_phone_normalization() {
        let runs = render_runs("(402) 555-0199", false, None);
        assert_eq!(linked(&runs), vec![("(402) 555-0199", "tel:+14025550199")]);
    }

    #[test]
    fn test_phone_formats() {
        assert_eq!(normalize_phone("402.555.0199"), "+14025550199");
        assert_eq!(normalize_phone("+1 402-555-0199"), "+14025550199");
        assert_eq!(normalize_phone("1-402-555-0199"), "+14025550199");
        assert_eq!(normalize_phone("4025550199"), "+14025550199");
    }

    #[test]
    fn test_phone_requires_digit_boundaries() {
        assert!(tokens("order 123456789012345").is_empty());
        assert!(tokens("2019 - 2021").is_empty());
    }

    #[test]
    fn test_email_wins_tie_with_url() {
        let found = tokens("john.doe@example.com");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].kind, TokenKind::Email);
        assert_eq!(found[0].text, "john.doe@example.com");
    }

    #[test]
    fn test_url_with_at_sign_is_plain() {
        let runs = render_runs("see medium.com/@jane today", false, None);
        assert!(linked(&runs).is_empty());
        assert_eq!(joined(&runs), "see medium.com/@jane today");
    }

    #[test]
    fn test_contact_shape_includes_unlinked_urls() {
        assert!(has_contact_shape("medium.com/@jane"));
        assert!(tokens("medium.com/@jane").is_empty());
        assert!(has_contact_shape("call 402-555-0199"));
        assert!(!has_contact_shape("Omaha, NE"));
    }

    #[test]
    fn test_url_stops_at_separators() {
        let found = tokens("linkedin.com/in/jane | github.com/jane, (site.dev/x)");
        let texts: Vec<_> = found.iter().map(|t| t.text).collect();
        assert_eq!(
            texts,
            vec!["linkedin.com/in/jane", "github.com/jane", "site.dev/x"]
        );
    }

    #[test]
    fn test_url_keeps_existing_scheme() {
        assert_eq!(normalize_url("http://a.io"), "http://a.io");
        assert_eq!(normalize_url("https://a.io/x"), "https://a.io/x");
        assert_eq!(normalize_url("www.a.io"), "https://www.a.io");
    }

    #[test]
    fn test_bold_segments() {
        let runs = render_runs("**Acme Corp** | Help Desk", false, Some(10.0));
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].text, "Acme Corp");
        assert!(runs[0].style.bold);
        assert_eq!(runs[1].text, " | Help Desk");
        assert!(!runs[1].style.bold);
        assert!(runs.iter().all(|r| r.style.font_size == Some(10.0)));
    }

    #[test]
    fn test_force_bold_applies_to_links() {
        let runs = render_runs("Lab | github.com/jane/lab", true, None);
        assert!(runs.iter().all(|r| r.style.bold));
        assert_eq!(linked(&runs), vec![("github.com/jane/lab", "https://github.com/jane/lab")]);
    }

    #[test]
    fn test_unpaired_bold_marker_is_literal() {
        let runs = render_runs("5** stars", false, None);
        assert_eq!(joined(&runs), "5** stars");
    }
}
