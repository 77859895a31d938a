//! Line sequence → rich-text document.
//!
//! Lines between the title and the first section header form the header
//! block. They are buffered rather than rendered directly, so that contact
//! details scattered over several lines can be consolidated into a single
//! `email | phone | LinkedIn | GitHub` line.

use chrono::Utc;

use super::FormatProfile;
use crate::model::{Document, ListIndent, PageSetup, Paragraph, TextRun};
use crate::parser::inline::{has_contact_shape, tokens, Token, TokenKind};
use crate::parser::{render_runs, strip_bold, Line, LineKind};

/// Separator placed between consolidated contact links.
pub const CONTACT_SEPARATOR: &str = " | ";

/// Build a document from a line sequence using `profile`.
pub fn assemble(lines: &[Line], profile: &FormatProfile) -> Document {
    let mut assembler = Assembler::new(profile);
    for line in lines {
        assembler.push(line);
    }
    assembler.finish()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HeaderState {
    Scanning,
    InHeaderBlock,
}

struct Assembler<'a> {
    profile: &'a FormatProfile,
    doc: Document,
    state: HeaderState,
    pending: Vec<&'a str>,
}

impl<'a> Assembler<'a> {
    fn new(profile: &'a FormatProfile) -> Self {
        let mut doc = Document::new(
            PageSetup::letter(profile.margin),
            profile.font_family.clone(),
            profile.body_pt,
        );
        doc.metadata.created = Some(Utc::now());
        Self {
            profile,
            doc,
            state: HeaderState::Scanning,
            pending: Vec::new(),
        }
    }

    fn push(&mut self, line: &'a Line) {
        let kind = line.kind();
        match (self.state, kind) {
            (_, LineKind::HorizontalRule) => {}
            (HeaderState::InHeaderBlock, LineKind::Paragraph) => {
                self.pending.push(line.content());
            }
            // A blank directly after the title does not end the block.
            (HeaderState::InHeaderBlock, LineKind::Blank) => {
                if !self.pending.is_empty() {
                    self.flush();
                }
            }
            (_, LineKind::Blank) => {}
            (_, LineKind::Title) => {
                self.flush();
                self.title(line);
                self.state = HeaderState::InHeaderBlock;
            }
            _ => {
                self.flush();
                self.render(line, kind);
            }
        }
    }

    fn finish(mut self) -> Document {
        self.flush();
        self.doc
    }

    fn title(&mut self, line: &Line) {
        let name = strip_bold(line.content());
        if self.doc.metadata.title.is_none() {
            self.doc.metadata.title = Some(name.clone());
        }
        let run = TextRun::bold(name).with_size(self.profile.name_pt);
        self.doc
            .add_paragraph(Paragraph::with_runs(vec![run]).with_spacing(0.0, self.profile.title_after));
    }

    fn render(&mut self, line: &Line, kind: LineKind) {
        let p = self.profile;
        let paragraph = match kind {
            LineKind::SectionHeader => {
                let run = TextRun::bold(strip_bold(line.content())).with_size(p.section_pt);
                Paragraph::with_runs(vec![run]).with_spacing(p.section_before, p.section_after)
            }
            LineKind::SubsectionHeader => {
                Paragraph::with_runs(render_runs(line.content(), true, Some(p.subsection_pt)))
                    .with_spacing(p.subsection_before, p.subsection_after)
            }
            LineKind::Bullet => Paragraph::with_runs(render_runs(line.content(), false, None))
                .with_spacing(0.0, p.bullet_after)
                .as_list_item(ListIndent {
                    left: p.bullet_indent,
                    hanging: p.bullet_hanging,
                }),
            LineKind::Paragraph => self.body_paragraph(line.content()),
            LineKind::Title | LineKind::Blank | LineKind::HorizontalRule => return,
        };
        self.doc.add_paragraph(paragraph);
    }

    fn body_paragraph(&self, text: &str) -> Paragraph {
        Paragraph::with_runs(render_runs(text, false, None))
            .with_spacing(0.0, self.profile.paragraph_after)
    }

    /// Leave the header block, emitting whatever it buffered.
    fn flush(&mut self) {
        self.state = HeaderState::Scanning;
        if self.pending.is_empty() {
            return;
        }
        let pending = std::mem::take(&mut self.pending);

        let contacts = ContactLine::collect(&pending);
        if contacts.is_empty() {
            for text in pending {
                let paragraph = self.body_paragraph(text);
                self.doc.add_paragraph(paragraph);
            }
            return;
        }

        let location = pending.iter().find(|text| !has_contact_shape(text));
        if let Some(location) = location {
            let paragraph = self.body_paragraph(location);
            self.doc.add_paragraph(paragraph);
        }
        let paragraph =
            Paragraph::with_runs(contacts.runs()).with_spacing(0.0, self.profile.paragraph_after);
        self.doc.add_paragraph(paragraph);
    }
}

/// Classified contact tokens from a header block.
#[derive(Debug, Default)]
struct ContactLine<'a> {
    emails: Vec<Token<'a>>,
    phones: Vec<Token<'a>>,
    linkedin: Vec<Token<'a>>,
    github: Vec<Token<'a>>,
    links: Vec<Token<'a>>,
}

impl<'a> ContactLine<'a> {
    fn collect(lines: &[&'a str]) -> Self {
        let mut contacts = Self::default();
        for token in lines.iter().flat_map(|&line| tokens(line)) {
            let bucket = match token.kind {
                TokenKind::Email => &mut contacts.emails,
                TokenKind::Phone => &mut contacts.phones,
                TokenKind::Url => match UrlKind::of(token.text) {
                    UrlKind::LinkedIn => &mut contacts.linkedin,
                    UrlKind::GitHub => &mut contacts.github,
                    UrlKind::Other => &mut contacts.links,
                },
            };
            bucket.push(token);
        }
        contacts
    }

    fn is_empty(&self) -> bool {
        self.ordered().next().is_none()
    }

    fn ordered(&self) -> impl Iterator<Item = &Token<'a>> {
        self.emails
            .iter()
            .chain(&self.phones)
            .chain(&self.linkedin)
            .chain(&self.github)
            .chain(&self.links)
    }

    fn runs(&self) -> Vec<TextRun> {
        let mut runs = Vec::new();
        for (i, token) in self.ordered().enumerate() {
            if i > 0 {
                runs.push(TextRun::new(CONTACT_SEPARATOR));
            }
            let label = match token.kind {
                TokenKind::Url => UrlKind::of(token.text).label().unwrap_or(token.text),
                TokenKind::Email | TokenKind::Phone => token.text,
            };
            runs.push(TextRun::new(label).with_link(token.target()));
        }
        runs
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UrlKind {
    LinkedIn,
    GitHub,
    Other,
}

impl UrlKind {
    fn of(url: &str) -> Self {
        let host = host_of(url).to_ascii_lowercase();
        if host.contains("linkedin") {
            UrlKind::LinkedIn
        } else if host.contains("github") {
            UrlKind::GitHub
        } else {
            UrlKind::Other
        }
    }

    fn label(self) -> Option<&'static str> {
        match self {
            UrlKind::LinkedIn => Some("LinkedIn"),
            UrlKind::GitHub => Some("GitHub"),
            UrlKind::Other => None,
        }
    }
}

fn host_of(url: &str) -> &str {
    let rest = url.split_once("://").map_or(url, |(_, rest)| rest);
    rest.split('/').next().unwrap_or(rest)
}
