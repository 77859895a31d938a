//! Paragraph and text-level types.

use serde::{Deserialize, Serialize};

/// A paragraph of text content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Text runs in the paragraph
    pub content: Vec<TextRun>,

    /// Paragraph style
    pub style: ParagraphStyle,
}

impl Paragraph {
    /// Create a new empty paragraph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a paragraph from a list of runs.
    pub fn with_runs(content: Vec<TextRun>) -> Self {
        Self {
            content,
            style: ParagraphStyle::default(),
        }
    }

    /// Add a styled text run.
    pub fn add_run(&mut self, run: TextRun) {
        self.content.push(run);
    }

    /// Set spacing before and after, in points.
    pub fn with_spacing(mut self, before: f32, after: f32) -> Self {
        self.style.space_before = Some(before);
        self.style.space_after = Some(after);
        self
    }

    /// Make this paragraph a bulleted list item.
    pub fn as_list_item(mut self, indent: ListIndent) -> Self {
        self.style.list = Some(indent);
        self
    }

    /// Get plain text content of the paragraph.
    pub fn plain_text(&self) -> String {
        self.content.iter().map(|run| run.text.as_str()).collect()
    }

    /// Check if the paragraph is empty.
    pub fn is_empty(&self) -> bool {
        self.plain_text().trim().is_empty()
    }

    /// Check if this is a list item.
    pub fn is_list_item(&self) -> bool {
        self.style.list.is_some()
    }

    /// Iterate over the link targets in this paragraph.
    pub fn links(&self) -> impl Iterator<Item = &str> {
        self.content.iter().filter_map(|run| run.link.as_deref())
    }
}

/// A run of text with consistent styling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    /// The displayed text
    pub text: String,

    /// Text styling
    pub style: TextStyle,

    /// Hyperlink target (`mailto:`, `tel:` or URL)
    pub link: Option<String>,
}

impl TextRun {
    /// Create a new text run with default style.
    pub fn new(text: impl Into<String>) -> Self {
        Self::styled(text, TextStyle::default())
    }

    /// Create a text run with the given style.
    pub fn styled(text: impl Into<String>, style: TextStyle) -> Self {
        Self {
            text: text.into(),
            style,
            link: None,
        }
    }

    /// Create a bold text run.
    pub fn bold(text: impl Into<String>) -> Self {
        Self::styled(
            text,
            TextStyle {
                bold: true,
                ..Default::default()
            },
        )
    }

    /// Attach a hyperlink target.
    pub fn with_link(mut self, target: impl Into<String>) -> Self {
        self.link = Some(target.into());
        self
    }

    /// Set an explicit font size in points.
    pub fn with_size(mut self, size: f32) -> Self {
        self.style.font_size = Some(size);
        self
    }

    /// Check if this run is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Text styling properties.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Bold text
    pub bold: bool,

    /// Font size in points; the document default applies when unset
    pub font_size: Option<f32>,
}

/// Paragraph styling properties.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParagraphStyle {
    /// Space before paragraph in points
    pub space_before: Option<f32>,

    /// Space after paragraph in points
    pub space_after: Option<f32>,

    /// Bullet indentation if this is a list item
    pub list: Option<ListIndent>,
}

/// Hanging indent of a bulleted list item, in inches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ListIndent {
    /// Left indent of the text block
    pub left: f32,

    /// How far the first line (the bullet) hangs back from `left`
    pub hanging: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraph_plain_text() {
        let mut p = Paragraph::new();
        p.add_run(TextRun::new("Hello "));
        p.add_run(TextRun::bold("world"));
        p.add_run(TextRun::new("!"));

        assert_eq!(p.plain_text(), "Hello world!");
    }

    #[test]
    fn test_links() {
        let p = Paragraph::with_runs(vec![
            TextRun::new("mail "),
            TextRun::new("a@b.com").with_link("mailto:a@b.com"),
        ]);
        assert_eq!(p.links().collect::<Vec<_>>(), vec!["mailto:a@b.com"]);
    }

    #[test]
    fn test_list_item() {
        let p = Paragraph::with_runs(vec![TextRun::new("item")]).as_list_item(ListIndent {
            left: 0.25,
            hanging: 0.25,
        });
        assert!(p.is_list_item());
        assert!(!p.is_empty());
    }
}
