//! Document-level types.

use super::Paragraph;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A rich-text document ready to be written out.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    /// Document metadata (title, creation time)
    pub metadata: Metadata,

    /// Page size and margins
    pub page: PageSetup,

    /// Default font family
    pub font_family: String,

    /// Default font size in points
    pub font_size: f32,

    /// Body content in reading order
    pub paragraphs: Vec<Paragraph>,
}

impl Document {
    /// Create a new empty document.
    pub fn new(page: PageSetup, font_family: impl Into<String>, font_size: f32) -> Self {
        Self {
            metadata: Metadata::default(),
            page,
            font_family: font_family.into(),
            font_size,
            paragraphs: Vec::new(),
        }
    }

    /// Append a paragraph.
    pub fn add_paragraph(&mut self, paragraph: Paragraph) {
        self.paragraphs.push(paragraph);
    }

    /// Check if the document has any content.
    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }

    /// Get plain text content of the entire document.
    pub fn plain_text(&self) -> String {
        self.paragraphs
            .iter()
            .map(Paragraph::plain_text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Document metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Metadata {
    /// Document title
    pub title: Option<String>,

    /// Creation date
    pub created: Option<DateTime<Utc>>,
}

/// Page dimensions and margins, in inches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSetup {
    /// Page width
    pub width: f32,

    /// Page height
    pub height: f32,

    /// Margin applied to all four sides
    pub margin: f32,
}

impl PageSetup {
    /// US Letter with uniform margins.
    pub fn letter(margin: f32) -> Self {
        Self {
            width: 8.5,
            height: 11.0,
            margin,
        }
    }
}

impl Default for PageSetup {
    fn default() -> Self {
        Self::letter(1.0)
    }
}
