//! Rich-text document model.
//!
//! This is the intermediate representation between the Markdown line
//! sequence and the DOCX writer: page setup, default font, and a flat list
//! of paragraphs made of styled (optionally linked) text runs.

mod document;
mod paragraph;

pub use document::{Document, Metadata, PageSetup};
pub use paragraph::{ListIndent, Paragraph, ParagraphStyle, TextRun, TextStyle};
