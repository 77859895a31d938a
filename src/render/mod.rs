//! Rendering: formatting profiles, document assembly and DOCX output.

mod assembler;
pub mod docx;
mod options;

pub use assembler::{assemble, CONTACT_SEPARATOR};
pub use docx::{to_docx_bytes, write_docx};
pub use options::{default_profiles, FormatProfile};
