//! Markdown parsing: the line model and inline span scanning.

pub mod inline;
mod lines;

pub use inline::{render_runs, Segment, Token, TokenKind};
pub use lines::{join, normalize, parse, strip_bold, Line, LineKind};
