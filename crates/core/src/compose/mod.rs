//! Markdown → rich-text edit-operation compiler.
//!
//! The pipeline runs leaf to root: [`tokenize_inline`] splits one line into
//! styled runs, [`compile_markdown`] walks a text block while threading the
//! insertion cursor, and [`assemble_sections`] composes a whole document
//! from named sections. Everything here is pure computation; the only side
//! effect in an export is the final submission of the batch.

mod assemble;
mod compiler;
mod inline;
mod ops;

pub use assemble::{assemble_sections, DOCUMENT_BODY_START};
pub use compiler::{compile_markdown, CompiledBlock};
pub use inline::{tokenize_inline, TextRun};
pub use ops::{EditOperation, Section};
