//! Section assembler.
//!
//! Builds the full document operation batch from named sections: a heading
//! per section followed by its compiled body, with the cursor carried across
//! section boundaries so no section references another section's indices.

use crate::compose::compiler::compile_markdown;
use crate::compose::ops::{EditOperation, Section};

/// First valid body index in a freshly created document.
pub const DOCUMENT_BODY_START: usize = 1;

/// Assemble the operation batch for a whole document.
///
/// Sections render in the order supplied. A section with an empty body is
/// skipped entirely; no dangling heading is emitted for it.
pub fn assemble_sections(sections: &[Section]) -> Vec<EditOperation> {
    let mut operations = Vec::new();
    let mut cursor = DOCUMENT_BODY_START;

    for section in sections {
        if section.body.is_empty() {
            continue;
        }

        let heading = format!("{}\n", section.title);
        let heading_len = heading.chars().count();
        // Heading style and bold cover the title only; the newline belongs
        // to the paragraph but not to the styled span.
        operations.push(EditOperation::InsertText { index: cursor, text: heading });
        operations.push(EditOperation::SetHeading {
            start: cursor,
            end: cursor + heading_len - 1,
        });
        operations.push(EditOperation::SetCharacterStyle {
            start: cursor,
            end: cursor + heading_len - 1,
            bold: true,
            italic: false,
        });
        cursor += heading_len;

        let block = compile_markdown(&section.body, cursor);
        operations.extend(block.operations);
        cursor = block.end_index;

        if !section.body.ends_with('\n') {
            operations.push(EditOperation::InsertText { index: cursor, text: "\n".to_string() });
            cursor += 1;
        }
    }

    operations
}
