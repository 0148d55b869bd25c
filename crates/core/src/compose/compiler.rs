//! Document cursor compiler.
//!
//! Walks a multi-line block of agent text and turns it into an ordered
//! [`EditOperation`] sequence against a rich-text document. The only state is
//! a single insertion cursor threaded through the pass: every insert advances
//! it, and every emitted index is derived from its value at emission time.
//! Downstream must apply the batch in emission order; the backing service is
//! positional and out-of-order application corrupts offsets.

use crate::compose::inline::tokenize_inline;
use crate::compose::ops::EditOperation;

/// Result of one compilation pass: the operations plus the cursor value
/// after the final insert, i.e. where the next insertion would land.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompiledBlock {
    pub operations: Vec<EditOperation>,
    pub end_index: usize,
}

/// Compile a markdown-flavored text block into edit operations, starting at
/// `start_index`.
///
/// Pure and deterministic: the same input and start index always produce the
/// same operation sequence, so an enclosing export may be retried wholesale.
pub fn compile_markdown(text: &str, start_index: usize) -> CompiledBlock {
    let mut operations = Vec::new();
    let mut cursor = start_index;

    for (line, has_newline) in lines_with_endings(text) {
        compile_line(line, has_newline, &mut operations, &mut cursor);
    }

    CompiledBlock { operations, end_index: cursor }
}

fn compile_line(
    line: &str,
    has_newline: bool,
    operations: &mut Vec<EditOperation>,
    cursor: &mut usize,
) {
    let line_start = *cursor;
    let (is_bullet, inline_text) = strip_bullet_marker(line);

    for run in tokenize_inline(inline_text) {
        let len = run.char_len();
        operations.push(EditOperation::InsertText { index: *cursor, text: run.content });
        operations.push(EditOperation::SetCharacterStyle {
            start: *cursor,
            end: *cursor + len,
            bold: run.bold,
            italic: run.italic,
        });
        *cursor += len;
    }

    if has_newline {
        push_newline(operations, cursor);
    } else if is_bullet && inline_text.is_empty() {
        // Marker-only final line: a paragraph style cannot apply to a
        // zero-length range, so the paragraph terminator is synthesized.
        push_newline(operations, cursor);
    }

    if is_bullet && *cursor > line_start {
        operations.push(EditOperation::SetParagraphBullet { start: line_start, end: *cursor });
    }
}

fn push_newline(operations: &mut Vec<EditOperation>, cursor: &mut usize) {
    operations.push(EditOperation::InsertText { index: *cursor, text: "\n".to_string() });
    *cursor += 1;
}

/// A line is a bullet line iff it starts with one asterisk followed by
/// whitespace. The marker and any following whitespace are stripped before
/// inline tokenization; `**bold**` at line start is not a bullet.
fn strip_bullet_marker(line: &str) -> (bool, &str) {
    match line.strip_prefix('*') {
        Some(rest) if rest.starts_with(char::is_whitespace) => (true, rest.trim_start()),
        _ => (false, line),
    }
}

/// Split into `(content, had_newline)` pairs, tolerating CRLF endings.
fn lines_with_endings(text: &str) -> impl Iterator<Item = (&str, bool)> {
    text.split_inclusive('\n').map(|piece| match piece.strip_suffix('\n') {
        Some(rest) => (rest.strip_suffix('\r').unwrap_or(rest), true),
        None => (piece, false),
    })
}

#[cfg(test)]
mod tests {
    use super::{compile_markdown, CompiledBlock};
    use crate::compose::ops::EditOperation;

    fn insert(index: usize, text: &str) -> EditOperation {
        EditOperation::InsertText { index, text: text.to_string() }
    }

    fn style(start: usize, end: usize, bold: bool, italic: bool) -> EditOperation {
        EditOperation::SetCharacterStyle { start, end, bold, italic }
    }

    #[test]
    fn plain_lines_insert_text_and_newlines_only() {
        let CompiledBlock { operations, end_index } = compile_markdown("one\ntwo\n", 1);

        assert_eq!(
            operations,
            vec![
                insert(1, "one"),
                style(1, 4, false, false),
                insert(4, "\n"),
                insert(5, "two"),
                style(5, 8, false, false),
                insert(8, "\n"),
            ]
        );
        assert_eq!(end_index, 9);
    }

    #[test]
    fn every_plain_run_is_explicitly_unstyled() {
        let block = compile_markdown("alpha\nbeta gamma\n", 1);
        for operation in &block.operations {
            if let EditOperation::SetCharacterStyle { bold, italic, .. } = operation {
                assert!(!bold && !italic);
            }
        }
    }

    #[test]
    fn bold_label_then_plain_remainder_covers_visible_text() {
        let block = compile_markdown("**Airline:** MyAir", 1);

        assert_eq!(
            block.operations,
            vec![
                insert(1, "Airline:"),
                style(1, 9, true, false),
                insert(9, " MyAir"),
                style(9, 15, false, false),
            ]
        );
        // Ranges are contiguous and sum to the marker-stripped text length.
        assert_eq!(block.end_index - 1, "Airline: MyAir".chars().count());
    }

    #[test]
    fn bullet_lines_get_one_paragraph_range_each() {
        let block = compile_markdown("* Pool\n* Gym\n", 1);

        let bullets: Vec<(usize, usize)> = block
            .operations
            .iter()
            .filter_map(|operation| match operation {
                EditOperation::SetParagraphBullet { start, end } => Some((*start, *end)),
                _ => None,
            })
            .collect();

        // Each range spans exactly one line's text including its newline,
        // and the ranges do not overlap.
        assert_eq!(bullets, vec![(1, 6), (6, 10)]);
    }

    #[test]
    fn bullet_marker_is_stripped_before_inline_tokenization() {
        let block = compile_markdown("* **bold item**\n", 1);

        assert_eq!(
            block.operations,
            vec![
                insert(1, "bold item"),
                style(1, 10, true, false),
                insert(10, "\n"),
                EditOperation::SetParagraphBullet { start: 1, end: 11 },
            ]
        );
    }

    #[test]
    fn marker_only_last_line_still_becomes_a_paragraph() {
        let block = compile_markdown("* ", 1);

        assert_eq!(
            block.operations,
            vec![
                insert(1, "\n"),
                EditOperation::SetParagraphBullet { start: 1, end: 2 },
            ]
        );
        assert_eq!(block.end_index, 2);
    }

    #[test]
    fn final_line_without_newline_leaves_cursor_after_text() {
        let block = compile_markdown("tail", 5);
        assert_eq!(block.operations, vec![insert(5, "tail"), style(5, 9, false, false)]);
        assert_eq!(block.end_index, 9);
    }

    #[test]
    fn empty_input_emits_nothing() {
        let block = compile_markdown("", 7);
        assert!(block.operations.is_empty());
        assert_eq!(block.end_index, 7);
    }

    #[test]
    fn compilation_is_idempotent() {
        let text = "**Day 1:**\n* _Morning:_ visit the **museum**\n* Lunch\n";
        assert_eq!(compile_markdown(text, 1), compile_markdown(text, 1));
    }

    #[test]
    fn indices_never_run_ahead_of_inserted_text() {
        let text = "**Hotel:** Grand\n* Rating: _5 stars_\n* Pool\n";
        let block = compile_markdown(text, 1);

        let mut inserted_up_to = 1;
        for operation in &block.operations {
            match operation {
                EditOperation::InsertText { index, text } => {
                    assert!(*index <= inserted_up_to);
                    inserted_up_to = index + text.chars().count();
                }
                EditOperation::SetCharacterStyle { start, end, .. }
                | EditOperation::SetParagraphBullet { start, end }
                | EditOperation::SetHeading { start, end } => {
                    assert!(start < end);
                    assert!(*end <= inserted_up_to);
                }
            }
        }
        assert_eq!(block.end_index, inserted_up_to);
    }

    #[test]
    fn crlf_endings_compile_like_lf() {
        assert_eq!(
            compile_markdown("a\r\nb\r\n", 1).operations,
            compile_markdown("a\nb\n", 1).operations
        );
    }

    #[test]
    fn start_index_offsets_every_emitted_index() {
        let at_one = compile_markdown("* x\n", 1);
        let at_forty = compile_markdown("* x\n", 40);
        assert_eq!(at_forty.end_index - 40, at_one.end_index - 1);
        assert_eq!(
            at_forty.operations.first().map(EditOperation::start_index),
            Some(40)
        );
    }
}
