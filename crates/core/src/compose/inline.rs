//! Inline markdown tokenizer.
//!
//! Splits one line of agent text into plain and styled runs. The dialect is
//! deliberately tiny: `**bold**`, `*italic*` or `_italic_`, nothing nested.
//! Anything that does not form a well-delimited span degrades to literal
//! text; the tokenizer has no failure mode.

/// A maximal span of text sharing one styling combination.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextRun {
    pub content: String,
    pub bold: bool,
    pub italic: bool,
}

impl TextRun {
    pub fn plain(content: impl Into<String>) -> Self {
        Self { content: content.into(), bold: false, italic: false }
    }

    pub fn bold(content: impl Into<String>) -> Self {
        Self { content: content.into(), bold: true, italic: false }
    }

    pub fn italic(content: impl Into<String>) -> Self {
        Self { content: content.into(), bold: false, italic: true }
    }

    /// Length in characters, which is the unit every document index uses.
    pub fn char_len(&self) -> usize {
        self.content.chars().count()
    }
}

enum SpanMatch {
    /// A well-formed delimited span with non-empty content.
    Styled { content: String, bold: bool, width: usize },
    /// A matched delimiter pair with empty content; the delimiters stay as
    /// visible text.
    Literal { width: usize },
}

/// Tokenize a single line (newline already stripped) into runs.
///
/// The scan is an explicit left-to-right pass with literal delimiter
/// matching: at each position `**...**` is tried before `*...*` / `_..._`,
/// which makes the bold-over-italic precedence a rule rather than an
/// accident of pattern ordering. Spans never overlap and never nest.
pub fn tokenize_inline(text: &str) -> Vec<TextRun> {
    let chars: Vec<char> = text.chars().collect();
    let mut runs: Vec<TextRun> = Vec::new();
    let mut plain = String::new();
    let mut at = 0;

    while at < chars.len() {
        match match_span(&chars, at) {
            Some(SpanMatch::Styled { content, bold, width }) => {
                flush_plain(&mut runs, &mut plain);
                runs.push(TextRun { content, bold, italic: !bold });
                at += width;
            }
            Some(SpanMatch::Literal { width }) => {
                plain.extend(&chars[at..at + width]);
                at += width;
            }
            None => {
                plain.push(chars[at]);
                at += 1;
            }
        }
    }

    flush_plain(&mut runs, &mut plain);
    runs
}

fn flush_plain(runs: &mut Vec<TextRun>, plain: &mut String) {
    if !plain.is_empty() {
        runs.push(TextRun::plain(std::mem::take(plain)));
    }
}

fn match_span(chars: &[char], at: usize) -> Option<SpanMatch> {
    match chars.get(at)? {
        '*' if chars.get(at + 1) == Some(&'*') => match find_double_star(chars, at + 2) {
            Some(close) => {
                let content: String = chars[at + 2..close].iter().collect();
                let width = close + 2 - at;
                if content.is_empty() {
                    Some(SpanMatch::Literal { width })
                } else {
                    Some(SpanMatch::Styled { content, bold: true, width })
                }
            }
            // No closing `**`: fall back to the single-star rule, which
            // consumes the opener pair as literal text.
            None => match_single(chars, at, '*'),
        },
        '*' => match_single(chars, at, '*'),
        '_' => match_single(chars, at, '_'),
        _ => None,
    }
}

fn find_double_star(chars: &[char], from: usize) -> Option<usize> {
    (from..chars.len().saturating_sub(1))
        .find(|&j| chars[j] == '*' && chars[j + 1] == '*')
}

fn match_single(chars: &[char], at: usize, delim: char) -> Option<SpanMatch> {
    let close = chars[at + 1..].iter().position(|&c| c == delim)? + at + 1;
    let content: String = chars[at + 1..close].iter().collect();
    let width = close + 1 - at;
    if content.is_empty() {
        Some(SpanMatch::Literal { width })
    } else {
        Some(SpanMatch::Styled { content, bold: false, width })
    }
}
