//! Rule-based sentence segmentation.

use super::SentenceSpan;

const TERMINATORS: &[char] = &['.', '!', '?', '…'];
const CLOSERS: &[char] = &['"', '\'', ')', ']', '»', '”', '’'];

/// Splits text into sentences.
///
/// A sentence ends after a run of terminators (and closing quotes or
/// brackets) followed by whitespace or the end of text, or at a blank line.
/// A period after a single capital letter is taken as an initial.
#[derive(Debug, Clone, Copy, Default)]
pub struct SentenceSegmenter;

impl SentenceSegmenter {
    pub fn new() -> Self {
        Self
    }

    /// Sentence spans of `text`, trimmed of surrounding whitespace.
    pub fn segment(&self, text: &str) -> Vec<SentenceSpan> {
        let mut spans = Vec::new();
        let mut start = 0;
        let mut chars = text.char_indices().peekable();

        while let Some((pos, c)) = chars.next() {
            let boundary = if TERMINATORS.contains(&c) {
                let mut end = pos + c.len_utf8();
                while let Some(&(p, next)) = chars.peek() {
                    if TERMINATORS.contains(&next) || CLOSERS.contains(&next) {
                        end = p + next.len_utf8();
                        chars.next();
                    } else {
                        break;
                    }
                }
                let at_break = chars.peek().map_or(true, |&(_, n)| n.is_whitespace());
                let initial = c == '.' && ends_with_initial(&text[start..pos]);
                (at_break && !initial).then_some(end)
            } else if c == '\n' {
                let rest = text[pos + 1..].trim_start_matches([' ', '\t', '\r']);
                rest.starts_with('\n').then_some(pos)
            } else {
                None
            };

            if let Some(end) = boundary {
                push_span(text, start, end, &mut spans);
                start = end;
            }
        }

        push_span(text, start, text.len(), &mut spans);
        spans
    }
}

fn ends_with_initial(before: &str) -> bool {
    let word = before.rsplit(char::is_whitespace).next().unwrap_or("");
    let mut letters = word.chars();
    matches!((letters.next(), letters.next()), (Some(c), None) if c.is_uppercase())
}

fn push_span(text: &str, start: usize, end: usize, spans: &mut Vec<SentenceSpan>) {
    let slice = &text[start..end];
    let trimmed = slice.trim();
    if trimmed.is_empty() {
        return;
    }
    let start = start + (slice.len() - slice.trim_start().len());
    spans.push(SentenceSpan {
        start,
        end: start + trimmed.len(),
        text: trimmed.to_string(),
    });
}
