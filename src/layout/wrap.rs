//! Greedy word wrapping.

use std::iter::Peekable;
use std::str::SplitWhitespace;

use crate::fonts::TextMeasure;

/// Lazily yields the lines of a greedily wrapped paragraph.
///
/// Each line holds as many whole words as fit within `max_width` when
/// measured at `size`. Words are joined by single spaces and never split;
/// a word wider than `max_width` forms a line of its own.
pub struct WrappedLines<'a, M: TextMeasure + ?Sized> {
    words: Peekable<SplitWhitespace<'a>>,
    measure: &'a M,
    size: f32,
    max_width: f32,
}

/// Wrap `text` to `max_width` points under `measure` at `size` points.
///
/// Empty or whitespace-only text yields no lines.
pub fn wrap_words<'a, M: TextMeasure + ?Sized>(
    text: &'a str,
    measure: &'a M,
    size: f32,
    max_width: f32,
) -> WrappedLines<'a, M> {
    WrappedLines {
        words: text.split_whitespace().peekable(),
        measure,
        size,
        max_width,
    }
}

impl<'a, M: TextMeasure + ?Sized> Iterator for WrappedLines<'a, M> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let mut line = self.words.next()?.to_string();
        while let Some(word) = self.words.peek() {
            let candidate = format!("{} {}", line, word);
            if self.measure.text_width(&candidate, self.size) > self.max_width {
                break;
            }
            line = candidate;
            self.words.next();
        }
        Some(line)
    }
}
