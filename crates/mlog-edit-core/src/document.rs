//! Line-oriented document model.
//!
//! A [`Document`] is an ordered sequence of text lines over one flattened
//! character stream, with `'\n'` as the single-character line terminator. All
//! public offsets are **character offsets** (Unicode scalar values), never
//! bytes. The rope keeps line access and edits at O(log n) for large scripts.
//!
//! Invariant: the line count is always at least 1 - an empty document is one
//! empty line, and `N` terminators yield `N + 1` lines.

use std::ops::Range;

use ropey::Rope;
use unicode_segmentation::UnicodeSegmentation;

use crate::selection::Position;

/// The in-memory document being edited.
#[derive(Debug, Clone)]
pub struct Document {
    rope: Rope,
}

impl Document {
    /// Create an empty document (one empty line).
    pub fn new() -> Self {
        Self { rope: Rope::new() }
    }

    /// Create a document from initial text.
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }

    /// Total character count of the flattened stream (terminators included).
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Total line count (always >= 1).
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// The whole document as a `String`.
    pub fn get_text(&self) -> String {
        self.rope.to_string()
    }

    /// Text of the given line, without its terminator.
    ///
    /// Out-of-range lines read as empty.
    pub fn line_text(&self, line: usize) -> String {
        if line >= self.rope.len_lines() {
            return String::new();
        }
        let mut text = self.rope.line(line).to_string();
        if text.ends_with('\n') {
            text.pop();
        }
        text
    }

    /// Character offset of the start of the given line.
    pub fn line_start(&self, line: usize) -> usize {
        let line = line.min(self.rope.len_lines().saturating_sub(1));
        self.rope.line_to_char(line)
    }

    /// Length of the given line in characters, excluding the terminator.
    pub fn line_len(&self, line: usize) -> usize {
        if line >= self.rope.len_lines() {
            return 0;
        }
        let slice = self.rope.line(line);
        let mut len = slice.len_chars();
        if len > 0 && slice.char(len - 1) == '\n' {
            len -= 1;
        }
        len
    }

    /// Character offset of the end of the given line (just before its
    /// terminator, or the end of the document for the last line).
    pub fn line_end(&self, line: usize) -> usize {
        self.line_start(line) + self.line_len(line)
    }

    /// Line index containing the given character offset.
    ///
    /// A line's terminator belongs to that line; `offset == len_chars()` maps
    /// to the last line.
    pub fn line_of(&self, offset: usize) -> usize {
        let offset = offset.min(self.rope.len_chars());
        self.rope.char_to_line(offset)
    }

    /// Convert a character offset to a `(line, column)` position.
    pub fn position_of(&self, offset: usize) -> Position {
        let offset = offset.min(self.rope.len_chars());
        let line = self.rope.char_to_line(offset);
        Position::new(line, offset - self.rope.line_to_char(line))
    }

    /// Convert a `(line, column)` position to a character offset.
    ///
    /// The column is clamped to the line length; lines past the end map to the
    /// end of the document.
    pub fn offset_of(&self, pos: Position) -> usize {
        if pos.line >= self.rope.len_lines() {
            return self.rope.len_chars();
        }
        self.line_start(pos.line) + pos.column.min(self.line_len(pos.line))
    }

    /// Text of a character range.
    pub fn slice(&self, range: Range<usize>) -> String {
        let end = range.end.min(self.rope.len_chars());
        let start = range.start.min(end);
        self.rope.slice(start..end).to_string()
    }

    /// Insert text at a character offset.
    pub fn insert(&mut self, offset: usize, text: &str) {
        let offset = offset.min(self.rope.len_chars());
        self.rope.insert(offset, text);
    }

    /// Remove a character range, returning the removed text.
    pub fn remove(&mut self, range: Range<usize>) -> String {
        let end = range.end.min(self.rope.len_chars());
        let start = range.start.min(end);
        let removed = self.rope.slice(start..end).to_string();
        self.rope.remove(start..end);
        removed
    }

    /// Replace a character range with new text, returning the replaced text.
    pub fn replace(&mut self, range: Range<usize>, text: &str) -> String {
        let removed = self.remove(range.clone());
        self.insert(range.start, text);
        removed
    }

    /// The alphanumeric word containing (or ending at) the given offset, if any.
    ///
    /// Completion flows use this as the "text under cursor" prefix.
    pub fn word_at(&self, offset: usize) -> Option<String> {
        let pos = self.position_of(offset);
        let line = self.line_text(pos.line);
        let byte_col = line
            .char_indices()
            .nth(pos.column)
            .map(|(b, _)| b)
            .unwrap_or(line.len());

        line.split_word_bound_indices()
            .find(|(start, word)| {
                let end = start + word.len();
                // A caret at a word's end still refers to that word.
                *start < byte_col && byte_col <= end || (*start == byte_col && byte_col < end)
            })
            .map(|(_, word)| word)
            .filter(|word| word.chars().any(char::is_alphanumeric))
            .map(str::to_string)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_is_one_line() {
        let doc = Document::new();
        assert_eq!(doc.line_count(), 1);
        assert_eq!(doc.len_chars(), 0);
        assert_eq!(doc.line_text(0), "");
    }

    #[test]
    fn test_trailing_terminator_yields_extra_line() {
        let doc = Document::from_text("a\nb\n");
        assert_eq!(doc.line_count(), 3);
        assert_eq!(doc.line_text(2), "");
    }

    #[test]
    fn test_line_offsets() {
        let doc = Document::from_text("foo\nbar\nbaz");
        assert_eq!(doc.line_start(0), 0);
        assert_eq!(doc.line_start(1), 4);
        assert_eq!(doc.line_start(2), 8);
        assert_eq!(doc.line_end(0), 3);
        assert_eq!(doc.line_end(2), 11);
        assert_eq!(doc.line_len(1), 3);
    }

    #[test]
    fn test_terminator_belongs_to_its_line() {
        let doc = Document::from_text("foo\nbar");
        assert_eq!(doc.line_of(3), 0);
        assert_eq!(doc.line_of(4), 1);
        assert_eq!(doc.line_of(7), 1);
    }

    #[test]
    fn test_position_round_trip() {
        let doc = Document::from_text("set x 10\nprint x");
        let pos = doc.position_of(11);
        assert_eq!(pos, Position::new(1, 2));
        assert_eq!(doc.offset_of(pos), 11);
    }

    #[test]
    fn test_offset_of_clamps_column() {
        let doc = Document::from_text("ab\ncd");
        assert_eq!(doc.offset_of(Position::new(0, 99)), 2);
        assert_eq!(doc.offset_of(Position::new(9, 0)), 5);
    }

    #[test]
    fn test_replace_returns_old_text() {
        let mut doc = Document::from_text("set x 10");
        let old = doc.replace(4..5, "y");
        assert_eq!(old, "x");
        assert_eq!(doc.get_text(), "set y 10");
    }

    #[test]
    fn test_char_offsets_not_bytes() {
        let mut doc = Document::from_text("héllo\nwörld");
        assert_eq!(doc.line_start(1), 6);
        doc.insert(6, "x");
        assert_eq!(doc.line_text(1), "xwörld");
    }

    #[test]
    fn test_word_at() {
        let doc = Document::from_text("ucontrol move 10 20");
        assert_eq!(doc.word_at(0).as_deref(), Some("ucontrol"));
        assert_eq!(doc.word_at(8).as_deref(), Some("ucontrol"));
        assert_eq!(doc.word_at(10).as_deref(), Some("move"));
        // Caret in the gap between words.
        assert_eq!(doc.word_at(13), Some("move".to_string()));
    }
}
