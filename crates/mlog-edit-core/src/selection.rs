//! Cursor and selection model.
//!
//! A [`Selection`] is a pair of absolute character offsets into the document's
//! flattened character stream. The pair is *directed* (`anchor` is where the
//! selection started, `active` is the moving end); the engine normalizes to
//! `(start, end)` with `start <= end` where direction does not matter.

use std::cmp::Ordering;

/// Logical position coordinates (line and column, both 0-based, in characters).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// Zero-based logical line index.
    pub line: usize,
    /// Zero-based column in characters within the logical line.
    pub column: usize,
}

impl Position {
    /// Create a new logical position.
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        self.line
            .cmp(&other.line)
            .then_with(|| self.column.cmp(&other.column))
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Selection direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionDirection {
    /// Anchor sits at or before the active end.
    Forward,
    /// Active end sits before the anchor.
    Backward,
}

/// A selection over the flattened character stream.
///
/// `anchor == active` denotes a caret (no selection).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    /// Fixed end of the selection (where it was started).
    pub anchor: usize,
    /// Moving end of the selection (where the cursor is).
    pub active: usize,
}

impl Selection {
    /// Create a selection from anchor and active offsets.
    pub fn new(anchor: usize, active: usize) -> Self {
        Self { anchor, active }
    }

    /// Create a caret at `offset`.
    pub fn caret(offset: usize) -> Self {
        Self {
            anchor: offset,
            active: offset,
        }
    }

    /// Normalized start offset (`min(anchor, active)`).
    pub fn start(&self) -> usize {
        self.anchor.min(self.active)
    }

    /// Normalized end offset (`max(anchor, active)`).
    pub fn end(&self) -> usize {
        self.anchor.max(self.active)
    }

    /// Selection length in characters.
    pub fn len(&self) -> usize {
        self.end() - self.start()
    }

    /// Returns `true` if this is a caret (no selected text).
    pub fn is_caret(&self) -> bool {
        self.anchor == self.active
    }

    /// Derived direction of this selection.
    pub fn direction(&self) -> SelectionDirection {
        if self.anchor <= self.active {
            SelectionDirection::Forward
        } else {
            SelectionDirection::Backward
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_ordering() {
        assert!(Position::new(0, 9) < Position::new(1, 0));
        assert!(Position::new(2, 3) < Position::new(2, 4));
        assert_eq!(Position::new(1, 1), Position::new(1, 1));
    }

    #[test]
    fn test_caret() {
        let caret = Selection::caret(5);
        assert!(caret.is_caret());
        assert_eq!(caret.len(), 0);
        assert_eq!(caret.direction(), SelectionDirection::Forward);
    }

    #[test]
    fn test_backward_selection_normalizes() {
        let sel = Selection::new(10, 4);
        assert_eq!(sel.start(), 4);
        assert_eq!(sel.end(), 10);
        assert_eq!(sel.len(), 6);
        assert_eq!(sel.direction(), SelectionDirection::Backward);
    }
}
