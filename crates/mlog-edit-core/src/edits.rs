//! Atomic edit groups.
//!
//! Every engine operation reports its document mutation as one [`EditGroup`]:
//! an ordered set of [`TextEdit`]s plus before/after character counts. The
//! group is the undo-as-one-step bracket - a host editor feeds it to its own
//! undo stack so a multi-edit operation (block comment toggle, line move)
//! undoes as a single step, and incremental consumers (highlighting,
//! completion vocabulary) read it instead of diffing old/new text.
//!
//! Edits are listed in ascending `start` order with offsets in **pre-group**
//! coordinates. Appliers must walk the list in reverse (highest start first)
//! so that earlier offsets stay valid; [`EditGroup::map_offset`] maps a
//! pre-group offset to its post-group location.

/// A single text edit expressed in pre-group character offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    /// Start character offset of the edit.
    pub start: usize,
    /// Exact deleted text (may be empty).
    pub deleted_text: String,
    /// Exact inserted text (may be empty).
    pub inserted_text: String,
}

impl TextEdit {
    /// Create an insertion edit.
    pub fn insert(start: usize, text: impl Into<String>) -> Self {
        Self {
            start,
            deleted_text: String::new(),
            inserted_text: text.into(),
        }
    }

    /// Create a deletion edit.
    pub fn delete(start: usize, deleted: impl Into<String>) -> Self {
        Self {
            start,
            deleted_text: deleted.into(),
            inserted_text: String::new(),
        }
    }

    /// Create a replacement edit.
    pub fn replace(start: usize, deleted: impl Into<String>, inserted: impl Into<String>) -> Self {
        Self {
            start,
            deleted_text: deleted.into(),
            inserted_text: inserted.into(),
        }
    }

    /// Length of `deleted_text` in characters.
    pub fn deleted_len(&self) -> usize {
        self.deleted_text.chars().count()
    }

    /// Length of `inserted_text` in characters.
    pub fn inserted_len(&self) -> usize {
        self.inserted_text.chars().count()
    }

    /// Exclusive end offset of the deleted range in pre-group coordinates.
    pub fn end(&self) -> usize {
        self.start + self.deleted_len()
    }
}

/// An atomic, undo-as-one-step group of document mutations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditGroup {
    /// Edits in ascending pre-group start order.
    pub edits: Vec<TextEdit>,
    /// Character count before the group was applied.
    pub before_char_count: usize,
    /// Character count after the group was applied.
    pub after_char_count: usize,
}

impl EditGroup {
    /// An empty group (the no-op outcome).
    pub fn empty(char_count: usize) -> Self {
        Self {
            edits: Vec::new(),
            before_char_count: char_count,
            after_char_count: char_count,
        }
    }

    /// Returns `true` if this group contains no edits (the document is
    /// unchanged).
    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    /// Map a pre-group character offset to its post-group location.
    ///
    /// Positions at an insertion point move past the inserted text; positions
    /// inside a deleted range clamp to the deletion start.
    pub fn map_offset(&self, offset: usize) -> usize {
        let mut shift: isize = 0;
        for edit in &self.edits {
            if offset < edit.start {
                break;
            }
            if offset < edit.end() {
                return (edit.start as isize + shift) as usize;
            }
            shift += edit.inserted_len() as isize - edit.deleted_len() as isize;
        }
        (offset as isize + shift) as usize
    }
}
