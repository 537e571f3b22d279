//! The line-editing engine.
//!
//! Structural, line-oriented edits over a [`Document`] + [`Selection`] pair:
//! whole-line selection normalization, line duplication (up/down), line
//! reordering (up/down, single line and multi-line selections), comment
//! toggling with mixed-state detection, and line removal.
//!
//! Every operation is a pure transform in spirit: given the current document
//! and selection it produces a mutated document, a selection that is still
//! valid over it, and one atomic [`EditGroup`] describing the change. Boundary
//! conditions (first/last line, nothing to duplicate) are **no-ops**, never
//! errors - these operations are bound to keystrokes and must stay silent at
//! the edges. The only error is a caller contract violation: a selection that
//! does not fit the document fails fast before any offset arithmetic runs.
//!
//! Offset bookkeeping is the hard part here. Operations compute every offset
//! they need against the pre-edit document, apply the whole mutation as one
//! replacement (or one ordered edit group), and only then place the selection
//! - never re-deriving line numbers between intermediate edits.

use crate::document::Document;
use crate::edits::{EditGroup, TextEdit};
use crate::selection::Selection;
use mlog_edit_lang::CommentConfig;

/// Contract violations raised by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    /// The selection does not fit inside the document.
    SelectionOutOfRange {
        /// Normalized selection start offset.
        start: usize,
        /// Normalized selection end offset.
        end: usize,
        /// Document length in characters.
        len: usize,
    },
}

impl std::fmt::Display for EditError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EditError::SelectionOutOfRange { start, end, len } => {
                write!(
                    f,
                    "selection {}..{} out of range for document of {} chars",
                    start, end, len
                )
            }
        }
    }
}

impl std::error::Error for EditError {}

/// Result of one engine operation: the selection to restore and the atomic
/// edit group that was applied (empty for a no-op).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOutcome {
    /// Selection valid over the post-edit document.
    pub selection: Selection,
    /// The applied mutation, grouped for single-step undo.
    pub group: EditGroup,
}

impl EditOutcome {
    /// Returns `true` if the document was modified.
    pub fn changed(&self) -> bool {
        !self.group.is_empty()
    }

    fn unchanged(doc: &Document, selection: Selection) -> Self {
        Self {
            selection,
            group: EditGroup::empty(doc.len_chars()),
        }
    }
}

fn validate_selection(doc: &Document, sel: Selection) -> Result<(), EditError> {
    let len = doc.len_chars();
    if sel.end() > len {
        return Err(EditError::SelectionOutOfRange {
            start: sel.start(),
            end: sel.end(),
            len,
        });
    }
    Ok(())
}

/// Expand a selection to cover full lines and return it with its length.
///
/// - A caret expands to the full line containing it (start-of-line to
///   end-of-line, terminator excluded).
/// - A real selection expands its start to start-of-line. If the end sits
///   exactly at column 0 of some line, the selection is treated as ending at
///   the *previous* line's end - a selection whose end anchor rests on a line
///   boundary must not pull in the following line.
///
/// Total over any valid selection; the enlarged text never carries a trailing
/// terminator.
pub fn enlarge_selection(doc: &Document, sel: Selection) -> (Selection, usize) {
    let (start, end) = (sel.start(), sel.end());

    if start == end {
        let line = doc.line_of(start);
        let s = doc.line_start(line);
        let e = doc.line_end(line);
        return (Selection::new(s, e), e - s);
    }

    let s = doc.line_start(doc.line_of(start));
    let mut end_line = doc.line_of(end);
    if doc.line_start(end_line) == end && end_line > 0 {
        end_line -= 1;
    }
    let e = doc.line_end(end_line);
    (Selection::new(s, e), e - s)
}

/// Apply `edits` (ascending pre-group starts) as one atomic group.
///
/// Edits run highest-start first so earlier offsets stay valid; each edit's
/// `deleted_text` is re-recorded from the document so the group is an exact
/// description of the change.
pub(crate) fn apply_edits(doc: &mut Document, edits: Vec<TextEdit>) -> EditGroup {
    let before_char_count = doc.len_chars();
    let mut edits = edits;
    for edit in edits.iter_mut().rev() {
        let deleted = doc.replace(edit.start..edit.start + edit.deleted_len(), &edit.inserted_text);
        edit.deleted_text = deleted;
    }
    EditGroup {
        edits,
        before_char_count,
        after_char_count: doc.len_chars(),
    }
}

fn apply_replace(doc: &mut Document, start: usize, end: usize, text: String) -> EditGroup {
    let before_char_count = doc.len_chars();
    let deleted = doc.replace(start..end, &text);
    EditGroup {
        edits: vec![TextEdit::replace(start, deleted, text)],
        before_char_count,
        after_char_count: doc.len_chars(),
    }
}

/// Returns `true` if enlarged-selection text has nothing worth duplicating:
/// empty, or degenerated to a bare terminator.
fn is_blank_block(text: &str) -> bool {
    text.is_empty() || text == "\n"
}

/// Duplicate the current line (or the full lines under the selection),
/// keeping the cursor on the original, upper copy.
pub fn duplicate_lines_up(doc: &mut Document, sel: Selection) -> Result<EditOutcome, EditError> {
    validate_selection(doc, sel)?;

    let (enlarged, _) = enlarge_selection(doc, sel);
    let (start, end) = (enlarged.start(), enlarged.end());
    let text = doc.slice(start..end);
    if is_blank_block(&text) {
        return Ok(EditOutcome::unchanged(doc, sel));
    }

    let group = apply_replace(doc, start, end, format!("{text}\n{text}"));
    // The copy lands below; the original span keeps its pre-edit offsets.
    Ok(EditOutcome {
        selection: Selection::new(start, end),
        group,
    })
}

/// Duplicate the current line (or the full lines under the selection),
/// moving the cursor onto the new, lower copy.
pub fn duplicate_lines_down(doc: &mut Document, sel: Selection) -> Result<EditOutcome, EditError> {
    validate_selection(doc, sel)?;

    let (enlarged, len) = enlarge_selection(doc, sel);
    let (start, end) = (enlarged.start(), enlarged.end());
    let text = doc.slice(start..end);
    if is_blank_block(&text) {
        return Ok(EditOutcome::unchanged(doc, sel));
    }

    let group = apply_replace(doc, start, end, format!("{text}\n{text}"));
    let lower_start = start + len + 1;
    Ok(EditOutcome {
        selection: Selection::new(lower_start, lower_start + len),
        group,
    })
}

/// Move the current line (or selected lines) up by one line.
///
/// No-op when the affected range already touches the first line.
pub fn move_lines_up(doc: &mut Document, sel: Selection) -> Result<EditOutcome, EditError> {
    validate_selection(doc, sel)?;
    if sel.is_caret() {
        Ok(move_current_line_up(doc, sel))
    } else {
        Ok(move_selected_lines_up(doc, sel))
    }
}

/// Move the current line (or selected lines) down by one line.
///
/// No-op when the affected range already touches the last line.
pub fn move_lines_down(doc: &mut Document, sel: Selection) -> Result<EditOutcome, EditError> {
    validate_selection(doc, sel)?;
    if sel.is_caret() {
        Ok(move_current_line_down(doc, sel))
    } else {
        Ok(move_selected_lines_down(doc, sel))
    }
}

fn move_current_line_up(doc: &mut Document, sel: Selection) -> EditOutcome {
    let line = doc.line_of(sel.active);
    if line == 0 {
        return EditOutcome::unchanged(doc, sel);
    }

    let column = sel.active - doc.line_start(line);
    let prev_start = doc.line_start(line - 1);
    let prev_text = doc.line_text(line - 1);
    let line_text = doc.line_text(line);
    let end = doc.line_end(line);

    let group = apply_replace(doc, prev_start, end, format!("{line_text}\n{prev_text}"));
    // The moved line's text is unchanged, so the recorded column fits exactly.
    EditOutcome {
        selection: Selection::caret(prev_start + column),
        group,
    }
}

fn move_current_line_down(doc: &mut Document, sel: Selection) -> EditOutcome {
    let line = doc.line_of(sel.active);
    if line + 1 >= doc.line_count() {
        return EditOutcome::unchanged(doc, sel);
    }

    let column = sel.active - doc.line_start(line);
    let start = doc.line_start(line);
    let line_text = doc.line_text(line);
    let next_text = doc.line_text(line + 1);
    let next_len = next_text.chars().count();
    let end = doc.line_end(line + 1);

    let group = apply_replace(doc, start, end, format!("{next_text}\n{line_text}"));
    EditOutcome {
        selection: Selection::caret(start + next_len + 1 + column),
        group,
    }
}

fn move_selected_lines_up(doc: &mut Document, sel: Selection) -> EditOutcome {
    let (start, end) = (sel.start(), sel.end());
    let old_len = end - start;
    let relative_start = start - doc.line_start(doc.line_of(start));

    let (enlarged, _) = enlarge_selection(doc, sel);
    let first_line = doc.line_of(enlarged.start());
    if first_line == 0 {
        return EditOutcome::unchanged(doc, sel);
    }

    let prev_start = doc.line_start(first_line - 1);
    let prev_text = doc.line_text(first_line - 1);
    let block_text = doc.slice(enlarged.start()..enlarged.end());

    let group = apply_replace(
        doc,
        prev_start,
        enlarged.end(),
        format!("{block_text}\n{prev_text}"),
    );

    // The moved block now starts where the previous line used to; restore the
    // original span relative to it.
    let new_start = prev_start + relative_start;
    EditOutcome {
        selection: Selection::new(new_start, new_start + old_len),
        group,
    }
}

fn move_selected_lines_down(doc: &mut Document, sel: Selection) -> EditOutcome {
    let (start, end) = (sel.start(), sel.end());
    let old_len = end - start;
    let relative_start = start - doc.line_start(doc.line_of(start));

    let (enlarged, _) = enlarge_selection(doc, sel);
    let last_line = doc.line_of(enlarged.end());
    if last_line + 1 >= doc.line_count() {
        return EditOutcome::unchanged(doc, sel);
    }

    let next_text = doc.line_text(last_line + 1);
    let next_len = next_text.chars().count();
    let block_text = doc.slice(enlarged.start()..enlarged.end());
    let end = doc.line_end(last_line + 1);

    let group = apply_replace(
        doc,
        enlarged.start(),
        end,
        format!("{next_text}\n{block_text}"),
    );

    let new_start = enlarged.start() + next_len + 1 + relative_start;
    EditOutcome {
        selection: Selection::new(new_start, new_start + old_len),
        group,
    }
}

/// Toggle the comment marker on the caret's line, or on every line spanned by
/// a multi-line selection.
///
/// Line mode flips the single line. Block mode classifies the whole range
/// first: only if **every** line (blank ones included) starts with the marker
/// is the block uncommented; any mixed state comments all lines - including
/// ones already carrying a marker, which then carry a doubled marker. That
/// mixed-state resolution is the compatible, documented behavior.
///
/// The returned selection is the input mapped through the applied edits.
pub fn toggle_comment(
    doc: &mut Document,
    sel: Selection,
    config: &CommentConfig,
) -> Result<EditOutcome, EditError> {
    validate_selection(doc, sel)?;

    let first = doc.line_of(sel.start());
    let last = doc.line_of(sel.end());

    let edits = if !sel.is_caret() && first != last {
        let all_commented =
            (first..=last).all(|line| doc.line_text(line).starts_with(config.marker()));
        (first..=last)
            .map(|line| {
                if all_commented {
                    remove_marker_edit(doc, config, line)
                } else {
                    insert_marker_edit(doc, config, line)
                }
            })
            .collect()
    } else {
        let line = doc.line_of(sel.active);
        if doc.line_text(line).starts_with(config.marker()) {
            vec![remove_marker_edit(doc, config, line)]
        } else {
            vec![insert_marker_edit(doc, config, line)]
        }
    };

    let group = apply_edits(doc, edits);
    let selection = Selection::new(group.map_offset(sel.anchor), group.map_offset(sel.active));
    Ok(EditOutcome { selection, group })
}

/// Marker insertion: bare marker before already-indented lines (keeps the
/// indentation column stable), marker plus one space otherwise.
fn insert_marker_edit(doc: &Document, config: &CommentConfig, line: usize) -> TextEdit {
    let start = doc.line_start(line);
    if doc.line_text(line).starts_with(' ') {
        TextEdit::insert(start, config.marker().to_string())
    } else {
        TextEdit::insert(start, format!("{} ", config.marker()))
    }
}

/// Marker removal: marker plus one following space if present, else the
/// marker alone. Callers only build this for lines known to be commented.
fn remove_marker_edit(doc: &Document, config: &CommentConfig, line: usize) -> TextEdit {
    let start = doc.line_start(line);
    let text = doc.line_text(line);
    let marker_space = format!("{} ", config.marker());
    if text.starts_with(&marker_space) {
        TextEdit::delete(start, marker_space)
    } else {
        TextEdit::delete(start, config.marker().to_string())
    }
}

/// Delete the caret's line, or every line touched by the selection.
///
/// A selection removes the enlarged span together with one enclosing
/// terminator so no blank line is left behind. A caret on a non-empty line
/// removes the line together with its preceding terminator (the first line
/// has none, so only its text goes); a caret on an empty line deletes the
/// single preceding character instead, merging with the line above.
pub fn remove_lines(doc: &mut Document, sel: Selection) -> Result<EditOutcome, EditError> {
    validate_selection(doc, sel)?;
    if sel.is_caret() {
        Ok(remove_current_line(doc, sel))
    } else {
        Ok(remove_selected_lines(doc, sel))
    }
}

fn remove_current_line(doc: &mut Document, sel: Selection) -> EditOutcome {
    let line = doc.line_of(sel.active);

    if doc.line_len(line) > 0 {
        let (start, end) = if line > 0 {
            (doc.line_start(line) - 1, doc.line_end(line))
        } else {
            (0, doc.line_end(0))
        };
        let group = apply_delete(doc, start, end);
        return EditOutcome {
            selection: Selection::caret(start),
            group,
        };
    }

    // Empty line: behave like backspace and merge with the line above.
    if sel.active == 0 {
        return EditOutcome::unchanged(doc, sel);
    }
    let group = apply_delete(doc, sel.active - 1, sel.active);
    EditOutcome {
        selection: Selection::caret(sel.active - 1),
        group,
    }
}

fn remove_selected_lines(doc: &mut Document, sel: Selection) -> EditOutcome {
    let (enlarged, _) = enlarge_selection(doc, sel);
    let (mut start, mut end) = (enlarged.start(), enlarged.end());

    // Take one enclosing terminator with the span.
    if end < doc.len_chars() {
        end += 1;
    } else if start > 0 {
        start -= 1;
    }

    if start == end {
        return EditOutcome::unchanged(doc, Selection::caret(start));
    }

    let group = apply_delete(doc, start, end);
    EditOutcome {
        selection: Selection::caret(start),
        group,
    }
}

fn apply_delete(doc: &mut Document, start: usize, end: usize) -> EditGroup {
    let before_char_count = doc.len_chars();
    let deleted = doc.remove(start..end);
    EditGroup {
        edits: vec![TextEdit::delete(start, deleted)],
        before_char_count,
        after_char_count: doc.len_chars(),
    }
}
