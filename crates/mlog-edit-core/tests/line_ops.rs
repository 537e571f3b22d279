//! Integration tests for the structural line operations: selection
//! enlargement, duplication, reordering, and removal.

use mlog_edit_core::line_ops::{
    EditError, duplicate_lines_down, duplicate_lines_up, enlarge_selection, move_lines_down,
    move_lines_up, remove_lines,
};
use mlog_edit_core::{Document, Selection};

#[test]
fn enlarge_caret_covers_full_line() {
    let doc = Document::from_text("foo\nbar\nbaz");
    let (sel, len) = enlarge_selection(&doc, Selection::caret(5));
    assert_eq!(sel, Selection::new(4, 7));
    assert_eq!(len, 3);
}

#[test]
fn enlarge_expands_partial_selection_to_line_bounds() {
    let doc = Document::from_text("foo\nbar\nbaz");
    let (sel, len) = enlarge_selection(&doc, Selection::new(1, 9));
    assert_eq!(sel, Selection::new(0, 11));
    assert_eq!(len, 11);
}

#[test]
fn enlarge_end_at_column_zero_stops_at_previous_line() {
    let doc = Document::from_text("foo\nbar\nbaz");
    // End rests on the start of line 2; that line must not be pulled in.
    let (sel, len) = enlarge_selection(&doc, Selection::new(0, 8));
    assert_eq!(sel, Selection::new(0, 7));
    assert_eq!(len, 7);
}

#[test]
fn enlarge_is_total_on_empty_document() {
    let doc = Document::new();
    let (sel, len) = enlarge_selection(&doc, Selection::caret(0));
    assert_eq!(sel, Selection::caret(0));
    assert_eq!(len, 0);
}

#[test]
fn duplicate_down_selects_the_new_copy() {
    let mut doc = Document::from_text("x");
    let outcome = duplicate_lines_down(&mut doc, Selection::caret(0)).unwrap();
    assert_eq!(doc.get_text(), "x\nx");
    assert_eq!(outcome.selection, Selection::new(2, 3));
    assert_eq!(outcome.group.edits.len(), 1);
}

#[test]
fn duplicate_up_stays_on_the_original() {
    let mut doc = Document::from_text("foo\nbar");
    let outcome = duplicate_lines_up(&mut doc, Selection::caret(4)).unwrap();
    assert_eq!(doc.get_text(), "foo\nbar\nbar");
    assert_eq!(outcome.selection, Selection::new(4, 7));
}

#[test]
fn duplicate_down_multi_line_selection() {
    let mut doc = Document::from_text("a\nb\nc");
    let outcome = duplicate_lines_down(&mut doc, Selection::new(0, 3)).unwrap();
    assert_eq!(doc.get_text(), "a\nb\na\nb\nc");
    assert_eq!(outcome.selection, Selection::new(4, 7));
    assert_eq!(doc.slice(4..7), "a\nb");
}

#[test]
fn duplicate_is_a_noop_on_an_empty_line() {
    let mut doc = Document::from_text("a\n\nb");
    let outcome = duplicate_lines_down(&mut doc, Selection::caret(2)).unwrap();
    assert!(!outcome.changed());
    assert_eq!(doc.get_text(), "a\n\nb");
    assert_eq!(outcome.selection, Selection::caret(2));
}

#[test]
fn move_line_up_keeps_the_cursor_column() {
    let mut doc = Document::from_text("foo\nbar\nbaz");
    // Caret on "bar", column 1.
    let outcome = move_lines_up(&mut doc, Selection::caret(5)).unwrap();
    assert_eq!(doc.get_text(), "bar\nfoo\nbaz");
    assert_eq!(outcome.selection, Selection::caret(1));
}

#[test]
fn move_line_up_is_a_noop_on_the_first_line() {
    let mut doc = Document::from_text("foo\nbar");
    let outcome = move_lines_up(&mut doc, Selection::caret(1)).unwrap();
    assert!(!outcome.changed());
    assert_eq!(doc.get_text(), "foo\nbar");
    assert_eq!(outcome.selection, Selection::caret(1));
}

#[test]
fn move_line_down_keeps_the_cursor_column() {
    let mut doc = Document::from_text("foo\nbar\nbaz");
    let outcome = move_lines_down(&mut doc, Selection::caret(1)).unwrap();
    assert_eq!(doc.get_text(), "bar\nfoo\nbaz");
    assert_eq!(outcome.selection, Selection::caret(5));
}

#[test]
fn move_line_down_is_a_noop_on_the_last_line() {
    let mut doc = Document::from_text("foo\nbar");
    let outcome = move_lines_down(&mut doc, Selection::caret(5)).unwrap();
    assert!(!outcome.changed());
    assert_eq!(doc.get_text(), "foo\nbar");
}

#[test]
fn move_selection_down_keeps_length_and_content() {
    let mut doc = Document::from_text("a\nb\nc\nd");
    let outcome = move_lines_down(&mut doc, Selection::new(0, 3)).unwrap();
    assert_eq!(doc.get_text(), "c\na\nb\nd");
    assert_eq!(outcome.selection, Selection::new(2, 5));
    assert_eq!(doc.slice(2..5), "a\nb");
}

#[test]
fn move_selection_up_keeps_length_and_content() {
    let mut doc = Document::from_text("a\nb\nc");
    let outcome = move_lines_up(&mut doc, Selection::new(2, 5)).unwrap();
    assert_eq!(doc.get_text(), "b\nc\na");
    assert_eq!(outcome.selection, Selection::new(0, 3));
    assert_eq!(doc.slice(0..3), "b\nc");
}

#[test]
fn selection_within_one_line_still_moves_that_line() {
    let mut doc = Document::from_text("a\nb");
    let outcome = move_lines_down(&mut doc, Selection::new(0, 1)).unwrap();
    assert_eq!(doc.get_text(), "b\na");
    assert_eq!(outcome.selection, Selection::new(2, 3));
}

#[test]
fn backward_selection_moves_like_a_forward_one() {
    let mut doc = Document::from_text("a\nb\nc\nd");
    let outcome = move_lines_down(&mut doc, Selection::new(3, 0)).unwrap();
    assert_eq!(doc.get_text(), "c\na\nb\nd");
    assert_eq!(outcome.selection, Selection::new(2, 5));
}

#[test]
fn out_of_range_selection_is_an_error() {
    let mut doc = Document::from_text("ab");
    let err = move_lines_up(&mut doc, Selection::caret(5)).unwrap_err();
    assert_eq!(
        err,
        EditError::SelectionOutOfRange {
            start: 5,
            end: 5,
            len: 2
        }
    );
    // Nothing was touched.
    assert_eq!(doc.get_text(), "ab");
}

#[test]
fn remove_selected_lines_takes_the_trailing_terminator() {
    let mut doc = Document::from_text("a\nb\nc");
    let outcome = remove_lines(&mut doc, Selection::new(2, 3)).unwrap();
    assert_eq!(doc.get_text(), "a\nc");
    assert_eq!(outcome.selection, Selection::caret(2));
}

#[test]
fn remove_last_line_selection_takes_the_leading_terminator() {
    let mut doc = Document::from_text("a\nb");
    let outcome = remove_lines(&mut doc, Selection::new(2, 3)).unwrap();
    assert_eq!(doc.get_text(), "a");
    assert_eq!(outcome.selection, Selection::caret(1));
}

#[test]
fn remove_caret_line_joins_upward() {
    let mut doc = Document::from_text("foo\nbar\nbaz");
    let outcome = remove_lines(&mut doc, Selection::caret(5)).unwrap();
    assert_eq!(doc.get_text(), "foo\nbaz");
    assert_eq!(outcome.selection, Selection::caret(3));
}

#[test]
fn remove_caret_on_first_line_clears_its_text() {
    let mut doc = Document::from_text("foo\nbar");
    let outcome = remove_lines(&mut doc, Selection::caret(1)).unwrap();
    assert_eq!(doc.get_text(), "\nbar");
    assert_eq!(outcome.selection, Selection::caret(0));
}

#[test]
fn remove_caret_on_empty_line_merges_with_the_line_above() {
    let mut doc = Document::from_text("a\n\nb");
    let outcome = remove_lines(&mut doc, Selection::caret(2)).unwrap();
    assert_eq!(doc.get_text(), "a\nb");
    assert_eq!(outcome.selection, Selection::caret(1));
}

#[test]
fn remove_in_empty_document_is_a_noop() {
    let mut doc = Document::new();
    let outcome = remove_lines(&mut doc, Selection::caret(0)).unwrap();
    assert!(!outcome.changed());
    assert_eq!(doc.get_text(), "");
}
