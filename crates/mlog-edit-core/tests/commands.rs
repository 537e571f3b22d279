//! Integration tests for the command dispatch layer.

use mlog_edit_core::{
    Command, CommandError, CommandExecutor, Key, KeyChord, Keymap, Position, SearchOptions,
    Selection,
};
use mlog_edit_lang::CommentConfig;

#[test]
fn keymap_drives_the_executor() {
    let mut executor = CommandExecutor::with_text("set x 10");
    let map = Keymap::standard();

    let command = map
        .lookup(KeyChord::ctrl(Key::Char('/')))
        .cloned()
        .unwrap();
    executor.execute(command).unwrap();
    assert_eq!(executor.text(), "# set x 10");
}

#[test]
fn move_to_invalid_position_fails_fast() {
    let mut executor = CommandExecutor::with_text("ab\ncd");

    let err = executor
        .execute(Command::MoveTo(Position::new(9, 0)))
        .unwrap_err();
    assert!(matches!(err, CommandError::InvalidPosition(_)));

    let err = executor
        .execute(Command::MoveTo(Position::new(0, 3)))
        .unwrap_err();
    assert!(matches!(err, CommandError::InvalidPosition(_)));
}

#[test]
fn insert_replaces_the_selection() {
    let mut executor = CommandExecutor::with_text("set x 10");
    executor
        .execute(Command::SetSelection {
            anchor: Position::new(0, 0),
            active: Position::new(0, 3),
        })
        .unwrap();
    executor
        .execute(Command::Insert("jump".to_string()))
        .unwrap();
    assert_eq!(executor.text(), "jump x 10");
    assert_eq!(executor.selection(), Selection::caret(4));
}

#[test]
fn delete_removes_the_selection_or_the_next_character() {
    let mut executor = CommandExecutor::with_text("abc");
    executor
        .execute(Command::SetSelection {
            anchor: Position::new(0, 0),
            active: Position::new(0, 2),
        })
        .unwrap();
    executor.execute(Command::Delete).unwrap();
    assert_eq!(executor.text(), "c");

    executor.execute(Command::Delete).unwrap();
    assert_eq!(executor.text(), "");

    // At the end of the document there is nothing left to delete.
    let result = executor.execute(Command::Delete).unwrap();
    assert!(result.group.is_empty());
}

#[test]
fn clear_selection_collapses_to_the_active_end() {
    let mut executor = CommandExecutor::with_text("set x 10");
    executor
        .execute(Command::SetSelection {
            anchor: Position::new(0, 5),
            active: Position::new(0, 1),
        })
        .unwrap();
    executor.execute(Command::ClearSelection).unwrap();
    assert_eq!(executor.selection(), Selection::caret(1));
}

#[test]
fn find_next_selects_and_wraps() {
    let mut executor = CommandExecutor::with_text("set x\nset y");
    let find = Command::FindNext {
        query: "set".to_string(),
        options: SearchOptions::default(),
    };

    let result = executor.execute(find.clone()).unwrap();
    assert!(result.found.is_some());
    assert_eq!(executor.selection(), Selection::new(0, 3));

    executor.execute(find.clone()).unwrap();
    assert_eq!(executor.selection(), Selection::new(6, 9));

    // Past the last hit the search wraps to the top.
    executor.execute(find).unwrap();
    assert_eq!(executor.selection(), Selection::new(0, 3));
}

#[test]
fn find_prev_wraps_to_the_last_hit() {
    let mut executor = CommandExecutor::with_text("set x\nset y");
    let result = executor
        .execute(Command::FindPrev {
            query: "set".to_string(),
            options: SearchOptions::default(),
        })
        .unwrap();
    assert!(result.found.is_some());
    assert_eq!(executor.selection(), Selection::new(6, 9));
}

#[test]
fn replace_current_advances_through_the_document() {
    let mut executor = CommandExecutor::with_text("set x\nset y");
    let replace = Command::ReplaceCurrent {
        query: "set".to_string(),
        replacement: "mov".to_string(),
        options: SearchOptions::default(),
    };

    let result = executor.execute(replace.clone()).unwrap();
    assert_eq!(result.replaced, 1);
    assert_eq!(executor.text(), "mov x\nset y");
    assert_eq!(executor.selection(), Selection::caret(3));

    executor.execute(replace.clone()).unwrap();
    assert_eq!(executor.text(), "mov x\nmov y");

    let result = executor.execute(replace).unwrap();
    assert_eq!(result.replaced, 0, "no occurrences left");
}

#[test]
fn replace_all_keeps_the_selection_in_place() {
    let mut executor = CommandExecutor::with_text("a a a");
    executor
        .execute(Command::MoveTo(Position::new(0, 5)))
        .unwrap();
    let result = executor
        .execute(Command::ReplaceAll {
            query: "a".to_string(),
            replacement: "bbb".to_string(),
            options: SearchOptions::default(),
        })
        .unwrap();
    assert_eq!(result.replaced, 3);
    assert_eq!(executor.text(), "bbb bbb bbb");
    // The caret was at the end and stays at the (new) end.
    assert_eq!(executor.selection(), Selection::caret(11));
}

#[test]
fn duplicate_down_through_the_executor() {
    let mut executor = CommandExecutor::with_text("x");
    executor.execute(Command::DuplicateLinesDown).unwrap();
    assert_eq!(executor.text(), "x\nx");
    assert_eq!(executor.selection(), Selection::new(2, 3));
}

#[test]
fn toggle_comment_uses_the_configured_marker() {
    let mut executor =
        CommandExecutor::with_text("set x").with_comment_config(CommentConfig::new("//"));
    executor.execute(Command::ToggleComment).unwrap();
    assert_eq!(executor.text(), "// set x");
}

#[test]
fn boundary_noops_report_an_empty_group() {
    let mut executor = CommandExecutor::with_text("set x");
    let result = executor.execute(Command::MoveLinesUp).unwrap();
    assert!(result.group.is_empty());
    assert_eq!(executor.text(), "set x");
}
