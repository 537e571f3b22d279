use mlog_edit_core::{Command, CommandExecutor, Position};

fn main() {
    let mut executor = CommandExecutor::with_text("set x 10\n# already off\nprint x");

    // Toggle the caret's line.
    executor
        .execute(Command::MoveTo(Position::new(0, 4)))
        .unwrap();
    executor.execute(Command::ToggleComment).unwrap();
    assert_eq!(executor.text(), "# set x 10\n# already off\nprint x");

    // A mixed multi-line selection comments everything.
    executor
        .execute(Command::SetSelection {
            anchor: Position::new(1, 0),
            active: Position::new(2, 7),
        })
        .unwrap();
    executor.execute(Command::ToggleComment).unwrap();
    assert_eq!(executor.text(), "# set x 10\n# # already off\n# print x");

    println!("{}", executor.text());
}
