use mlog_edit_core::{Command, CommandExecutor, Position, Selection};

fn main() {
    let mut executor = CommandExecutor::with_text("set x 10\nop add x x 1\nprint x");

    // Pull the print up one line.
    executor
        .execute(Command::MoveTo(Position::new(2, 0)))
        .unwrap();
    executor.execute(Command::MoveLinesUp).unwrap();
    assert_eq!(executor.text(), "set x 10\nprint x\nop add x x 1");

    // Duplicate it downward; the cursor lands on the new copy.
    executor.execute(Command::DuplicateLinesDown).unwrap();
    assert_eq!(
        executor.text(),
        "set x 10\nprint x\nprint x\nop add x x 1"
    );
    assert_eq!(executor.selection(), Selection::new(17, 24));

    // Remove the duplicate again.
    executor.execute(Command::RemoveLines).unwrap();
    assert_eq!(executor.text(), "set x 10\nprint x\nop add x x 1");

    println!("{}", executor.text());
}
