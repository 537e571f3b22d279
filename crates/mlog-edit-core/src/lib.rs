#![warn(missing_docs)]
//! mlog Edit Core - Headless Line-Editing Engine for mlog Scripts
//!
//! # Overview
//!
//! `mlog-edit-core` is the headless editing kernel for a Mindustry-logic
//! ("mlog") code editor. mlog programs are flat instruction lists, so the
//! interesting edits are *structural* and line-oriented: duplicate a line,
//! reorder lines, comment a block in or out, delete whole lines. This crate
//! implements those operations as pure transforms over a [`Document`] and a
//! [`Selection`], without any rendering, widget, or undo machinery.
//!
//! # Core Features
//!
//! - **Line-oriented edits**: duplication, reordering, comment toggling, and
//!   removal, with whole-line selection normalization and silent boundary
//!   no-ops
//! - **Atomic edit groups**: every operation reports one [`EditGroup`] the
//!   host can push onto its own undo stack as a single step
//! - **Find & replace**: character-offset search with whole-word, regex, and
//!   wrap-around modes
//! - **Gutter classification**: 0-based instruction addresses that skip
//!   comments and blank lines
//! - **Command dispatch**: keymap-driven [`Command`] execution through a
//!   [`CommandExecutor`]
//!
//! All public offsets are **character offsets** (Unicode scalar values),
//! never bytes.
//!
//! # Quick Start
//!
//! ```rust
//! use mlog_edit_core::{Command, CommandExecutor, Position};
//!
//! let mut executor = CommandExecutor::with_text("set x 10\nprint x");
//!
//! // Put the caret on the second line and pull it above the first.
//! executor.execute(Command::MoveTo(Position::new(1, 0))).unwrap();
//! executor.execute(Command::MoveLinesUp).unwrap();
//!
//! assert_eq!(executor.text(), "print x\nset x 10");
//! ```
//!
//! The engine functions in [`line_ops`] are also usable directly against a
//! [`Document`] when a host keeps its own state:
//!
//! ```rust
//! use mlog_edit_core::{Document, Selection, line_ops};
//! use mlog_edit_lang::CommentConfig;
//!
//! let mut doc = Document::from_text("set x 10");
//! let outcome =
//!     line_ops::toggle_comment(&mut doc, Selection::caret(0), &CommentConfig::default())
//!         .unwrap();
//!
//! assert_eq!(doc.get_text(), "# set x 10");
//! assert_eq!(outcome.selection, Selection::caret(2));
//! ```

pub mod commands;
pub mod document;
pub mod edits;
pub mod gutter;
pub mod line_ops;
pub mod search;
pub mod selection;

pub use commands::{Command, CommandError, CommandExecutor, CommandResult, Key, KeyChord, Keymap};
pub use document::Document;
pub use edits::{EditGroup, TextEdit};
pub use gutter::{CodeLineNumber, code_line_numbers};
pub use line_ops::{EditError, EditOutcome};
pub use search::{SearchError, SearchMatch, SearchOptions};
pub use selection::{Position, Selection, SelectionDirection};
