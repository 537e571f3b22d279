//! Command dispatch.
//!
//! Hosts drive the engine through an explicit table instead of widget event
//! callbacks: a [`KeyChord`] looks up a [`Command`] in the [`Keymap`], and the
//! [`CommandExecutor`] - which owns the document, the selection, and the
//! comment configuration - executes it. Every mutating command reports its
//! change as one [`EditGroup`], so the host's undo stack sees each command as
//! a single step.

use mlog_edit_lang::CommentConfig;

use crate::document::Document;
use crate::edits::{EditGroup, TextEdit};
use crate::line_ops::{
    EditError, EditOutcome, apply_edits, duplicate_lines_down, duplicate_lines_up,
    move_lines_down, move_lines_up, remove_lines, toggle_comment,
};
use crate::search::{self, SearchError, SearchMatch, SearchOptions};
use crate::selection::{Position, Selection};

/// Key identity for chord bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Arrow up.
    Up,
    /// Arrow down.
    Down,
    /// A printable character key (lowercase for letters).
    Char(char),
}

/// A key plus modifier state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyChord {
    /// Control held.
    pub ctrl: bool,
    /// Alt held.
    pub alt: bool,
    /// Shift held.
    pub shift: bool,
    /// The key itself.
    pub key: Key,
}

impl KeyChord {
    /// A plain chord with no modifiers.
    pub fn plain(key: Key) -> Self {
        Self {
            ctrl: false,
            alt: false,
            shift: false,
            key,
        }
    }

    /// A Ctrl chord.
    pub fn ctrl(key: Key) -> Self {
        Self {
            ctrl: true,
            ..Self::plain(key)
        }
    }

    /// An Alt chord.
    pub fn alt(key: Key) -> Self {
        Self {
            alt: true,
            ..Self::plain(key)
        }
    }

    /// A Ctrl+Alt chord.
    pub fn ctrl_alt(key: Key) -> Self {
        Self {
            ctrl: true,
            alt: true,
            ..Self::plain(key)
        }
    }
}

/// Editor commands.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Duplicate the current line or selected lines, cursor staying on the
    /// upper copy.
    DuplicateLinesUp,
    /// Duplicate the current line or selected lines, cursor moving to the
    /// lower copy.
    DuplicateLinesDown,
    /// Move the current line or selected lines up by one line.
    MoveLinesUp,
    /// Move the current line or selected lines down by one line.
    MoveLinesDown,
    /// Toggle the comment marker on the affected lines.
    ToggleComment,
    /// Delete the current line or every selected line.
    RemoveLines,
    /// Insert text at the caret, replacing any selection.
    Insert(String),
    /// Delete the selection, or the character after the caret.
    Delete,
    /// Place the caret at a position.
    MoveTo(Position),
    /// Set the selection from anchor and active positions.
    SetSelection {
        /// Fixed end of the selection.
        anchor: Position,
        /// Moving end of the selection.
        active: Position,
    },
    /// Collapse the selection to a caret at its active end.
    ClearSelection,
    /// Select the next occurrence of a query, wrapping past the end.
    FindNext {
        /// The search query.
        query: String,
        /// Matching options.
        options: SearchOptions,
    },
    /// Select the previous occurrence of a query, wrapping past the start.
    FindPrev {
        /// The search query.
        query: String,
        /// Matching options.
        options: SearchOptions,
    },
    /// Replace the occurrence at or after the cursor (wrapping) with literal
    /// text.
    ReplaceCurrent {
        /// The search query.
        query: String,
        /// Literal replacement text.
        replacement: String,
        /// Matching options.
        options: SearchOptions,
    },
    /// Replace every occurrence with literal text as one atomic edit group.
    ReplaceAll {
        /// The search query.
        query: String,
        /// Literal replacement text.
        replacement: String,
        /// Matching options.
        options: SearchOptions,
    },
}

/// What a command did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandResult {
    /// Edits applied to the document; empty for navigation commands and
    /// boundary no-ops.
    pub group: EditGroup,
    /// The match a find command landed on, if any.
    pub found: Option<SearchMatch>,
    /// Number of occurrences changed by a replace command.
    pub replaced: usize,
}

impl CommandResult {
    fn edit(group: EditGroup) -> Self {
        Self {
            group,
            ..Self::default()
        }
    }
}

/// Command execution failures.
#[derive(Debug)]
pub enum CommandError {
    /// A position does not exist in the document.
    InvalidPosition(Position),
    /// An engine contract violation.
    Edit(EditError),
    /// A search query failure.
    Search(SearchError),
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPosition(pos) => {
                write!(f, "invalid position {}:{}", pos.line, pos.column)
            }
            Self::Edit(err) => write!(f, "edit failed: {}", err),
            Self::Search(err) => write!(f, "search failed: {}", err),
        }
    }
}

impl std::error::Error for CommandError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidPosition(_) => None,
            Self::Edit(err) => Some(err),
            Self::Search(err) => Some(err),
        }
    }
}

impl From<EditError> for CommandError {
    fn from(err: EditError) -> Self {
        Self::Edit(err)
    }
}

impl From<SearchError> for CommandError {
    fn from(err: SearchError) -> Self {
        Self::Search(err)
    }
}

/// Chord-to-command bindings.
#[derive(Debug, Clone, Default)]
pub struct Keymap {
    bindings: Vec<(KeyChord, Command)>,
}

impl Keymap {
    /// An empty keymap.
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard bindings: Ctrl+/ toggles comments, Ctrl+D removes lines,
    /// Ctrl+Alt+Up/Down duplicates, Alt+Up/Down moves.
    pub fn standard() -> Self {
        let mut map = Self::new();
        map.bind(KeyChord::ctrl(Key::Char('/')), Command::ToggleComment);
        map.bind(KeyChord::ctrl(Key::Char('d')), Command::RemoveLines);
        map.bind(KeyChord::ctrl_alt(Key::Up), Command::DuplicateLinesUp);
        map.bind(KeyChord::ctrl_alt(Key::Down), Command::DuplicateLinesDown);
        map.bind(KeyChord::alt(Key::Up), Command::MoveLinesUp);
        map.bind(KeyChord::alt(Key::Down), Command::MoveLinesDown);
        map
    }

    /// Bind a chord, replacing any existing binding for it.
    pub fn bind(&mut self, chord: KeyChord, command: Command) {
        self.bindings.retain(|(c, _)| *c != chord);
        self.bindings.push((chord, command));
    }

    /// Look up the command bound to a chord.
    pub fn lookup(&self, chord: KeyChord) -> Option<&Command> {
        self.bindings
            .iter()
            .find(|(c, _)| *c == chord)
            .map(|(_, command)| command)
    }
}

/// Owns the editing state and executes commands against it.
#[derive(Debug, Clone)]
pub struct CommandExecutor {
    document: Document,
    selection: Selection,
    comment: CommentConfig,
}

impl CommandExecutor {
    /// An executor over an empty document.
    pub fn new() -> Self {
        Self::with_text("")
    }

    /// An executor over initial text, caret at the start.
    pub fn with_text(text: &str) -> Self {
        Self {
            document: Document::from_text(text),
            selection: Selection::caret(0),
            comment: CommentConfig::default(),
        }
    }

    /// Replace the comment configuration.
    pub fn with_comment_config(mut self, comment: CommentConfig) -> Self {
        self.comment = comment;
        self
    }

    /// The current document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// The whole document text.
    pub fn text(&self) -> String {
        self.document.get_text()
    }

    /// The current selection.
    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Execute one command.
    pub fn execute(&mut self, command: Command) -> Result<CommandResult, CommandError> {
        match command {
            Command::DuplicateLinesUp => self.line_op(duplicate_lines_up),
            Command::DuplicateLinesDown => self.line_op(duplicate_lines_down),
            Command::MoveLinesUp => self.line_op(move_lines_up),
            Command::MoveLinesDown => self.line_op(move_lines_down),
            Command::RemoveLines => self.line_op(remove_lines),
            Command::ToggleComment => {
                let outcome = toggle_comment(&mut self.document, self.selection, &self.comment)?;
                self.selection = outcome.selection;
                Ok(CommandResult::edit(outcome.group))
            }
            Command::Insert(text) => Ok(self.insert(&text)),
            Command::Delete => Ok(self.delete()),
            Command::MoveTo(pos) => {
                let offset = self.resolve(pos)?;
                self.selection = Selection::caret(offset);
                Ok(CommandResult::default())
            }
            Command::SetSelection { anchor, active } => {
                let anchor = self.resolve(anchor)?;
                let active = self.resolve(active)?;
                self.selection = Selection::new(anchor, active);
                Ok(CommandResult::default())
            }
            Command::ClearSelection => {
                self.selection = Selection::caret(self.selection.active);
                Ok(CommandResult::default())
            }
            Command::FindNext { query, options } => {
                let found =
                    search::find_wrapped(&self.document, &query, options, self.selection.end())?;
                if let Some(m) = found {
                    self.selection = Selection::new(m.start, m.end);
                }
                Ok(CommandResult {
                    found,
                    ..CommandResult::default()
                })
            }
            Command::FindPrev { query, options } => {
                let matches = search::find_all(&self.document, &query, options)?;
                let from = self.selection.start();
                let found = matches
                    .iter()
                    .copied()
                    .rev()
                    .find(|m| m.end <= from)
                    .or_else(|| matches.last().copied());
                if let Some(m) = found {
                    self.selection = Selection::new(m.start, m.end);
                }
                Ok(CommandResult {
                    found,
                    ..CommandResult::default()
                })
            }
            Command::ReplaceCurrent {
                query,
                replacement,
                options,
            } => self.replace_current(&query, &replacement, options),
            Command::ReplaceAll {
                query,
                replacement,
                options,
            } => {
                let (replaced, group) =
                    search::replace_all(&mut self.document, &query, &replacement, options)?;
                self.selection = Selection::new(
                    group.map_offset(self.selection.anchor),
                    group.map_offset(self.selection.active),
                );
                Ok(CommandResult {
                    group,
                    replaced,
                    ..CommandResult::default()
                })
            }
        }
    }

    fn line_op(
        &mut self,
        op: fn(&mut Document, Selection) -> Result<EditOutcome, EditError>,
    ) -> Result<CommandResult, CommandError> {
        let outcome = op(&mut self.document, self.selection)?;
        self.selection = outcome.selection;
        Ok(CommandResult::edit(outcome.group))
    }

    fn resolve(&self, pos: Position) -> Result<usize, CommandError> {
        if pos.line >= self.document.line_count() || pos.column > self.document.line_len(pos.line) {
            return Err(CommandError::InvalidPosition(pos));
        }
        Ok(self.document.line_start(pos.line) + pos.column)
    }

    fn insert(&mut self, text: &str) -> CommandResult {
        let (start, end) = (self.selection.start(), self.selection.end());
        let deleted = self.document.slice(start..end);
        let group = apply_edits(
            &mut self.document,
            vec![TextEdit::replace(start, deleted, text)],
        );
        self.selection = Selection::caret(start + text.chars().count());
        CommandResult::edit(group)
    }

    fn delete(&mut self) -> CommandResult {
        let (start, mut end) = (self.selection.start(), self.selection.end());
        if start == end {
            if end >= self.document.len_chars() {
                return CommandResult::edit(EditGroup::empty(self.document.len_chars()));
            }
            end += 1;
        }
        let deleted = self.document.slice(start..end);
        let group = apply_edits(&mut self.document, vec![TextEdit::delete(start, deleted)]);
        self.selection = Selection::caret(start);
        CommandResult::edit(group)
    }

    fn replace_current(
        &mut self,
        query: &str,
        replacement: &str,
        options: SearchOptions,
    ) -> Result<CommandResult, CommandError> {
        let Some(m) =
            search::find_wrapped(&self.document, query, options, self.selection.start())?
        else {
            return Ok(CommandResult::default());
        };

        let deleted = self.document.slice(m.start..m.end);
        let group = apply_edits(
            &mut self.document,
            vec![TextEdit::replace(m.start, deleted, replacement)],
        );
        self.selection = Selection::caret(m.start + replacement.chars().count());
        Ok(CommandResult {
            group,
            found: Some(m),
            replaced: 1,
        })
    }
}

impl Default for CommandExecutor {
    fn default() -> Self {
        Self::new()
    }
}
