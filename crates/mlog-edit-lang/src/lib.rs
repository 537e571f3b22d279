#![warn(missing_docs)]
//! `mlog-edit-lang` - data-driven language configuration for the mlog editor kernel.
//!
//! This crate intentionally stays lightweight and does **not** depend on the editor
//! kernel or any highlighting system. It provides:
//!
//! - [`CommentConfig`] - the comment marker used by comment toggling and gutter
//!   line classification
//! - [`SyntaxConfig`] - the mlog syntax vocabulary (builtin functions, their
//!   parameters, special variables), loaded from the standard JSON syntax file
//! - [`Vocabulary`] - the auto-completion word list, grown from keywords and from
//!   words the user types

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::Deserialize;
use unicode_segmentation::UnicodeSegmentation;

/// Comment marker configuration for the target scripting language.
///
/// mlog uses `#` for line comments; the marker is configurable so the same
/// kernel can drive close dialects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentConfig {
    marker: String,
}

impl CommentConfig {
    /// Create a config with a custom marker.
    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
        }
    }

    /// The comment marker token.
    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Marker length in characters.
    pub fn marker_len(&self) -> usize {
        self.marker.chars().count()
    }
}

impl Default for CommentConfig {
    fn default() -> Self {
        Self::new("#")
    }
}

/// Raw on-disk shape of the syntax file.
///
/// `builtin_functions` is a list of one-entry maps `{ function_name: parameter_groups }`
/// where each parameter group is a map whose values are lists of parameter names.
#[derive(Debug, Clone, Default, Deserialize)]
struct RawSyntax {
    #[serde(default)]
    special_variables: Vec<String>,
    #[serde(default)]
    builtin_functions: Vec<BTreeMap<String, Vec<BTreeMap<String, Vec<String>>>>>,
}

/// Flattened mlog syntax vocabulary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyntaxConfig {
    builtin_functions: Vec<String>,
    params: Vec<String>,
    special_variables: Vec<String>,
}

/// Errors raised while loading a syntax file.
#[derive(Debug)]
pub enum SyntaxError {
    /// The syntax file could not be read.
    Io(std::io::Error),
    /// The syntax file is not valid JSON (or not the expected shape).
    Json(serde_json::Error),
}

impl std::fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read syntax file: {}", err),
            Self::Json(err) => write!(f, "failed to parse syntax file: {}", err),
        }
    }
}

impl std::error::Error for SyntaxError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Json(err) => Some(err),
        }
    }
}

impl SyntaxConfig {
    /// Load and flatten a syntax file from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SyntaxError> {
        let raw = std::fs::read_to_string(path).map_err(SyntaxError::Io)?;
        Self::from_json_str(&raw)
    }

    /// Parse and flatten a syntax file from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, SyntaxError> {
        let raw: RawSyntax = serde_json::from_str(json).map_err(SyntaxError::Json)?;
        Ok(Self::from_raw(raw))
    }

    fn from_raw(raw: RawSyntax) -> Self {
        let mut builtin_functions = Vec::new();
        let mut params = Vec::new();

        for function in raw.builtin_functions {
            for (name, groups) in function {
                builtin_functions.push(name);
                for group in groups {
                    for names in group.into_values() {
                        params.extend(names);
                    }
                }
            }
        }

        Self {
            builtin_functions,
            params,
            special_variables: raw.special_variables,
        }
    }

    /// Builtin function names (e.g. `set`, `op`, `jump`).
    pub fn builtin_functions(&self) -> &[String] {
        &self.builtin_functions
    }

    /// Function parameter names across all builtin functions.
    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// Special variables (e.g. `@this`, `@counter`).
    pub fn special_variables(&self) -> &[String] {
        &self.special_variables
    }

    /// All syntax keywords across every category.
    pub fn keywords(&self) -> Vec<String> {
        self.builtin_functions
            .iter()
            .chain(self.params.iter())
            .chain(self.special_variables.iter())
            .cloned()
            .collect()
    }
}

/// Minimum length for a word to enter the completion vocabulary.
const MIN_WORD_LEN: usize = 4;

/// The auto-completion word list.
///
/// Seeded from the syntax keywords and grown as the user types: every
/// alphanumeric word of at least [`MIN_WORD_LEN`] characters that lands in the
/// document becomes a completion candidate. Hosts feed inserted text to
/// [`Vocabulary::harvest`] whenever the kernel reports an edit group.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    words: BTreeSet<String>,
}

impl Vocabulary {
    /// Create an empty vocabulary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a vocabulary seeded with the given keywords.
    ///
    /// Keywords bypass the minimum-length rule; short mnemonics like `op` and
    /// `set` must still complete.
    pub fn with_keywords<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: keywords.into_iter().map(Into::into).collect(),
        }
    }

    /// Number of known words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns `true` if the vocabulary is empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Returns `true` if `word` is a known completion candidate.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Add a single word if it qualifies (trimmed, alphanumeric, at least
    /// [`MIN_WORD_LEN`] characters). Returns `true` if the word was added.
    pub fn add_word(&mut self, word: &str) -> bool {
        let word = word.trim();
        if word.chars().count() < MIN_WORD_LEN {
            return false;
        }
        if !word.chars().all(char::is_alphanumeric) {
            return false;
        }
        self.words.insert(word.to_string())
    }

    /// Harvest qualifying words from a chunk of text (typed or pasted).
    ///
    /// Returns how many new words were added.
    pub fn harvest(&mut self, text: &str) -> usize {
        let mut added = 0;
        for word in text.unicode_words() {
            if self.add_word(word) {
                added += 1;
            }
        }
        added
    }

    /// Completion candidates for `prefix`, case-insensitive, in sorted order.
    pub fn completions(&self, prefix: &str) -> Vec<&str> {
        if prefix.is_empty() {
            return Vec::new();
        }
        let prefix = prefix.to_lowercase();
        self.words
            .iter()
            .filter(|word| word.to_lowercase().starts_with(&prefix))
            .map(String::as_str)
            .collect()
    }
}
