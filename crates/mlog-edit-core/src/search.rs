//! Find and replace over the document.
//!
//! All public inputs and outputs use **character offsets**, matching the rest
//! of the engine. Plain queries are escaped and compiled into a regex; regex
//! mode passes the pattern through. Whole-word matching uses the
//! alphanumeric-or-underscore word class on both sides of a hit.
//!
//! Replacement text is always literal - no capture-group expansion.

use regex::{Regex, RegexBuilder};

use crate::document::Document;
use crate::edits::{EditGroup, TextEdit};
use crate::line_ops::apply_edits;

/// Options controlling how a query is matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    /// Match case exactly (on by default).
    pub case_sensitive: bool,
    /// Only accept hits bounded by non-word characters.
    pub whole_word: bool,
    /// Treat the query as a regex pattern instead of literal text.
    pub regex: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            case_sensitive: true,
            whole_word: false,
            regex: false,
        }
    }
}

/// A hit, as a half-open character range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchMatch {
    /// Inclusive start character offset.
    pub start: usize,
    /// Exclusive end character offset.
    pub end: usize,
}

impl SearchMatch {
    /// Match length in characters.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns `true` if the match covers no characters.
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// Search failures.
#[derive(Debug)]
pub enum SearchError {
    /// The query failed to compile as a regex.
    InvalidRegex(regex::Error),
}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRegex(err) => write!(f, "invalid regex: {}", err),
        }
    }
}

impl std::error::Error for SearchError {}

fn build_regex(query: &str, options: SearchOptions) -> Result<Regex, SearchError> {
    let pattern = if options.regex {
        query.to_string()
    } else {
        regex::escape(query)
    };

    RegexBuilder::new(&pattern)
        .case_insensitive(!options.case_sensitive)
        .multi_line(true)
        .build()
        .map_err(SearchError::InvalidRegex)
}

fn is_word_char(ch: char) -> bool {
    ch == '_' || ch.is_alphanumeric()
}

fn bounded_by_non_word(text: &str, start_byte: usize, end_byte: usize) -> bool {
    let before = text[..start_byte].chars().next_back();
    let after = text[end_byte..].chars().next();
    !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
}

/// Find every occurrence of `query` in the document, in ascending order.
///
/// An empty query matches nothing. Empty regex matches are dropped so callers
/// never loop in place.
pub fn find_all(
    doc: &Document,
    query: &str,
    options: SearchOptions,
) -> Result<Vec<SearchMatch>, SearchError> {
    if query.is_empty() {
        return Ok(Vec::new());
    }

    let re = build_regex(query, options)?;
    let text = doc.get_text();

    // Matches come back in byte offsets; convert to char offsets cumulatively
    // since find_iter yields them in ascending, non-overlapping order.
    let mut matches = Vec::new();
    let mut chars_before = 0;
    let mut last_byte = 0;
    for m in re.find_iter(&text) {
        chars_before += text[last_byte..m.start()].chars().count();
        let start = chars_before;
        let len = text[m.start()..m.end()].chars().count();
        chars_before += len;
        last_byte = m.end();

        if len == 0 {
            continue;
        }
        if options.whole_word && !bounded_by_non_word(&text, m.start(), m.end()) {
            continue;
        }
        matches.push(SearchMatch {
            start,
            end: start + len,
        });
    }

    Ok(matches)
}

/// Find the first occurrence starting at or after `from`.
pub fn find_next(
    doc: &Document,
    query: &str,
    options: SearchOptions,
    from: usize,
) -> Result<Option<SearchMatch>, SearchError> {
    let matches = find_all(doc, query, options)?;
    Ok(matches.into_iter().find(|m| m.start >= from))
}

/// Find the last occurrence ending at or before `from`.
pub fn find_prev(
    doc: &Document,
    query: &str,
    options: SearchOptions,
    from: usize,
) -> Result<Option<SearchMatch>, SearchError> {
    let matches = find_all(doc, query, options)?;
    Ok(matches.into_iter().rev().find(|m| m.end <= from))
}

/// Find the first occurrence at or after `from`, wrapping to the top of the
/// document when nothing follows the cursor.
pub fn find_wrapped(
    doc: &Document,
    query: &str,
    options: SearchOptions,
    from: usize,
) -> Result<Option<SearchMatch>, SearchError> {
    let matches = find_all(doc, query, options)?;
    Ok(matches
        .iter()
        .copied()
        .find(|m| m.start >= from)
        .or_else(|| matches.first().copied()))
}

/// Replace every occurrence of `query` with `replacement` (literal text) as
/// one atomic edit group. Returns the replacement count with the group.
pub fn replace_all(
    doc: &mut Document,
    query: &str,
    replacement: &str,
    options: SearchOptions,
) -> Result<(usize, EditGroup), SearchError> {
    let matches = find_all(doc, query, options)?;
    if matches.is_empty() {
        return Ok((0, EditGroup::empty(doc.len_chars())));
    }

    let edits = matches
        .iter()
        .map(|m| TextEdit::replace(m.start, doc.slice(m.start..m.end), replacement))
        .collect();

    let group = apply_edits(doc, edits);
    Ok((matches.len(), group))
}
