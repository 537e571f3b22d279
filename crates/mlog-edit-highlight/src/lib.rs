//! `mlog-edit-highlight` - regex-based syntax highlighting for mlog scripts.
//!
//! mlog is line-oriented with no nesting, so per-line regex rules are a full
//! grammar here, not an approximation. Rules are built from a
//! [`SyntaxConfig`] and emit [`HighlightSpan`]s in character offsets; mapping
//! token kinds to colors is the host's job.

use mlog_edit_core::Document;
use mlog_edit_lang::SyntaxConfig;
use regex::Regex;

/// Token classification produced by the highlighter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// A builtin instruction name (`set`, `op`, `jump`, ...).
    BuiltinFunction,
    /// A known instruction parameter (`add`, `always`, ...).
    Param,
    /// A numeric literal.
    Number,
    /// A string literal.
    String,
    /// A special variable (`@this`, `@counter`, ...).
    SpecialVariable,
    /// A `#` comment.
    Comment,
}

/// A highlighted region, as a half-open character range into the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightSpan {
    /// Inclusive start character offset.
    pub start: usize,
    /// Exclusive end character offset.
    pub end: usize,
    /// Token classification of the region.
    pub kind: TokenKind,
}

#[derive(Debug, Clone)]
struct Rule {
    regex: Regex,
    kind: TokenKind,
}

/// The mlog syntax highlighter.
///
/// Rules run in a fixed order per line and later rules win on overlap, so a
/// keyword inside a string stays a string and anything after `#` is a
/// comment.
#[derive(Debug, Clone)]
pub struct LogicHighlighter {
    rules: Vec<Rule>,
}

/// Build a `\b(?:a|b|...)\b` alternation from literal words.
///
/// Longer words go first so `ucontrol` is not eaten by a shorter `u` prefix
/// alternative.
fn word_alternation(words: &[String]) -> Option<String> {
    if words.is_empty() {
        return None;
    }
    let mut words: Vec<&String> = words.iter().collect();
    words.sort_by_key(|w| std::cmp::Reverse(w.len()));
    let escaped: Vec<String> = words.iter().map(|w| regex::escape(w)).collect();
    Some(format!(r"\b(?:{})\b", escaped.join("|")))
}

impl LogicHighlighter {
    /// Build the highlighter for a syntax configuration.
    pub fn for_syntax(syntax: &SyntaxConfig) -> Result<Self, regex::Error> {
        let mut rules = Vec::new();

        if let Some(pattern) = word_alternation(syntax.params()) {
            rules.push(Rule {
                regex: Regex::new(&pattern)?,
                kind: TokenKind::Param,
            });
        }
        if let Some(pattern) = word_alternation(syntax.builtin_functions()) {
            rules.push(Rule {
                regex: Regex::new(&pattern)?,
                kind: TokenKind::BuiltinFunction,
            });
        }

        // Special variables carry a leading `@`, which `\b` cannot anchor.
        let specials: Vec<String> = syntax
            .special_variables()
            .iter()
            .filter_map(|v| v.strip_prefix('@').map(str::to_string))
            .collect();
        if !specials.is_empty() {
            let mut names: Vec<&String> = specials.iter().collect();
            names.sort_by_key(|w| std::cmp::Reverse(w.len()));
            let escaped: Vec<String> = names.iter().map(|w| regex::escape(w)).collect();
            rules.push(Rule {
                regex: Regex::new(&format!(r"@(?:{})\b", escaped.join("|")))?,
                kind: TokenKind::SpecialVariable,
            });
        }

        rules.push(Rule {
            regex: Regex::new(r"-?\b\d+(?:\.\d+)?\b")?,
            kind: TokenKind::Number,
        });
        rules.push(Rule {
            regex: Regex::new(r#""[^"\n]*""#)?,
            kind: TokenKind::String,
        });
        rules.push(Rule {
            regex: Regex::new(r"#.*")?,
            kind: TokenKind::Comment,
        });

        Ok(Self { rules })
    }

    /// Highlight the whole document, returning spans in ascending order.
    pub fn highlight(&self, doc: &Document) -> Vec<HighlightSpan> {
        let mut spans = Vec::new();
        for line in 0..doc.line_count() {
            let text = doc.line_text(line);
            self.highlight_line(&text, doc.line_start(line), &mut spans);
        }
        spans
    }

    /// Run every rule over one line, with later rules overriding earlier ones
    /// character by character.
    fn highlight_line(&self, text: &str, line_start: usize, out: &mut Vec<HighlightSpan>) {
        let char_count = text.chars().count();
        if char_count == 0 {
            return;
        }

        let mut kinds: Vec<Option<TokenKind>> = vec![None; char_count];
        for rule in &self.rules {
            for m in rule.regex.find_iter(text) {
                let start = text[..m.start()].chars().count();
                let end = start + text[m.start()..m.end()].chars().count();
                for kind in &mut kinds[start..end] {
                    *kind = Some(rule.kind);
                }
            }
        }

        // Coalesce the per-char classification into runs.
        let mut run_start = 0;
        let mut run_kind = kinds[0];
        for (i, kind) in kinds.iter().enumerate().skip(1) {
            if *kind != run_kind {
                if let Some(kind) = run_kind {
                    out.push(HighlightSpan {
                        start: line_start + run_start,
                        end: line_start + i,
                        kind,
                    });
                }
                run_start = i;
                run_kind = *kind;
            }
        }
        if let Some(kind) = run_kind {
            out.push(HighlightSpan {
                start: line_start + run_start,
                end: line_start + char_count,
                kind,
            });
        }
    }
}
