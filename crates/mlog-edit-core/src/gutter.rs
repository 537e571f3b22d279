//! Gutter line classification.
//!
//! mlog programs address *instructions*, not source lines: blank lines and
//! comments take no slot, so the gutter shows each code line its 0-based
//! instruction address and repeats the previous address beside non-code lines.
//! This module computes that derived parallel array; painting it is the
//! host's job.

use mlog_edit_lang::CommentConfig;

use crate::document::Document;

/// Gutter classification of one document line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeLineNumber {
    /// `true` if the line holds an instruction (non-blank, not a comment).
    pub is_code: bool,
    /// 0-based instruction address for code lines; for non-code lines the
    /// address of the nearest code line above, or `None` before the first one.
    pub number: Option<usize>,
}

/// Classify every line of the document in one forward pass.
///
/// A line is code when its trimmed text is non-empty and does not start with
/// the comment marker. Code lines take the next address starting from 0;
/// non-code lines carry the previous address unchanged.
pub fn code_line_numbers(doc: &Document, config: &CommentConfig) -> Vec<CodeLineNumber> {
    let mut numbers = Vec::with_capacity(doc.line_count());
    let mut current: Option<usize> = None;

    for line in 0..doc.line_count() {
        let text = doc.line_text(line);
        let trimmed = text.trim();
        let is_code = !trimmed.is_empty() && !trimmed.starts_with(config.marker());
        if is_code {
            current = Some(current.map_or(0, |n| n + 1));
        }
        numbers.push(CodeLineNumber {
            is_code,
            number: current,
        });
    }

    numbers
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(text: &str) -> Vec<CodeLineNumber> {
        code_line_numbers(&Document::from_text(text), &CommentConfig::default())
    }

    #[test]
    fn test_code_lines_count_from_zero() {
        let numbers = classify("set x 10\nop add y x 1\nprint y");
        assert_eq!(numbers.len(), 3);
        assert!(numbers.iter().all(|n| n.is_code));
        assert_eq!(numbers[0].number, Some(0));
        assert_eq!(numbers[1].number, Some(1));
        assert_eq!(numbers[2].number, Some(2));
    }

    #[test]
    fn test_comments_and_blanks_carry_previous_address() {
        let numbers = classify("# setup\nset x 10\n\n  # loop\njump 1 always");
        assert_eq!(numbers[0], CodeLineNumber { is_code: false, number: None });
        assert_eq!(numbers[1], CodeLineNumber { is_code: true, number: Some(0) });
        assert_eq!(numbers[2], CodeLineNumber { is_code: false, number: Some(0) });
        assert_eq!(numbers[3], CodeLineNumber { is_code: false, number: Some(0) });
        assert_eq!(numbers[4], CodeLineNumber { is_code: true, number: Some(1) });
    }

    #[test]
    fn test_indented_comment_is_not_code() {
        let numbers = classify("   # note");
        assert!(!numbers[0].is_code);
        assert_eq!(numbers[0].number, None);
    }

    #[test]
    fn test_empty_document() {
        let numbers = classify("");
        assert_eq!(numbers, vec![CodeLineNumber { is_code: false, number: None }]);
    }
}
