//! Coverage check for a rewritten file
//!
//! Independent of the rewriter: a call counts as covered when an unmatched
//! guard-open marker appears within the window above it. Complete guard blocks
//! in between are stepped over; declarations are not considered.
//! This finds missed wraps but cannot prove a guard encloses the right span.

use crate::buffer::LineBuffer;
use crate::classify::find_call;
use crate::detect::open_before;
use crate::dialect::Dialect;
use serde::Serialize;

/// A call with no guard-open above it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UncoveredCall {
    /// Zero-based line index
    pub line: usize,
    /// Byte offset of the call token in the line
    pub column: usize,
}

/// Calls in `buffer` with no unmatched guard-open within the window above
#[must_use]
pub fn uncovered_calls(buffer: &LineBuffer, dialect: &Dialect) -> Vec<UncoveredCall> {
    buffer
        .lines()
        .iter()
        .enumerate()
        .filter_map(|(line, text)| {
            let column = find_call(text, dialect)?;
            let covered = open_before(buffer, line, dialect, false).is_ok();
            (!covered).then_some(UncoveredCall { line, column })
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::rewrite::rewrite;

    fn uncovered(text: &str) -> Vec<UncoveredCall> {
        uncovered_calls(&LineBuffer::from_text(text), &Dialect::swift())
    }

    #[test]
    fn test_bare_call_is_uncovered() {
        assert_eq!(
            uncovered("let a = 1\n    print(a)\n"),
            vec![UncoveredCall { line: 1, column: 4 }]
        );
    }

    #[test]
    fn test_guarded_call_is_covered() {
        assert!(uncovered("#if DEBUG\nfoo()\nprint(a)\n#endif\n").is_empty());
    }

    #[test]
    fn test_closed_guard_does_not_cover() {
        let found = uncovered("#if DEBUG\nprint(a)\n#endif\nprint(b)\n");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].line, 3);
    }

    #[test]
    fn test_inner_block_does_not_hide_outer_guard() {
        assert!(uncovered("#if DEBUG\n#if DEBUG\nprint(a)\n#endif\nprint(b)\n#endif\n").is_empty());
    }

    #[test]
    fn test_comments_and_strings_ignored() {
        assert!(uncovered("// print(a)\nlet s = \"print(b)\"\n").is_empty());
    }

    #[test]
    fn test_rewrite_output_is_fully_covered() {
        let buffer =
            LineBuffer::from_text("func f() {\n    print(a)\n    let b = 2\n    print(b)\n}\n");
        let dialect = Dialect::swift();
        assert_eq!(uncovered_calls(&buffer, &dialect).len(), 2);
        let out = rewrite(&buffer, &dialect);
        assert!(uncovered_calls(&LineBuffer::from_text(&out.output), &dialect).is_empty());
    }
}
