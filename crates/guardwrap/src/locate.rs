//! Statement-end locator
//!
//! Follows delimiter nesting from a call's start line until it closes, skipping
//! delimiters that appear inside strings, after escapes, or in line comments.

use crate::buffer::LineBuffer;
use crate::classify::{find_call, Classifier, Region};
use crate::dialect::Dialect;

/// Where a statement's nesting closes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementEnd {
    /// Nesting returned to zero on this line
    Closed(usize),
    /// End of input reached with nesting still open
    Unterminated,
}

impl StatementEnd {
    /// End line, falling back to `start` when unterminated
    #[must_use]
    pub const fn or_start(self, start: usize) -> usize {
        match self {
            Self::Closed(end) => end,
            Self::Unterminated => start,
        }
    }
}

/// Find the line where the statement starting at `start` closes its nesting
///
/// Counting covers the whole start line, but the statement ends at the first
/// closing delimiter after the call token that brings the depth back to zero.
/// Closing delimiters with nothing open belong to an earlier statement and are
/// ignored.
#[must_use]
pub fn locate_statement_end(buffer: &LineBuffer, start: usize, dialect: &Dialect) -> StatementEnd {
    let call = buffer
        .line(start)
        .and_then(|line| find_call(line, dialect))
        .unwrap_or(0);
    let mut classifier = Classifier::new(dialect);
    let mut depth: usize = 0;

    for (index, line) in buffer.lines().iter().enumerate().skip(start) {
        for (offset, c, region) in classifier.classify_line(line) {
            if region != Region::Code {
                continue;
            }
            if c == dialect.open_delim {
                depth += 1;
            } else if c == dialect.close_delim && depth > 0 {
                depth -= 1;
                if depth == 0 && (index > start || offset > call) {
                    return StatementEnd::Closed(index);
                }
            }
        }
    }

    StatementEnd::Unterminated
}

/// Statement end line, or `start` itself when the nesting never closes
#[must_use]
pub fn statement_end(buffer: &LineBuffer, start: usize, dialect: &Dialect) -> usize {
    locate_statement_end(buffer, start, dialect).or_start(start)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn end_of(text: &str, start: usize) -> StatementEnd {
        locate_statement_end(&LineBuffer::from_text(text), start, &Dialect::swift())
    }

    #[test]
    fn test_single_line() {
        assert_eq!(end_of("print(\"a\")\n", 0), StatementEnd::Closed(0));
    }

    #[test]
    fn test_multi_line_arguments() {
        let text = "print(\n    a,\n    b\n)\nlet c = 1\n";
        assert_eq!(end_of(text, 0), StatementEnd::Closed(3));
    }

    #[test]
    fn test_nested_calls() {
        let text = "print(format(a,\n   b), c(\n d))\nfoo()\n";
        assert_eq!(end_of(text, 0), StatementEnd::Closed(2));
    }

    #[test]
    fn test_escaped_quote_and_literal_delimiter_in_string() {
        let text = concat!(
            "print(\"value: \\\"quoted\\\" and )\",\n",
            "      a,\n",
            "      b)\n",
            "done()\n",
        );
        assert_eq!(end_of(text, 0), StatementEnd::Closed(2));
    }

    #[test]
    fn test_delimiter_in_comment_ignored() {
        let text = "print(a, // (\n  b)\n";
        assert_eq!(end_of(text, 0), StatementEnd::Closed(1));
    }

    #[test]
    fn test_string_spanning_lines() {
        let text = "print(\"one\n)two\")\n";
        assert_eq!(end_of(text, 0), StatementEnd::Closed(1));
    }

    #[test]
    fn test_starts_mid_buffer() {
        let text = "foo(\nprint(x)\n)\n";
        assert_eq!(end_of(text, 1), StatementEnd::Closed(1));
    }

    #[test]
    fn test_unterminated_falls_back_to_start() {
        let buf = LineBuffer::from_text("x = 1\nprint(a,\n  b\n");
        let dialect = Dialect::swift();
        assert_eq!(
            locate_statement_end(&buf, 1, &dialect),
            StatementEnd::Unterminated
        );
        assert_eq!(statement_end(&buf, 1, &dialect), 1);
    }

    #[test]
    fn test_extra_close_ends_at_first_balance() {
        assert_eq!(end_of("print(a))\n", 0), StatementEnd::Closed(0));
    }

    #[test]
    fn test_stops_inside_closure_line() {
        let text = concat!(
            "    }, completion: { print(\"done\") })\n",
            "    let x = 1\n",
            "    bar(\n",
            "        x\n",
            "    )\n",
        );
        assert_eq!(end_of(text, 0), StatementEnd::Closed(0));
    }

    #[test]
    fn test_leading_closers_ignored() {
        assert_eq!(end_of("}) ; print(x)\nfoo(\n)\n", 0), StatementEnd::Closed(0));
    }

    #[test]
    fn test_earlier_call_on_line_does_not_end() {
        let text = "foo(a) + print(\n    b)\nbar()\n";
        assert_eq!(end_of(text, 0), StatementEnd::Closed(1));
    }

    #[test]
    fn test_enclosing_call_followed() {
        let text = "foo(print(a),\n    b)\nbar()\n";
        assert_eq!(end_of(text, 0), StatementEnd::Closed(1));
    }
}
