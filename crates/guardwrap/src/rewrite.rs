//! Rewriter/emitter
//!
//! One forward pass over a [`LineBuffer`]. Each unwrapped call statement is
//! copied verbatim between a guard-open and a guard-close marker indented like
//! its first line; every other line passes through untouched. A statement's
//! interior lines are consumed with it and never rescanned, whether or not it
//! needed a guard, and only the first call on a line is considered.
//!
//! ```
//! use guardwrap::{rewrite, Dialect, LineBuffer};
//!
//! let buffer = LineBuffer::from_text("func f() {\n    print(\"hi\")\n}\n");
//! let result = rewrite(&buffer, &Dialect::swift());
//! assert_eq!(
//!     result.output,
//!     "func f() {\n    #if DEBUG\n    print(\"hi\")\n    #endif\n}\n"
//! );
//! assert_eq!(result.statements_wrapped(), 1);
//! ```

use crate::buffer::LineBuffer;
use crate::classify::has_call;
use crate::detect::{wrap_state, UnwrapReason, WrapState};
use crate::dialect::Dialect;
use crate::indent::{indent_width, line_ending};
use crate::locate::{locate_statement_end, statement_end, StatementEnd};
use serde::Serialize;
use tracing::{debug, warn};

/// Span of original lines enclosed in one guard pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GuardBlock {
    /// First enclosed line
    pub start: usize,
    /// Last enclosed line, inclusive
    pub end: usize,
    /// Leading-whitespace width of the first line
    pub indent: usize,
    /// Why the statement was not considered wrapped
    pub reason: UnwrapReason,
}

/// Result of rewriting one buffer
#[derive(Debug, Clone, Default)]
pub struct Rewrite {
    /// Rewritten text
    pub output: String,
    /// Guard blocks emitted, in order
    pub blocks: Vec<GuardBlock>,
    /// Start lines whose nesting never closed; each was wrapped alone
    pub unterminated: Vec<usize>,
}

impl Rewrite {
    /// Any guard was inserted
    #[must_use]
    pub fn changed(&self) -> bool {
        !self.blocks.is_empty()
    }

    /// Number of statements wrapped
    #[must_use]
    pub fn statements_wrapped(&self) -> usize {
        self.blocks.len()
    }
}

/// Wrap every unguarded call statement in `buffer`
#[must_use]
pub fn rewrite(buffer: &LineBuffer, dialect: &Dialect) -> Rewrite {
    let lines = buffer.lines();
    let mut result = Rewrite {
        output: String::with_capacity(lines.iter().map(String::len).sum::<usize>() + 64),
        ..Rewrite::default()
    };

    let mut index = 0;
    while let Some(line) = lines.get(index) {
        if !has_call(line, dialect) {
            result.output.push_str(line);
            index += 1;
            continue;
        }

        let reason = match wrap_state(buffer, index, dialect) {
            WrapState::Wrapped { open, close } => {
                let end = statement_end(buffer, index, dialect);
                debug!(line = index + 1, open = open + 1, close = close + 1, "already guarded");
                for text in &lines[index..=end] {
                    result.output.push_str(text);
                }
                index = end + 1;
                continue;
            }
            WrapState::Unwrapped(reason) => reason,
        };

        let end = match locate_statement_end(buffer, index, dialect) {
            StatementEnd::Closed(end) => end,
            StatementEnd::Unterminated => {
                warn!(
                    line = index + 1,
                    "statement nesting never closes; guarding its first line only"
                );
                result.unterminated.push(index);
                index
            }
        };

        let block = GuardBlock {
            start: index,
            end,
            indent: indent_width(line),
            reason,
        };
        emit_block(&mut result.output, &lines[block.start..=block.end], &block, dialect);
        debug!(start = block.start + 1, end = block.end + 1, ?reason, "guarded statement");
        result.blocks.push(block);
        index = end + 1;
    }

    result
}

/// Emit `span` between guard markers indented like its first line
fn emit_block(out: &mut String, span: &[String], block: &GuardBlock, dialect: &Dialect) {
    let (Some(first), Some(last)) = (span.first(), span.last()) else {
        return;
    };
    let indent = &first[..block.indent];
    let eol = match line_ending(first) {
        "" => "\n",
        ending => ending,
    };

    out.push_str(indent);
    out.push_str(&dialect.open_marker);
    out.push_str(eol);
    for line in span {
        out.push_str(line);
    }
    if line_ending(last).is_empty() {
        // Final line of the file: keep the file ending without a terminator.
        out.push_str(eol);
        out.push_str(indent);
        out.push_str(&dialect.close_marker);
    } else {
        out.push_str(indent);
        out.push_str(&dialect.close_marker);
        out.push_str(eol);
    }
}
