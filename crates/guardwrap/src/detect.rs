//! Wrap detector
//!
//! Decides whether a call statement already sits inside a guard block by
//! looking a bounded number of lines backward for an unmatched guard-open
//! marker and the same number forward, past the end of the statement, for an
//! unmatched guard-close marker. This is a window heuristic, not scope
//! tracking: a guard further away than the window is not seen, and the
//! statement gets wrapped again.
//!
//! Both scans step over complete guard blocks, so a block opened and closed for
//! an earlier statement is never assumed to cover this one. Marker lines do not
//! count toward the window. Together these make the answer the same whether or
//! not other statements nearby have been wrapped, which keeps rewriting
//! idempotent. The backward scan gives up at the first declaration line.

use crate::buffer::LineBuffer;
use crate::dialect::Dialect;
use crate::locate::statement_end;
use serde::Serialize;

/// Why a call was judged unwrapped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "line", rename_all = "snake_case")]
pub enum UnwrapReason {
    /// No unmatched guard-open within the backward window
    NoGuardOpen,
    /// Declaration line met before any guard-open
    DeclarationBoundary(usize),
    /// Guard-open found but no guard-close within the forward window
    NoGuardClose,
}

/// Wrap state of a candidate line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapState {
    /// Enclosed by the guard pair at these lines
    Wrapped {
        /// Guard-open line
        open: usize,
        /// Guard-close line
        close: usize,
    },
    /// Needs a guard
    Unwrapped(UnwrapReason),
}

impl WrapState {
    /// Already inside a guard block
    #[must_use]
    pub const fn is_wrapped(&self) -> bool {
        matches!(self, Self::Wrapped { .. })
    }
}

/// Wrap state of the call statement starting at `line`
#[must_use]
pub fn wrap_state(buffer: &LineBuffer, line: usize, dialect: &Dialect) -> WrapState {
    let open = match open_before(buffer, line, dialect, true) {
        Ok(open) => open,
        Err(reason) => return WrapState::Unwrapped(reason),
    };

    let end = statement_end(buffer, line, dialect);
    match close_after(buffer, end, dialect) {
        Some(close) => WrapState::Wrapped { open, close },
        None => WrapState::Unwrapped(UnwrapReason::NoGuardClose),
    }
}

/// Shorthand for [`wrap_state`] reduced to a yes/no answer
#[must_use]
pub fn is_already_wrapped(buffer: &LineBuffer, line: usize, dialect: &Dialect) -> bool {
    wrap_state(buffer, line, dialect).is_wrapped()
}

/// Nearest unmatched guard-open above `line`, or the reason the scan stopped
pub(crate) fn open_before(
    buffer: &LineBuffer,
    line: usize,
    dialect: &Dialect,
    stop_at_declarations: bool,
) -> Result<usize, UnwrapReason> {
    let mut budget = dialect.window;
    let mut depth = 0usize;

    for index in (0..line).rev() {
        let Some(text) = buffer.line(index) else {
            break;
        };
        if dialect.is_guard_open(text) {
            if depth == 0 {
                return Ok(index);
            }
            depth -= 1;
        } else if dialect.is_guard_close(text) {
            depth += 1;
        } else {
            if budget == 0 {
                break;
            }
            budget -= 1;
            if stop_at_declarations && dialect.is_declaration(text) {
                return Err(UnwrapReason::DeclarationBoundary(index));
            }
        }
    }
    Err(UnwrapReason::NoGuardOpen)
}

/// Nearest unmatched guard-close below `end`
fn close_after(buffer: &LineBuffer, end: usize, dialect: &Dialect) -> Option<usize> {
    let mut budget = dialect.window;
    let mut depth = 0usize;

    for index in end + 1..buffer.len() {
        let text = buffer.line(index)?;
        if dialect.is_guard_close(text) {
            if depth == 0 {
                return Some(index);
            }
            depth -= 1;
        } else if dialect.is_guard_open(text) {
            depth += 1;
        } else {
            if budget == 0 {
                break;
            }
            budget -= 1;
        }
    }
    None
}
