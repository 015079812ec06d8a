//! guardwrap: conditional-compilation guards for diagnostic output
//!
//! Rewrites source text so that diagnostic calls such as Swift's `print(...)`
//! are enclosed in `#if DEBUG` / `#endif` blocks, using a bounded lexical scan
//! instead of a grammar parser.
//!
//! ## Pipeline
//!
//! | Stage | Module |
//! |-------|--------|
//! | Line buffer | [`buffer`] |
//! | Code / string / comment classification | [`classify`] |
//! | Statement end | [`locate`] |
//! | Existing guard detection | [`detect`] |
//! | Emission | [`rewrite`](mod@rewrite) |
//! | Residual coverage check | [`coverage`] |
//!
//! Rewriting is idempotent: running it on its own output changes nothing.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod buffer;
pub mod classify;
pub mod coverage;
pub mod detect;
pub mod dialect;
mod error;
pub mod indent;
pub mod locate;
pub mod rewrite;

pub use buffer::LineBuffer;
pub use classify::{find_call, has_call, Classifier, Region};
pub use coverage::{uncovered_calls, UncoveredCall};
pub use detect::{is_already_wrapped, wrap_state, UnwrapReason, WrapState};
pub use dialect::{Dialect, DEFAULT_WINDOW, MAX_WINDOW};
pub use error::{GuardError, GuardResult};
pub use indent::{indent_of, indent_width, line_ending};
pub use locate::{locate_statement_end, statement_end, StatementEnd};
pub use rewrite::{rewrite, GuardBlock, Rewrite};
