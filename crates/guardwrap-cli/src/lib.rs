//! guardwrap CLI library
//!
//! Tree driver, configuration, and reporting for the `guardwrap` binary. The
//! text analysis lives in the `guardwrap` crate; this crate decides which
//! files to touch, writes them back, and reports what happened.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::format_push_string)] // String building is clear and correct
#![allow(clippy::missing_errors_doc)] // Error types are self-documenting

mod commands;
mod config;
pub mod driver;
mod error;
mod output;

pub use commands::{CheckArgs, Cli, ColorArg, Commands, ScanArgs, WrapArgs};
pub use config::{load_dialect, CliConfig, ColorChoice, Verbosity};
pub use driver::{
    check_files, check_tree, collect_files, process_file, wrap_tree, CoverageReport, FileFailure,
    FileFilter, FileOutcome, ResidualCall, RunReport, RunStats,
};
pub use error::{CliError, CliErrorKind, CliResult};
pub use output::{
    render_coverage_report, render_json, render_run_report, OutputFormat, ProgressReporter,
};
