//! Output formatting and progress reporting

use crate::driver::{CoverageReport, RunReport};
use crate::error::CliResult;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

const RULE: &str = "============================================================";

/// Output format for run reports
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// JSON document
    Json,
}

/// Progress bar over the files of a run, drawn on stderr
#[derive(Debug)]
pub struct ProgressReporter {
    progress_bar: Option<ProgressBar>,
    /// Suppress all progress output
    pub quiet: bool,
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new(false)
    }
}

impl ProgressReporter {
    /// Create a new progress reporter
    #[must_use]
    pub const fn new(quiet: bool) -> Self {
        Self {
            progress_bar: None,
            quiet,
        }
    }

    /// Start a progress bar for `total` files
    pub fn start_progress(&mut self, total: u64, message: &str) {
        if self.quiet {
            return;
        }

        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=>-"),
        );
        pb.set_message(message.to_string());
        self.progress_bar = Some(pb);
    }

    /// Advance by one file
    pub fn increment(&self, file: &str) {
        if let Some(ref pb) = self.progress_bar {
            pb.set_message(file.to_string());
            pb.inc(1);
        }
    }

    /// Remove the progress bar
    pub fn finish(&self) {
        if let Some(ref pb) = self.progress_bar {
            pb.finish_and_clear();
        }
    }
}

fn ok_mark(use_color: bool) -> String {
    if use_color {
        style("✓").green().bold().to_string()
    } else {
        "OK".to_string()
    }
}

fn warn_mark(use_color: bool) -> String {
    if use_color {
        style("⚠").yellow().bold().to_string()
    } else {
        "WARN".to_string()
    }
}

fn fail_mark(use_color: bool) -> String {
    if use_color {
        style("✗").red().bold().to_string()
    } else {
        "FAIL".to_string()
    }
}

/// Render a wrap run as text
///
/// Lists each modified file, the totals, and the coverage check. Residual
/// call locations are listed only when `detailed` is set.
#[must_use]
pub fn render_run_report(report: &RunReport, use_color: bool, detailed: bool) -> String {
    let mut out = String::new();
    let verb = if report.dry_run { "Would wrap" } else { "Wrapped" };

    let _ = writeln!(out, "Found {} source files", report.files_found);
    out.push('\n');

    for file in &report.files {
        let _ = writeln!(
            out,
            "{} {}: {verb} {} statement(s)",
            ok_mark(use_color),
            file.path.display(),
            file.statements_wrapped
        );
        for line in &file.unterminated {
            let _ = writeln!(
                out,
                "  {} line {}: statement never closes, guarded first line only",
                warn_mark(use_color),
                line
            );
        }
    }
    for failure in &report.failures {
        let _ = writeln!(
            out,
            "{} {}: {}",
            fail_mark(use_color),
            failure.path.display(),
            failure.message
        );
    }

    let stats = &report.stats;
    out.push('\n');
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(
        out,
        "{} Complete! {verb} {} statements across {} files",
        ok_mark(use_color),
        stats.statements_wrapped,
        stats.files_modified
    );
    let _ = writeln!(
        out,
        "  files scanned: {}, files modified: {}, statements wrapped: {}, files failed: {}",
        stats.files_scanned, stats.files_modified, stats.statements_wrapped, stats.files_failed
    );
    let _ = writeln!(out, "{RULE}");
    out.push('\n');
    out.push_str(&render_coverage_report(&report.coverage, use_color, detailed));
    out
}

/// Render the coverage check as text
#[must_use]
pub fn render_coverage_report(report: &CoverageReport, use_color: bool, detailed: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Verifying...");
    let count = report.residual_count();
    let mark = if count == 0 {
        ok_mark(use_color)
    } else {
        warn_mark(use_color)
    };
    let _ = writeln!(
        out,
        "{mark} Residual unwrapped calls: {count} (in {} files checked)",
        report.files_checked
    );
    if detailed {
        for call in &report.residual {
            let _ = writeln!(
                out,
                "  {}:{}:{}",
                call.path.display(),
                call.line,
                call.column
            );
        }
    }
    out
}

/// Render any report as pretty JSON
pub fn render_json<T: Serialize>(report: &T) -> CliResult<String> {
    Ok(serde_json::to_string_pretty(report)?)
}
