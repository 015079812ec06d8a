//! Tree driver
//!
//! Walks a source tree in sorted order, rewrites one file at a time, writes a
//! file back only when its text changed, and sums per-file outcomes into
//! [`RunStats`]. A file that cannot be read or written is logged and skipped;
//! only a missing root or a bad configuration stops the run.

use crate::config::CliConfig;
use crate::error::{CliError, CliErrorKind, CliResult};
use crate::output::ProgressReporter;
use glob::Pattern;
use guardwrap::{rewrite, uncovered_calls, Dialect, GuardError, LineBuffer};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, info_span, warn};

/// Totals for one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    /// Files read and rewritten in memory
    pub files_scanned: usize,
    /// Files whose text changed
    pub files_modified: usize,
    /// Guard pairs inserted
    pub statements_wrapped: usize,
    /// Files skipped after a read or write error
    pub files_failed: usize,
}

impl RunStats {
    /// Add one completed file
    pub fn record(&mut self, outcome: &FileOutcome) {
        self.files_scanned += 1;
        self.statements_wrapped += outcome.statements_wrapped;
        if outcome.modified {
            self.files_modified += 1;
        }
    }

    /// Add one failed file
    pub fn record_failure(&mut self) {
        self.files_failed += 1;
    }
}

/// Result of processing one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileOutcome {
    /// File path
    pub path: PathBuf,
    /// Guard pairs inserted
    pub statements_wrapped: usize,
    /// Text changed (and was written unless dry-run)
    pub modified: bool,
    /// 1-based lines whose statement never closed
    pub unterminated: Vec<usize>,
}

/// A file skipped because of an I/O error
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileFailure {
    /// File path
    pub path: PathBuf,
    /// Error description
    pub message: String,
}

/// A call found unguarded by the coverage check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResidualCall {
    /// File path
    pub path: PathBuf,
    /// 1-based line
    pub line: usize,
    /// 1-based byte column
    pub column: usize,
}

/// Result of the coverage check
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CoverageReport {
    /// Files read by the check
    pub files_checked: usize,
    /// Calls with no guard-open above them
    pub residual: Vec<ResidualCall>,
}

impl CoverageReport {
    /// Number of unguarded calls
    #[must_use]
    pub fn residual_count(&self) -> usize {
        self.residual.len()
    }
}

/// Everything a wrap run produced
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// Root directory
    pub root: PathBuf,
    /// Files were left untouched
    pub dry_run: bool,
    /// Candidate files found under the root
    pub files_found: usize,
    /// Totals
    pub stats: RunStats,
    /// Files that were (or would be) modified
    pub files: Vec<FileOutcome>,
    /// Files skipped after an I/O error
    pub failures: Vec<FileFailure>,
    /// Post-pass coverage check
    pub coverage: CoverageReport,
}

/// Which files under the root take part in a run
#[derive(Debug, Clone)]
pub struct FileFilter {
    extensions: Vec<String>,
    excludes: Vec<Pattern>,
}

impl FileFilter {
    /// Build from the configured extensions and exclude globs
    pub fn from_config(config: &CliConfig) -> CliResult<Self> {
        let excludes = config
            .excludes
            .iter()
            .map(|p| {
                Pattern::new(p)
                    .map_err(|e| CliError::config(format!("invalid exclude pattern '{p}': {e}")))
            })
            .collect::<CliResult<Vec<_>>>()?;
        Ok(Self {
            extensions: config.extensions.clone(),
            excludes,
        })
    }

    fn is_excluded(&self, path: &Path, root: &Path) -> bool {
        let relative = path.strip_prefix(root).unwrap_or(path);
        self.excludes
            .iter()
            .any(|p| p.matches_path(relative) || p.matches_path(path))
    }

    fn wants(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|want| want == ext))
    }
}

/// Candidate files under `root`, sorted, hidden entries skipped
#[must_use]
pub fn collect_files(root: &Path, filter: &FileFilter) -> Vec<PathBuf> {
    let mut files = Vec::new();
    walk(root, root, filter, &mut files);
    files.sort();
    files
}

fn walk(dir: &Path, root: &Path, filter: &FileFilter, files: &mut Vec<PathBuf>) {
    let entries = match std::fs::read_dir(dir) {
        Ok(e) => e,
        Err(e) => {
            warn!(dir = %dir.display(), error = %e, "cannot list directory");
            return;
        }
    };

    for entry in entries.flatten() {
        let path = entry.path();

        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
        if name.starts_with('.') || filter.is_excluded(&path, root) {
            continue;
        }

        // Symlinks are not followed.
        let Ok(file_type) = entry.file_type() else {
            continue;
        };
        if file_type.is_dir() {
            walk(&path, root, filter, files);
        } else if file_type.is_file() && filter.wants(&path) {
            files.push(path);
        }
    }
}

/// Rewrite one file, writing it back only when the text changed
pub fn process_file(path: &Path, dialect: &Dialect, dry_run: bool) -> CliResult<FileOutcome> {
    let buffer = LineBuffer::read(path).map_err(|e| match e {
        GuardError::Read { path, source } => CliError::file_read(path, source),
        other => other.into(),
    })?;

    let result = rewrite(&buffer, dialect);
    let modified = result.output != buffer.text();
    if modified && !dry_run {
        std::fs::write(path, &result.output).map_err(|e| CliError::file_write(path, e))?;
    }

    Ok(FileOutcome {
        path: path.to_path_buf(),
        statements_wrapped: result.statements_wrapped(),
        modified,
        unterminated: result.unterminated.iter().map(|line| line + 1).collect(),
    })
}

/// Wrap every candidate file under `root`, then run the coverage check
pub fn wrap_tree(
    root: &Path,
    config: &CliConfig,
    reporter: &mut ProgressReporter,
) -> CliResult<RunReport> {
    if !root.is_dir() {
        return Err(CliError::missing_root(root));
    }
    let filter = FileFilter::from_config(config)?;
    let files = collect_files(root, &filter);
    info!(root = %root.display(), files = files.len(), dry_run = config.dry_run, "wrapping");

    let mut stats = RunStats::default();
    let mut outcomes = Vec::new();
    let mut failures = Vec::new();

    reporter.start_progress(files.len() as u64, "Wrapping");
    for path in &files {
        let span = info_span!("file", path = %path.display());
        let _enter = span.enter();

        match process_file(path, &config.dialect, config.dry_run) {
            Ok(outcome) => {
                stats.record(&outcome);
                debug!(wrapped = outcome.statements_wrapped, "done");
                if outcome.modified {
                    outcomes.push(outcome);
                }
            }
            Err(e) if e.kind() == CliErrorKind::PerFile => {
                warn!(error = %e, "skipping file");
                stats.record_failure();
                failures.push(FileFailure {
                    path: path.clone(),
                    message: e.to_string(),
                });
            }
            Err(e) => {
                reporter.finish();
                return Err(e);
            }
        }
        reporter.increment(&path.display().to_string());
    }
    reporter.finish();

    let coverage = check_files(&files, &config.dialect);

    Ok(RunReport {
        root: root.to_path_buf(),
        dry_run: config.dry_run,
        files_found: files.len(),
        stats,
        files: outcomes,
        failures,
        coverage,
    })
}

/// Run only the coverage check over the tree
pub fn check_tree(root: &Path, config: &CliConfig) -> CliResult<CoverageReport> {
    if !root.is_dir() {
        return Err(CliError::missing_root(root));
    }
    let filter = FileFilter::from_config(config)?;
    let files = collect_files(root, &filter);
    info!(root = %root.display(), files = files.len(), "checking coverage");
    Ok(check_files(&files, &config.dialect))
}

/// Count calls with no guard-open above them, file by file
#[must_use]
pub fn check_files(files: &[PathBuf], dialect: &Dialect) -> CoverageReport {
    let mut report = CoverageReport::default();

    for path in files {
        let buffer = match LineBuffer::read(path) {
            Ok(b) => b,
            Err(e) => {
                warn!(error = %e, "coverage check skipped file");
                continue;
            }
        };
        report.files_checked += 1;
        report
            .residual
            .extend(uncovered_calls(&buffer, dialect).into_iter().map(|call| {
                ResidualCall {
                    path: path.clone(),
                    line: call.line + 1,
                    column: call.column + 1,
                }
            }));
    }

    report
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn tree(files: &[(&str, &str)]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for (name, text) in files {
            let path = dir.path().join(name);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, text).unwrap();
        }
        dir
    }

    fn quiet() -> ProgressReporter {
        ProgressReporter::new(true)
    }

    mod collect_tests {
        use super::*;

        #[test]
        fn test_sorted_and_filtered() {
            let dir = tree(&[
                ("b.swift", ""),
                ("a.swift", ""),
                ("sub/c.swift", ""),
                ("notes.txt", ""),
                (".hidden/d.swift", ""),
                (".e.swift", ""),
            ]);
            let filter = FileFilter::from_config(&CliConfig::new()).unwrap();
            let files = collect_files(dir.path(), &filter);
            let names: Vec<_> = files
                .iter()
                .map(|p| p.strip_prefix(dir.path()).unwrap().to_path_buf())
                .collect();
            assert_eq!(
                names,
                vec![
                    PathBuf::from("a.swift"),
                    PathBuf::from("b.swift"),
                    PathBuf::from("sub/c.swift")
                ]
            );
        }

        #[test]
        fn test_exclude_pattern() {
            let dir = tree(&[("Generated/x.swift", ""), ("App/y.swift", "")]);
            let config = CliConfig::new().with_excludes(["Generated"]);
            let filter = FileFilter::from_config(&config).unwrap();
            let files = collect_files(dir.path(), &filter);
            assert_eq!(files.len(), 1);
            assert!(files[0].ends_with("App/y.swift"));
        }

        #[test]
        fn test_invalid_exclude_pattern() {
            let config = CliConfig::new().with_excludes(["[unclosed"]);
            assert!(matches!(
                FileFilter::from_config(&config),
                Err(CliError::Config { .. })
            ));
        }

        #[test]
        fn test_custom_extensions() {
            let dir = tree(&[("a.swift", ""), ("b.m", ""), ("c.h", "")]);
            let config = CliConfig::new().with_extensions(["m", "h"]);
            let filter = FileFilter::from_config(&config).unwrap();
            assert_eq!(collect_files(dir.path(), &filter).len(), 2);
        }
    }

    mod process_tests {
        use super::*;

        #[test]
        fn test_modified_file_written() {
            let dir = tree(&[("a.swift", "func f() {\n    print(1)\n}\n")]);
            let path = dir.path().join("a.swift");
            let outcome = process_file(&path, &Dialect::swift(), false).unwrap();
            assert!(outcome.modified);
            assert_eq!(outcome.statements_wrapped, 1);
            assert_eq!(
                fs::read_to_string(&path).unwrap(),
                "func f() {\n    #if DEBUG\n    print(1)\n    #endif\n}\n"
            );
        }

        #[test]
        fn test_dry_run_leaves_file() {
            let text = "print(1)\n";
            let dir = tree(&[("a.swift", text)]);
            let path = dir.path().join("a.swift");
            let outcome = process_file(&path, &Dialect::swift(), true).unwrap();
            assert!(outcome.modified);
            assert_eq!(fs::read_to_string(&path).unwrap(), text);
        }

        #[test]
        fn test_unchanged_file_not_rewritten() {
            let dir = tree(&[("a.swift", "let a = 1\n")]);
            let path = dir.path().join("a.swift");
            let before = fs::metadata(&path).unwrap().modified().unwrap();
            let outcome = process_file(&path, &Dialect::swift(), false).unwrap();
            assert!(!outcome.modified);
            assert_eq!(fs::metadata(&path).unwrap().modified().unwrap(), before);
        }

        #[test]
        fn test_unterminated_reported_one_based() {
            let dir = tree(&[("a.swift", "let a = 1\nprint(a,\n")]);
            let outcome =
                process_file(&dir.path().join("a.swift"), &Dialect::swift(), true).unwrap();
            assert_eq!(outcome.unterminated, vec![2]);
        }

        #[test]
        fn test_invalid_utf8_is_read_error() {
            let dir = TempDir::new().unwrap();
            let path = dir.path().join("bin.swift");
            fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();
            let err = process_file(&path, &Dialect::swift(), false).unwrap_err();
            assert!(matches!(err, CliError::FileRead { .. }));
            assert_eq!(err.kind(), CliErrorKind::PerFile);
        }
    }

    mod run_tests {
        use super::*;

        #[test]
        fn test_missing_root() {
            let err = wrap_tree(Path::new("/no/such/root"), &CliConfig::new(), &mut quiet())
                .unwrap_err();
            assert!(matches!(err, CliError::MissingRoot { .. }));
            assert!(matches!(
                check_tree(Path::new("/no/such/root"), &CliConfig::new()),
                Err(CliError::MissingRoot { .. })
            ));
        }

        #[test]
        fn test_stats_aggregate() {
            let dir = tree(&[
                ("a.swift", "print(1)\nprint(2)\n"),
                ("b.swift", "let x = 1\n"),
                ("c/d.swift", "    print(3)\n"),
            ]);
            let report = wrap_tree(dir.path(), &CliConfig::new(), &mut quiet()).unwrap();
            assert_eq!(
                report.stats,
                RunStats {
                    files_scanned: 3,
                    files_modified: 2,
                    statements_wrapped: 3,
                    files_failed: 0,
                }
            );
            assert_eq!(report.files.len(), 2);
            assert_eq!(report.coverage.residual_count(), 0);
        }

        #[test]
        fn test_second_run_is_noop() {
            let dir = tree(&[("a.swift", "func f() {\n    print(\"x\")\n}\n")]);
            wrap_tree(dir.path(), &CliConfig::new(), &mut quiet()).unwrap();
            let second = wrap_tree(dir.path(), &CliConfig::new(), &mut quiet()).unwrap();
            assert_eq!(second.stats.files_modified, 0);
            assert_eq!(second.stats.statements_wrapped, 0);
        }

        #[test]
        fn test_bad_file_skipped() {
            let dir = tree(&[("a.swift", "print(1)\n")]);
            fs::write(dir.path().join("b.swift"), [0xff, 0xfe]).unwrap();
            let report = wrap_tree(dir.path(), &CliConfig::new(), &mut quiet()).unwrap();
            assert_eq!(report.stats.files_scanned, 1);
            assert_eq!(report.stats.files_modified, 1);
            assert_eq!(report.stats.files_failed, 1);
            assert_eq!(report.failures.len(), 1);
            assert!(report.failures[0].path.ends_with("b.swift"));
        }

        #[test]
        fn test_dry_run_reports_residual() {
            let dir = tree(&[("a.swift", "print(1)\n")]);
            let config = CliConfig::new().with_dry_run(true);
            let report = wrap_tree(dir.path(), &config, &mut quiet()).unwrap();
            assert_eq!(report.stats.files_modified, 1);
            assert_eq!(report.coverage.residual_count(), 1);
            assert_eq!(report.coverage.residual[0].line, 1);
            assert_eq!(report.coverage.residual[0].column, 1);
        }

        #[test]
        fn test_check_tree() {
            let dir = tree(&[("a.swift", "#if DEBUG\nprint(1)\n#endif\nprint(2)\n")]);
            let report = check_tree(dir.path(), &CliConfig::new()).unwrap();
            assert_eq!(report.files_checked, 1);
            assert_eq!(report.residual_count(), 1);
            assert_eq!(report.residual[0].line, 4);
        }
    }
}
