//! guardwrap: wrap diagnostic print calls in `#if DEBUG` guards
//!
//! ## Usage
//!
//! ```bash
//! guardwrap wrap Sources/              # Wrap every unguarded print in place
//! guardwrap wrap --dry-run Sources/    # Show what would change
//! guardwrap check --deny Sources/      # Fail if any print is unguarded
//! ```

use clap::Parser;
use guardwrap_cli::{
    check_tree, load_dialect, render_coverage_report, render_json, render_run_report, wrap_tree,
    CheckArgs, Cli, CliConfig, CliResult, ColorChoice, Commands, OutputFormat, ProgressReporter,
    ScanArgs, Verbosity, WrapArgs,
};
use std::io::Write;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();

    let verbosity = Verbosity::from_flags(cli.quiet, cli.verbose);
    init_logging(verbosity);
    let color: ColorChoice = cli.color.clone().into();
    let base = CliConfig::new().with_verbosity(verbosity).with_color(color);

    match cli.command {
        Commands::Wrap(args) => run_wrap(base, &args),
        Commands::Check(args) => run_check(base, &args),
    }
}

/// Log to stderr; `RUST_LOG` overrides the level implied by -v/-q
fn init_logging(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.log_directive()));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn build_config(base: CliConfig, scan: &ScanArgs) -> CliResult<CliConfig> {
    let dialect = load_dialect(scan.config.as_deref())?;

    Ok(base
        .with_extensions(&scan.extensions)
        .with_excludes(scan.excludes.iter().cloned())
        .with_format(scan.format)
        .with_dialect(dialect))
}

/// Write a finished report to stdout
fn emit(text: &str) -> CliResult<()> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(text.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

fn run_wrap(base: CliConfig, args: &WrapArgs) -> CliResult<ExitCode> {
    let config = build_config(base, &args.scan)?.with_dry_run(args.dry_run);
    let quiet = config.verbosity.is_quiet();

    let mut reporter = ProgressReporter::new(quiet || config.format == OutputFormat::Json);
    let report = wrap_tree(&args.scan.path, &config, &mut reporter)?;

    match config.format {
        OutputFormat::Json => emit(&format!("{}\n", render_json(&report)?))?,
        OutputFormat::Text if !quiet => emit(&render_run_report(
            &report,
            config.color.should_color(),
            config.verbosity.is_verbose(),
        ))?,
        OutputFormat::Text => {}
    }

    Ok(ExitCode::SUCCESS)
}

fn run_check(base: CliConfig, args: &CheckArgs) -> CliResult<ExitCode> {
    let config = build_config(base, &args.scan)?;
    let report = check_tree(&args.scan.path, &config)?;

    match config.format {
        OutputFormat::Json => emit(&format!("{}\n", render_json(&report)?))?,
        OutputFormat::Text if !config.verbosity.is_quiet() => emit(&render_coverage_report(
            &report,
            config.color.should_color(),
            config.verbosity.is_verbose(),
        ))?,
        OutputFormat::Text => {}
    }

    if args.deny && report.residual_count() > 0 {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
