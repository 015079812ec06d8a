//! CLI command definitions using clap

use crate::output::OutputFormat;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// guardwrap: wrap diagnostic print calls in #if DEBUG guards across a source tree
#[derive(Parser, Debug)]
#[command(name = "guardwrap")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Wrap unguarded print calls in place
    ///
    /// Files are rewritten only when a guard was added. After the run, a
    /// coverage check reports calls that still have no guard above them.
    Wrap(WrapArgs),

    /// Report unguarded print calls without changing anything
    Check(CheckArgs),
}

/// Options shared by every command that walks a tree
#[derive(Args, Debug, Clone)]
pub struct ScanArgs {
    /// Root directory to process
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// File extension to process, repeatable (default: swift)
    #[arg(short = 'e', long = "ext", value_name = "EXT")]
    pub extensions: Vec<String>,

    /// Glob of paths to skip, relative to the root, repeatable
    #[arg(long = "exclude", value_name = "GLOB")]
    pub excludes: Vec<String>,

    /// YAML dialect file (markers, call tokens, window)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Arguments for the wrap command
#[derive(Args, Debug, Clone)]
pub struct WrapArgs {
    /// Tree options
    #[command(flatten)]
    pub scan: ScanArgs,

    /// Show what would change without writing files
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the check command
#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    /// Tree options
    #[command(flatten)]
    pub scan: ScanArgs,

    /// Exit non-zero when unguarded calls remain
    #[arg(long)]
    pub deny: bool,
}

/// Color argument for CLI
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for crate::config::ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}
