//! Error types for the CLI

use std::path::PathBuf;
use thiserror::Error;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur in the CLI
///
/// Only [`CliError::MissingRoot`] and configuration errors end a run. File
/// read and write errors are logged per file by the driver, which then moves on.
#[derive(Debug, Error)]
pub enum CliError {
    /// Root directory does not exist
    #[error("Directory {} not found", path.display())]
    MissingRoot {
        /// Configured root
        path: PathBuf,
    },

    /// A source file could not be read
    #[error("Error reading {}: {source}", path.display())]
    FileRead {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// A rewritten file could not be written back
    #[error("Error writing {}: {source}", path.display())]
    FileWrite {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// Library error
    #[error(transparent)]
    Guard(#[from] guardwrap::GuardError),

    /// Writing the report to stdout failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Report serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CliError {
    /// Create a missing root error
    #[must_use]
    pub fn missing_root(path: impl Into<PathBuf>) -> Self {
        Self::MissingRoot { path: path.into() }
    }

    /// Create a file read error
    #[must_use]
    pub fn file_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileRead {
            path: path.into(),
            source,
        }
    }

    /// Create a file write error
    #[must_use]
    pub fn file_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileWrite {
            path: path.into(),
            source,
        }
    }

    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

/// Whether an error ends the run or only the current file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliErrorKind {
    /// Stops the run
    Fatal,
    /// Skips one file
    PerFile,
}

impl CliError {
    /// Classify the error for the driver's propagation policy
    #[must_use]
    pub const fn kind(&self) -> CliErrorKind {
        match self {
            Self::FileRead { .. } | Self::FileWrite { .. } => CliErrorKind::PerFile,
            _ => CliErrorKind::Fatal,
        }
    }
}
