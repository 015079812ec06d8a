//! Error types for guardwrap

use std::path::PathBuf;
use thiserror::Error;

/// Result type for guardwrap operations
pub type GuardResult<T> = Result<T, GuardError>;

/// Errors raised by the library
///
/// Scanning itself never fails: an unterminated statement is a fail-soft
/// condition reported through [`crate::Rewrite::unterminated`], not an error.
#[derive(Debug, Error)]
pub enum GuardError {
    /// Dialect configuration is unusable
    #[error("Invalid dialect: {message}")]
    InvalidDialect {
        /// Error message
        message: String,
    },

    /// Source file could not be read
    #[error("Cannot read {}: {source}", path.display())]
    Read {
        /// File that failed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl GuardError {
    /// Create an invalid dialect error
    #[must_use]
    pub fn invalid_dialect(message: impl Into<String>) -> Self {
        Self::InvalidDialect {
            message: message.into(),
        }
    }

    /// Create a read error for a path
    #[must_use]
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_dialect_error() {
        let err = GuardError::invalid_dialect("window must be positive");
        assert!(err.to_string().contains("Invalid dialect"));
        assert!(err.to_string().contains("window must be positive"));
    }

    #[test]
    fn test_read_error_names_path() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = GuardError::read("Sources/App.swift", io_err);
        assert!(err.to_string().contains("Sources/App.swift"));
        assert!(err.to_string().contains("gone"));
    }
}
