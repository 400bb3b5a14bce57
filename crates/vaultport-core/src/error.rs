//! Error types for the import system.
//!
//! All errors in the system are represented by the [`Error`] enum.
//! This ensures composable error handling across crates.

use std::io;
use std::path::PathBuf;
use thiserror::Error as ThisError;

/// The core error type for all import operations.
#[derive(ThisError, Debug)]
pub enum Error {
    /// File system error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// File not found
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Invalid configuration (bad vault path, incomplete remote-storage settings, etc.)
    #[error("Configuration error: {reason}")]
    ConfigError { reason: String },

    /// Pattern compilation or text parsing failure
    #[error("Parse error: {reason}")]
    ParseError { reason: String },

    /// A host store call failed
    #[error("Store error: {reason}")]
    StoreError { reason: String },

    /// Referenced document does not exist in the store
    #[error("Not found in store: {key}")]
    NotFound { key: String },

    /// Generic unclassified error
    #[error("Error: {0}")]
    Other(String),
}

/// Convenient Result type alias
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a file not found error
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Error::FileNotFound { path: path.into() }
    }

    /// Create a configuration error
    pub fn config_error(reason: impl Into<String>) -> Self {
        Error::ConfigError {
            reason: reason.into(),
        }
    }

    /// Create a parse error
    pub fn parse_error(reason: impl Into<String>) -> Self {
        Error::ParseError {
            reason: reason.into(),
        }
    }

    /// Create a store error
    pub fn store_error(reason: impl Into<String>) -> Self {
        Error::StoreError {
            reason: reason.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(key: impl Into<String>) -> Self {
        Error::NotFound { key: key.into() }
    }

    /// Create a generic error
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = Error::config_error("S3 bucket missing");
        assert!(err.to_string().contains("Configuration error"));

        let err = Error::not_found("JournalEntry.abc123");
        assert!(err.to_string().contains("Not found in store"));
    }
}
