//! Error types for settings backends

use std::path::PathBuf;
use thiserror::Error;

/// Result type for settings and profile operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised by a settings backend or by decoding what it returned.
///
/// Absence of a profile is never an error; these variants only cover
/// genuine I/O and data-shape failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Scope not supported by this backend
    #[error("Invalid scope: {0}")]
    InvalidScope(String),

    /// Stored value under the profiles key is not a collection object
    #[error("Invalid profile collection: {0}")]
    InvalidCollection(String),

    /// File I/O error
    #[error("I/O error for {path}: {message}")]
    IoError { path: PathBuf, message: String },

    /// JSON parse error
    #[error("JSON parse error in {path}: {message}")]
    JsonParseError { path: PathBuf, message: String },

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ConfigError {
    /// Get the error code for CLI output
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidScope(_) => "INVALID_SCOPE",
            Self::InvalidCollection(_) => "INVALID_COLLECTION",
            Self::IoError { .. } => "IO_ERROR",
            Self::JsonParseError { .. } => "PARSE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        Self::IoError {
            path: PathBuf::new(),
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonParseError {
            path: PathBuf::new(),
            message: err.to_string(),
        }
    }
}
