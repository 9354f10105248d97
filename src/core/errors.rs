//! Shared error types for the application

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for riskmap operations
#[derive(Debug, Error)]
pub enum Error {
    /// Export files that parse but describe an impossible assessment
    #[error("invalid export {path}: {message}")]
    Export { path: PathBuf, message: String },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create an export error with path context
    pub fn export(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Export {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;
