use std::io;
use thiserror::Error;

use crate::config::settings::ConfigError;

/// Errors that can occur while turning git output into structured data
///
/// Lines that match no known pattern are not errors: the classifier returns
/// `None` for them and the parsers skip them.
#[derive(Debug, Error)]
pub enum GitError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Git configuration unavailable: {0}")]
    ConfigurationUnavailable(String),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
}

/// Top-level application error that wraps all module-specific errors
///
/// Used by the binary; library entry points return the narrower
/// [`GitError`] or [`ConfigError`].
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Git error: {0}")]
    Git(#[from] GitError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for parsing operations
pub type GitResult<T> = std::result::Result<T, GitError>;

/// Result type for application-level operations
pub type AppResult<T> = std::result::Result<T, AppError>;
