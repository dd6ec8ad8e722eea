//! Reader-level error types.

use thiserror::Error;

/// Failures while reading one piece of raw definition data.
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("{format} parse error: {message}")]
    Parse {
        format: &'static str,
        message: String,
    },
    #[error("Cannot read '{path}': {message}")]
    Io { path: String, message: String },
    #[error("Unknown definition format for '{0}'")]
    UnknownFormat(String),
    #[error("Expected an object, found {0}")]
    NotAnObject(&'static str),
    #[error("Expected {expected} for field '{field}', found {found}")]
    UnexpectedShape {
        field: String,
        expected: &'static str,
        found: &'static str,
    },
    #[error("Missing field: {0}")]
    MissingField(String),
    #[error("Invalid value for field '{field}': {message}")]
    InvalidField { field: String, message: String },
    #[error("Unsupported definition version: {found}, supported versions: {supported}")]
    UnsupportedVersion { found: String, supported: String },
    #[error("Invalid reader config: {0}")]
    Config(String),
}
