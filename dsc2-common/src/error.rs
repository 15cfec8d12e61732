//! Common error types for DS-C2

use thiserror::Error;

/// Common result type for DS-C2 operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across DS-C2 modules
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parse or serialization error (wraps serde_json::Error)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed log source (structure does not match the expected format)
    #[error("Malformed source: {0}")]
    MalformedSource(String),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
