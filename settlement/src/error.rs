//! Error types for the settlement engine

use thiserror::Error;

/// Result type for settlement operations
pub type Result<T> = std::result::Result<T, Error>;

/// Settlement errors
///
/// Business-data anomalies (unbalanced scoresheets, empty inputs) are never
/// errors; they surface as explicit result fields. Errors exist only at the
/// configuration and session-domain boundaries.
#[derive(Error, Debug)]
pub enum Error {
    /// Session domain error
    #[error("Session error: {0}")]
    Session(#[from] session_core::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl From<String> for Error {
    fn from(msg: String) -> Self {
        Error::Other(msg)
    }
}

impl From<&str> for Error {
    fn from(msg: &str) -> Self {
        Error::Other(msg.to_string())
    }
}
