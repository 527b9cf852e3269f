//! Error types for the session domain

use thiserror::Error;

/// Result type for session operations
pub type Result<T> = std::result::Result<T, Error>;

/// Session domain errors
#[derive(Error, Debug)]
pub enum Error {
    /// Roster too small to seat tables
    #[error("Not enough players to assign tables: have {have}, need at least {need}")]
    NotEnoughPlayers {
        /// Players on the roster
        have: usize,
        /// Minimum roster size for one table
        need: usize,
    },

    /// A score line failed strict parsing
    #[error("Invalid score line: {0}")]
    InvalidScoreLine(String),

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
