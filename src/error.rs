//! Error types for pixela-cli

use thiserror::Error;

/// Result type for pixela-cli operations
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Missing or unusable configuration (credentials, graph id, env file)
    #[error("configuration error: {0}")]
    Config(String),

    /// Bad user input, caught before any network call
    #[error("validation error: {0}")]
    Validation(String),

    /// The service answered with a non-success status
    #[error("Pixela returned {status}: {message}")]
    Remote {
        status: reqwest::StatusCode,
        message: String,
    },

    /// No usable response (DNS, connect, timeout, unreadable body)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Error::Validation(msg.into())
    }
}
