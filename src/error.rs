//! Error type for loading quotes, profiles and configuration.

use thiserror::Error;

/// Errors raised by the I/O collaborators around the board.
#[derive(Debug, Error)]
pub enum BoardError {
    /// Reading a local file failed
    #[error("failed to read file: {0}")]
    Io(#[from] std::io::Error),
    /// A document was not valid JSON of the expected shape
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// An HTTP request could not be completed
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// The server answered with an unsuccessful status
    #[error("unexpected status {0}")]
    Status(u16),
    /// The async runtime or browser environment is unavailable
    #[error("runtime unavailable: {0}")]
    Runtime(String),
}

/// Result alias for board I/O.
pub type Result<T> = std::result::Result<T, BoardError>;
