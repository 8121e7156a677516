//! Error types for wsl-client

use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure or undecodable response
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Song (or leader) not found (404)
    #[error("Not found")]
    NotFound,

    /// Any other non-success status, with the server's error message
    #[error("Server returned {status}: {message}")]
    Status { status: u16, message: String },

    /// Operation needs a song that is not in the current list
    #[error("Song {0} is not in the current list")]
    UnknownSong(uuid::Uuid),
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
