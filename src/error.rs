//! Error types for playlist sorting operations.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur while listing, sorting or rewriting playlists.
#[derive(Debug, Error)]
pub enum Error {
    /// Transport level failure (connection, TLS, body decoding).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The Spotify Web API answered with a non-success status.
    #[error("Spotify API error ({status}): {message}")]
    Api { status: StatusCode, message: String },

    /// No usable token, or the token exchange failed.
    #[error("Authentication error: {0}")]
    Auth(String),

    /// A required environment variable is missing or malformed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Sort fields were empty or contained duplicates.
    #[error("Invalid sort specification: {0}")]
    InvalidSortSpec(String),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// True for failures reported by, or on the way to, the Spotify Web API.
    pub fn is_remote(&self) -> bool {
        matches!(self, Error::Http(_) | Error::Api { .. })
    }
}
