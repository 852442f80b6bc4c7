//! Error types for the media host client.

use thiserror::Error;

/// Errors that can occur when talking to the media host.
#[derive(Error, Debug)]
pub enum MediaError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Host returned an error response
    #[error("Media host error ({status}): {message}")]
    Host { status: u16, message: String },

    /// Requested asset does not exist
    #[error("Asset not found: {0}")]
    NotFound(String),

    /// Conditional write lost to a concurrent writer
    #[error("Revision conflict on {public_id}")]
    Conflict { public_id: String },

    /// Failed to parse a host response
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Host is offline or unreachable
    #[error("Media host unreachable: {0}")]
    Unreachable(String),
}

/// Result type for media host operations.
pub type Result<T> = std::result::Result<T, MediaError>;
