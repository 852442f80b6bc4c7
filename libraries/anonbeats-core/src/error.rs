//! Core error types for Anonbeats

use thiserror::Error;

/// Result type alias using `CoreError`
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error type for Anonbeats
#[derive(Error, Debug)]
pub enum CoreError {
    /// Playlist not found
    #[error("Playlist not found: {0}")]
    PlaylistNotFound(String),

    /// Track not found
    #[error("Track not found: {0}")]
    TrackNotFound(String),

    /// Operation rejected on a reserved resource
    #[error("Guarded operation: {0}")]
    Guarded(String),

    /// Invalid input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization failure
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
