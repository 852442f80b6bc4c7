//! Error types for the playlist store.

use anonbeats_media::MediaError;
use thiserror::Error;

/// Errors from playlist store and catalog operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Invalid input, rejected before any store mutation
    #[error("Validation error: {0}")]
    Validation(String),

    /// Requested playlist does not exist
    #[error("Playlist not found: {0}")]
    NotFound(String),

    /// Mutation of a reserved resource refused
    #[error("Guarded operation: {0}")]
    Guarded(String),

    /// Save lost to concurrent writers even after retrying
    #[error("Store revision conflict, retries exhausted")]
    Conflict,

    /// Media host failure
    #[error("Media host error: {0}")]
    Media(#[from] MediaError),

    /// Document (de)serialization failure
    #[error("Store document error: {0}")]
    Document(#[from] anonbeats_core::CoreError),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
