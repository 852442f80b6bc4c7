//! Error types for the playback engine

use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Queue is empty
    #[error("Queue is empty")]
    QueueEmpty,

    /// Start index outside the queue
    #[error("Index out of bounds: {0}")]
    IndexOutOfBounds(usize),

    /// Audio output failed to load a track
    #[error("Audio output error: {0}")]
    Output(String),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
