//! Audio output trait - the platform seam

use crate::types::QueueTrack;
use std::time::Duration;
use thiserror::Error;

/// Failures an audio output can report.
#[derive(Debug, Error)]
pub enum OutputError {
    /// The platform refused to start playback without a user gesture.
    ///
    /// Not a playback error: the engine stays paused and the user can
    /// retry.
    #[error("Playback start blocked by platform policy")]
    StartBlocked,

    /// The output could not load or play the track
    #[error("Output failed: {0}")]
    Failed(String),
}

/// The single active audio stream, exclusively owned by the engine.
///
/// Replacing the current track tears down and recreates the underlying
/// binding via `load`. `start` confirms that playback actually began; the
/// engine only reports `Playing` after that confirmation.
pub trait AudioOutput: Send {
    /// Bind the output to a track. Resets position to zero.
    fn load(&mut self, track: &QueueTrack) -> Result<(), OutputError>;

    /// Begin or resume playback.
    fn start(&mut self) -> Result<(), OutputError>;

    /// Pause playback, keeping position.
    fn pause(&mut self);

    /// Jump to a position. Out-of-range values are the output's to clamp.
    fn seek(&mut self, position: Duration);

    /// Apply a volume in [0, 1].
    fn set_volume(&mut self, volume: f32);

    /// Current playback position.
    fn position(&self) -> Duration;
}
