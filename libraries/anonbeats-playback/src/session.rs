//! Platform media-session integration

use crate::types::QueueTrack;

/// Metadata published to the platform's now-playing surface.
#[derive(Debug, Clone, PartialEq)]
pub struct NowPlaying {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub artwork_url: Option<String>,
}

impl From<&QueueTrack> for NowPlaying {
    fn from(track: &QueueTrack) -> Self {
        Self {
            title: track.title.clone(),
            artist: track.artist.clone(),
            album: track.album.clone(),
            artwork_url: track.cover_url.clone(),
        }
    }
}

/// Best-effort bridge to the platform's media-key / now-playing surface.
///
/// The engine publishes metadata whenever the current track changes.
/// Implementations typically also register media-key handlers that call
/// back into the [`crate::Player`] transport commands. Absence of the
/// integration is not an error; `publish` is infallible by contract.
pub trait MediaSessionPort: Send {
    /// Publish now-playing metadata.
    fn publish(&mut self, now_playing: &NowPlaying);
}

/// No-op media session for platforms without the integration.
#[derive(Debug, Default)]
pub struct NoopMediaSession;

impl MediaSessionPort for NoopMediaSession {
    fn publish(&mut self, _now_playing: &NowPlaying) {}
}
