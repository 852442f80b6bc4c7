//! Core types for the playback engine

use serde::{Deserialize, Serialize};

/// Track information for queue management
///
/// Eagerly resolved metadata so playback never waits on catalog I/O.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueTrack {
    /// Media host public id (track identity)
    pub public_id: String,

    /// Track title
    pub title: String,

    /// Artist name, empty when unknown
    #[serde(default)]
    pub artist: String,

    /// Album name, empty when unknown
    #[serde(default)]
    pub album: String,

    /// Playable URL
    pub audio_url: String,

    /// Duration in seconds, when the host reported one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,

    /// Artwork URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,
}

/// Transport state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransportState {
    /// No queue loaded
    Empty,

    /// Queue loaded, not playing
    Paused,

    /// Queue loaded, playing
    Playing,
}

/// Repeat mode, governing end-of-track transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatMode {
    /// Stop when the queue ends
    Off,

    /// Loop the entire queue
    All,

    /// Loop the current track only
    One,
}

impl RepeatMode {
    /// The UI toggle order: off → all → one → off.
    pub fn cycle(self) -> Self {
        match self {
            RepeatMode::Off => RepeatMode::All,
            RepeatMode::All => RepeatMode::One,
            RepeatMode::One => RepeatMode::Off,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeat_cycles_through_all_modes() {
        let mut mode = RepeatMode::Off;
        mode = mode.cycle();
        assert_eq!(mode, RepeatMode::All);
        mode = mode.cycle();
        assert_eq!(mode, RepeatMode::One);
        mode = mode.cycle();
        assert_eq!(mode, RepeatMode::Off);
    }

    #[test]
    fn repeat_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&RepeatMode::All).unwrap(), "\"all\"");
    }
}
