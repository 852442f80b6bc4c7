//! Playback Events
//!
//! Event-based communication for UI synchronization: the player bar,
//! track lists, and any other view observing the same engine.

use crate::types::{RepeatMode, TransportState};
use serde::{Deserialize, Serialize};

/// Events emitted by the playback engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlayerEvent {
    /// The queue was replaced wholesale
    QueueReplaced {
        /// New queue length
        length: usize,
    },

    /// The current track changed
    TrackChanged {
        /// Public id of the new current track
        public_id: String,
        /// Queue index of the new current track
        index: usize,
    },

    /// Transport state changed
    StateChanged {
        /// The new transport state
        state: TransportState,
    },

    /// Repeat mode changed
    RepeatChanged {
        /// The new repeat mode
        mode: RepeatMode,
    },

    /// Volume changed
    VolumeChanged {
        /// New volume in [0, 1]
        volume: f32,
    },
}
