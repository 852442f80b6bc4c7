//! Anonbeats - Playback Engine
//!
//! Platform-agnostic playback state machine for Anonbeats.
//!
//! This crate provides:
//! - Queue management (wholesale replacement, circular next/prev)
//! - Transport state (playing/paused) confirmed by the audio output
//! - Repeat modes (Off, All, One) and end-of-track transitions
//! - Volume and seek passthrough
//! - Now-playing publication to a platform media session
//!
//! # Architecture
//!
//! `anonbeats-playback` has no platform dependencies. The audio output and
//! the media-session integration are provided via traits; the engine is a
//! single-threaded, event-driven state machine driven by UI commands and
//! the output's "finished" signal.
//!
//! # Example
//!
//! ```rust
//! use anonbeats_playback::{Player, QueueTrack, RepeatMode};
//! # use anonbeats_playback::{AudioOutput, OutputError};
//! # use std::time::Duration;
//! # struct Silent;
//! # impl AudioOutput for Silent {
//! #     fn load(&mut self, _t: &QueueTrack) -> Result<(), OutputError> { Ok(()) }
//! #     fn start(&mut self) -> Result<(), OutputError> { Ok(()) }
//! #     fn pause(&mut self) {}
//! #     fn seek(&mut self, _p: Duration) {}
//! #     fn set_volume(&mut self, _v: f32) {}
//! #     fn position(&self) -> Duration { Duration::ZERO }
//! # }
//!
//! let mut player = Player::new(Box::new(Silent));
//! player.set_repeat(RepeatMode::All);
//!
//! let track = QueueTrack {
//!     public_id: "anonbeats/tracks/song".to_string(),
//!     title: "My Song".to_string(),
//!     artist: String::new(),
//!     album: String::new(),
//!     audio_url: "https://cdn.example/song.mp3".to_string(),
//!     duration: None,
//!     cover_url: None,
//! };
//!
//! player.set_queue(vec![track], 0).unwrap();
//! player.next().unwrap();
//! ```

#![forbid(unsafe_code)]

mod error;
mod events;
mod output;
mod player;
mod session;
pub mod types;

// Public exports
pub use error::{PlaybackError, Result};
pub use events::PlayerEvent;
pub use output::{AudioOutput, OutputError};
pub use player::Player;
pub use session::{MediaSessionPort, NoopMediaSession, NowPlaying};
pub use types::{QueueTrack, RepeatMode, TransportState};
