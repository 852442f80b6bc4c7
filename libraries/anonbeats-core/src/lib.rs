//! Anonbeats Core
//!
//! Domain types and error handling shared across the Anonbeats crates.
//!
//! The core crate defines:
//! - **Domain Types**: `Track`, `Playlist`, `Store`
//! - **Error Handling**: Unified `CoreError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use anonbeats_core::types::{Playlist, Store};
//!
//! let mut store = Store::empty();
//! let playlist = Playlist::new("Road Trip");
//! store.playlists.push(playlist);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod types;

pub use error::{CoreError, Result};
pub use types::{Playlist, Store, Track, LIKED_COVER_URL, LIKED_PLAYLIST_ID, LIKED_PLAYLIST_NAME};
