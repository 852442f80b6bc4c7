//! Anonbeats playlist store and track catalog.
//!
//! The playlist document is a single JSON blob on the media host; there is
//! no database. [`PlaylistStore`] implements the load → mutate → save
//! protocol over that blob, with a revision token so concurrent writers are
//! detected instead of silently clobbered. [`Catalog`] projects the host's
//! asset metadata into [`anonbeats_core::Track`] records.

#![forbid(unsafe_code)]

mod catalog;
mod error;
mod playlists;

pub use catalog::Catalog;
pub use error::{Result, StoreError};
pub use playlists::{NewPlaylist, PlaylistStore};
