//! Domain types

mod playlist;
mod store;
mod track;

pub use playlist::{Playlist, LIKED_COVER_URL, LIKED_PLAYLIST_ID, LIKED_PLAYLIST_NAME};
pub use store::{Store, STORE_VERSION};
pub use track::Track;

/// Current time as epoch milliseconds, the timestamp unit of the persisted
/// Store document.
pub fn epoch_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
