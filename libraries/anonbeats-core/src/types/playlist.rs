//! Playlist domain type

use serde::{Deserialize, Serialize};

/// Reserved id of the system "liked songs" playlist. Never deletable.
pub const LIKED_PLAYLIST_ID: &str = "liked";

/// Display name of the system "liked songs" playlist.
pub const LIKED_PLAYLIST_NAME: &str = "Liked songs";

/// Default cover for the liked playlist when none is set.
pub const LIKED_COVER_URL: &str = "/liked.png";

/// A named, ordered collection of track references.
///
/// `item_ids` entries are unique; add operations are idempotent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Playlist {
    /// Host-style unique id, or the reserved literal `"liked"`
    pub id: String,

    /// Playlist name
    pub name: String,

    /// Creation timestamp (epoch milliseconds), set once
    pub created_at: i64,

    /// Ordered track public ids
    #[serde(default)]
    pub item_ids: Vec<String>,

    /// Optional cover art URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,
}

impl Playlist {
    /// Create a new playlist with a generated id.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(uuid::Uuid::new_v4().to_string(), name)
    }

    /// Create a playlist with a specific id (used for the reserved liked
    /// playlist and when loading from the persisted document).
    pub fn with_id(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            created_at: super::epoch_millis(),
            item_ids: Vec::new(),
            cover_url: None,
        }
    }

    /// Whether this is the protected system playlist.
    ///
    /// Matches on the reserved id or the "liked songs" name,
    /// case-insensitively.
    pub fn is_liked(&self) -> bool {
        self.id.eq_ignore_ascii_case(LIKED_PLAYLIST_ID)
            || self.name.eq_ignore_ascii_case(LIKED_PLAYLIST_NAME)
    }

    /// Append a track id if absent. Returns true when the list changed.
    pub fn add_item(&mut self, public_id: &str) -> bool {
        if self.item_ids.iter().any(|id| id == public_id) {
            false
        } else {
            self.item_ids.push(public_id.to_string());
            true
        }
    }

    /// Remove a track id if present. Returns true when the list changed.
    pub fn remove_item(&mut self, public_id: &str) -> bool {
        let before = self.item_ids.len();
        self.item_ids.retain(|id| id != public_id);
        self.item_ids.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_item_is_idempotent() {
        let mut p = Playlist::new("Mix");
        assert!(p.add_item("t1"));
        assert!(!p.add_item("t1"));
        assert_eq!(p.item_ids, vec!["t1"]);
    }

    #[test]
    fn remove_item_is_idempotent() {
        let mut p = Playlist::new("Mix");
        p.add_item("t1");
        p.add_item("t2");
        assert!(p.remove_item("t1"));
        assert!(!p.remove_item("t1"));
        assert_eq!(p.item_ids, vec!["t2"]);
    }

    #[test]
    fn liked_detection_covers_id_and_name() {
        let by_id = Playlist::with_id("LIKED", "whatever");
        assert!(by_id.is_liked());

        let by_name = Playlist::with_id("abc-123", "liked SONGS");
        assert!(by_name.is_liked());

        let plain = Playlist::with_id("abc-123", "Road Trip");
        assert!(!plain.is_liked());
    }
}
