//! The persisted playlist document

use crate::types::Playlist;
use serde::{Deserialize, Serialize};

/// Current schema version of the persisted document.
///
/// Unused beyond presence; reserved for future migration.
pub const STORE_VERSION: u32 = 1;

/// The root document holding all playlists.
///
/// Persisted as a single JSON blob on the media host; every save replaces
/// the whole document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    /// Schema version
    pub version: u32,

    /// Last save timestamp (epoch milliseconds)
    pub updated_at: i64,

    /// All playlists, unordered within the document
    #[serde(default)]
    pub playlists: Vec<Playlist>,
}

impl Store {
    /// An empty, valid store, used when the blob does not exist yet.
    pub fn empty() -> Self {
        Self {
            version: STORE_VERSION,
            updated_at: super::epoch_millis(),
            playlists: Vec::new(),
        }
    }

    /// Find a playlist by id.
    pub fn playlist(&self, id: &str) -> Option<&Playlist> {
        self.playlists.iter().find(|p| p.id == id)
    }

    /// Find a playlist by id, mutably.
    pub fn playlist_mut(&mut self, id: &str) -> Option<&mut Playlist> {
        self.playlists.iter_mut().find(|p| p.id == id)
    }

    /// Parse the persisted document.
    pub fn from_slice(data: &[u8]) -> crate::Result<Self> {
        Ok(serde_json::from_slice(data)?)
    }

    /// Serialize for persistence, pretty-printed for hand inspection.
    pub fn to_bytes(&self) -> crate::Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_store_is_valid() {
        let store = Store::empty();
        assert_eq!(store.version, STORE_VERSION);
        assert!(store.playlists.is_empty());
    }

    #[test]
    fn round_trips_wire_shape() {
        let json = r#"{
            "version": 1,
            "updatedAt": 1700000000000,
            "playlists": [
                { "id": "liked", "name": "Liked songs", "createdAt": 1690000000000,
                  "itemIds": ["t1", "t2"], "coverUrl": "/liked.png" }
            ]
        }"#;

        let store: Store = serde_json::from_str(json).unwrap();
        assert_eq!(store.playlists.len(), 1);
        assert_eq!(store.playlist("liked").unwrap().item_ids, vec!["t1", "t2"]);

        let back = serde_json::to_value(&store).unwrap();
        assert_eq!(back["playlists"][0]["itemIds"][1], "t2");
    }
}
