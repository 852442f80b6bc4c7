//! Playlist document store.
//!
//! Every mutation is a full load → mutate → save cycle over the single
//! playlist blob. Saves are conditional on the revision observed at load;
//! a conflict triggers a bounded reload-and-retry instead of silently
//! dropping the concurrent change.

use crate::error::{Result, StoreError};
use anonbeats_core::types::{epoch_millis, Playlist, Store, LIKED_COVER_URL};
use anonbeats_core::LIKED_PLAYLIST_ID;
use anonbeats_media::{MediaError, MediaStore, Revision};
use std::sync::Arc;
use tracing::{debug, warn};

/// Attempts per mutation before surfacing a conflict.
const MAX_SAVE_ATTEMPTS: usize = 3;

/// Request body for creating (or idempotently updating) a playlist.
#[derive(Debug, Clone, Default)]
pub struct NewPlaylist {
    /// Playlist name, required, trimmed
    pub name: String,
    /// Explicit id; reusing an existing id updates that record
    pub id: Option<String>,
    /// Optional cover art URL
    pub cover_url: Option<String>,
}

/// Durable CRUD over the playlist document.
pub struct PlaylistStore {
    media: Arc<dyn MediaStore>,
    object_id: String,
}

struct Loaded {
    store: Store,
    revision: Option<Revision>,
}

impl PlaylistStore {
    /// Create a store persisting under `<folder_root>/meta/playlists`.
    pub fn new(media: Arc<dyn MediaStore>, folder_root: &str) -> Self {
        Self {
            media,
            object_id: format!("{folder_root}/meta/playlists"),
        }
    }

    /// All playlists, newest first.
    pub async fn list(&self) -> Result<Vec<Playlist>> {
        let mut playlists = self.load().await?.store.playlists;
        playlists.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(playlists)
    }

    /// The raw persisted document (debug surface).
    pub async fn raw(&self) -> Result<Store> {
        Ok(self.load().await?.store)
    }

    /// A single playlist by id.
    pub async fn get(&self, id: &str) -> Result<Option<Playlist>> {
        Ok(self.load().await?.store.playlist(id).cloned())
    }

    /// Create a playlist, or update name/cover when the explicit id already
    /// exists. The idempotent path is how the liked playlist is lazily
    /// materialized on first use.
    pub async fn create(&self, req: NewPlaylist) -> Result<Playlist> {
        let name = req.name.trim().to_string();
        if name.is_empty() {
            return Err(StoreError::Validation("name required".to_string()));
        }

        self.mutate(move |store| {
            if let Some(id) = &req.id {
                if let Some(existing) = store.playlist_mut(id) {
                    existing.name = name.clone();
                    if let Some(cover) = &req.cover_url {
                        existing.cover_url = Some(cover.clone());
                    }
                    if existing.is_liked() && existing.cover_url.is_none() {
                        existing.cover_url = Some(LIKED_COVER_URL.to_string());
                    }
                    return Ok((existing.clone(), true));
                }
            }

            let mut playlist = match &req.id {
                Some(id) => Playlist::with_id(id.clone(), name.clone()),
                None => Playlist::new(name.clone()),
            };
            playlist.cover_url = req.cover_url.clone();
            if playlist.is_liked() && playlist.cover_url.is_none() {
                playlist.cover_url = Some(LIKED_COVER_URL.to_string());
            }
            store.playlists.insert(0, playlist.clone());
            Ok((playlist, true))
        })
        .await
    }

    /// Rename a playlist.
    pub async fn rename(&self, id: &str, name: &str) -> Result<Playlist> {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(StoreError::Validation("name required".to_string()));
        }

        self.mutate(move |store| {
            let playlist = store
                .playlist_mut(id)
                .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
            playlist.name = name.clone();
            Ok((playlist.clone(), true))
        })
        .await
    }

    /// Delete a playlist. The reserved liked playlist is refused; deleting
    /// a missing id is an error, not a silent success.
    pub async fn delete(&self, id: &str) -> Result<()> {
        if id.eq_ignore_ascii_case(LIKED_PLAYLIST_ID) {
            return Err(StoreError::Guarded(
                "cannot delete the liked playlist".to_string(),
            ));
        }

        self.mutate(move |store| {
            let playlist = store
                .playlist(id)
                .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
            if playlist.is_liked() {
                return Err(StoreError::Guarded(
                    "cannot delete the liked playlist".to_string(),
                ));
            }
            store.playlists.retain(|p| p.id != id);
            Ok(((), true))
        })
        .await
    }

    /// Idempotently add a track to a playlist. Returns the item ids after
    /// the operation; no save is issued when nothing changed.
    pub async fn add_track(&self, id: &str, public_id: &str) -> Result<Vec<String>> {
        self.mutate(move |store| {
            let playlist = store
                .playlist_mut(id)
                .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
            let changed = playlist.add_item(public_id);
            Ok((playlist.item_ids.clone(), changed))
        })
        .await
    }

    /// Idempotently remove a track from a playlist.
    pub async fn remove_track(&self, id: &str, public_id: &str) -> Result<Vec<String>> {
        self.mutate(move |store| {
            let playlist = store
                .playlist_mut(id)
                .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
            let changed = playlist.remove_item(public_id);
            Ok((playlist.item_ids.clone(), changed))
        })
        .await
    }

    /// Strip a deleted track from every playlist in one batched save.
    pub async fn remove_track_everywhere(&self, public_id: &str) -> Result<()> {
        self.mutate(move |store| {
            let mut changed = false;
            for playlist in &mut store.playlists {
                changed |= playlist.remove_item(public_id);
            }
            Ok(((), changed))
        })
        .await
    }

    async fn load(&self) -> Result<Loaded> {
        match self.media.fetch_raw(&self.object_id).await? {
            Some(raw) => {
                let store = Store::from_slice(&raw.data)?;
                Ok(Loaded {
                    store,
                    revision: Some(raw.revision),
                })
            }
            None => {
                debug!(object = %self.object_id, "Playlist blob missing, starting empty");
                Ok(Loaded {
                    store: Store::empty(),
                    revision: None,
                })
            }
        }
    }

    async fn save(&self, loaded: &mut Loaded) -> Result<()> {
        loaded.store.updated_at = epoch_millis();
        let data = loaded.store.to_bytes()?;
        let revision = self
            .media
            .put_raw(&self.object_id, data, loaded.revision.as_ref())
            .await?;
        loaded.revision = Some(revision);
        Ok(())
    }

    /// Run one load → mutate → save cycle, retrying the whole cycle when
    /// the conditional save loses to a concurrent writer.
    ///
    /// The closure returns the operation result plus whether the document
    /// changed; unchanged documents skip the save entirely. A failed load
    /// aborts before mutation, and a failed save is surfaced, never
    /// swallowed.
    async fn mutate<T, F>(&self, mut f: F) -> Result<T>
    where
        F: FnMut(&mut Store) -> Result<(T, bool)>,
    {
        for attempt in 1..=MAX_SAVE_ATTEMPTS {
            let mut loaded = self.load().await?;
            let (value, changed) = f(&mut loaded.store)?;
            if !changed {
                return Ok(value);
            }

            match self.save(&mut loaded).await {
                Ok(()) => return Ok(value),
                Err(StoreError::Media(MediaError::Conflict { .. })) => {
                    if attempt < MAX_SAVE_ATTEMPTS {
                        warn!(
                            object = %self.object_id,
                            attempt,
                            "Concurrent playlist save detected, reloading"
                        );
                    } else {
                        return Err(StoreError::Conflict);
                    }
                }
                Err(e) => return Err(e),
            }
        }
        Err(StoreError::Conflict)
    }
}
