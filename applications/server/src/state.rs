/// Shared application state
use crate::config::GateSettings;
use anonbeats_media::{MediaConfig, MediaStore};
use anonbeats_store::{Catalog, PlaylistStore};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub media: Arc<dyn MediaStore>,
    pub playlists: Arc<PlaylistStore>,
    pub catalog: Arc<Catalog>,
    pub media_config: Arc<MediaConfig>,
    pub gate: Arc<GateSettings>,
}

impl AppState {
    /// Wire the stores over one media host connection.
    ///
    /// The playlist blob lives under the root segment of the configured
    /// upload folder (e.g. folder `anonbeats/tracks` puts the blob at
    /// `anonbeats/meta/playlists`).
    pub fn new(media: Arc<dyn MediaStore>, media_config: MediaConfig, gate: GateSettings) -> Self {
        let folder_root = media_config
            .folder
            .split('/')
            .next()
            .unwrap_or(media_config.folder.as_str())
            .to_string();
        let playlists = Arc::new(PlaylistStore::new(Arc::clone(&media), &folder_root));
        let catalog = Arc::new(Catalog::new(
            Arc::clone(&media),
            &media_config.folder,
            &media_config.tag,
        ));
        Self {
            media,
            playlists,
            catalog,
            media_config: Arc::new(media_config),
            gate: Arc::new(gate),
        }
    }
}
