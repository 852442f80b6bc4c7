//! Track catalog resolver.
//!
//! A pure read projection over the media host: every call re-fetches, no
//! cache is kept here.

use crate::error::Result;
use anonbeats_core::Track;
use anonbeats_media::{MediaAsset, MediaStore};
use chrono::DateTime;
use std::sync::Arc;
use tracing::debug;

/// Resolves the current list of playable tracks from the media host.
pub struct Catalog {
    media: Arc<dyn MediaStore>,
    folder: String,
    tag: String,
}

impl Catalog {
    /// Catalog over the configured upload folder and tag.
    pub fn new(media: Arc<dyn MediaStore>, folder: &str, tag: &str) -> Self {
        Self {
            media,
            folder: folder.to_string(),
            tag: tag.to_string(),
        }
    }

    /// All uploaded tracks, newest first.
    ///
    /// Tries the host's search API with progressively looser expressions;
    /// search being unavailable or empty falls back to a plain listing by
    /// prefix. Only a failing listing propagates.
    pub async fn list_tracks(&self) -> Result<Vec<Track>> {
        let expressions = [
            format!("resource_type:video AND tags={}", self.tag),
            format!("resource_type:video AND folder:{}", self.folder),
            format!("resource_type:video AND public_id:{}/*", self.folder),
        ];

        let mut assets = Vec::new();
        for expression in &expressions {
            match self.media.search_audio(expression).await {
                Ok(found) if !found.is_empty() => {
                    assets = found;
                    break;
                }
                Ok(_) => {}
                Err(e) => {
                    debug!(expression = %expression, error = %e, "Search expression failed, trying next");
                }
            }
        }

        if assets.is_empty() {
            assets = self.media.list_by_prefix(&self.folder).await?;
        }

        let mut tracks: Vec<Track> = assets.iter().map(map_asset).collect();
        tracks.sort_by_key(|t| std::cmp::Reverse(created_at_millis(&t.created_at)));
        Ok(tracks)
    }
}

/// Normalize one host asset into the uniform Track shape.
///
/// Context values are percent-decoded; unknown context keys are ignored.
fn map_asset(asset: &MediaAsset) -> Track {
    let context = asset.custom_context();
    let title = context
        .get("title")
        .map(|v| safe_decode(v))
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| Track::title_from_public_id(&asset.public_id));

    Track {
        public_id: asset.public_id.clone(),
        title,
        artist: context.get("artist").map(|v| safe_decode(v)).unwrap_or_default(),
        album: context.get("album").map(|v| safe_decode(v)).unwrap_or_default(),
        audio_url: asset.secure_url.clone(),
        duration: asset.duration,
        bytes: asset.bytes,
        format: asset.format.clone(),
        cover_url: context.get("coverUrl").map(|v| safe_decode(v)),
        created_at: asset.created_at.clone(),
        tags: asset.tags.clone(),
    }
}

fn safe_decode(value: &str) -> String {
    urlencoding::decode(value)
        .map(|v| v.into_owned())
        .unwrap_or_else(|_| value.to_string())
}

fn created_at_millis(created_at: &str) -> i64 {
    DateTime::parse_from_rfc3339(created_at)
        .map(|t| t.timestamp_millis())
        .unwrap_or(0)
}
