/// Tracks API routes
use crate::{error::Result, error::ServerError, state::AppState};
use axum::{
    extract::{Path, State},
    Json,
};
use anonbeats_core::Track;
use serde::Deserialize;
use serde_json::json;
use std::collections::HashMap;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTrackRequest {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub cover_url: Option<String>,
}

/// GET /api/tracks
/// The full catalog, newest first. A media-host outage degrades to an
/// empty list so the library page still renders.
pub async fn list_tracks(State(app_state): State<AppState>) -> Json<Vec<Track>> {
    match app_state.catalog.list_tracks().await {
        Ok(tracks) => Json(tracks),
        Err(e) => {
            tracing::warn!("Track catalog unavailable, serving empty list: {}", e);
            Json(Vec::new())
        }
    }
}

/// PATCH /api/tracks/*public_id
/// Update display metadata, stored as context on the media asset.
pub async fn update_track(
    Path(public_id): Path<String>,
    State(app_state): State<AppState>,
    Json(req): Json<UpdateTrackRequest>,
) -> Result<Json<serde_json::Value>> {
    let mut fields = HashMap::new();
    if let Some(title) = &req.title {
        fields.insert("title".to_string(), title.trim().to_string());
    }
    if let Some(artist) = &req.artist {
        fields.insert("artist".to_string(), artist.trim().to_string());
    }
    if let Some(album) = &req.album {
        fields.insert("album".to_string(), album.trim().to_string());
    }
    if let Some(cover_url) = &req.cover_url {
        fields.insert("coverUrl".to_string(), cover_url.trim().to_string());
    }

    if fields.is_empty() {
        return Err(ServerError::Validation(
            "at least one field required".to_string(),
        ));
    }

    app_state.media.update_context(&public_id, fields).await?;
    Ok(Json(json!({ "ok": true })))
}

/// DELETE /api/tracks/*public_id
/// Destroy the asset, then strip it from every playlist in one save.
pub async fn delete_track(
    Path(public_id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<Json<serde_json::Value>> {
    app_state.media.delete_asset(&public_id).await?;
    app_state
        .playlists
        .remove_track_everywhere(&public_id)
        .await?;
    Ok(Json(json!({ "ok": true })))
}
