/// Playlists API routes
use crate::{error::Result, error::ServerError, state::AppState};
use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    Json,
};
use anonbeats_core::Playlist;
use anonbeats_store::NewPlaylist;
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub debug: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlaylistRequest {
    pub name: String,
    pub id: Option<String>,
    pub cover_url: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenamePlaylistRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddTrackRequest {
    pub public_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveTrackQuery {
    pub public_id: String,
}

/// GET /api/playlists
/// All playlists, newest first. `?debug=raw` returns the persisted document.
pub async fn list_playlists(
    State(app_state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Response> {
    if query.debug.as_deref() == Some("raw") {
        let store = app_state.playlists.raw().await?;
        return Ok(Json(store).into_response());
    }
    let playlists = app_state.playlists.list().await?;
    Ok(Json(playlists).into_response())
}

/// POST /api/playlists
/// Create a playlist; an explicit existing id updates that record instead.
pub async fn create_playlist(
    State(app_state): State<AppState>,
    Json(req): Json<CreatePlaylistRequest>,
) -> Result<Json<Playlist>> {
    let playlist = app_state
        .playlists
        .create(NewPlaylist {
            name: req.name,
            id: req.id,
            cover_url: req.cover_url,
        })
        .await?;
    Ok(Json(playlist))
}

/// GET /api/playlists/:id
pub async fn get_playlist(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<Json<Playlist>> {
    let playlist = app_state
        .playlists
        .get(&id)
        .await?
        .ok_or_else(|| ServerError::NotFound(format!("playlist {id}")))?;
    Ok(Json(playlist))
}

/// PUT /api/playlists/:id
/// Rename a playlist.
pub async fn rename_playlist(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    Json(req): Json<RenamePlaylistRequest>,
) -> Result<Json<Playlist>> {
    let playlist = app_state.playlists.rename(&id, &req.name).await?;
    Ok(Json(playlist))
}

/// DELETE /api/playlists/:id
/// The reserved liked playlist is refused with 400.
pub async fn delete_playlist(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<Json<serde_json::Value>> {
    app_state.playlists.delete(&id).await?;
    Ok(Json(json!({ "ok": true })))
}

/// POST /api/playlists/:id/tracks
/// Idempotently add a track; responds with the item ids after the call.
pub async fn add_track(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    Json(req): Json<AddTrackRequest>,
) -> Result<Json<serde_json::Value>> {
    let item_ids = app_state.playlists.add_track(&id, &req.public_id).await?;
    Ok(Json(json!({ "itemIds": item_ids })))
}

/// DELETE /api/playlists/:id/tracks?publicId=...
pub async fn remove_track(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    Query(query): Query<RemoveTrackQuery>,
) -> Result<Json<serde_json::Value>> {
    let item_ids = app_state
        .playlists
        .remove_track(&id, &query.public_id)
        .await?;
    Ok(Json(json!({ "itemIds": item_ids })))
}
