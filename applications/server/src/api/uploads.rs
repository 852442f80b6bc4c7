/// Upload signing API routes
use crate::state::AppState;
use anonbeats_media::{sign_upload, SignedUpload, UploadRequest};
use axum::{extract::State, Json};

/// POST /api/uploads/sign
/// Authorize a direct-from-browser upload. The signature is bound to the
/// exact parameters and the current timestamp; the browser passes the
/// response to the media host verbatim.
pub async fn sign(
    State(app_state): State<AppState>,
    Json(req): Json<UploadRequest>,
) -> Json<SignedUpload> {
    let config = &app_state.media_config;
    let signed = sign_upload(
        &req,
        &config.folder,
        &config.cloud_name,
        &config.api_key,
        &config.api_secret,
        chrono::Utc::now().timestamp(),
    );
    Json(signed)
}
