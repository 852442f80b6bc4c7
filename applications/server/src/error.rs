/// Server error types
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServerError>;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    Validation(String),

    #[error("Guarded operation: {0}")]
    Guarded(String),

    #[error("Concurrent modification, retry")]
    Conflict,

    #[error("Media host error: {0}")]
    Upstream(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<anonbeats_store::StoreError> for ServerError {
    fn from(err: anonbeats_store::StoreError) -> Self {
        use anonbeats_store::StoreError;
        match err {
            StoreError::Validation(msg) => ServerError::Validation(msg),
            StoreError::NotFound(id) => ServerError::NotFound(id),
            StoreError::Guarded(msg) => ServerError::Guarded(msg),
            StoreError::Conflict => ServerError::Conflict,
            StoreError::Media(e) => e.into(),
            StoreError::Document(e) => ServerError::Internal(e.to_string()),
        }
    }
}

impl From<anonbeats_media::MediaError> for ServerError {
    fn from(err: anonbeats_media::MediaError) -> Self {
        use anonbeats_media::MediaError;
        match err {
            MediaError::NotFound(id) => ServerError::NotFound(id),
            MediaError::Conflict { .. } => ServerError::Conflict,
            e => ServerError::Upstream(e.to_string()),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ServerError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ServerError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ServerError::Validation(msg) | ServerError::Guarded(msg) => {
                (StatusCode::BAD_REQUEST, msg)
            }
            ServerError::Conflict => (
                StatusCode::CONFLICT,
                "Concurrent modification, retry".to_string(),
            ),
            ServerError::Upstream(ref msg) => {
                tracing::error!("Media host error: {}", msg);
                (StatusCode::BAD_GATEWAY, "Media host error".to_string())
            }
            ServerError::Config(ref msg) => {
                tracing::error!("Config error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Configuration error".to_string(),
                )
            }
            ServerError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
