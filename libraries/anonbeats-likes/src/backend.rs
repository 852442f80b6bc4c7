//! Backend seam for the likes synchronizer.

use crate::error::{LikesError, Result};
use anonbeats_core::{Playlist, LIKED_PLAYLIST_ID, LIKED_PLAYLIST_NAME};
use serde_json::json;
use std::time::Duration;

/// The server surface the synchronizer talks to.
///
/// The liked set is the `itemIds` of the reserved liked playlist; the
/// backend hides whether that is the local API or a remote one.
#[async_trait::async_trait]
pub trait LikesBackend: Send + Sync {
    /// Create the liked playlist if it does not exist. Idempotent.
    async fn ensure_liked_playlist(&self) -> Result<()>;

    /// The full liked set, newest first as the server returns it.
    async fn fetch_liked(&self) -> Result<Vec<String>>;

    /// Add a track to the liked playlist.
    async fn like(&self, public_id: &str) -> Result<()>;

    /// Remove a track from the liked playlist.
    async fn unlike(&self, public_id: &str) -> Result<()>;
}

/// HTTP backend over the app's own playlist API.
///
/// The playlist routes sit behind the password gate, so the client keeps a
/// cookie store and unlocks with the shared password whenever the server
/// answers 401, then retries the original request once.
pub struct HttpLikesBackend {
    client: reqwest::Client,
    base_url: String,
    password: String,
}

impl HttpLikesBackend {
    /// Backend against `base_url` (no trailing slash needed), unlocking
    /// with `password` when the gate refuses a request.
    pub fn new(base_url: impl Into<String>, password: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(Duration::from_secs(15))
            .connect_timeout(Duration::from_secs(5))
            .build()
            .map_err(|e| LikesError::Backend(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            password: password.into(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn unlock(&self) -> Result<()> {
        let response = self
            .client
            .post(self.url("/api/auth/unlock"))
            .json(&json!({ "password": self.password }))
            .send()
            .await?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(LikesError::Backend(format!("unlock refused: {status}")))
        }
    }

    /// Send a request, unlocking and retrying once on a gate refusal.
    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response> {
        let retry = request.try_clone();
        let response = request.send().await?;
        if response.status() != reqwest::StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        let retry = retry
            .ok_or_else(|| LikesError::Backend("server answered 401 Unauthorized".to_string()))?;
        self.unlock().await?;
        Ok(retry.send().await?)
    }

    fn check(response: &reqwest::Response) -> Result<()> {
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else if status.is_server_error() {
            // The server saw the request but we cannot tell whether the
            // mutation landed before it failed.
            Err(LikesError::Ambiguous(format!("server answered {status}")))
        } else {
            Err(LikesError::Backend(format!("server answered {status}")))
        }
    }
}

#[async_trait::async_trait]
impl LikesBackend for HttpLikesBackend {
    async fn ensure_liked_playlist(&self) -> Result<()> {
        let response = self
            .send(
                self.client
                    .post(self.url("/api/playlists"))
                    .json(&json!({ "id": LIKED_PLAYLIST_ID, "name": LIKED_PLAYLIST_NAME })),
            )
            .await?;
        Self::check(&response)
    }

    async fn fetch_liked(&self) -> Result<Vec<String>> {
        let response = self
            .send(self.client.get(self.url("/api/playlists/liked")))
            .await?;
        Self::check(&response)?;
        let playlist: Playlist = response
            .json()
            .await
            .map_err(|e| LikesError::Protocol(e.to_string()))?;
        Ok(playlist.item_ids)
    }

    async fn like(&self, public_id: &str) -> Result<()> {
        let response = self
            .send(
                self.client
                    .post(self.url("/api/playlists/liked/tracks"))
                    .json(&json!({ "publicId": public_id })),
            )
            .await?;
        Self::check(&response)
    }

    async fn unlike(&self, public_id: &str) -> Result<()> {
        let response = self
            .send(
                self.client
                    .delete(self.url("/api/playlists/liked/tracks"))
                    .query(&[("publicId", public_id)]),
            )
            .await?;
        Self::check(&response)
    }
}
