//! HTTP implementation of the media host contract.

use crate::error::{MediaError, Result};
use crate::store::MediaStore;
use crate::types::{MediaAsset, RawObject, Revision};
use base64::Engine;
use reqwest::{header, Client, Response, StatusCode};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

/// Media host connection settings.
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
pub struct MediaConfig {
    /// Host API base, e.g. `https://api.media.example`
    pub api_base: String,
    /// Account name, scopes all API paths
    pub cloud_name: String,
    /// API key (basic auth user)
    pub api_key: String,
    /// API secret (basic auth password, also signs uploads)
    pub api_secret: String,
    /// Folder audio uploads land in
    #[serde(default = "default_folder")]
    pub folder: String,
    /// Tag attached to every Anonbeats asset
    #[serde(default = "default_tag")]
    pub tag: String,
}

fn default_folder() -> String {
    "anonbeats/tracks".to_string()
}

fn default_tag() -> String {
    "anonbeats".to_string()
}

/// reqwest-backed [`MediaStore`].
pub struct HttpMediaStore {
    http: Client,
    config: MediaConfig,
}

#[derive(Debug, Deserialize)]
struct ResourceList {
    #[serde(default)]
    resources: Vec<MediaAsset>,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    etag: String,
}

impl HttpMediaStore {
    /// Create a client with explicit timeouts.
    pub fn new(config: MediaConfig) -> Result<Self> {
        let base = config.api_base.trim_end_matches('/').to_string();
        if !base.starts_with("http://") && !base.starts_with("https://") {
            return Err(MediaError::Unreachable(format!(
                "invalid api base: {base}"
            )));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("Anonbeats/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(MediaError::Request)?;

        Ok(Self {
            http,
            config: MediaConfig {
                api_base: base,
                ..config
            },
        })
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/v1/{}/{}",
            self.config.api_base, self.config.cloud_name, path
        )
    }

    fn map_transport(e: reqwest::Error) -> MediaError {
        if e.is_connect() || e.is_timeout() {
            MediaError::Unreachable(e.to_string())
        } else {
            MediaError::Request(e)
        }
    }

    async fn host_error(public_id: &str, response: Response) -> MediaError {
        let status = response.status();
        match status {
            StatusCode::NOT_FOUND => MediaError::NotFound(public_id.to_string()),
            StatusCode::CONFLICT | StatusCode::PRECONDITION_FAILED => MediaError::Conflict {
                public_id: public_id.to_string(),
            },
            _ => MediaError::Host {
                status: status.as_u16(),
                message: response.text().await.unwrap_or_default(),
            },
        }
    }

    async fn parse_resources(response: Response) -> Result<Vec<MediaAsset>> {
        let list: ResourceList = response
            .json()
            .await
            .map_err(|e| MediaError::Parse(format!("resource list: {e}")))?;
        Ok(list.resources)
    }
}

#[async_trait::async_trait]
impl MediaStore for HttpMediaStore {
    async fn search_audio(&self, expression: &str) -> Result<Vec<MediaAsset>> {
        let url = self.url("resources/search");
        debug!(url = %url, expression = %expression, "Searching audio assets");

        let response = self
            .http
            .post(&url)
            .basic_auth(&self.config.api_key, Some(&self.config.api_secret))
            .json(&serde_json::json!({
                "expression": expression,
                "with_field": ["context", "tags"],
                "sort_by": [{ "created_at": "desc" }],
                "max_results": 200,
            }))
            .send()
            .await
            .map_err(Self::map_transport)?;

        if response.status().is_success() {
            Self::parse_resources(response).await
        } else {
            Err(Self::host_error("search", response).await)
        }
    }

    async fn list_by_prefix(&self, prefix: &str) -> Result<Vec<MediaAsset>> {
        let url = self.url("resources/video");
        debug!(url = %url, prefix = %prefix, "Listing assets by prefix");

        let response = self
            .http
            .get(&url)
            .basic_auth(&self.config.api_key, Some(&self.config.api_secret))
            .query(&[
                ("prefix", prefix),
                ("context", "true"),
                ("tags", "true"),
                ("max_results", "200"),
            ])
            .send()
            .await
            .map_err(Self::map_transport)?;

        if response.status().is_success() {
            Self::parse_resources(response).await
        } else {
            Err(Self::host_error(prefix, response).await)
        }
    }

    async fn fetch_raw(&self, public_id: &str) -> Result<Option<RawObject>> {
        let url = self.url(&format!("raw/{public_id}"));
        debug!(url = %url, "Fetching raw object");

        let response = self
            .http
            .get(&url)
            .basic_auth(&self.config.api_key, Some(&self.config.api_secret))
            .send()
            .await
            .map_err(Self::map_transport)?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(Self::host_error(public_id, response).await);
        }

        let revision = response
            .headers()
            .get(header::ETAG)
            .and_then(|v| v.to_str().ok())
            .map(|v| Revision(v.trim_matches('"').to_string()));
        let data = response.bytes().await.map_err(MediaError::Request)?.to_vec();

        // Hosts without ETags fall back to a content-hash revision.
        let revision = revision.unwrap_or_else(|| Revision::of(&data));
        Ok(Some(RawObject { data, revision }))
    }

    async fn put_raw(
        &self,
        public_id: &str,
        data: Vec<u8>,
        expected: Option<&Revision>,
    ) -> Result<Revision> {
        let url = self.url("raw/upload");
        debug!(url = %url, public_id = %public_id, bytes = data.len(), "Uploading raw object");

        let payload = base64::engine::general_purpose::STANDARD.encode(&data);
        let mut request = self
            .http
            .post(&url)
            .basic_auth(&self.config.api_key, Some(&self.config.api_secret))
            .json(&serde_json::json!({
                "file": format!("data:application/json;base64,{payload}"),
                "public_id": public_id,
                "overwrite": true,
                "invalidate": true,
                "tags": [self.config.tag.clone(), format!("{}-playlists", self.config.tag)],
            }));
        if let Some(rev) = expected {
            request = request.header(header::IF_MATCH, format!("\"{rev}\""));
        }

        let response = request.send().await.map_err(Self::map_transport)?;
        if response.status().is_success() {
            let uploaded: UploadResponse = response
                .json()
                .await
                .map_err(|e| MediaError::Parse(format!("upload response: {e}")))?;
            Ok(Revision(uploaded.etag))
        } else {
            Err(Self::host_error(public_id, response).await)
        }
    }

    async fn update_context(
        &self,
        public_id: &str,
        fields: HashMap<String, String>,
    ) -> Result<()> {
        let url = self.url(&format!("resources/video/upload/{public_id}/context"));
        debug!(url = %url, fields = fields.len(), "Updating asset context");

        let response = self
            .http
            .post(&url)
            .basic_auth(&self.config.api_key, Some(&self.config.api_secret))
            .json(&serde_json::json!({ "context": fields, "invalidate": true }))
            .send()
            .await
            .map_err(Self::map_transport)?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::host_error(public_id, response).await)
        }
    }

    async fn delete_asset(&self, public_id: &str) -> Result<()> {
        let url = self.url(&format!("resources/video/upload/{public_id}"));
        debug!(url = %url, "Deleting asset");

        let response = self
            .http
            .delete(&url)
            .basic_auth(&self.config.api_key, Some(&self.config.api_secret))
            .query(&[("invalidate", "true")])
            .send()
            .await
            .map_err(Self::map_transport)?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::host_error(public_id, response).await)
        }
    }
}
