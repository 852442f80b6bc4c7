//! Wire types for the media host API.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Opaque revision token for a raw object (host ETag / content hash).
///
/// Used as the optimistic-concurrency token on conditional writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Revision(pub String);

impl Revision {
    /// Content-hash revision of a byte payload.
    pub fn of(data: &[u8]) -> Self {
        use sha2::{Digest, Sha256};
        Self(hex::encode(Sha256::digest(data)))
    }
}

impl std::fmt::Display for Revision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A raw object fetched from the host, with the revision observed.
#[derive(Debug, Clone)]
pub struct RawObject {
    /// Object payload
    pub data: Vec<u8>,
    /// Revision the payload was read at
    pub revision: Revision,
}

/// One asset as the host reports it.
///
/// Field names follow the host's wire shape (snake_case, `context.custom`
/// for user metadata).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MediaAsset {
    /// Host-assigned stable identifier
    pub public_id: String,

    /// Resolved delivery URL
    #[serde(default)]
    pub secure_url: String,

    /// Asset size in bytes
    #[serde(default)]
    pub bytes: Option<u64>,

    /// Container format
    #[serde(default)]
    pub format: Option<String>,

    /// Duration in seconds (audio/video assets)
    #[serde(default)]
    pub duration: Option<f64>,

    /// Host creation timestamp (RFC 3339)
    #[serde(default)]
    pub created_at: String,

    /// Tags attached at upload time
    #[serde(default)]
    pub tags: Vec<String>,

    /// Custom key/value metadata
    #[serde(default)]
    pub context: Option<AssetContext>,
}

/// The host's context envelope around custom metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetContext {
    /// Arbitrary string key/value pairs set by the uploader
    #[serde(default)]
    pub custom: HashMap<String, String>,
}

impl MediaAsset {
    /// Custom metadata map, empty when the asset has none.
    pub fn custom_context(&self) -> HashMap<String, String> {
        self.context
            .as_ref()
            .map(|c| c.custom.clone())
            .unwrap_or_default()
    }
}
