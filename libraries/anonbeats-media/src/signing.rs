//! Upload signature computation.
//!
//! The browser uploads audio straight to the media host; the server only
//! authorizes the upload by signing the parameters. The signature is bound
//! to the exact parameter set and to a timestamp, so it cannot be replayed
//! for a different upload.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

/// Parameters the client wants signed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UploadRequest {
    /// Target folder, defaults to the configured tracks folder
    pub folder: Option<String>,
    /// Comma-separated tags (e.g. "anonbeats")
    pub tags: Option<String>,
    /// Pipe-separated context string (e.g. "title=My Song|artist=Me")
    pub context: Option<String>,
    /// Explicit public id, when re-uploading
    pub public_id: Option<String>,
}

/// A signed authorization the browser passes to the host verbatim.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedUpload {
    /// Unix timestamp the signature is bound to
    pub timestamp: i64,
    /// Hex SHA-256 signature over the sorted parameters
    pub signature: String,
    /// API key the host uses to look up the secret
    pub api_key: String,
    /// Host account name
    pub cloud_name: String,
    /// Echoed parameters, reused exactly by the uploader
    pub folder: String,
    pub tags: Option<String>,
    pub context: Option<String>,
    pub public_id: Option<String>,
}

/// Sign an upload request.
///
/// The host verifies `sha256(sorted "key=value" params joined by '&' ++
/// api_secret)`. Only parameters that are present are signed, and they are
/// echoed back so the uploader sends exactly what was signed.
pub fn sign_upload(
    req: &UploadRequest,
    default_folder: &str,
    cloud_name: &str,
    api_key: &str,
    api_secret: &str,
    timestamp: i64,
) -> SignedUpload {
    let folder = req
        .folder
        .clone()
        .unwrap_or_else(|| default_folder.to_string());

    let mut params: BTreeMap<&str, String> = BTreeMap::new();
    params.insert("folder", folder.clone());
    params.insert("timestamp", timestamp.to_string());
    if let Some(tags) = &req.tags {
        params.insert("tags", tags.clone());
    }
    if let Some(context) = &req.context {
        params.insert("context", context.clone());
    }
    if let Some(public_id) = &req.public_id {
        params.insert("public_id", public_id.clone());
    }

    let to_sign = params
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");

    let mut hasher = Sha256::new();
    hasher.update(to_sign.as_bytes());
    hasher.update(api_secret.as_bytes());
    let signature = hex::encode(hasher.finalize());

    SignedUpload {
        timestamp,
        signature,
        api_key: api_key.to_string(),
        cloud_name: cloud_name.to_string(),
        folder,
        tags: req.tags.clone(),
        context: req.context.clone(),
        public_id: req.public_id.clone(),
    }
}
