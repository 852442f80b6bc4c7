//! The media host contract.

use crate::error::Result;
use crate::types::{MediaAsset, RawObject, Revision};
use std::collections::HashMap;

/// Operations Anonbeats needs from the remote media host.
///
/// Implementations: [`crate::HttpMediaStore`] for the real host,
/// [`crate::MemoryMediaStore`] for tests.
#[async_trait::async_trait]
pub trait MediaStore: Send + Sync {
    /// Search audio assets by a host search expression (tag/folder query).
    async fn search_audio(&self, expression: &str) -> Result<Vec<MediaAsset>>;

    /// Plain listing by public-id prefix, the fallback when search is
    /// unavailable or empty.
    async fn list_by_prefix(&self, prefix: &str) -> Result<Vec<MediaAsset>>;

    /// Fetch a raw object by public id. `Ok(None)` when it does not exist;
    /// any other failure propagates.
    async fn fetch_raw(&self, public_id: &str) -> Result<Option<RawObject>>;

    /// Overwrite a raw object.
    ///
    /// When `expected` is given and the stored revision differs, the write
    /// fails with [`crate::MediaError::Conflict`] instead of clobbering the
    /// concurrent change. Returns the new revision.
    async fn put_raw(
        &self,
        public_id: &str,
        data: Vec<u8>,
        expected: Option<&Revision>,
    ) -> Result<Revision>;

    /// Replace the custom context metadata on an asset.
    async fn update_context(
        &self,
        public_id: &str,
        fields: HashMap<String, String>,
    ) -> Result<()>;

    /// Delete an asset (and invalidate cached delivery URLs).
    async fn delete_asset(&self, public_id: &str) -> Result<()>;
}
