//! In-memory media store for tests and local development.

use crate::error::{MediaError, Result};
use crate::store::MediaStore;
use crate::types::{MediaAsset, RawObject, Revision};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// An in-process [`MediaStore`] double.
///
/// Raw objects get content-hash revisions, so conditional-write conflicts
/// behave like the real host. `fail_reads` / `fail_writes` inject upstream
/// unavailability for degradation tests.
#[derive(Default)]
pub struct MemoryMediaStore {
    raw: Mutex<HashMap<String, Vec<u8>>>,
    assets: Mutex<Vec<MediaAsset>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    search_empty: AtomicBool,
}

impl MemoryMediaStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an audio asset as if it had been uploaded.
    pub fn seed_asset(&self, asset: MediaAsset) {
        self.assets.lock().unwrap().push(asset);
    }

    /// Make every read fail with a host error.
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make every write fail with a host error.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Make search return nothing, forcing the listing fallback.
    pub fn search_empty(&self, empty: bool) {
        self.search_empty.store(empty, Ordering::SeqCst);
    }

    /// Raw object bytes as currently stored (test inspection).
    pub fn raw_bytes(&self, public_id: &str) -> Option<Vec<u8>> {
        self.raw.lock().unwrap().get(public_id).cloned()
    }

    fn unavailable() -> MediaError {
        MediaError::Host {
            status: 503,
            message: "injected outage".to_string(),
        }
    }
}

#[async_trait::async_trait]
impl MediaStore for MemoryMediaStore {
    async fn search_audio(&self, _expression: &str) -> Result<Vec<MediaAsset>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(Self::unavailable());
        }
        if self.search_empty.load(Ordering::SeqCst) {
            return Ok(Vec::new());
        }
        Ok(self.assets.lock().unwrap().clone())
    }

    async fn list_by_prefix(&self, prefix: &str) -> Result<Vec<MediaAsset>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(Self::unavailable());
        }
        Ok(self
            .assets
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.public_id.starts_with(prefix))
            .cloned()
            .collect())
    }

    async fn fetch_raw(&self, public_id: &str) -> Result<Option<RawObject>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(Self::unavailable());
        }
        Ok(self.raw.lock().unwrap().get(public_id).map(|data| RawObject {
            data: data.clone(),
            revision: Revision::of(data),
        }))
    }

    async fn put_raw(
        &self,
        public_id: &str,
        data: Vec<u8>,
        expected: Option<&Revision>,
    ) -> Result<Revision> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Self::unavailable());
        }
        let mut raw = self.raw.lock().unwrap();
        if let Some(expected) = expected {
            let current = raw.get(public_id).map(|d| Revision::of(d));
            if current.as_ref() != Some(expected) {
                return Err(MediaError::Conflict {
                    public_id: public_id.to_string(),
                });
            }
        }
        let revision = Revision::of(&data);
        raw.insert(public_id.to_string(), data);
        Ok(revision)
    }

    async fn update_context(
        &self,
        public_id: &str,
        fields: HashMap<String, String>,
    ) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Self::unavailable());
        }
        let mut assets = self.assets.lock().unwrap();
        let asset = assets
            .iter_mut()
            .find(|a| a.public_id == public_id)
            .ok_or_else(|| MediaError::NotFound(public_id.to_string()))?;
        let context = asset.context.get_or_insert_with(Default::default);
        context.custom.extend(fields);
        Ok(())
    }

    async fn delete_asset(&self, public_id: &str) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Self::unavailable());
        }
        let mut assets = self.assets.lock().unwrap();
        let before = assets.len();
        assets.retain(|a| a.public_id != public_id);
        if assets.len() == before {
            return Err(MediaError::NotFound(public_id.to_string()));
        }
        Ok(())
    }
}
