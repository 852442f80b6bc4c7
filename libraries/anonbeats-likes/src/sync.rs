//! Optimistic likes synchronizer.

use crate::backend::LikesBackend;
use crate::error::{LikesError, Result};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::broadcast;

/// Lifecycle of a liked entry.
///
/// An entry is optimistic from the moment the user acts until the backend
/// confirms. `is_liked` reflects the optimistic view; this phase tells a
/// caller whether the backend has agreed yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeState {
    /// The backend has confirmed the like.
    Confirmed,
    /// Liked locally, backend call in flight.
    PendingLike,
    /// Unliked locally, backend call in flight.
    PendingUnlike,
}

/// Broadcast notification that the liked set changed somewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikesEvent {
    /// The liked set changed; `version` is the new shared marker value.
    Changed {
        /// Shared version marker after the change.
        version: u64,
    },
}

/// Shared signalling fabric between synchronizer instances.
///
/// Every view (tab, window) holds its own [`LikesSync`] over the same
/// channel; a confirmed mutation in one instance bumps the version marker
/// and broadcasts, and the others reload on the event or on focus.
#[derive(Clone)]
pub struct LikesChannel {
    sender: broadcast::Sender<LikesEvent>,
    version: Arc<AtomicU64>,
}

impl LikesChannel {
    /// A fresh channel with the marker at zero.
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(16);
        Self {
            sender,
            version: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Current value of the shared version marker.
    pub fn version(&self) -> u64 {
        self.version.load(Ordering::SeqCst)
    }

    /// Subscribe to change notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<LikesEvent> {
        self.sender.subscribe()
    }

    fn bump(&self) -> u64 {
        let version = self.version.fetch_add(1, Ordering::SeqCst) + 1;
        // Nobody listening is fine.
        let _ = self.sender.send(LikesEvent::Changed { version });
        version
    }
}

impl Default for LikesChannel {
    fn default() -> Self {
        Self::new()
    }
}

/// Optimistic local view of the liked set.
///
/// Mutations flip the local entry first so the UI answers instantly, then
/// confirm against the backend. A definite backend failure rolls the entry
/// back; an ambiguous one (the request may have landed) marks the cache
/// stale and forces a reload instead of guessing.
pub struct LikesSync {
    backend: Arc<dyn LikesBackend>,
    channel: LikesChannel,
    entries: Mutex<HashMap<String, LikeState>>,
    stale: AtomicBool,
    seen_version: AtomicU64,
}

impl LikesSync {
    /// Synchronizer with its own private channel.
    pub fn new(backend: Arc<dyn LikesBackend>) -> Self {
        Self::on_channel(backend, LikesChannel::new())
    }

    /// Synchronizer sharing `channel` with other instances.
    pub fn on_channel(backend: Arc<dyn LikesBackend>, channel: LikesChannel) -> Self {
        Self {
            backend,
            channel,
            entries: Mutex::new(HashMap::new()),
            stale: AtomicBool::new(false),
            seen_version: AtomicU64::new(0),
        }
    }

    /// The channel this instance signals on.
    pub fn channel(&self) -> &LikesChannel {
        &self.channel
    }

    /// Ensure the liked playlist exists and load the liked set.
    pub async fn init(&self) -> Result<()> {
        self.backend.ensure_liked_playlist().await?;
        self.reload().await
    }

    /// Whether `public_id` is liked in the optimistic view. Never does I/O.
    pub fn is_liked(&self, public_id: &str) -> bool {
        matches!(
            self.lock_entries().get(public_id),
            Some(LikeState::Confirmed | LikeState::PendingLike)
        )
    }

    /// The lifecycle phase of `public_id`, if it has an entry at all.
    pub fn state_of(&self, public_id: &str) -> Option<LikeState> {
        self.lock_entries().get(public_id).copied()
    }

    /// All ids liked in the optimistic view.
    pub fn liked_ids(&self) -> Vec<String> {
        self.lock_entries()
            .iter()
            .filter(|(_, state)| matches!(state, LikeState::Confirmed | LikeState::PendingLike))
            .map(|(id, _)| id.clone())
            .collect()
    }

    /// Whether the local view is known to lag the backend.
    pub fn is_stale(&self) -> bool {
        self.stale.load(Ordering::SeqCst)
    }

    /// Like a track, optimistically. Idempotent when already liked.
    pub async fn like(&self, public_id: &str) -> Result<()> {
        let previous = {
            let mut entries = self.lock_entries();
            let previous = entries.get(public_id).copied();
            if matches!(
                previous,
                Some(LikeState::Confirmed | LikeState::PendingLike)
            ) {
                return Ok(());
            }
            entries.insert(public_id.to_string(), LikeState::PendingLike);
            previous
        };

        match self.backend.like(public_id).await {
            Ok(()) => {
                self.lock_entries()
                    .insert(public_id.to_string(), LikeState::Confirmed);
                self.publish_change();
                Ok(())
            }
            Err(err) => {
                self.settle_failure(public_id, previous, &err).await;
                Err(err)
            }
        }
    }

    /// Unlike a track, optimistically. Idempotent when not liked.
    pub async fn unlike(&self, public_id: &str) -> Result<()> {
        let previous = {
            let mut entries = self.lock_entries();
            let previous = entries.get(public_id).copied();
            if matches!(previous, None | Some(LikeState::PendingUnlike)) {
                return Ok(());
            }
            entries.insert(public_id.to_string(), LikeState::PendingUnlike);
            previous
        };

        match self.backend.unlike(public_id).await {
            Ok(()) => {
                self.lock_entries().remove(public_id);
                self.publish_change();
                Ok(())
            }
            Err(err) => {
                self.settle_failure(public_id, previous, &err).await;
                Err(err)
            }
        }
    }

    /// Replace the local view wholesale from the backend.
    ///
    /// Last fetch wins; pending entries are dropped because the fetched
    /// set already reflects whatever the backend actually applied.
    pub async fn reload(&self) -> Result<()> {
        let liked = self.backend.fetch_liked().await?;
        let mut entries = self.lock_entries();
        entries.clear();
        for id in liked {
            entries.insert(id, LikeState::Confirmed);
        }
        drop(entries);
        self.stale.store(false, Ordering::SeqCst);
        self.seen_version
            .store(self.channel.version(), Ordering::SeqCst);
        Ok(())
    }

    /// Spawn a background task that reloads this instance whenever another
    /// instance broadcasts a change.
    ///
    /// Changes this instance published itself are skipped; it already holds
    /// the state the event announces. A lagged receiver reloads
    /// unconditionally since the missed events cannot be replayed.
    pub fn spawn_event_listener(self: &Arc<Self>) -> tokio::task::JoinHandle<()> {
        let sync = Arc::clone(self);
        let mut events = sync.channel.subscribe();
        tokio::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(LikesEvent::Changed { version }) => {
                        if sync.seen_version.load(Ordering::SeqCst) >= version {
                            continue;
                        }
                        if let Err(err) = sync.reload().await {
                            tracing::warn!(error = %err, "reload after change event failed");
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(_)) => {
                        if let Err(err) = sync.reload().await {
                            tracing::warn!(error = %err, "reload after lagged events failed");
                        }
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        })
    }

    /// Focus/visibility hook: reload when another instance changed the set
    /// or when the local view is stale.
    pub async fn on_focus(&self) -> Result<()> {
        let behind = self.seen_version.load(Ordering::SeqCst) < self.channel.version();
        if behind || self.is_stale() {
            self.reload().await?;
        }
        Ok(())
    }

    fn publish_change(&self) {
        let version = self.channel.bump();
        self.seen_version.store(version, Ordering::SeqCst);
    }

    async fn settle_failure(&self, public_id: &str, previous: Option<LikeState>, err: &LikesError) {
        if matches!(err, LikesError::Ambiguous(_)) {
            // The mutation may have landed. Only the backend knows; drop
            // the guesswork and resynchronize.
            tracing::warn!(public_id, error = %err, "like outcome unknown, reloading");
            self.stale.store(true, Ordering::SeqCst);
            if self.reload().await.is_err() {
                tracing::warn!(public_id, "reload after ambiguous failure also failed");
            }
            return;
        }

        tracing::debug!(public_id, error = %err, "like rolled back");
        let mut entries = self.lock_entries();
        match previous {
            Some(state) => entries.insert(public_id.to_string(), state),
            None => entries.remove(public_id),
        };
    }

    fn lock_entries(&self) -> std::sync::MutexGuard<'_, HashMap<String, LikeState>> {
        match self.entries.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
