//! Synchronizer behavior over a scriptable in-memory backend.

use anonbeats_likes::{LikeState, LikesBackend, LikesChannel, LikesError, LikesSync};
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

#[derive(Default)]
struct FakeBackend {
    liked: Mutex<HashSet<String>>,
    fail_mutations: AtomicBool,
    ambiguous_mutations: AtomicBool,
    apply_despite_ambiguity: AtomicBool,
}

impl FakeBackend {
    fn seed(&self, ids: &[&str]) {
        let mut liked = self.liked.lock().unwrap();
        for id in ids {
            liked.insert((*id).to_string());
        }
    }

    fn server_has(&self, id: &str) -> bool {
        self.liked.lock().unwrap().contains(id)
    }
}

#[async_trait::async_trait]
impl LikesBackend for FakeBackend {
    async fn ensure_liked_playlist(&self) -> Result<(), LikesError> {
        Ok(())
    }

    async fn fetch_liked(&self) -> Result<Vec<String>, LikesError> {
        Ok(self.liked.lock().unwrap().iter().cloned().collect())
    }

    async fn like(&self, public_id: &str) -> Result<(), LikesError> {
        if self.ambiguous_mutations.load(Ordering::SeqCst) {
            if self.apply_despite_ambiguity.load(Ordering::SeqCst) {
                self.liked.lock().unwrap().insert(public_id.to_string());
            }
            return Err(LikesError::Ambiguous("timed out".into()));
        }
        if self.fail_mutations.load(Ordering::SeqCst) {
            return Err(LikesError::Backend("refused".into()));
        }
        self.liked.lock().unwrap().insert(public_id.to_string());
        Ok(())
    }

    async fn unlike(&self, public_id: &str) -> Result<(), LikesError> {
        if self.ambiguous_mutations.load(Ordering::SeqCst) {
            if self.apply_despite_ambiguity.load(Ordering::SeqCst) {
                self.liked.lock().unwrap().remove(public_id);
            }
            return Err(LikesError::Ambiguous("timed out".into()));
        }
        if self.fail_mutations.load(Ordering::SeqCst) {
            return Err(LikesError::Backend("refused".into()));
        }
        self.liked.lock().unwrap().remove(public_id);
        Ok(())
    }
}

/// Backend whose mutations block until the test releases them, so the
/// in-flight window is observable.
struct GatedBackend {
    initial: Vec<String>,
    release: Mutex<Option<oneshot::Receiver<()>>>,
}

impl GatedBackend {
    fn new(initial: &[&str], release: oneshot::Receiver<()>) -> Self {
        Self {
            initial: initial.iter().map(|id| (*id).to_string()).collect(),
            release: Mutex::new(Some(release)),
        }
    }

    async fn wait_for_release(&self) -> Result<(), LikesError> {
        let gate = self.release.lock().unwrap().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl LikesBackend for GatedBackend {
    async fn ensure_liked_playlist(&self) -> Result<(), LikesError> {
        Ok(())
    }

    async fn fetch_liked(&self) -> Result<Vec<String>, LikesError> {
        Ok(self.initial.clone())
    }

    async fn like(&self, _public_id: &str) -> Result<(), LikesError> {
        self.wait_for_release().await
    }

    async fn unlike(&self, _public_id: &str) -> Result<(), LikesError> {
        self.wait_for_release().await
    }
}

fn sync_over(backend: &Arc<FakeBackend>) -> LikesSync {
    LikesSync::new(Arc::clone(backend) as Arc<dyn LikesBackend>)
}

/// Yield until `sync` reports `expected` for `public_id`.
async fn wait_for_state(sync: &LikesSync, public_id: &str, expected: LikeState) {
    for _ in 0..1000 {
        if sync.state_of(public_id) == Some(expected) {
            return;
        }
        tokio::task::yield_now().await;
    }
    panic!("{public_id} never reached {expected:?}");
}

#[tokio::test]
async fn init_loads_the_liked_set() {
    let backend = Arc::new(FakeBackend::default());
    backend.seed(&["a", "b"]);

    let sync = sync_over(&backend);
    sync.init().await.unwrap();

    assert!(sync.is_liked("a"));
    assert!(sync.is_liked("b"));
    assert!(!sync.is_liked("c"));
    assert_eq!(sync.state_of("a"), Some(LikeState::Confirmed));
}

#[tokio::test]
async fn like_confirms_against_the_backend() {
    let backend = Arc::new(FakeBackend::default());
    let sync = sync_over(&backend);
    sync.init().await.unwrap();

    sync.like("song").await.unwrap();
    assert!(sync.is_liked("song"));
    assert_eq!(sync.state_of("song"), Some(LikeState::Confirmed));
    assert!(backend.server_has("song"));
}

#[tokio::test]
async fn failed_like_rolls_back() {
    let backend = Arc::new(FakeBackend::default());
    let sync = sync_over(&backend);
    sync.init().await.unwrap();

    backend.fail_mutations.store(true, Ordering::SeqCst);
    assert!(sync.like("song").await.is_err());

    assert!(!sync.is_liked("song"));
    assert_eq!(sync.state_of("song"), None);
    assert!(!backend.server_has("song"));
}

#[tokio::test]
async fn failed_unlike_restores_the_entry() {
    let backend = Arc::new(FakeBackend::default());
    backend.seed(&["song"]);
    let sync = sync_over(&backend);
    sync.init().await.unwrap();

    backend.fail_mutations.store(true, Ordering::SeqCst);
    assert!(sync.unlike("song").await.is_err());

    assert!(sync.is_liked("song"));
    assert_eq!(sync.state_of("song"), Some(LikeState::Confirmed));
}

#[tokio::test]
async fn like_is_idempotent() {
    let backend = Arc::new(FakeBackend::default());
    backend.seed(&["song"]);
    let sync = sync_over(&backend);
    sync.init().await.unwrap();

    sync.like("song").await.unwrap();
    assert!(sync.is_liked("song"));
    sync.unlike("missing").await.unwrap();
    assert!(!sync.is_liked("missing"));
}

#[tokio::test]
async fn like_is_visible_while_the_backend_call_is_in_flight() {
    let (release, gate) = oneshot::channel();
    let backend = Arc::new(GatedBackend::new(&[], gate));
    let sync = Arc::new(LikesSync::new(Arc::clone(&backend) as Arc<dyn LikesBackend>));
    sync.init().await.unwrap();

    let in_flight = tokio::spawn({
        let sync = Arc::clone(&sync);
        async move { sync.like("song").await }
    });

    // The optimistic view answers before the backend has.
    wait_for_state(&sync, "song", LikeState::PendingLike).await;
    assert!(sync.is_liked("song"));
    assert_eq!(sync.liked_ids(), vec!["song".to_string()]);

    release.send(()).unwrap();
    in_flight.await.unwrap().unwrap();
    assert_eq!(sync.state_of("song"), Some(LikeState::Confirmed));
}

#[tokio::test]
async fn unlike_hides_the_track_while_the_call_is_in_flight() {
    let (release, gate) = oneshot::channel();
    let backend = Arc::new(GatedBackend::new(&["song"], gate));
    let sync = Arc::new(LikesSync::new(Arc::clone(&backend) as Arc<dyn LikesBackend>));
    sync.init().await.unwrap();
    assert!(sync.is_liked("song"));

    let in_flight = tokio::spawn({
        let sync = Arc::clone(&sync);
        async move { sync.unlike("song").await }
    });

    wait_for_state(&sync, "song", LikeState::PendingUnlike).await;
    assert!(!sync.is_liked("song"));
    assert!(sync.liked_ids().is_empty());

    release.send(()).unwrap();
    in_flight.await.unwrap().unwrap();
    assert_eq!(sync.state_of("song"), None);
}

#[tokio::test]
async fn ambiguous_failure_resynchronizes_instead_of_guessing() {
    // The request times out but the server actually applied it. The
    // synchronizer must not roll back to "not liked"; it reloads and ends
    // up agreeing with the server.
    let backend = Arc::new(FakeBackend::default());
    let sync = sync_over(&backend);
    sync.init().await.unwrap();

    backend.ambiguous_mutations.store(true, Ordering::SeqCst);
    backend.apply_despite_ambiguity.store(true, Ordering::SeqCst);
    assert!(sync.like("song").await.is_err());

    assert!(sync.is_liked("song"));
    assert!(!sync.is_stale());
}

#[tokio::test]
async fn cross_instance_change_is_picked_up_on_focus() {
    // Two views over the same channel. A confirmed like in the first is
    // visible to the second after its focus hook runs.
    let backend = Arc::new(FakeBackend::default());
    let channel = LikesChannel::new();
    let tab_a = LikesSync::on_channel(Arc::clone(&backend) as Arc<dyn LikesBackend>, channel.clone());
    let tab_b = LikesSync::on_channel(Arc::clone(&backend) as Arc<dyn LikesBackend>, channel.clone());
    tab_a.init().await.unwrap();
    tab_b.init().await.unwrap();

    let mut events = channel.subscribe();
    tab_a.like("song").await.unwrap();

    assert!(events.try_recv().is_ok());
    assert!(!tab_b.is_liked("song"));
    tab_b.on_focus().await.unwrap();
    assert!(tab_b.is_liked("song"));
}

#[tokio::test]
async fn change_event_reloads_listening_instances() {
    // Same setup as the focus test, but the second view runs the event
    // listener and converges without any focus hook.
    let backend = Arc::new(FakeBackend::default());
    let channel = LikesChannel::new();
    let tab_a = LikesSync::on_channel(Arc::clone(&backend) as Arc<dyn LikesBackend>, channel.clone());
    let tab_b = Arc::new(LikesSync::on_channel(
        Arc::clone(&backend) as Arc<dyn LikesBackend>,
        channel.clone(),
    ));
    tab_a.init().await.unwrap();
    tab_b.init().await.unwrap();
    let listener = tab_b.spawn_event_listener();

    tab_a.like("song").await.unwrap();

    wait_for_state(&tab_b, "song", LikeState::Confirmed).await;
    assert!(tab_b.is_liked("song"));
    listener.abort();
}

#[tokio::test]
async fn focus_without_remote_changes_skips_reload() {
    let backend = Arc::new(FakeBackend::default());
    let sync = sync_over(&backend);
    sync.init().await.unwrap();

    // Mutate the server behind the synchronizer's back without bumping the
    // version marker. Focus must not notice; only an explicit reload does.
    backend.seed(&["hidden"]);
    sync.on_focus().await.unwrap();
    assert!(!sync.is_liked("hidden"));

    sync.reload().await.unwrap();
    assert!(sync.is_liked("hidden"));
}
