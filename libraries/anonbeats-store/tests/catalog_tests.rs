//! Catalog resolver tests over the in-memory media host.

use anonbeats_media::{AssetContext, MediaAsset, MemoryMediaStore};
use anonbeats_store::Catalog;
use std::sync::Arc;

fn seeded_media() -> Arc<MemoryMediaStore> {
    let media = Arc::new(MemoryMediaStore::new());
    media.seed_asset(asset(
        "anonbeats/tracks/older",
        "2024-01-01T00:00:00Z",
        Some(("Older Song", "First Artist")),
    ));
    media.seed_asset(asset(
        "anonbeats/tracks/newer",
        "2024-06-01T00:00:00Z",
        None,
    ));
    media
}

fn asset(public_id: &str, created_at: &str, titled: Option<(&str, &str)>) -> MediaAsset {
    MediaAsset {
        public_id: public_id.to_string(),
        secure_url: format!("https://cdn.example/{public_id}.mp3"),
        created_at: created_at.to_string(),
        duration: Some(180.0),
        context: titled.map(|(title, artist)| AssetContext {
            custom: [
                ("title".to_string(), title.to_string()),
                ("artist".to_string(), artist.to_string()),
            ]
            .into_iter()
            .collect(),
        }),
        ..Default::default()
    }
}

#[tokio::test]
async fn lists_tracks_newest_first() {
    let media = seeded_media();
    let catalog = Catalog::new(media, "anonbeats/tracks", "anonbeats");

    let tracks = catalog.list_tracks().await.unwrap();
    assert_eq!(tracks.len(), 2);
    assert_eq!(tracks[0].public_id, "anonbeats/tracks/newer");
    assert_eq!(tracks[1].title, "Older Song");
    assert_eq!(tracks[1].artist, "First Artist");
}

#[tokio::test]
async fn empty_search_falls_back_to_prefix_listing() {
    let media = seeded_media();
    media.search_empty(true);
    let catalog = Catalog::new(media, "anonbeats/tracks", "anonbeats");

    let tracks = catalog.list_tracks().await.unwrap();
    assert_eq!(tracks.len(), 2);
}

#[tokio::test]
async fn untagged_assets_get_filename_titles() {
    let media = seeded_media();
    let catalog = Catalog::new(media, "anonbeats/tracks", "anonbeats");

    let tracks = catalog.list_tracks().await.unwrap();
    assert_eq!(tracks[0].title, "newer");
}
