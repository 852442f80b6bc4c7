//! Tests for the HTTP media store against a mock host.

use anonbeats_media::{HttpMediaStore, MediaConfig, MediaError, MediaStore, Revision};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config(base: &str) -> MediaConfig {
    MediaConfig {
        api_base: base.to_string(),
        cloud_name: "demo".to_string(),
        api_key: "key".to_string(),
        api_secret: "secret".to_string(),
        folder: "anonbeats/tracks".to_string(),
        tag: "anonbeats".to_string(),
    }
}

#[test]
fn rejects_api_base_without_scheme() {
    let result = HttpMediaStore::new(config("media.example.com"));
    assert!(matches!(result, Err(MediaError::Unreachable(_))));
}

#[tokio::test]
async fn search_parses_resources_with_context() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/demo/resources/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "resources": [{
                "public_id": "anonbeats/tracks/night-drive",
                "secure_url": "https://cdn.example/night-drive.mp3",
                "duration": 183.2,
                "created_at": "2024-03-01T12:00:00Z",
                "tags": ["anonbeats"],
                "context": { "custom": { "title": "Night Drive" } }
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let store = HttpMediaStore::new(config(&server.uri())).unwrap();
    let assets = store
        .search_audio("resource_type:video AND tags=anonbeats")
        .await
        .unwrap();

    assert_eq!(assets.len(), 1);
    assert_eq!(
        assets[0].custom_context().get("title").unwrap(),
        "Night Drive"
    );
}

#[tokio::test]
async fn list_by_prefix_sends_listing_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/demo/resources/video"))
        .and(query_param("prefix", "anonbeats/tracks"))
        .and(query_param("context", "true"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "resources": [] })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let store = HttpMediaStore::new(config(&server.uri())).unwrap();
    let assets = store.list_by_prefix("anonbeats/tracks").await.unwrap();
    assert!(assets.is_empty());
}

#[tokio::test]
async fn fetch_raw_missing_blob_is_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/demo/raw/anonbeats/meta/playlists"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let store = HttpMediaStore::new(config(&server.uri())).unwrap();
    let raw = store.fetch_raw("anonbeats/meta/playlists").await.unwrap();
    assert!(raw.is_none());
}

#[tokio::test]
async fn fetch_raw_reads_etag_revision() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/demo/raw/anonbeats/meta/playlists"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("etag", "\"rev-42\"")
                .set_body_bytes(b"{\"version\":1}".to_vec()),
        )
        .mount(&server)
        .await;

    let store = HttpMediaStore::new(config(&server.uri())).unwrap();
    let raw = store
        .fetch_raw("anonbeats/meta/playlists")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(raw.revision, Revision("rev-42".to_string()));
    assert_eq!(raw.data, b"{\"version\":1}");
}

#[tokio::test]
async fn put_raw_passes_expected_revision_as_if_match() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/demo/raw/upload"))
        .and(header("if-match", "\"rev-42\""))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "etag": "rev-43" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let store = HttpMediaStore::new(config(&server.uri())).unwrap();
    let revision = store
        .put_raw(
            "anonbeats/meta/playlists",
            b"{}".to_vec(),
            Some(&Revision("rev-42".to_string())),
        )
        .await
        .unwrap();
    assert_eq!(revision, Revision("rev-43".to_string()));
}

#[tokio::test]
async fn put_raw_surfaces_conflict() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/demo/raw/upload"))
        .respond_with(ResponseTemplate::new(412))
        .mount(&server)
        .await;

    let store = HttpMediaStore::new(config(&server.uri())).unwrap();
    let err = store
        .put_raw(
            "anonbeats/meta/playlists",
            b"{}".to_vec(),
            Some(&Revision("stale".to_string())),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, MediaError::Conflict { .. }));
}

#[tokio::test]
async fn delete_asset_maps_404_to_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/v1/demo/resources/video/upload/anonbeats/tracks/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let store = HttpMediaStore::new(config(&server.uri())).unwrap();
    let err = store
        .delete_asset("anonbeats/tracks/gone")
        .await
        .unwrap_err();
    assert!(matches!(err, MediaError::NotFound(_)));
}
