//! Track domain type

use serde::{Deserialize, Serialize};

/// A playable audio asset resolved from the remote media host.
///
/// Identity is the host-assigned `public_id`; the `audio_url` may be
/// re-signed by the host over time and is never used as identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    /// Stable, globally unique identifier assigned by the media host
    pub public_id: String,

    /// Track title (falls back to the filename portion of the asset path)
    pub title: String,

    /// Artist name, empty string when unknown
    #[serde(default)]
    pub artist: String,

    /// Album name, empty string when unknown
    #[serde(default)]
    pub album: String,

    /// Resolved playable URL
    pub audio_url: String,

    /// Duration in seconds, as reported by the host
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,

    /// Asset size in bytes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bytes: Option<u64>,

    /// Container format reported by the host (e.g. "mp3")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// Optional artwork URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,

    /// Host-reported creation timestamp (RFC 3339)
    #[serde(default)]
    pub created_at: String,

    /// Host tags attached to the asset
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Track {
    /// Filename portion of a host public id, used as a title fallback.
    pub fn title_from_public_id(public_id: &str) -> String {
        public_id
            .rsplit('/')
            .next()
            .filter(|s| !s.is_empty())
            .unwrap_or("Untitled")
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_fallback_uses_last_path_segment() {
        assert_eq!(
            Track::title_from_public_id("anonbeats/tracks/night-drive"),
            "night-drive"
        );
        assert_eq!(Track::title_from_public_id("solo"), "solo");
        assert_eq!(Track::title_from_public_id(""), "Untitled");
    }

    #[test]
    fn serializes_camel_case() {
        let track = Track {
            public_id: "anonbeats/tracks/a".to_string(),
            title: "A".to_string(),
            artist: String::new(),
            album: String::new(),
            audio_url: "https://cdn.example/a.mp3".to_string(),
            duration: Some(183.2),
            bytes: Some(4_200_000),
            format: Some("mp3".to_string()),
            cover_url: None,
            created_at: "2024-01-01T00:00:00Z".to_string(),
            tags: vec!["anonbeats".to_string()],
        };

        let json = serde_json::to_value(&track).unwrap();
        assert_eq!(json["publicId"], "anonbeats/tracks/a");
        assert_eq!(json["audioUrl"], "https://cdn.example/a.mp3");
        assert!(json.get("coverUrl").is_none());
    }
}
