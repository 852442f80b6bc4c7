/// Server configuration
use crate::error::{Result, ServerError};
use anonbeats_media::MediaConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_server")]
    pub server: ServerSettings,

    #[serde(default = "default_media")]
    pub media: MediaConfig,

    #[serde(default = "default_gate")]
    pub gate: GateSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

/// The single shared-password gate in front of the whole app.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GateSettings {
    #[serde(default)]
    pub password: String,

    #[serde(default = "default_cookie_max_age_days")]
    pub cookie_max_age_days: i64,
}

impl ServerConfig {
    /// Load configuration from file and environment
    pub fn load() -> Result<Self> {
        let mut settings = config::Config::builder();

        // Load from config file if it exists
        let config_path = PathBuf::from("config.toml");
        if config_path.exists() {
            settings = settings.add_source(config::File::from(config_path));
        }

        // Override with environment variables (prefixed with ANONBEATS__)
        settings = settings.add_source(
            config::Environment::with_prefix("ANONBEATS")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| ServerError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.gate.password.is_empty() {
            return Err(ServerError::Config(
                "Gate password is required (set ANONBEATS__GATE__PASSWORD)".to_string(),
            ));
        }

        if self.media.api_base.is_empty()
            || self.media.cloud_name.is_empty()
            || self.media.api_key.is_empty()
            || self.media.api_secret.is_empty()
        {
            return Err(ServerError::Config(
                "Media host credentials are required (api_base, cloud_name, api_key, api_secret)"
                    .to_string(),
            ));
        }

        Ok(())
    }
}

// Default values
fn default_server() -> ServerSettings {
    ServerSettings {
        host: default_host(),
        port: default_port(),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_media() -> MediaConfig {
    MediaConfig {
        api_base: String::new(),
        cloud_name: String::new(),
        api_key: String::new(),
        api_secret: String::new(),
        folder: "anonbeats/tracks".to_string(),
        tag: "anonbeats".to_string(),
    }
}

fn default_gate() -> GateSettings {
    GateSettings {
        password: String::new(),
        cookie_max_age_days: default_cookie_max_age_days(),
    }
}

fn default_cookie_max_age_days() -> i64 {
    30
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            media: default_media(),
            gate: default_gate(),
        }
    }
}
