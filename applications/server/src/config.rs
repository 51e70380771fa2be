/// Server configuration
use crate::error::{Result, ServerError};
use musicstore_core::AlbumId;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_server")]
    pub server: ServerSettings,

    #[serde(default = "default_storage")]
    pub storage: StorageSettings,

    #[serde(default = "default_store")]
    pub store: StoreSettings,

    #[serde(default = "default_antiforgery")]
    pub antiforgery: AntiforgerySettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "default_database_url")]
    pub database_url: String,
}

/// Storefront behavior
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreSettings {
    /// Keep album details in memory; when false every request hits the database
    #[serde(default = "default_cache_db_results")]
    pub cache_db_results: bool,

    /// Idle time after which a cached album is dropped
    #[serde(default = "default_cache_sliding_expiration_secs")]
    pub cache_sliding_expiration_secs: u64,

    #[serde(default = "default_cache_max_capacity")]
    pub cache_max_capacity: u64,

    /// Album id whose detail page is rejected as invalid input (fault injection)
    #[serde(default = "default_poisoned_album_id")]
    pub poisoned_album_id: Option<AlbumId>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AntiforgerySettings {
    pub secret: String,

    #[serde(default = "default_token_expiration_hours")]
    pub token_expiration_hours: u64,
}

impl StoreSettings {
    pub fn cache_sliding_expiration(&self) -> Duration {
        Duration::from_secs(self.cache_sliding_expiration_secs)
    }
}

impl ServerConfig {
    /// Load configuration from file and environment
    ///
    /// Reads `config_path` (or `config.toml` when present), then applies
    /// `MUSICSTORE_<SECTION>__<KEY>` environment overrides.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match config_path {
            Some(path) => {
                settings = settings.add_source(config::File::with_name(path));
            }
            None => {
                let default_path = PathBuf::from("config.toml");
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // Override with environment variables (prefixed with MUSICSTORE_)
        settings = settings.add_source(
            config::Environment::with_prefix("MUSICSTORE")
                .prefix_separator("_")
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
        if self.antiforgery.secret.is_empty() {
            return Err(ServerError::Config(
                "Anti-forgery secret is required (set MUSICSTORE_ANTIFORGERY__SECRET)".to_string(),
            ));
        }

        if self.store.cache_db_results && self.store.cache_sliding_expiration_secs == 0 {
            return Err(ServerError::Config(
                "cache_sliding_expiration_secs must be positive when caching is enabled"
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

fn default_storage() -> StorageSettings {
    StorageSettings {
        database_url: default_database_url(),
    }
}

fn default_database_url() -> String {
    "sqlite://./data/musicstore.db".to_string()
}

fn default_store() -> StoreSettings {
    StoreSettings {
        cache_db_results: default_cache_db_results(),
        cache_sliding_expiration_secs: default_cache_sliding_expiration_secs(),
        cache_max_capacity: default_cache_max_capacity(),
        poisoned_album_id: default_poisoned_album_id(),
    }
}

fn default_cache_db_results() -> bool {
    true
}

fn default_cache_sliding_expiration_secs() -> u64 {
    10 * 60
}

fn default_cache_max_capacity() -> u64 {
    10_000
}

fn default_poisoned_album_id() -> Option<AlbumId> {
    Some(6)
}

fn default_antiforgery() -> AntiforgerySettings {
    AntiforgerySettings {
        secret: String::new(),
        token_expiration_hours: default_token_expiration_hours(),
    }
}

fn default_token_expiration_hours() -> u64 {
    24
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            storage: default_storage(),
            store: default_store(),
            antiforgery: default_antiforgery(),
        }
    }
}

impl Default for StoreSettings {
    fn default() -> Self {
        default_store()
    }
}
