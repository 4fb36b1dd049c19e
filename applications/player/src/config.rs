/// Application configuration
use crate::error::{AppError, Result};
use cloudtune_catalog_client::CatalogConfig;
use cloudtune_core::SourceId;
use cloudtune_playback::{PlayerConfig, DEFAULT_VOLUME};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable prefix, e.g. `CLOUDTUNE_CATALOG__URL`
pub const ENV_PREFIX: &str = "CLOUDTUNE";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default = "default_catalog")]
    pub catalog: CatalogSettings,

    #[serde(default = "default_storage")]
    pub storage: StorageSettings,

    #[serde(default = "default_playback")]
    pub playback: PlaybackSettings,

    #[serde(default = "default_search")]
    pub search: SearchSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogSettings {
    #[serde(default = "default_catalog_url")]
    pub url: String,

    /// Whole-request timeout; unset means no limit
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlaybackSettings {
    #[serde(default = "default_volume")]
    pub volume: f32,

    /// Length reported by the simulated sink for every track
    #[serde(default = "default_track_secs")]
    pub track_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchSettings {
    /// Sources selected when the shell starts
    #[serde(default = "default_sources")]
    pub sources: Vec<String>,
}

impl AppConfig {
    /// Load configuration from file and environment
    ///
    /// `path` must exist when given; otherwise `config.toml` in the working
    /// directory is used if present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(
            path,
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("search.sources")
                .try_parsing(true),
        )
    }

    fn load_with_env(path: Option<&Path>, env: config::Environment) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(AppError::Config(format!(
                        "Config file not found: {}",
                        path.display()
                    )));
                }
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let config_path = PathBuf::from("config.toml");
                if config_path.exists() {
                    settings = settings.add_source(config::File::from(config_path));
                }
            }
        }

        // Override with environment variables (prefixed with CLOUDTUNE_)
        settings = settings.add_source(env);

        let config = settings.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.catalog.url.trim().is_empty() {
            return Err(AppError::Config(
                "Catalog URL is required (set CLOUDTUNE_CATALOG__URL)".to_string(),
            ));
        }

        if !self.playback.volume.is_finite() || !(0.0..=1.0).contains(&self.playback.volume) {
            return Err(AppError::Config(format!(
                "Volume must be between 0.0 and 1.0, got {}",
                self.playback.volume
            )));
        }

        if self.playback.track_secs == 0 {
            return Err(AppError::Config(
                "playback.track_secs must be positive".to_string(),
            ));
        }

        if self.sources().is_empty() {
            return Err(AppError::Config(
                "At least one search source is required".to_string(),
            ));
        }

        Ok(())
    }

    pub fn catalog_config(&self) -> CatalogConfig {
        let config = CatalogConfig::new(self.catalog.url.clone());
        match self.catalog.timeout_secs {
            Some(secs) => config.with_timeout(Duration::from_secs(secs)),
            None => config,
        }
    }

    pub fn player_config(&self) -> PlayerConfig {
        PlayerConfig {
            volume: self.playback.volume,
            ..PlayerConfig::default()
        }
    }

    /// Configured sources, blank entries dropped
    pub fn sources(&self) -> Vec<SourceId> {
        self.search
            .sources
            .iter()
            .map(|source| source.trim())
            .filter(|source| !source.is_empty())
            .map(SourceId::from)
            .collect()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            catalog: default_catalog(),
            storage: default_storage(),
            playback: default_playback(),
            search: default_search(),
        }
    }
}

// Default values
fn default_catalog() -> CatalogSettings {
    CatalogSettings {
        url: default_catalog_url(),
        timeout_secs: None,
    }
}

fn default_catalog_url() -> String {
    "http://localhost:8082".to_string()
}

fn default_storage() -> StorageSettings {
    StorageSettings {
        data_dir: default_data_dir(),
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_playback() -> PlaybackSettings {
    PlaybackSettings {
        volume: default_volume(),
        track_secs: default_track_secs(),
    }
}

fn default_volume() -> f32 {
    DEFAULT_VOLUME
}

fn default_track_secs() -> u64 {
    30
}

fn default_search() -> SearchSettings {
    SearchSettings {
        sources: default_sources(),
    }
}

fn default_sources() -> Vec<String> {
    SourceId::known()
        .iter()
        .map(|source| source.as_str().to_string())
        .collect()
}
