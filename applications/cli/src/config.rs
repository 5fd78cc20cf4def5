/// Reader configuration
use crate::error::{CliError, Result};
use quran_api_client::{ApiConfig, DEFAULT_PRAYER_API, DEFAULT_QURAN_API};
use quran_core::{Coordinates, PrayerLocation};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// File read when no `--config` path is given
pub const DEFAULT_CONFIG_FILE: &str = "quran.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CliConfig {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default)]
    pub playback: PlaybackSettings,

    #[serde(default)]
    pub prayer: PrayerSettings,

    #[serde(default)]
    pub supplications: SupplicationSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiSettings {
    #[serde(default = "default_quran_api_base")]
    pub quran_api_base: String,

    #[serde(default = "default_prayer_api_base")]
    pub prayer_api_base: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    /// Bookmarks and preferences
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Offline copies of API responses and audio; `None` disables caching
    #[serde(default = "default_cache_dir")]
    pub cache_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PlaybackSettings {
    /// Upper bound on plays for an "unlimited" repeat (unbounded when unset)
    #[serde(default)]
    pub infinite_repeat_cap: Option<u32>,
}

/// Fallback location used when none is given or saved
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PrayerSettings {
    #[serde(default)]
    pub latitude: Option<f64>,

    #[serde(default)]
    pub longitude: Option<f64>,

    #[serde(default)]
    pub address: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SupplicationSettings {
    /// Hisnul Muslim collection (`husn_en.json`)
    #[serde(default = "default_supplications_path")]
    pub path: PathBuf,
}

impl CliConfig {
    /// Load configuration from file and environment
    ///
    /// `path` overrides the default `quran.toml`; an explicit path must exist.
    /// Environment variables use the `QURAN_` prefix with `__` between
    /// levels, e.g. `QURAN_API__TIMEOUT_SECS=10`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // Override with environment variables (prefixed with QURAN_)
        settings = settings.add_source(
            config::Environment::with_prefix("QURAN")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| CliError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        for (name, url) in [
            ("api.quran_api_base", &self.api.quran_api_base),
            ("api.prayer_api_base", &self.api.prayer_api_base),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(CliError::Config(format!(
                    "{} must be an http(s) URL, got {:?}",
                    name, url
                )));
            }
        }

        if self.api.timeout_secs == 0 {
            return Err(CliError::Config(
                "api.timeout_secs must be greater than zero".to_string(),
            ));
        }

        if self.playback.infinite_repeat_cap == Some(0) {
            return Err(CliError::Config(
                "playback.infinite_repeat_cap must be at least 1 when set".to_string(),
            ));
        }

        match (self.prayer.latitude, self.prayer.longitude) {
            (Some(lat), Some(lng)) => {
                Coordinates::new(lat, lng).map_err(|e| CliError::Config(e.to_string()))?;
            }
            (None, None) => {}
            _ => {
                return Err(CliError::Config(
                    "prayer.latitude and prayer.longitude must be set together".to_string(),
                ))
            }
        }

        Ok(())
    }

    /// Settings for the API client
    pub fn api_config(&self) -> ApiConfig {
        ApiConfig {
            quran_api_base: self.api.quran_api_base.clone(),
            prayer_api_base: self.api.prayer_api_base.clone(),
            timeout: Duration::from_secs(self.api.timeout_secs),
            cache_dir: self.storage.cache_dir.clone(),
        }
    }

    /// Location from the configuration file, coordinates first
    pub fn prayer_location(&self) -> Option<PrayerLocation> {
        if let (Some(lat), Some(lng)) = (self.prayer.latitude, self.prayer.longitude) {
            if let Ok(coords) = Coordinates::new(lat, lng) {
                return Some(PrayerLocation::Coordinates(coords));
            }
        }
        self.prayer
            .address
            .as_ref()
            .filter(|a| !a.trim().is_empty())
            .map(|a| PrayerLocation::Address(a.clone()))
    }
}

// Default values
fn default_quran_api_base() -> String {
    DEFAULT_QURAN_API.to_string()
}

fn default_prayer_api_base() -> String {
    DEFAULT_PRAYER_API.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_cache_dir() -> Option<PathBuf> {
    Some(PathBuf::from("./data/cache"))
}

fn default_supplications_path() -> PathBuf {
    PathBuf::from("./data/husn_en.json")
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            quran_api_base: default_quran_api_base(),
            prayer_api_base: default_prayer_api_base(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            cache_dir: default_cache_dir(),
        }
    }
}

impl Default for SupplicationSettings {
    fn default() -> Self {
        Self {
            path: default_supplications_path(),
        }
    }
}
