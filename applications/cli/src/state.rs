/// Shared application state
use crate::config::CliConfig;
use crate::error::{CliError, Result};
use quran_api_client::{AssetCache, QuranApiClient};
use quran_core::PrayerLocation;
use quran_storage::{BookmarkStore, Preferences};
use std::sync::Arc;

/// State shared by every subcommand
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<CliConfig>,
    pub api: Arc<QuranApiClient>,
    pub preferences: Preferences,
    pub bookmarks: BookmarkStore,
}

impl AppState {
    pub fn new(
        config: Arc<CliConfig>,
        api: Arc<QuranApiClient>,
        preferences: Preferences,
        bookmarks: BookmarkStore,
    ) -> Self {
        Self {
            config,
            api,
            preferences,
            bookmarks,
        }
    }

    /// Open the API client and the database in the configured data directory
    pub async fn open(config: CliConfig) -> Result<Self> {
        let api = QuranApiClient::new(config.api_config())?;
        let pool = quran_storage::open_data_dir(config.storage.data_dir.clone()).await?;

        Ok(Self::new(
            Arc::new(config),
            Arc::new(api),
            Preferences::new(pool.clone()),
            BookmarkStore::new(pool),
        ))
    }

    /// Audio cache, falling back to a temporary directory when caching is disabled
    pub fn audio_cache(&self) -> AssetCache {
        match self.api.assets() {
            Some(assets) => assets.clone(),
            None => self
                .api
                .asset_cache(std::env::temp_dir().join("quran-reader-audio")),
        }
    }

    /// Location to use when the command line names none
    ///
    /// The saved location wins over the configuration file.
    pub async fn default_location(&self) -> Result<PrayerLocation> {
        if let Some(saved) = self.preferences.location().await? {
            return Ok(saved);
        }
        self.config.prayer_location().ok_or_else(|| {
            CliError::LocationUnavailable("no location given, saved or configured".to_string())
        })
    }
}
