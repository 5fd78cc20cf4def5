//! Reader preferences
//!
//! Every preference lives under its own settings key so that a damaged value
//! only resets that one setting to its default.
//!
//! # Example
//!
//! ```rust,no_run
//! use quran_core::Reciter;
//! use quran_storage::{open_data_dir, Preferences};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let prefs = Preferences::new(open_data_dir("./data").await?);
//! prefs.set_reciter(Reciter::Husary).await?;
//! assert_eq!(prefs.reciter().await?, Reciter::Husary);
//! # Ok(())
//! # }
//! ```

use quran_core::{CalculationMethod, JuristicSchool, PrayerLocation, Reciter, Translation};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use std::fmt;
use std::str::FromStr;
use tracing::warn;

use crate::error::{Result, StorageError};
use crate::settings;

// Preference key constants
/// Selected reciter edition code (e.g. "ar.alafasy")
pub const PREF_RECITER: &str = "quran.reciter";

/// Selected translation edition code (e.g. "en.sahih")
pub const PREF_TRANSLATION: &str = "quran.translation";

/// Prayer-time calculation method id
pub const PREF_CALC_METHOD: &str = "prayer.calc_method";

/// Juristic school id for Asr
pub const PREF_JURISTIC_METHOD: &str = "prayer.juristic_method";

/// Saved prayer location (coordinates or address)
pub const PREF_LOCATION: &str = "prayer.location";

/// UI theme ("light", "dark", "system")
pub const PREF_THEME: &str = "ui.theme";

/// Default per-verse play count (0 = unlimited)
pub const PREF_VERSE_REPEAT: &str = "playback.verse_repeat";

/// Default number of passes over a verse range
pub const PREF_RANGE_REPEAT: &str = "playback.range_repeat";

/// Colour scheme preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    /// Follow the terminal or OS setting
    #[default]
    System,
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::System => "system",
        })
    }
}

impl FromStr for Theme {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            "system" | "auto" => Ok(Theme::System),
            other => Err(StorageError::SerializationError(format!(
                "unknown theme: {}",
                other
            ))),
        }
    }
}

/// Typed access to the stored preferences
#[derive(Debug, Clone)]
pub struct Preferences {
    pool: SqlitePool,
}

impl Preferences {
    /// Preferences kept in `pool`
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Decoded value under `key`; values of the wrong shape read as absent
    async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let Some(value) = settings::get_setting(&self.pool, key).await? else {
            return Ok(None);
        };
        match serde_json::from_value(value) {
            Ok(decoded) => Ok(Some(decoded)),
            Err(e) => {
                warn!(key = %key, error = %e, "Ignoring unusable preference");
                Ok(None)
            }
        }
    }

    async fn get_or_default<T: DeserializeOwned + Default>(&self, key: &str) -> Result<T> {
        Ok(self.get(key).await?.unwrap_or_default())
    }

    async fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let value = serde_json::to_value(value)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;
        settings::set_setting(&self.pool, key, &value).await
    }

    // ===== Recitation =====

    /// Selected reciter (Alafasy when unset)
    pub async fn reciter(&self) -> Result<Reciter> {
        self.get_or_default(PREF_RECITER).await
    }

    pub async fn set_reciter(&self, reciter: Reciter) -> Result<()> {
        self.set(PREF_RECITER, &reciter).await
    }

    /// Selected translation (Saheeh International when unset)
    pub async fn translation(&self) -> Result<Translation> {
        self.get_or_default(PREF_TRANSLATION).await
    }

    pub async fn set_translation(&self, translation: &Translation) -> Result<()> {
        self.set(PREF_TRANSLATION, translation).await
    }

    /// Default play count for a single verse, `0` meaning unlimited
    pub async fn verse_repeat(&self) -> Result<u32> {
        Ok(self.get(PREF_VERSE_REPEAT).await?.unwrap_or(1))
    }

    pub async fn set_verse_repeat(&self, count: u32) -> Result<()> {
        self.set(PREF_VERSE_REPEAT, &count).await
    }

    /// Default number of passes over a range (at least 1)
    pub async fn range_repeat(&self) -> Result<u32> {
        Ok(self
            .get::<u32>(PREF_RANGE_REPEAT)
            .await?
            .filter(|n| *n > 0)
            .unwrap_or(1))
    }

    pub async fn set_range_repeat(&self, passes: u32) -> Result<()> {
        self.set(PREF_RANGE_REPEAT, &passes.max(1)).await
    }

    // ===== Prayer times =====

    /// Calculation method (ISNA when unset)
    pub async fn calculation_method(&self) -> Result<CalculationMethod> {
        self.get_or_default(PREF_CALC_METHOD).await
    }

    pub async fn set_calculation_method(&self, method: CalculationMethod) -> Result<()> {
        self.set(PREF_CALC_METHOD, &method).await
    }

    /// Juristic school (Shafiʻi when unset)
    pub async fn juristic_school(&self) -> Result<JuristicSchool> {
        self.get_or_default(PREF_JURISTIC_METHOD).await
    }

    pub async fn set_juristic_school(&self, school: JuristicSchool) -> Result<()> {
        self.set(PREF_JURISTIC_METHOD, &school).await
    }

    /// Saved location, if any
    pub async fn location(&self) -> Result<Option<PrayerLocation>> {
        self.get(PREF_LOCATION).await
    }

    pub async fn set_location(&self, location: &PrayerLocation) -> Result<()> {
        self.set(PREF_LOCATION, location).await
    }

    /// Forget the saved location; returns whether one was saved
    pub async fn clear_location(&self) -> Result<bool> {
        settings::remove_setting(&self.pool, PREF_LOCATION).await
    }

    // ===== Appearance =====

    pub async fn theme(&self) -> Result<Theme> {
        self.get_or_default(PREF_THEME).await
    }

    pub async fn set_theme(&self, theme: Theme) -> Result<()> {
        self.set(PREF_THEME, &theme).await
    }
}
