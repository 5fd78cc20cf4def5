//! Types for the Quran and prayer-time API requests and responses.

use quran_core::{PageNumber, PrayerTimings, SurahSummary, VerseNumber};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Default Quran text and recitation API
pub const DEFAULT_QURAN_API: &str = "https://api.alquran.cloud/v1";

/// Default prayer-time API
pub const DEFAULT_PRAYER_API: &str = "https://api.aladhan.com/v1";

/// Arabic script edition used for verse text
pub const ARABIC_EDITION: &str = "quran-uthmani";

/// Configuration for the API client.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the Quran API (e.g. "https://api.alquran.cloud/v1")
    pub quran_api_base: String,
    /// Base URL of the prayer-time API
    pub prayer_api_base: String,
    /// Whole-request timeout
    pub timeout: Duration,
    /// Directory for offline copies of responses (disabled when `None`)
    pub cache_dir: Option<PathBuf>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            quran_api_base: DEFAULT_QURAN_API.to_string(),
            prayer_api_base: DEFAULT_PRAYER_API.to_string(),
            timeout: Duration::from_secs(30),
            cache_dir: None,
        }
    }
}

impl ApiConfig {
    /// Point both APIs at the same host (handy for tests and mirrors).
    pub fn with_base(url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            quran_api_base: url.clone(),
            prayer_api_base: url,
            ..Self::default()
        }
    }

    /// Keep offline copies of responses under `dir`.
    pub fn with_cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = Some(dir.into());
        self
    }

    /// Override the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

// =============================================================================
// Envelope
// =============================================================================

/// `{code, status, data}` wrapper used by both APIs
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope {
    pub code: u16,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub data: serde_json::Value,
}

// =============================================================================
// Quran Types
// =============================================================================

/// A surah in one edition (text or recitation)
#[derive(Debug, Clone, Deserialize)]
pub struct SurahEdition {
    /// Name, number and revelation details
    #[serde(flatten)]
    pub summary: SurahSummary,
    /// Ayahs in recitation order
    pub ayahs: Vec<EditionAyah>,
}

/// One ayah as returned by the surah, page and ayah endpoints
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditionAyah {
    /// Global ayah number (1..=6236)
    pub number: u32,
    /// Text in this edition
    pub text: String,
    /// Position within its surah
    pub number_in_surah: VerseNumber,
    /// Recitation URL (recitation editions only)
    #[serde(default)]
    pub audio: Option<String>,
    /// Mushaf page
    #[serde(default)]
    pub page: Option<PageNumber>,
    /// Owning surah (page and ayah endpoints only)
    #[serde(default)]
    pub surah: Option<SurahSummary>,
}

/// One Mushaf page
#[derive(Debug, Clone, Deserialize)]
pub struct MushafPage {
    /// Page number
    pub number: PageNumber,
    /// Ayahs on the page, possibly spanning several surahs
    pub ayahs: Vec<EditionAyah>,
}

impl MushafPage {
    /// Surahs that start or continue on this page, in order of appearance
    pub fn surahs(&self) -> Vec<&SurahSummary> {
        let mut seen: Vec<&SurahSummary> = Vec::new();
        for summary in self.ayahs.iter().filter_map(|a| a.surah.as_ref()) {
            if !seen.iter().any(|s| s.number == summary.number) {
                seen.push(summary);
            }
        }
        seen
    }
}

/// Audio URL for one verse of a recitation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerseAudio {
    /// Verse number
    pub verse: VerseNumber,
    /// Clip URL, if the reciter has one
    pub url: Option<String>,
}

/// A surah with merged Arabic text, translation and audio
#[derive(Debug, Clone)]
pub struct SurahDetail {
    /// Name, number and revelation details
    pub summary: SurahSummary,
    /// Verses in recitation order
    pub verses: Vec<quran_core::Verse>,
}

// =============================================================================
// Prayer Types
// =============================================================================

/// `data` of the timings endpoints
#[derive(Debug, Deserialize)]
pub(crate) struct TimingsData {
    pub timings: PrayerTimings,
    pub date: DateInfo,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DateInfo {
    pub gregorian: CalendarDate,
    pub hijri: CalendarDate,
}

/// A date in one calendar
#[derive(Debug, Deserialize)]
pub(crate) struct CalendarDate {
    pub day: String,
    pub year: String,
    pub weekday: Named,
    pub month: Named,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Named {
    pub en: String,
}

impl CalendarDate {
    /// `Monday, March 10, 2025`
    pub fn label(&self) -> String {
        format!(
            "{}, {} {}, {}",
            self.weekday.en,
            self.month.en,
            self.day.trim_start_matches('0'),
            self.year
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calendar_label() {
        let date: CalendarDate = serde_json::from_value(serde_json::json!({
            "date": "10-03-2025",
            "day": "10",
            "weekday": { "en": "Monday" },
            "month": { "number": 3, "en": "March" },
            "year": "2025"
        }))
        .unwrap();
        assert_eq!(date.label(), "Monday, March 10, 2025");
    }

    #[test]
    fn calendar_label_drops_leading_zero() {
        let date: CalendarDate = serde_json::from_value(serde_json::json!({
            "day": "09",
            "weekday": { "en": "Al Khamees", "ar": "الخميس" },
            "month": { "number": 9, "en": "Ramaḍān", "ar": "رَمَضان" },
            "year": "1446"
        }))
        .unwrap();
        assert_eq!(date.label(), "Al Khamees, Ramaḍān 9, 1446");
    }

    #[test]
    fn surah_edition_from_api_payload() {
        let edition: SurahEdition = serde_json::from_value(serde_json::json!({
            "number": 112,
            "name": "سُورَةُ الإِخۡلَاصِ",
            "englishName": "Al-Ikhlaas",
            "englishNameTranslation": "Sincerity",
            "revelationType": "Meccan",
            "numberOfAyahs": 4,
            "ayahs": [
                { "number": 6222, "text": "Say, He is Allah, One", "numberInSurah": 1, "juz": 30, "page": 604, "sajda": false }
            ],
            "edition": { "identifier": "en.sahih" }
        }))
        .unwrap();
        assert_eq!(edition.summary.english_name, "Al-Ikhlaas");
        assert_eq!(edition.summary.number_of_ayahs, Some(4));
        assert_eq!(edition.ayahs[0].number_in_surah.get(), 1);
        assert_eq!(edition.ayahs[0].page.map(|p| p.get()), Some(604));
        assert!(edition.ayahs[0].audio.is_none());
    }

    #[test]
    fn default_config_points_at_public_apis() {
        let config = ApiConfig::default();
        assert_eq!(config.quran_api_base, DEFAULT_QURAN_API);
        assert_eq!(config.prayer_api_base, DEFAULT_PRAYER_API);
        assert!(config.cache_dir.is_none());
    }
}
