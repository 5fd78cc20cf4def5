//! Quran Reader API Client
//!
//! HTTP client for the public Quran text/recitation API and the prayer-time API.
//!
//! # Features
//!
//! - **Surahs**: surah index, surah editions, merged verse detail
//! - **Recitation**: per-verse audio URLs, computed locally for CDN-hosted reciters
//! - **Mushaf**: page and single-ayah lookups
//! - **Prayer times**: daily timetable by coordinates or address
//! - **Offline**: last good responses and downloaded audio kept on disk
//!
//! # Example
//!
//! ```ignore
//! use quran_api_client::{ApiConfig, QuranApiClient};
//! use quran_core::{CalculationMethod, JuristicSchool, PrayerLocation};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = QuranApiClient::new(ApiConfig::default().with_cache_dir("./cache"))?;
//!
//!     let today = chrono::Local::now().date_naive();
//!     let day = client
//!         .prayer()
//!         .timings(
//!             today,
//!             &PrayerLocation::Address("Cairo".into()),
//!             CalculationMethod::Egyptian,
//!             JuristicSchool::Shafii,
//!         )
//!         .await?;
//!     println!("{}: Fajr {}", day.gregorian, day.timings.fajr);
//!
//!     Ok(())
//! }
//! ```

mod cache;
mod client;
mod error;
mod prayer;
mod quran;
mod types;

pub use cache::{AssetCache, ResponseCache};
pub use client::QuranApiClient;
pub use error::{ApiClientError, Result};
pub use prayer::PrayerClient;
pub use quran::QuranClient;
pub use types::{
    ApiConfig, EditionAyah, MushafPage, SurahDetail, SurahEdition, VerseAudio, ARABIC_EDITION,
    DEFAULT_PRAYER_API, DEFAULT_QURAN_API,
};
