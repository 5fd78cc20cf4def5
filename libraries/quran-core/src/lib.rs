//! Quran Reader Core
//!
//! Platform-agnostic core types, reference tables and error handling for Quran Reader.
//!
//! This crate provides the foundational building blocks used by the playback
//! controller, the API client, local storage and the command-line application.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `SurahNumber`, `Verse`, `Reciter`, `Bookmark`, `PrayerTimings`, etc.
//! - **Reference Tables**: verse counts, mushaf start pages, revelation order
//! - **Helpers**: Basmalah stripping, qibla bearing
//! - **Error Handling**: Unified `QuranError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use quran_core::{Reciter, SurahNumber, VerseNumber};
//!
//! let surah = SurahNumber::new(36).unwrap();
//! assert_eq!(surah.verse_count(), 83);
//! assert_eq!(surah.next().get(), 37);
//!
//! let reciter = Reciter::from_code("ar.alafasy").unwrap();
//! assert_eq!(reciter.display_name(), "Mishary Alafasy");
//! # let _ = VerseNumber::new(1);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod qibla;
pub mod tables;
pub mod text;
pub mod types;

pub use error::{QuranError, Result};
pub use qibla::{distance_to_kaaba_km, qibla_bearing, KAABA};
pub use text::{strip_leading_basmalah, verse_display_text};

pub use types::{
    // Identifiers
    PageNumber, SurahNumber, VerseNumber, VerseRef,
    // Surahs and verses
    filter_surahs, RevelationType, SurahSort, SurahSummary, Verse,
    // Recitation and translation editions
    Reciter, Translation, UrlStrategy,
    // Persisted user state
    Bookmark,
    // Prayer times
    CalculationMethod, Coordinates, JuristicSchool, Prayer, PrayerDay, PrayerLocation,
    PrayerTimings,
    // Supplications
    Dua, DuaCategory,
};
