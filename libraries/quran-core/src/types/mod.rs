//! Domain types shared across Quran Reader crates

mod bookmark;
mod ids;
mod prayer;
mod reciter;
mod supplication;
mod surah;
mod translation;
mod verse;

pub use bookmark::Bookmark;
pub use ids::{PageNumber, SurahNumber, VerseNumber, VerseRef};
pub use prayer::{
    CalculationMethod, Coordinates, JuristicSchool, Prayer, PrayerDay, PrayerLocation,
    PrayerTimings,
};
pub use reciter::{Reciter, UrlStrategy};
pub use supplication::{Dua, DuaCategory};
pub use surah::{filter_surahs, RevelationType, SurahSort, SurahSummary};
pub use translation::Translation;
pub use verse::Verse;
