use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::ids::SurahNumber;
use crate::tables::revelation_rank;

/// Where a surah was revealed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevelationType {
    /// Revealed in Makkah
    Meccan,
    /// Revealed in Madinah
    Medinan,
}

/// Summary row of the surah index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurahSummary {
    /// Surah number
    pub number: SurahNumber,
    /// Arabic name (e.g. "سُورَةُ ٱلْفَاتِحَةِ")
    pub name: String,
    /// Transliterated name (e.g. "Al-Faatiha")
    pub english_name: String,
    /// Translated meaning (e.g. "The Opening")
    pub english_name_translation: String,
    /// Makkan or Madinan
    pub revelation_type: RevelationType,
    /// Verse count as reported by the API
    #[serde(default)]
    pub number_of_ayahs: Option<u16>,
}

/// Sort order for the surah index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SurahSort {
    /// Mushaf order (1..=114)
    #[default]
    Number,
    /// Alphabetical by transliterated name
    Alphabetical,
    /// Chronological revelation order
    Revelation,
}

/// Filter and sort the surah index
///
/// The query matches case-insensitively against the transliterated name, the
/// Arabic name, the translated name and the surah number. An empty query keeps
/// every surah.
pub fn filter_surahs(surahs: &[SurahSummary], query: &str, sort: SurahSort) -> Vec<SurahSummary> {
    let term = query.trim().to_lowercase();

    let mut matched: Vec<SurahSummary> = surahs
        .iter()
        .filter(|s| {
            term.is_empty()
                || s.english_name.to_lowercase().contains(&term)
                || s.name.to_lowercase().contains(&term)
                || s.english_name_translation.to_lowercase().contains(&term)
                || s.number.to_string().contains(&term)
        })
        .cloned()
        .collect();

    match sort {
        SurahSort::Number => matched.sort_by_key(|s| s.number),
        SurahSort::Alphabetical => matched.sort_by(|a, b| {
            a.english_name
                .to_lowercase()
                .cmp(&b.english_name.to_lowercase())
        }),
        SurahSort::Revelation => matched.sort_by(|a, b| {
            match (
                revelation_rank(a.number.get()),
                revelation_rank(b.number.get()),
            ) {
                (Some(x), Some(y)) => x.cmp(&y),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => a.number.cmp(&b.number),
            }
        }),
    }

    matched
}
