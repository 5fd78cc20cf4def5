use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{SurahNumber, VerseNumber, VerseRef};
use super::verse::Verse;

/// A saved verse with a snapshot of its text
///
/// The JSON shape matches the `bookmarked_ayahs` list written by earlier
/// versions of the reader, so existing bookmark files load unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    /// Surah the verse belongs to
    #[serde(rename = "surahId")]
    pub surah: SurahNumber,

    /// Verse number within the surah
    #[serde(rename = "ayahNumber")]
    pub ayah: VerseNumber,

    /// Transliterated surah name at the time of bookmarking
    pub surah_name: String,

    /// Arabic text snapshot
    pub arabic_text: String,

    /// Translation snapshot
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translation_text: Option<String>,

    /// When the bookmark was created (absent in older files)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Bookmark {
    /// Snapshot a verse as a bookmark
    pub fn from_verse(verse: &Verse, surah_name: impl Into<String>) -> Self {
        Self {
            surah: verse.surah,
            ayah: verse.number_in_surah,
            surah_name: surah_name.into(),
            arabic_text: verse.arabic_text.clone(),
            translation_text: verse.translated_text.clone(),
            created_at: Some(Utc::now()),
        }
    }

    /// Address of the bookmarked verse
    pub fn verse_ref(&self) -> VerseRef {
        VerseRef {
            surah: self.surah,
            verse: self.ayah,
        }
    }

    /// Whether two bookmarks point at the same verse
    pub fn same_verse(&self, other: &Bookmark) -> bool {
        self.surah == other.surah && self.ayah == other.ayah
    }
}
