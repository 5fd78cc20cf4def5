use serde::{Deserialize, Serialize};

use super::ids::{PageNumber, SurahNumber, VerseNumber, VerseRef};

/// One ayah within a surah, merged from the Arabic, translation and audio editions
///
/// Ordering by `number_in_surah` defines recitation order. A missing `audio_url`
/// means the verse is unplayable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verse {
    /// Surah this verse belongs to
    pub surah: SurahNumber,

    /// Verse number within the surah (unique and contiguous)
    pub number_in_surah: VerseNumber,

    /// Arabic text
    pub arabic_text: String,

    /// Translated text (if a translation edition was loaded)
    pub translated_text: Option<String>,

    /// Audio recitation URL (if the reciter exposes one for this verse)
    pub audio_url: Option<String>,

    /// Mushaf page this verse appears on
    pub page: Option<PageNumber>,
}

impl Verse {
    /// Address of this verse
    pub fn verse_ref(&self) -> VerseRef {
        VerseRef {
            surah: self.surah,
            verse: self.number_in_surah,
        }
    }

    /// Whether this verse has something to play
    pub fn is_playable(&self) -> bool {
        self.audio_url.as_deref().is_some_and(|url| !url.is_empty())
    }

    /// Text used when copying or sharing a verse
    ///
    /// Includes the translation when present, followed by the surah name and verse number.
    pub fn share_text(&self, surah_name: &str) -> String {
        match &self.translated_text {
            Some(translation) => format!(
                "{}\n\n{}\n\n{} {}",
                self.arabic_text, translation, surah_name, self.number_in_surah
            ),
            None => format!("{}\n\n{} {}", self.arabic_text, surah_name, self.number_in_surah),
        }
    }
}
