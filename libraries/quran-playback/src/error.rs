//! Error types for recitation playback

use quran_core::{SurahNumber, VerseNumber};
use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// No surah has been loaded into the controller
    #[error("No surah loaded")]
    NoSurahLoaded,

    /// Verse does not exist in the loaded surah
    #[error("Verse {verse} is outside surah {surah} (1..={verse_count})")]
    VerseOutOfRange {
        /// Loaded surah
        surah: SurahNumber,
        /// Requested verse
        verse: VerseNumber,
        /// Verses in the loaded surah
        verse_count: u16,
    },

    /// Selection range is not valid for the loaded surah
    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    /// Verse list handed to the controller is inconsistent
    #[error("Invalid surah data: {0}")]
    InvalidSurahData(String),

    /// Audio output could not start a clip
    #[error("Audio output error: {0}")]
    Output(String),
}

impl PlaybackError {
    /// Create an audio output error
    pub fn output(msg: impl Into<String>) -> Self {
        Self::Output(msg.into())
    }
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
