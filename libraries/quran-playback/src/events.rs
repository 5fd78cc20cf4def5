//! Playback Events
//!
//! Events are queued by the controller and drained by the host, which uses
//! them to scroll the active verse into view, print progress or load another
//! surah.

use quran_core::{SurahNumber, VerseNumber};
use serde::{Deserialize, Serialize};

use crate::types::PlaybackMode;

/// Why a verse was passed over during a sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    /// No audio URL could be resolved
    NoAudio,
    /// The clip failed to play
    Failed(String),
}

/// Events emitted by the playback controller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// Playback mode changed to single-verse or sequence
    ModeChanged {
        /// The new mode
        mode: PlaybackMode,
    },

    /// A verse clip started (the host should bring it into view)
    VerseStarted {
        /// Surah of the verse
        surah: SurahNumber,
        /// Verse now playing
        verse: VerseNumber,
        /// Play of this verse (1-based)
        repeat: u32,
        /// Pass over the range (1 outside sequences)
        pass: u32,
    },

    /// The opening Bismillah clip started
    BismillahStarted {
        /// Surah it introduces
        surah: SurahNumber,
    },

    /// A verse in a sequence was skipped
    VerseSkipped {
        /// Surah of the verse
        surah: SurahNumber,
        /// Skipped verse
        verse: VerseNumber,
        /// Why it was skipped
        reason: SkipReason,
    },

    /// A full pass over the range finished
    PassCompleted {
        /// Pass that finished (1-based)
        pass: u32,
        /// Whether another pass follows
        restarting: bool,
    },

    /// Playback stopped and the session is idle
    Stopped,

    /// The host should load another surah
    ///
    /// When `resume_sequence` is set, the controller resumes sequence playback
    /// once that surah is loaded.
    NavigateToSurah {
        /// Surah to load
        surah: SurahNumber,
        /// Whether sequence playback resumes after loading
        resume_sequence: bool,
    },

    /// Playback could not continue
    Error {
        /// Description
        message: String,
    },
}
