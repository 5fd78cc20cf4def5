//! Core types for recitation playback

use quran_core::VerseNumber;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;
use std::ops::RangeInclusive;

use crate::error::{PlaybackError, Result};

/// Identity of one started clip
///
/// Every clip started on the output gets a fresh token; stopping invalidates
/// the current one. A completion report carrying any other token is stale and
/// ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlaybackToken(u64);

impl PlaybackToken {
    pub(crate) fn new(generation: u64) -> Self {
        Self(generation)
    }

    /// Generation number (monotonically increasing per controller)
    pub fn generation(self) -> u64 {
        self.0
    }
}

impl fmt::Display for PlaybackToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// How a clip stopped on its own
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackOutcome {
    /// Played to the end
    Ended,
    /// Could not be fetched, decoded or played
    Failed(String),
}

/// How many times a verse is played
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RepeatCount {
    /// Play exactly this many times
    Times(NonZeroU32),
    /// Repeat until stopped
    Forever,
}

impl RepeatCount {
    /// Play once
    pub const ONCE: Self = Self::Times(NonZeroU32::MIN);

    /// Convert a user-facing count, where `0` means "repeat until stopped"
    pub fn from_count(count: u32) -> Self {
        NonZeroU32::new(count).map_or(Self::Forever, Self::Times)
    }

    /// User-facing count (`0` for [`RepeatCount::Forever`])
    pub fn as_count(self) -> u32 {
        match self {
            Self::Times(n) => n.get(),
            Self::Forever => 0,
        }
    }

    /// Whether another play is due after `plays_done` completed plays
    ///
    /// `cap` bounds [`RepeatCount::Forever`] when set.
    pub fn allows_another(self, plays_done: u32, cap: Option<u32>) -> bool {
        match self {
            Self::Times(n) => plays_done < n.get(),
            Self::Forever => cap.map_or(true, |cap| plays_done < cap),
        }
    }
}

impl Default for RepeatCount {
    fn default() -> Self {
        Self::ONCE
    }
}

impl From<u32> for RepeatCount {
    fn from(count: u32) -> Self {
        Self::from_count(count)
    }
}

impl fmt::Display for RepeatCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Times(n) => write!(f, "{}×", n),
            Self::Forever => f.write_str("∞"),
        }
    }
}

/// Sub-range of the loaded surah to recite, with repeat settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackSelection {
    /// First verse of the range
    pub start_verse: VerseNumber,

    /// Last verse of the range (defaults to the surah's last verse)
    pub end_verse: Option<VerseNumber>,

    /// Plays of each verse before advancing
    pub per_verse_repeat: RepeatCount,

    /// Full passes over the range before stopping
    pub whole_range_repeat: NonZeroU32,
}

impl Default for PlaybackSelection {
    fn default() -> Self {
        Self {
            start_verse: VerseNumber::FIRST,
            end_verse: None,
            per_verse_repeat: RepeatCount::ONCE,
            whole_range_repeat: NonZeroU32::MIN,
        }
    }
}

impl PlaybackSelection {
    /// Selection covering `start..=end`
    pub fn range(start_verse: VerseNumber, end_verse: Option<VerseNumber>) -> Self {
        Self {
            start_verse,
            end_verse,
            ..Self::default()
        }
    }

    /// Set the per-verse repeat
    #[must_use]
    pub fn with_verse_repeat(mut self, repeat: RepeatCount) -> Self {
        self.per_verse_repeat = repeat;
        self
    }

    /// Set the number of passes over the whole range
    #[must_use]
    pub fn with_range_repeat(mut self, passes: NonZeroU32) -> Self {
        self.whole_range_repeat = passes;
        self
    }

    /// Resolve the verse range against a surah with `verse_count` verses
    pub fn resolve(&self, verse_count: u16) -> Result<RangeInclusive<u16>> {
        let start = self.start_verse.get();
        let end = self.end_verse.map_or(verse_count, VerseNumber::get);

        if end > verse_count {
            return Err(PlaybackError::InvalidSelection(format!(
                "end verse {} exceeds verse count {}",
                end, verse_count
            )));
        }
        if start > end {
            return Err(PlaybackError::InvalidSelection(format!(
                "start verse {} is after end verse {}",
                start, end
            )));
        }

        Ok(start..=end)
    }
}

/// Current playback mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlaybackMode {
    /// Nothing playing
    #[default]
    Idle,
    /// One verse, possibly repeated
    PlayingSingleVerse,
    /// A range of verses straight through
    PlayingSequence,
}

/// Snapshot of the playback session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlaybackSession {
    /// Current mode
    pub mode: PlaybackMode,

    /// Verse currently playing (or about to, during the Bismillah)
    pub active_verse: Option<VerseNumber>,

    /// Pass over the range in progress (1-based, 0 when idle)
    pub current_pass: u32,

    /// Play of the active verse in progress (1-based, 0 when idle)
    pub current_verse_repeat: u32,
}

impl PlaybackSession {
    /// Whether anything is playing
    pub fn is_active(&self) -> bool {
        self.mode != PlaybackMode::Idle
    }
}

/// Session controller configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Upper bound on plays for "repeat until stopped" (`None` = unbounded)
    #[serde(default)]
    pub infinite_repeat_cap: Option<u32>,
}
