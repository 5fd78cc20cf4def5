//! Single-verse player
//!
//! `Stopped -> Playing -> Ended -> Playing | Stopped`. The player only tracks
//! repeat state; the controller owns the output and decides when a completion
//! is still current.

use quran_core::VerseNumber;

use crate::types::RepeatCount;

/// Repeat state for one verse played on its own
#[derive(Debug, Clone)]
pub struct SingleVersePlayer {
    verse: VerseNumber,
    repeat: RepeatCount,
    infinite_cap: Option<u32>,
    completed: u32,
}

impl SingleVersePlayer {
    /// Player for `verse`, played `repeat` times
    pub fn new(verse: VerseNumber, repeat: RepeatCount, infinite_cap: Option<u32>) -> Self {
        Self {
            verse,
            repeat,
            infinite_cap,
            completed: 0,
        }
    }

    /// Verse being played
    pub fn verse(&self) -> VerseNumber {
        self.verse
    }

    /// Repeat setting
    pub fn repeat(&self) -> RepeatCount {
        self.repeat
    }

    /// Plays completed so far
    pub fn completed(&self) -> u32 {
        self.completed
    }

    /// Play in progress (1-based)
    pub fn current_play(&self) -> u32 {
        self.completed.saturating_add(1)
    }

    /// Record a completed play; returns whether the verse should play again
    pub fn on_ended(&mut self) -> bool {
        self.completed = self.completed.saturating_add(1);
        self.repeat.allows_another(self.completed, self.infinite_cap)
    }
}
