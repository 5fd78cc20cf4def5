//! Sequence player
//!
//! Walks `[start, end]` of a surah in order, honouring the per-verse repeat and
//! the number of passes over the range. An optional Bismillah clip is cued
//! once, ahead of the first verse of the first pass.

use quran_core::{SurahNumber, VerseNumber};
use std::num::NonZeroU32;

use crate::types::RepeatCount;

/// What the sequence wants played next
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cue<'a> {
    /// The opening Bismillah clip
    Bismillah(&'a str),
    /// A verse of the range
    Verse(VerseNumber),
}

/// How the current cue finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CueOutcome {
    /// Played to the end
    Ended,
    /// Started, then failed before the end
    Failed,
    /// The output refused to start it
    Refused,
    /// Had no audio to play
    Unplayable,
}

/// Result of advancing past a cue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Same verse again
    Repeat,
    /// Moved to the next cue within the pass
    Advanced,
    /// Range exhausted, starting the next pass
    PassCompleted {
        /// Pass that finished
        pass: u32,
    },
    /// Range exhausted on the last pass
    Finished {
        /// Pass that finished
        pass: u32,
    },
    /// A whole pass went by without any verse starting
    Abandoned {
        /// Pass that finished
        pass: u32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Bismillah,
    Verse(VerseNumber),
    Finished,
}

/// Cursor over a verse range
#[derive(Debug, Clone)]
pub struct SequencePlayer {
    surah: SurahNumber,
    first: VerseNumber,
    last: VerseNumber,
    per_verse_repeat: RepeatCount,
    passes: NonZeroU32,
    infinite_cap: Option<u32>,
    bismillah: Option<String>,

    step: Step,
    pass: u32,
    verse_plays: u32,
    any_started_this_pass: bool,
}

impl SequencePlayer {
    /// Sequence over `first..=last` of `surah`
    ///
    /// `bismillah` is cued before the first verse when given. The caller is
    /// responsible for gating it (range starts at verse 1, surah has a
    /// Bismillah prefix, reciter has a clip).
    pub fn new(
        surah: SurahNumber,
        first: VerseNumber,
        last: VerseNumber,
        per_verse_repeat: RepeatCount,
        passes: NonZeroU32,
        infinite_cap: Option<u32>,
        bismillah: Option<String>,
    ) -> Self {
        let step = if bismillah.is_some() {
            Step::Bismillah
        } else {
            Step::Verse(first)
        };

        Self {
            surah,
            first,
            last: last.max(first),
            per_verse_repeat,
            passes,
            infinite_cap,
            bismillah,
            step,
            pass: 1,
            verse_plays: 0,
            any_started_this_pass: false,
        }
    }

    /// Surah being recited
    pub fn surah(&self) -> SurahNumber {
        self.surah
    }

    /// First verse of the range
    pub fn first_verse(&self) -> VerseNumber {
        self.first
    }

    /// Pass in progress (1-based)
    pub fn pass(&self) -> u32 {
        self.pass
    }

    /// Play of the current verse in progress (1-based)
    pub fn current_play(&self) -> u32 {
        self.verse_plays.saturating_add(1)
    }

    /// The cue to play now, `None` once the sequence is finished
    pub fn current(&self) -> Option<Cue<'_>> {
        match self.step {
            Step::Bismillah => self.bismillah.as_deref().map(Cue::Bismillah),
            Step::Verse(verse) => Some(Cue::Verse(verse)),
            Step::Finished => None,
        }
    }

    /// Whether the range is exhausted
    pub fn is_finished(&self) -> bool {
        self.step == Step::Finished
    }

    /// Move past the current cue
    pub fn advance(&mut self, outcome: CueOutcome) -> Transition {
        match self.step {
            Step::Finished => Transition::Finished { pass: self.pass },
            Step::Bismillah => {
                // Played or not, the Bismillah never delays the first verse further
                self.step = Step::Verse(self.first);
                Transition::Advanced
            }
            Step::Verse(verse) => {
                if matches!(outcome, CueOutcome::Ended | CueOutcome::Failed) {
                    self.any_started_this_pass = true;
                }
                if outcome == CueOutcome::Ended {
                    self.verse_plays = self.verse_plays.saturating_add(1);
                    if self
                        .per_verse_repeat
                        .allows_another(self.verse_plays, self.infinite_cap)
                    {
                        return Transition::Repeat;
                    }
                }

                self.verse_plays = 0;
                match verse.next().filter(|next| *next <= self.last) {
                    Some(next) => {
                        self.step = Step::Verse(next);
                        Transition::Advanced
                    }
                    None => self.end_pass(),
                }
            }
        }
    }

    fn end_pass(&mut self) -> Transition {
        let pass = self.pass;

        if !self.any_started_this_pass {
            self.step = Step::Finished;
            return Transition::Abandoned { pass };
        }

        if pass < self.passes.get() {
            self.pass += 1;
            self.any_started_this_pass = false;
            // Bismillah is not replayed on later passes
            self.step = Step::Verse(self.first);
            Transition::PassCompleted { pass }
        } else {
            self.step = Step::Finished;
            Transition::Finished { pass }
        }
    }
}
