//! Playback session controller
//!
//! Single authority over what is playing. Hosts call the user-facing
//! operations (`play_all`, `play_verse`, `stop`, `next`, `previous`), report
//! clip completion through [`SessionController::on_playback_finished`], and
//! drain [`PlaybackEvent`]s to update their view.

use quran_core::{Reciter, SurahNumber, Translation, Verse, VerseNumber};
use std::collections::HashMap;
use tracing::{debug, info, warn};

use crate::error::{PlaybackError, Result};
use crate::events::{PlaybackEvent, SkipReason};
use crate::output::AudioOutput;
use crate::resolver::AudioResolver;
use crate::sequence::{Cue, CueOutcome, SequencePlayer, Transition};
use crate::single::SingleVersePlayer;
use crate::types::{
    PlaybackMode, PlaybackOutcome, PlaybackSelection, PlaybackSession, PlaybackToken,
    RepeatCount, SessionConfig,
};

/// Surah currently shown by the host
#[derive(Debug, Clone)]
struct LoadedSurah {
    number: SurahNumber,
    verse_count: u16,
    resolver: AudioResolver,
}

/// Player holding the session
#[derive(Debug, Default)]
enum Player {
    #[default]
    Idle,
    Single(SingleVersePlayer),
    Sequence(SequencePlayer),
}

/// Recitation playback controller
///
/// Owns the single [`AudioOutput`] and the [`PlaybackSession`]. At most one
/// clip is live at any time: every start first halts the previous clip, and
/// every completion is checked against the token of the clip it belongs to.
pub struct SessionController<O: AudioOutput> {
    output: O,
    config: SessionConfig,

    reciter: Reciter,
    translation: Translation,
    surah: Option<LoadedSurah>,

    selection: PlaybackSelection,
    default_verse_repeat: RepeatCount,
    verse_repeats: HashMap<VerseNumber, RepeatCount>,

    player: Player,
    session: PlaybackSession,

    generation: u64,
    live_token: Option<PlaybackToken>,

    pending_navigation: Option<(SurahNumber, bool)>,
    events: Vec<PlaybackEvent>,
}

impl<O: AudioOutput> SessionController<O> {
    /// Create a controller driving `output`
    pub fn new(output: O, config: SessionConfig) -> Self {
        Self {
            output,
            config,
            reciter: Reciter::default(),
            translation: Translation::default(),
            surah: None,
            selection: PlaybackSelection::default(),
            default_verse_repeat: RepeatCount::ONCE,
            verse_repeats: HashMap::new(),
            player: Player::Idle,
            session: PlaybackSession::default(),
            generation: 0,
            live_token: None,
            pending_navigation: None,
            events: Vec::new(),
        }
    }

    // ===== Accessors =====

    /// Current session snapshot
    pub fn session(&self) -> &PlaybackSession {
        &self.session
    }

    /// Token of the live clip, if any
    pub fn live_token(&self) -> Option<PlaybackToken> {
        self.live_token
    }

    /// Surah loaded into the controller
    pub fn loaded_surah(&self) -> Option<SurahNumber> {
        self.surah.as_ref().map(|s| s.number)
    }

    /// Selected reciter
    pub fn reciter(&self) -> Reciter {
        self.reciter
    }

    /// Selected translation
    pub fn translation(&self) -> &Translation {
        &self.translation
    }

    /// Selection used by [`play_all`](Self::play_all)
    pub fn selection(&self) -> &PlaybackSelection {
        &self.selection
    }

    /// Play count used when `verse` is played on its own
    pub fn verse_repeat(&self, verse: VerseNumber) -> RepeatCount {
        self.verse_repeats
            .get(&verse)
            .copied()
            .unwrap_or(self.default_verse_repeat)
    }

    /// Audio output
    pub fn output(&self) -> &O {
        &self.output
    }

    /// Audio output (mutable)
    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }

    /// Take all queued events
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.events)
    }

    // ===== Configuration =====

    /// Change reciter; stops any playback first
    ///
    /// URLs fetched for the previous reciter are discarded, so the host should
    /// reload the surah with the new reciter's audio edition.
    pub fn set_reciter(&mut self, reciter: Reciter) {
        self.stop();
        if reciter != self.reciter {
            info!(reciter = reciter.code(), "Reciter changed");
        }
        self.reciter = reciter;
        if let Some(loaded) = self.surah.as_mut() {
            loaded.resolver.switch_reciter(reciter);
        }
    }

    /// Change translation; stops any playback first
    pub fn set_translation(&mut self, translation: Translation) {
        self.stop();
        if translation != self.translation {
            info!(translation = translation.code(), "Translation changed");
        }
        self.translation = translation;
    }

    /// Load the verses of a surah, resetting the session
    ///
    /// Verses must belong to `surah` and be numbered contiguously from 1. If the
    /// load completes a navigation that interrupted a sequence, sequence
    /// playback resumes on the new surah.
    pub fn load_surah(&mut self, surah: SurahNumber, verses: &[Verse]) -> Result<()> {
        validate_verses(surah, verses)?;
        self.stop();

        let verse_count = u16::try_from(verses.len())
            .map_err(|_| PlaybackError::InvalidSurahData("too many verses".to_string()))?;

        self.surah = Some(LoadedSurah {
            number: surah,
            verse_count,
            resolver: AudioResolver::new(self.reciter, surah, verses),
        });
        self.selection = PlaybackSelection {
            start_verse: VerseNumber::FIRST,
            end_verse: None,
            ..self.selection
        };
        self.verse_repeats.clear();

        info!(surah = surah.get(), verses = verse_count, "Surah loaded");

        let resume = match self.pending_navigation.take() {
            Some((target, resume)) => target == surah && resume,
            None => false,
        };
        if resume {
            debug!(surah = surah.get(), "Resuming sequence after navigation");
            self.play_all()?;
        }

        Ok(())
    }

    /// Set the range and repeat settings used by [`play_all`](Self::play_all)
    pub fn set_selection(&mut self, selection: PlaybackSelection) -> Result<()> {
        let loaded = self.surah.as_ref().ok_or(PlaybackError::NoSurahLoaded)?;
        selection.resolve(loaded.verse_count)?;
        self.selection = selection;
        Ok(())
    }

    /// Set the play count for one verse played on its own
    pub fn set_verse_repeat(&mut self, verse: VerseNumber, repeat: RepeatCount) -> Result<()> {
        self.check_verse(verse)?;
        self.verse_repeats.insert(verse, repeat);
        Ok(())
    }

    /// Set the play count for verses without their own setting
    pub fn set_default_verse_repeat(&mut self, repeat: RepeatCount) {
        self.default_verse_repeat = repeat;
    }

    // ===== Playback Control =====

    /// Play the selection straight through, or stop if a sequence is running
    pub fn play_all(&mut self) -> Result<()> {
        if self.session.mode == PlaybackMode::PlayingSequence {
            self.stop();
            return Ok(());
        }

        let loaded = self.surah.as_ref().ok_or(PlaybackError::NoSurahLoaded)?;
        let range = self.selection.resolve(loaded.verse_count)?;
        let (first, last) = (
            VerseNumber::new(*range.start()).map_err(to_selection_error)?,
            VerseNumber::new(*range.end()).map_err(to_selection_error)?,
        );

        let bismillah = if first == VerseNumber::FIRST && loaded.number.has_bismillah_prefix() {
            loaded.resolver.bismillah()
        } else {
            None
        };

        let sequence = SequencePlayer::new(
            loaded.number,
            first,
            last,
            self.selection.per_verse_repeat,
            self.selection.whole_range_repeat,
            self.config.infinite_repeat_cap,
            bismillah,
        );

        self.stop();
        info!(
            surah = sequence.surah().get(),
            first = first.get(),
            last = last.get(),
            per_verse = %self.selection.per_verse_repeat,
            passes = self.selection.whole_range_repeat.get(),
            "Starting sequence"
        );

        self.session = PlaybackSession {
            mode: PlaybackMode::PlayingSequence,
            active_verse: Some(first),
            current_pass: 1,
            current_verse_repeat: 1,
        };
        self.events.push(PlaybackEvent::ModeChanged {
            mode: PlaybackMode::PlayingSequence,
        });
        self.drive_sequence(sequence);
        Ok(())
    }

    /// Play one verse, or stop if that verse is already playing on its own
    pub fn play_verse(&mut self, verse: VerseNumber) -> Result<()> {
        self.check_verse(verse)?;

        if self.session.mode == PlaybackMode::PlayingSingleVerse
            && self.session.active_verse == Some(verse)
        {
            self.stop();
            return Ok(());
        }

        self.stop();

        let Some(url) = self.resolve(verse) else {
            warn!(verse = verse.get(), "No audio for verse");
            return Ok(());
        };

        let player = SingleVersePlayer::new(
            verse,
            self.verse_repeat(verse),
            self.config.infinite_repeat_cap,
        );
        debug!(verse = verse.get(), repeat = %player.repeat(), "Playing verse");

        self.session = PlaybackSession {
            mode: PlaybackMode::PlayingSingleVerse,
            active_verse: Some(verse),
            current_pass: 1,
            current_verse_repeat: 1,
        };
        self.events.push(PlaybackEvent::ModeChanged {
            mode: PlaybackMode::PlayingSingleVerse,
        });
        self.play_single(player, &url);
        Ok(())
    }

    /// Halt any audio and reset the session to idle
    ///
    /// Safe to call when already idle.
    pub fn stop(&mut self) {
        let was_active = self.session.is_active() || self.live_token.is_some();

        if let Some(token) = self.live_token.take() {
            debug!(%token, "Halting clip");
            self.output.halt();
        }
        self.player = Player::Idle;
        self.session = PlaybackSession::default();

        if was_active {
            info!("Playback stopped");
            self.events.push(PlaybackEvent::Stopped);
        }
    }

    /// Next verse in single-verse mode, or the next surah at the last verse
    ///
    /// Ignored while a sequence is playing.
    pub fn next(&mut self) -> Result<()> {
        self.step(Direction::Forward)
    }

    /// Previous verse in single-verse mode, or the previous surah at verse 1
    ///
    /// Ignored while a sequence is playing.
    pub fn previous(&mut self) -> Result<()> {
        self.step(Direction::Backward)
    }

    /// Stop and ask the host to load `surah`
    ///
    /// If a sequence was playing, it resumes once that surah is loaded.
    pub fn navigate_to_surah(&mut self, surah: SurahNumber) {
        let resume_sequence = self.session.mode == PlaybackMode::PlayingSequence;
        self.stop();

        info!(surah = surah.get(), resume_sequence, "Navigating to surah");
        self.pending_navigation = Some((surah, resume_sequence));
        self.events.push(PlaybackEvent::NavigateToSurah {
            surah,
            resume_sequence,
        });
    }

    /// Report that the clip started with `token` stopped on its own
    ///
    /// Reports for clips that are no longer live are ignored.
    pub fn on_playback_finished(&mut self, token: PlaybackToken, outcome: PlaybackOutcome) {
        if self.live_token != Some(token) {
            debug!(%token, "Ignoring stale completion");
            return;
        }
        self.live_token = None;

        match std::mem::take(&mut self.player) {
            Player::Idle => {}
            Player::Single(player) => self.single_finished(player, outcome),
            Player::Sequence(mut sequence) => {
                let cue_outcome = match outcome {
                    PlaybackOutcome::Ended => CueOutcome::Ended,
                    PlaybackOutcome::Failed(reason) => {
                        warn!(%token, %reason, "Clip failed during sequence");
                        if let Some(verse) = self.session.active_verse {
                            if matches!(sequence.current(), Some(Cue::Verse(_))) {
                                self.events.push(PlaybackEvent::VerseSkipped {
                                    surah: sequence.surah(),
                                    verse,
                                    reason: SkipReason::Failed(reason),
                                });
                            }
                        }
                        CueOutcome::Failed
                    }
                };

                let transition = sequence.advance(cue_outcome);
                if self.apply_transition(transition) {
                    self.drive_sequence(sequence);
                }
            }
        }
    }

    // ===== Internals =====

    fn step(&mut self, direction: Direction) -> Result<()> {
        if self.session.mode == PlaybackMode::PlayingSequence {
            debug!(?direction, "Ignoring step during sequence");
            return Ok(());
        }

        let loaded = self.surah.as_ref().ok_or(PlaybackError::NoSurahLoaded)?;
        let (surah, verse_count) = (loaded.number, loaded.verse_count);

        let adjacent = match (self.session.mode, self.session.active_verse) {
            (PlaybackMode::PlayingSingleVerse, Some(verse)) => match direction {
                Direction::Forward => verse.next().filter(|v| v.get() <= verse_count),
                Direction::Backward => verse.previous(),
            },
            _ => None,
        };

        match adjacent {
            Some(verse) => self.play_verse(verse),
            None => {
                let target = match direction {
                    Direction::Forward => surah.next(),
                    Direction::Backward => surah.previous(),
                };
                self.navigate_to_surah(target);
                Ok(())
            }
        }
    }

    fn check_verse(&self, verse: VerseNumber) -> Result<()> {
        let loaded = self.surah.as_ref().ok_or(PlaybackError::NoSurahLoaded)?;
        if verse.get() > loaded.verse_count {
            return Err(PlaybackError::VerseOutOfRange {
                surah: loaded.number,
                verse,
                verse_count: loaded.verse_count,
            });
        }
        Ok(())
    }

    fn resolve(&self, verse: VerseNumber) -> Option<String> {
        self.surah.as_ref()?.resolver.resolve(verse)
    }

    /// Start a clip, halting whatever is live first
    fn start_clip(&mut self, url: &str) -> Result<PlaybackToken> {
        if let Some(previous) = self.live_token.take() {
            debug!(token = %previous, "Halting previous clip");
            self.output.halt();
        }

        self.generation += 1;
        let token = PlaybackToken::new(self.generation);
        self.output.start(url, token)?;
        self.live_token = Some(token);
        debug!(%token, url, "Clip started");
        Ok(token)
    }

    fn play_single(&mut self, player: SingleVersePlayer, url: &str) {
        let verse = player.verse();
        match self.start_clip(url) {
            Ok(_) => {
                self.session.current_verse_repeat = player.current_play();
                if let Some(surah) = self.loaded_surah() {
                    self.events.push(PlaybackEvent::VerseStarted {
                        surah,
                        verse,
                        repeat: player.current_play(),
                        pass: 1,
                    });
                }
                self.player = Player::Single(player);
            }
            Err(e) => {
                warn!(verse = verse.get(), error = %e, "Could not start verse");
                self.stop();
            }
        }
    }

    fn single_finished(&mut self, mut player: SingleVersePlayer, outcome: PlaybackOutcome) {
        let verse = player.verse();
        match outcome {
            PlaybackOutcome::Ended => {
                if !player.on_ended() {
                    debug!(verse = verse.get(), plays = player.completed(), "Verse done");
                    self.stop();
                    return;
                }
                match self.resolve(verse) {
                    Some(url) => self.play_single(player, &url),
                    None => self.stop(),
                }
            }
            PlaybackOutcome::Failed(reason) => {
                warn!(verse = verse.get(), %reason, "Verse playback failed");
                self.stop();
            }
        }
    }

    /// Start the sequence's current cue, skipping anything that cannot play
    fn drive_sequence(&mut self, mut sequence: SequencePlayer) {
        loop {
            let surah = sequence.surah();
            let outcome = match sequence.current() {
                None => {
                    self.stop();
                    return;
                }
                Some(Cue::Bismillah(url)) => {
                    let url = url.to_string();
                    match self.start_clip(&url) {
                        Ok(_) => {
                            self.session.active_verse = Some(sequence.first_verse());
                            self.events.push(PlaybackEvent::BismillahStarted { surah });
                            self.player = Player::Sequence(sequence);
                            return;
                        }
                        Err(e) => {
                            debug!(error = %e, "Bismillah unavailable, continuing");
                            CueOutcome::Refused
                        }
                    }
                }
                Some(Cue::Verse(verse)) => match self.resolve(verse) {
                    None => {
                        debug!(verse = verse.get(), "Skipping verse without audio");
                        self.events.push(PlaybackEvent::VerseSkipped {
                            surah,
                            verse,
                            reason: SkipReason::NoAudio,
                        });
                        CueOutcome::Unplayable
                    }
                    Some(url) => match self.start_clip(&url) {
                        Ok(_) => {
                            self.session.active_verse = Some(verse);
                            self.session.current_pass = sequence.pass();
                            self.session.current_verse_repeat = sequence.current_play();
                            self.events.push(PlaybackEvent::VerseStarted {
                                surah,
                                verse,
                                repeat: sequence.current_play(),
                                pass: sequence.pass(),
                            });
                            self.player = Player::Sequence(sequence);
                            return;
                        }
                        Err(e) => {
                            warn!(verse = verse.get(), error = %e, "Could not start verse");
                            self.events.push(PlaybackEvent::VerseSkipped {
                                surah,
                                verse,
                                reason: SkipReason::Failed(e.to_string()),
                            });
                            CueOutcome::Refused
                        }
                    },
                },
            };

            let transition = sequence.advance(outcome);
            if !self.apply_transition(transition) {
                return;
            }
        }
    }

    /// Emit events for a transition; returns whether the sequence continues
    fn apply_transition(&mut self, transition: Transition) -> bool {
        match transition {
            Transition::Repeat | Transition::Advanced => true,
            Transition::PassCompleted { pass } => {
                debug!(pass, "Pass completed, restarting range");
                self.events.push(PlaybackEvent::PassCompleted {
                    pass,
                    restarting: true,
                });
                true
            }
            Transition::Finished { pass } => {
                info!(pass, "Sequence finished");
                self.events.push(PlaybackEvent::PassCompleted {
                    pass,
                    restarting: false,
                });
                self.stop();
                false
            }
            Transition::Abandoned { pass } => {
                warn!(pass, "No verse in range could be played");
                self.events.push(PlaybackEvent::Error {
                    message: "no playable audio in the selected range".to_string(),
                });
                self.stop();
                false
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Direction {
    Forward,
    Backward,
}

fn to_selection_error(e: quran_core::QuranError) -> PlaybackError {
    PlaybackError::InvalidSelection(e.to_string())
}

fn validate_verses(surah: SurahNumber, verses: &[Verse]) -> Result<()> {
    if verses.is_empty() {
        return Err(PlaybackError::InvalidSurahData(format!(
            "surah {} has no verses",
            surah
        )));
    }

    for (index, verse) in verses.iter().enumerate() {
        if verse.surah != surah {
            return Err(PlaybackError::InvalidSurahData(format!(
                "verse {} belongs to surah {}, expected {}",
                verse.verse_ref(),
                verse.surah,
                surah
            )));
        }
        if verse.number_in_surah.index() != index {
            return Err(PlaybackError::InvalidSurahData(format!(
                "verses of surah {} are not contiguous at position {}",
                surah,
                index + 1
            )));
        }
    }

    Ok(())
}
