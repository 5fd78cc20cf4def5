//! Quran Reader - Recitation Playback
//!
//! Platform-agnostic verse-by-verse recitation control.
//!
//! This crate provides:
//! - Audio URL resolution per reciter (API-provided or CDN template)
//! - Single-verse playback with per-verse play counts (1×, 2×, … ∞)
//! - Range playback with per-verse repeat and whole-range passes
//! - The opening Bismillah ahead of a surah's first verse
//! - Cross-surah navigation that can resume range playback
//!
//! # Architecture
//!
//! `quran-playback` performs no I/O. The platform supplies an [`AudioOutput`]
//! that plays one clip at a time and reports the end of each clip back to the
//! [`SessionController`] with the [`PlaybackToken`] it was started with.
//! Reports carrying an outdated token are dropped, so a stop or a new request
//! always wins over a late "ended" callback.
//!
//! # Example
//!
//! ```rust
//! use quran_core::{SurahNumber, Verse, VerseNumber};
//! use quran_playback::{
//!     AudioOutput, PlaybackEvent, PlaybackOutcome, PlaybackToken, Result, SessionConfig,
//!     SessionController,
//! };
//!
//! #[derive(Default)]
//! struct Recorder {
//!     live: Option<PlaybackToken>,
//! }
//!
//! impl AudioOutput for Recorder {
//!     fn start(&mut self, _url: &str, token: PlaybackToken) -> Result<()> {
//!         self.live = Some(token);
//!         Ok(())
//!     }
//!
//!     fn halt(&mut self) {
//!         self.live = None;
//!     }
//! }
//!
//! let surah = SurahNumber::new(112).unwrap();
//! let verses: Vec<Verse> = (1..=4)
//!     .map(|n| Verse {
//!         surah,
//!         number_in_surah: VerseNumber::new(n).unwrap(),
//!         arabic_text: String::new(),
//!         translated_text: None,
//!         audio_url: Some(format!("https://cdn.example/112/{n}.mp3")),
//!         page: None,
//!     })
//!     .collect();
//!
//! let mut controller = SessionController::new(Recorder::default(), SessionConfig::default());
//! controller.load_surah(surah, &verses).unwrap();
//! controller.play_verse(VerseNumber::new(2).unwrap()).unwrap();
//!
//! // The platform reports the end of the clip
//! let token = controller.output_mut().live.take().unwrap();
//! controller.on_playback_finished(token, PlaybackOutcome::Ended);
//!
//! let events = controller.drain_events();
//! assert!(matches!(events.last(), Some(PlaybackEvent::Stopped)));
//! ```

mod error;
mod events;
mod output;
mod resolver;
mod sequence;
mod session;
mod single;
pub mod types;

// Public exports
pub use error::{PlaybackError, Result};
pub use events::{PlaybackEvent, SkipReason};
pub use output::AudioOutput;
pub use resolver::{resolve_audio_url, AudioResolver};
pub use sequence::{Cue, CueOutcome, SequencePlayer, Transition};
pub use session::SessionController;
pub use single::SingleVersePlayer;
pub use types::{
    PlaybackMode, PlaybackOutcome, PlaybackSelection, PlaybackSession, PlaybackToken,
    RepeatCount, SessionConfig,
};
