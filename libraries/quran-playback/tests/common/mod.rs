//! Shared test fixtures: a recording audio output and verse builders

#![allow(dead_code)]

use quran_core::{Reciter, SurahNumber, Verse, VerseNumber};
use quran_playback::{
    AudioOutput, PlaybackError, PlaybackEvent, PlaybackOutcome, PlaybackToken, Result,
    SessionConfig, SessionController,
};
use std::collections::HashSet;

/// Audio output that records every call instead of playing
#[derive(Debug, Default)]
pub struct RecordingOutput {
    /// Clip currently playing
    pub live: Option<PlaybackToken>,
    /// Every started clip, in order
    pub started: Vec<(String, PlaybackToken)>,
    /// Number of `halt` calls
    pub halts: usize,
    /// Starts issued while another clip was still live
    pub overlaps: usize,
    /// URLs whose `start` is refused
    pub refuse: HashSet<String>,
}

impl AudioOutput for RecordingOutput {
    fn start(&mut self, url: &str, token: PlaybackToken) -> Result<()> {
        if self.refuse.contains(url) {
            return Err(PlaybackError::output(format!("refused {}", url)));
        }
        if self.live.is_some() {
            self.overlaps += 1;
        }
        self.live = Some(token);
        self.started.push((url.to_string(), token));
        Ok(())
    }

    fn halt(&mut self) {
        self.live = None;
        self.halts += 1;
    }
}

pub type Controller = SessionController<RecordingOutput>;

pub const BISMILLAH_URL: &str = "https://verses.quran.com/Alafasy/mp3/001001.mp3";

pub fn surah(n: u16) -> SurahNumber {
    SurahNumber::new(n).unwrap()
}

pub fn v(n: u16) -> VerseNumber {
    VerseNumber::new(n).unwrap()
}

pub fn verse_url(surah: u16, verse: u16) -> String {
    format!("https://cdn.test/{}/{}.mp3", surah, verse)
}

/// `count` verses of `surah`, without audio for the numbers in `missing`
pub fn verses(surah_number: u16, count: u16, missing: &[u16]) -> Vec<Verse> {
    (1..=count)
        .map(|n| Verse {
            surah: surah(surah_number),
            number_in_surah: v(n),
            arabic_text: format!("آية {}", n),
            translated_text: Some(format!("Verse {}", n)),
            audio_url: (!missing.contains(&n)).then(|| verse_url(surah_number, n)),
            page: None,
        })
        .collect()
}

/// Controller with `count` verses of `surah_number` loaded for `reciter`
pub fn controller_with(
    reciter: Reciter,
    surah_number: u16,
    count: u16,
    missing: &[u16],
    config: SessionConfig,
) -> Controller {
    let mut controller = SessionController::new(RecordingOutput::default(), config);
    controller.set_reciter(reciter);
    controller
        .load_surah(surah(surah_number), &verses(surah_number, count, missing))
        .unwrap();
    controller.drain_events();
    controller
}

/// Controller for a reciter without a Bismillah clip
pub fn controller(surah_number: u16, count: u16) -> Controller {
    controller_with(
        Reciter::Husary,
        surah_number,
        count,
        &[],
        SessionConfig::default(),
    )
}

/// Report the end of the live clip, as the platform would
pub fn finish(controller: &mut Controller, outcome: PlaybackOutcome) {
    let token = controller
        .output_mut()
        .live
        .take()
        .expect("a clip should be live");
    controller.on_playback_finished(token, outcome);
}

/// Let every clip play to the end until the controller goes idle (bounded)
pub fn run_to_idle(controller: &mut Controller, limit: usize) {
    for _ in 0..limit {
        if controller.output().live.is_none() {
            return;
        }
        finish(controller, PlaybackOutcome::Ended);
    }
    panic!("still playing after {} clips", limit);
}

/// URLs of every clip started so far
pub fn started_urls(controller: &Controller) -> Vec<String> {
    controller
        .output()
        .started
        .iter()
        .map(|(url, _)| url.clone())
        .collect()
}

/// Verse numbers of every `VerseStarted` event
pub fn started_verses(events: &[PlaybackEvent]) -> Vec<u16> {
    events
        .iter()
        .filter_map(|e| match e {
            PlaybackEvent::VerseStarted { verse, .. } => Some(verse.get()),
            _ => None,
        })
        .collect()
}
