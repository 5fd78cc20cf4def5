//! Shared fixtures: a reader state pointed at a mock API and a scratch data directory

#![allow(dead_code)]

use quran_cli::audio::Completion;
use quran_cli::{AppState, CliConfig};
use quran_playback::{AudioOutput, PlaybackOutcome, PlaybackToken, Result};
use serde_json::{json, Value};
use tempfile::TempDir;
use tokio::sync::mpsc::UnboundedSender;
use wiremock::ResponseTemplate;

pub const IKHLAS_ARABIC: [&str; 4] = [
    "بِسْمِ ٱللَّهِ ٱلرَّحْمَٰنِ ٱلرَّحِيمِ قُلْ هُوَ ٱللَّهُ أَحَدٌ",
    "ٱللَّهُ ٱلصَّمَدُ",
    "لَمْ يَلِدْ وَلَمْ يُولَدْ",
    "وَلَمْ يَكُن لَّهُۥ كُفُوًا أَحَدٌۢ",
];

pub const IKHLAS_SAHIH: [&str; 4] = [
    "Say, \"He is Allah, [who is] One,",
    "Allah, the Eternal Refuge.",
    "He neither begets nor is born,",
    "Nor is there to Him any equivalent.\"",
];

/// Reader state using `base_url` for both APIs; the directory holds stored data
pub async fn test_state(base_url: &str) -> (AppState, TempDir) {
    let dir = TempDir::new().unwrap();

    let mut config = CliConfig::default();
    config.api.quran_api_base = base_url.to_string();
    config.api.prayer_api_base = base_url.to_string();
    config.storage.data_dir = dir.path().join("data");
    config.storage.cache_dir = None;
    config.validate().unwrap();

    (AppState::open(config).await.unwrap(), dir)
}

pub fn ok(data: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "code": 200,
        "status": "OK",
        "data": data
    }))
}

pub fn ikhlas_summary() -> Value {
    json!({
        "number": 112,
        "name": "سُورَةُ الإِخۡلَاصِ",
        "englishName": "Al-Ikhlaas",
        "englishNameTranslation": "Sincerity",
        "revelationType": "Meccan",
        "numberOfAyahs": 4
    })
}

/// Surah 112 in an edition with the given verse texts
pub fn ikhlas_edition(texts: &[&str]) -> Value {
    let mut edition = ikhlas_summary();
    edition["ayahs"] = texts
        .iter()
        .enumerate()
        .map(|(i, text)| {
            json!({
                "number": 6222 + i,
                "text": text,
                "numberInSurah": i + 1,
                "juz": 30,
                "page": 604
            })
        })
        .collect();
    edition
}

pub fn output_text(out: Vec<u8>) -> String {
    String::from_utf8(out).unwrap()
}

/// Audio output whose clips end as soon as they start
pub struct InstantOutput {
    completions: UnboundedSender<Completion>,
    pub started: Vec<String>,
}

impl InstantOutput {
    pub fn new(completions: UnboundedSender<Completion>) -> Self {
        Self {
            completions,
            started: Vec::new(),
        }
    }
}

impl AudioOutput for InstantOutput {
    fn start(&mut self, url: &str, token: PlaybackToken) -> Result<()> {
        self.started.push(url.to_string());
        let _ = self.completions.send((token, PlaybackOutcome::Ended));
        Ok(())
    }

    fn halt(&mut self) {}
}
