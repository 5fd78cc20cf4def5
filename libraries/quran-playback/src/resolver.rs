//! Audio resource resolution
//!
//! Maps a verse to the URL of its recitation for the selected reciter.

use quran_core::{Reciter, SurahNumber, UrlStrategy, Verse, VerseNumber, VerseRef};

/// Resolve the audio URL for one verse
///
/// `api_url` is the URL the recitation edition endpoint returned for this
/// verse, if any. Reciters served from a CDN template ignore it.
pub fn resolve_audio_url(
    surah: SurahNumber,
    verse: VerseNumber,
    reciter: Reciter,
    api_url: Option<&str>,
) -> Option<String> {
    VerseRef::new(surah, verse).ok()?;

    match reciter.url_strategy() {
        UrlStrategy::DirectFromApi => api_url
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map(String::from),
        strategy @ UrlStrategy::ComputedFromCdnTemplate { .. } => {
            strategy.compute(surah.get(), verse.get())
        }
    }
}

/// Per-surah resolver holding the API-provided URLs for one reciter
#[derive(Debug, Clone)]
pub struct AudioResolver {
    reciter: Reciter,
    surah: SurahNumber,
    api_urls: Vec<Option<String>>,
}

impl AudioResolver {
    /// Build a resolver from the verses of a loaded surah
    ///
    /// The verses' `audio_url` fields are assumed to belong to `reciter`.
    pub fn new(reciter: Reciter, surah: SurahNumber, verses: &[Verse]) -> Self {
        Self {
            reciter,
            surah,
            api_urls: verses.iter().map(|v| v.audio_url.clone()).collect(),
        }
    }

    /// Switch reciter, discarding URLs fetched for the previous one
    pub fn switch_reciter(&mut self, reciter: Reciter) {
        if reciter != self.reciter {
            self.reciter = reciter;
            self.api_urls.iter_mut().for_each(|url| *url = None);
        }
    }

    /// Reciter URLs are resolved for
    pub fn reciter(&self) -> Reciter {
        self.reciter
    }

    /// URL for a verse of the loaded surah, `None` if unplayable
    pub fn resolve(&self, verse: VerseNumber) -> Option<String> {
        let api_url = self
            .api_urls
            .get(verse.index())
            .and_then(|url| url.as_deref());
        resolve_audio_url(self.surah, verse, self.reciter, api_url)
    }

    /// URL of the opening Bismillah clip for this reciter
    pub fn bismillah(&self) -> Option<String> {
        self.reciter.bismillah_url()
    }
}
