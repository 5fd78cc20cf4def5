//! Surah, page, ayah and recitation endpoints.

use crate::cache::ResponseCache;
use crate::client::get_data;
use crate::error::{ApiClientError, Result};
use crate::types::{EditionAyah, MushafPage, SurahDetail, SurahEdition, VerseAudio, ARABIC_EDITION};
use quran_core::{
    PageNumber, Reciter, SurahNumber, SurahSummary, Translation, UrlStrategy, Verse, VerseNumber,
    VerseRef,
};
use reqwest::Client;
use tracing::debug;

/// Quran API client.
pub struct QuranClient<'a> {
    http: &'a Client,
    base_url: &'a str,
    cache: Option<&'a ResponseCache>,
}

impl<'a> QuranClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str, cache: Option<&'a ResponseCache>) -> Self {
        Self {
            http,
            base_url,
            cache,
        }
    }

    /// Index of all 114 surahs.
    pub async fn surah_list(&self) -> Result<Vec<SurahSummary>> {
        let url = format!("{}/surah", self.base_url);
        let surahs: Vec<SurahSummary> = get_data(self.http, &url, self.cache, "surah list").await?;

        debug!(count = surahs.len(), "Fetched surah list");
        Ok(surahs)
    }

    /// One surah in a text or recitation edition (e.g. `en.sahih`, `ar.alafasy`).
    pub async fn surah_edition(&self, surah: SurahNumber, edition: &str) -> Result<SurahEdition> {
        let url = format!("{}/surah/{}/{}", self.base_url, surah, edition);
        get_data(self.http, &url, self.cache, "surah").await
    }

    /// Per-verse audio URLs of a surah for `reciter`.
    ///
    /// Reciters served from a CDN template are resolved locally without a request.
    pub async fn surah_audio(&self, surah: SurahNumber, reciter: Reciter) -> Result<Vec<VerseAudio>> {
        match reciter.url_strategy() {
            strategy @ UrlStrategy::ComputedFromCdnTemplate { .. } => (1..=surah.verse_count())
                .map(|n| {
                    Ok(VerseAudio {
                        verse: VerseNumber::new(n).map_err(|e| ApiClientError::ParseError(e.to_string()))?,
                        url: strategy.compute(surah.get(), n),
                    })
                })
                .collect(),
            UrlStrategy::DirectFromApi => {
                let edition = self.surah_edition(surah, reciter.code()).await?;
                Ok(edition
                    .ayahs
                    .into_iter()
                    .map(|ayah| VerseAudio {
                        verse: ayah.number_in_surah,
                        url: ayah.audio.filter(|url| !url.is_empty()),
                    })
                    .collect())
            }
        }
    }

    /// A surah with Arabic text, translation and audio merged verse by verse.
    ///
    /// The three editions are fetched concurrently. Verses missing from the
    /// audio edition are left without a URL.
    pub async fn surah_detail(
        &self,
        surah: SurahNumber,
        translation: &Translation,
        reciter: Reciter,
    ) -> Result<SurahDetail> {
        let (arabic, translated, audio) = tokio::try_join!(
            self.surah_edition(surah, ARABIC_EDITION),
            self.surah_edition(surah, translation.code()),
            self.surah_audio(surah, reciter),
        )?;

        if translated.ayahs.len() != arabic.ayahs.len() {
            return Err(ApiClientError::ParseError(format!(
                "translation {} has {} verses for surah {}, expected {}",
                translation,
                translated.ayahs.len(),
                surah,
                arabic.ayahs.len()
            )));
        }

        let verses: Vec<Verse> = arabic
            .ayahs
            .into_iter()
            .zip(translated.ayahs)
            .map(|(ayah, translation)| {
                let number = ayah.number_in_surah;
                let audio_url = audio
                    .get(number.index())
                    .filter(|a| a.verse == number)
                    .or_else(|| audio.iter().find(|a| a.verse == number))
                    .and_then(|a| a.url.clone());

                Verse {
                    surah,
                    number_in_surah: number,
                    arabic_text: ayah.text,
                    translated_text: Some(translation.text),
                    audio_url,
                    page: ayah.page,
                }
            })
            .collect();

        debug!(
            surah = %surah,
            verses = verses.len(),
            playable = verses.iter().filter(|v| v.is_playable()).count(),
            "Fetched surah detail"
        );

        Ok(SurahDetail {
            summary: arabic.summary,
            verses,
        })
    }

    /// One Mushaf page in `edition`.
    pub async fn page(&self, page: PageNumber, edition: &str) -> Result<MushafPage> {
        let url = format!("{}/page/{}/{}", self.base_url, page, edition);
        get_data(self.http, &url, self.cache, "page").await
    }

    /// One ayah in `edition`.
    pub async fn ayah(&self, verse: VerseRef, edition: &str) -> Result<EditionAyah> {
        let url = format!("{}/ayah/{}/{}", self.base_url, verse, edition);
        get_data(self.http, &url, self.cache, "ayah").await
    }
}
