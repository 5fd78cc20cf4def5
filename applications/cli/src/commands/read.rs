/// Read a surah with its translation
use std::io::Write;

use quran_api_client::{ApiClientError, ARABIC_EDITION};
use quran_core::{verse_display_text, SurahNumber, Translation};
use tracing::debug;

use super::{surah_title, verse_range, write_verse, BISMILLAH};
use crate::error::Result;
use crate::state::AppState;

/// Print verses `from..=to` of `surah`
///
/// `translation` overrides the saved translation for this run only.
pub async fn run<W: Write>(
    state: &AppState,
    surah: SurahNumber,
    from: Option<u16>,
    to: Option<u16>,
    translation: Option<Translation>,
    out: &mut W,
) -> Result<()> {
    let range = verse_range(surah, from, to)?;
    let translation = match translation {
        Some(t) => t,
        None => state.preferences.translation().await?,
    };

    let quran = state.api.quran();
    let (arabic, translated) = tokio::try_join!(
        quran.surah_edition(surah, ARABIC_EDITION),
        quran.surah_edition(surah, translation.code()),
    )?;
    debug!(surah = %surah, translation = translation.code(), "Reading surah");

    writeln!(out, "{}", surah_title(&arabic.summary))?;
    writeln!(out, "{}", translation.display_name())?;
    writeln!(out)?;
    if *range.start() == 1 && surah.has_bismillah_prefix() {
        writeln!(out, "{}", BISMILLAH)?;
        writeln!(out)?;
    }

    for (ayah, translated_ayah) in arabic.ayahs.iter().zip(&translated.ayahs) {
        let number = ayah.number_in_surah;
        if !range.contains(&number.get()) {
            continue;
        }
        if translated_ayah.number_in_surah != number {
            return Err(ApiClientError::ParseError(format!(
                "translation {} is out of step with the Arabic text at verse {}",
                translation, number
            ))
            .into());
        }
        write_verse(
            out,
            number,
            verse_display_text(surah, number, &ayah.text),
            Some(translated_ayah.text.trim()),
        )?;
    }
    Ok(())
}
