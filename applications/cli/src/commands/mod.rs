//! Subcommand implementations
//!
//! Each command writes its output to the supplied writer so it can be
//! exercised without a terminal.

pub mod bookmarks;
pub mod duas;
pub mod page;
pub mod play;
pub mod prayer;
pub mod qibla;
pub mod read;
pub mod settings;
pub mod surahs;

use std::io::Write;
use std::ops::RangeInclusive;

use quran_core::{SurahNumber, SurahSummary, VerseNumber};
use quran_playback::PlaybackSelection;

use crate::error::Result;

/// Header shown above every surah except Al-Fatihah and At-Tawbah
pub const BISMILLAH: &str = "بِسْمِ ٱللَّهِ ٱلرَّحْمَٰنِ ٱلرَّحِيمِ";

/// Verses `from..=to` of `surah`, defaulting to the whole surah
pub fn verse_range(
    surah: SurahNumber,
    from: Option<u16>,
    to: Option<u16>,
) -> Result<RangeInclusive<u16>> {
    let start = VerseNumber::new(from.unwrap_or(1))?;
    let end = to.map(VerseNumber::new).transpose()?;
    Ok(PlaybackSelection::range(start, end).resolve(surah.verse_count())?)
}

/// `Al-Baqara (The Cow)  سورة البقرة`
pub fn surah_title(summary: &SurahSummary) -> String {
    format!(
        "{} ({})  {}",
        summary.english_name, summary.english_name_translation, summary.name
    )
}

/// One verse: number and Arabic on the first line, translation indented below
pub fn write_verse<W: Write>(
    out: &mut W,
    number: VerseNumber,
    arabic: &str,
    translation: Option<&str>,
) -> Result<()> {
    writeln!(out, "[{}] {}", number, arabic)?;
    if let Some(text) = translation {
        writeln!(out, "      {}", text)?;
    }
    Ok(())
}
