/// Mushaf page view
use std::io::Write;

use quran_api_client::ARABIC_EDITION;
use quran_core::{verse_display_text, PageNumber, SurahNumber, VerseNumber};

use super::{surah_title, BISMILLAH};
use crate::error::Result;
use crate::state::AppState;

/// Which page to show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageTarget {
    Page(PageNumber),
    /// The page a surah starts on
    SurahStart(SurahNumber),
}

impl PageTarget {
    pub fn page(self) -> PageNumber {
        match self {
            PageTarget::Page(page) => page,
            PageTarget::SurahStart(surah) => surah.start_page(),
        }
    }
}

/// Print one page of the printed mushaf
///
/// A surah header (and Basmalah where it applies) is shown wherever a surah
/// begins on the page.
pub async fn run<W: Write>(state: &AppState, target: PageTarget, out: &mut W) -> Result<()> {
    let number = target.page();
    let page = state.api.quran().page(number, ARABIC_EDITION).await?;

    writeln!(out, "Page {} of 604", page.number)?;

    let mut current: Option<SurahNumber> = None;
    for ayah in &page.ayahs {
        let surah = ayah.surah.as_ref().map(|s| s.number);
        if surah != current {
            if let Some(summary) = &ayah.surah {
                writeln!(out)?;
                writeln!(out, "{}", surah_title(summary))?;
                if ayah.number_in_surah == VerseNumber::FIRST && summary.number.has_bismillah_prefix() {
                    writeln!(out, "{}", BISMILLAH)?;
                }
            }
            current = surah;
        }

        let text = match surah {
            Some(s) => verse_display_text(s, ayah.number_in_surah, &ayah.text),
            None => ayah.text.trim(),
        };
        writeln!(out, "{} ﴿{}﴾", text, ayah.number_in_surah)?;
    }
    Ok(())
}
