/// Surah index
use std::io::Write;

use quran_core::{filter_surahs, RevelationType, SurahSort, SurahSummary};
use tracing::debug;

use crate::error::Result;
use crate::state::AppState;

/// Print the surah index, filtered by `query` and ordered by `sort`
pub async fn run<W: Write>(state: &AppState, query: &str, sort: SurahSort, out: &mut W) -> Result<()> {
    let surahs = state.api.quran().surah_list().await?;
    let shown = filter_surahs(&surahs, query, sort);
    debug!(total = surahs.len(), shown = shown.len(), "Listing surahs");

    if shown.is_empty() {
        writeln!(out, "No surah matches \"{}\"", query.trim())?;
        return Ok(());
    }

    for summary in &shown {
        writeln!(out, "{}", index_line(summary))?;
    }
    Ok(())
}

fn index_line(summary: &SurahSummary) -> String {
    let verses = summary
        .number_of_ayahs
        .unwrap_or_else(|| summary.number.verse_count());
    let revealed = match summary.revelation_type {
        RevelationType::Meccan => "Meccan",
        RevelationType::Medinan => "Medinan",
    };
    format!(
        "{:>3}. {:<22} {:<28} {:>3} verses  {:<7}  {}",
        summary.number,
        summary.english_name,
        summary.english_name_translation,
        verses,
        revealed,
        summary.name
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use quran_core::SurahNumber;

    #[test]
    fn index_line_falls_back_to_table_count() {
        let summary = SurahSummary {
            number: SurahNumber::new(36).unwrap(),
            name: "سُورَةُ يسٓ".to_string(),
            english_name: "Yaseen".to_string(),
            english_name_translation: "Yaseen".to_string(),
            revelation_type: RevelationType::Meccan,
            number_of_ayahs: None,
        };
        let line = index_line(&summary);
        assert!(line.starts_with(" 36. Yaseen"));
        assert!(line.contains(" 83 verses"));
        assert!(line.contains("Meccan"));
    }
}
