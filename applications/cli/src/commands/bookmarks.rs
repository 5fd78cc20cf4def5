/// Bookmarked verses
use std::io::Write;

use quran_api_client::ARABIC_EDITION;
use quran_core::{Bookmark, VerseRef};

use crate::error::Result;
use crate::state::AppState;

/// Print every bookmark, oldest first
pub async fn list<W: Write>(state: &AppState, out: &mut W) -> Result<()> {
    let bookmarks = state.bookmarks.list().await?;
    if bookmarks.is_empty() {
        writeln!(out, "No bookmarks yet. Add one with `quran bookmarks add 2:255`.")?;
        return Ok(());
    }

    for bookmark in &bookmarks {
        writeln!(out, "{} {}", bookmark.verse_ref(), bookmark.surah_name)?;
        writeln!(out, "  {}", bookmark.arabic_text.trim())?;
        if let Some(translation) = &bookmark.translation_text {
            writeln!(out, "  {}", translation.trim())?;
        }
        if let Some(created) = bookmark.created_at {
            writeln!(out, "  saved {}", created.format("%Y-%m-%d %H:%M UTC"))?;
        }
    }
    Ok(())
}

/// Bookmark a verse, snapshotting its text in the saved translation
pub async fn add<W: Write>(state: &AppState, verse: VerseRef, out: &mut W) -> Result<()> {
    if state.bookmarks.contains(verse).await? {
        writeln!(out, "{} is already bookmarked", verse)?;
        return Ok(());
    }

    let translation = state.preferences.translation().await?;
    let quran = state.api.quran();
    let (arabic, translated) = tokio::try_join!(
        quran.ayah(verse, ARABIC_EDITION),
        quran.ayah(verse, translation.code()),
    )?;

    let surah_name = arabic
        .surah
        .as_ref()
        .map(|s| s.english_name.clone())
        .unwrap_or_else(|| format!("Surah {}", verse.surah));

    let bookmark = Bookmark {
        surah: verse.surah,
        ayah: verse.verse,
        surah_name,
        arabic_text: arabic.text,
        translation_text: Some(translated.text),
        created_at: None,
    };
    state.bookmarks.add(bookmark).await?;

    writeln!(out, "Bookmarked {}", verse)?;
    Ok(())
}

/// Remove a bookmark
pub async fn remove<W: Write>(state: &AppState, verse: VerseRef, out: &mut W) -> Result<()> {
    if state.bookmarks.remove(verse).await? {
        writeln!(out, "Removed bookmark {}", verse)?;
    } else {
        writeln!(out, "{} was not bookmarked", verse)?;
    }
    Ok(())
}
