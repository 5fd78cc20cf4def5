//! Bookmarked verses
//!
//! One row per verse in the `bookmarks` table, listed oldest first. A verse
//! appears at most once.

use chrono::{DateTime, Utc};
use quran_core::{Bookmark, SurahNumber, VerseNumber, VerseRef};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::settings;

/// Bookmark file written by the web reader (its `bookmarked_ayahs` key)
pub const LEGACY_BOOKMARKS_FILE: &str = "bookmarked_ayahs.json";

/// Set once the legacy file has been read
const SETTING_LEGACY_IMPORTED: &str = "storage.legacy_bookmarks_imported";

/// Bookmark list backed by the `bookmarks` table
#[derive(Debug, Clone)]
pub struct BookmarkStore {
    pool: SqlitePool,
}

impl BookmarkStore {
    /// Bookmarks kept in `pool`
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All bookmarks, oldest first
    pub async fn list(&self) -> Result<Vec<Bookmark>> {
        let rows = sqlx::query(
            "SELECT surah, ayah, surah_name, arabic_text, translation_text, created_at
             FROM bookmarks ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut bookmarks = Vec::with_capacity(rows.len());
        for row in rows {
            match bookmark_from_row(&row)? {
                Some(bookmark) => bookmarks.push(bookmark),
                None => warn!("Ignoring bookmark with an invalid verse reference"),
            }
        }
        Ok(bookmarks)
    }

    /// Whether `verse` is bookmarked
    pub async fn contains(&self, verse: VerseRef) -> Result<bool> {
        let row = sqlx::query("SELECT 1 FROM bookmarks WHERE surah = ? AND ayah = ?")
            .bind(verse.surah.get())
            .bind(verse.verse.get())
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.is_some())
    }

    /// Add a bookmark; returns `false` if the verse was already bookmarked
    pub async fn add(&self, bookmark: Bookmark) -> Result<bool> {
        let verse = bookmark.verse_ref();
        let created_at = bookmark.created_at.unwrap_or_else(Utc::now);

        let result = sqlx::query(
            "INSERT INTO bookmarks (surah, ayah, surah_name, arabic_text, translation_text, created_at)
             VALUES (?, ?, ?, ?, ?, ?)
             ON CONFLICT(surah, ayah) DO NOTHING",
        )
        .bind(bookmark.surah.get())
        .bind(bookmark.ayah.get())
        .bind(&bookmark.surah_name)
        .bind(&bookmark.arabic_text)
        .bind(bookmark.translation_text.as_deref())
        .bind(created_at.timestamp_millis())
        .execute(&self.pool)
        .await?;

        let added = result.rows_affected() > 0;
        if added {
            info!(verse = %verse, "Bookmark added");
        }
        Ok(added)
    }

    /// Remove the bookmark for `verse`; returns whether one existed
    pub async fn remove(&self, verse: VerseRef) -> Result<bool> {
        let result = sqlx::query("DELETE FROM bookmarks WHERE surah = ? AND ayah = ?")
            .bind(verse.surah.get())
            .bind(verse.verse.get())
            .execute(&self.pool)
            .await?;

        let removed = result.rows_affected() > 0;
        if removed {
            info!(verse = %verse, "Bookmark removed");
        }
        Ok(removed)
    }

    /// Add the bookmark if its verse is not bookmarked, otherwise remove it
    ///
    /// Returns whether the verse is bookmarked afterwards.
    pub async fn toggle(&self, bookmark: Bookmark) -> Result<bool> {
        if self.remove(bookmark.verse_ref()).await? {
            Ok(false)
        } else {
            self.add(bookmark).await
        }
    }

    /// Import a web reader bookmark file, once per database
    ///
    /// The file is left in place. A missing file is not an error; an
    /// unreadable one is logged and skipped. Returns the number of
    /// bookmarks added.
    pub async fn import_legacy_file(&self, path: &Path) -> Result<usize> {
        if settings::get_setting(&self.pool, SETTING_LEGACY_IMPORTED)
            .await?
            .is_some()
        {
            return Ok(0);
        }

        let contents = match tokio::fs::read_to_string(path).await {
            Ok(contents) => Some(contents),
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(0),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Unreadable bookmark file");
                None
            }
        };

        let legacy: Vec<Bookmark> = match contents.as_deref().map(serde_json::from_str) {
            Some(Ok(bookmarks)) => bookmarks,
            Some(Err(e)) => {
                warn!(path = %path.display(), error = %e, "Ignoring malformed bookmark file");
                Vec::new()
            }
            None => Vec::new(),
        };

        let mut added = 0;
        for bookmark in legacy {
            if self.add(bookmark).await? {
                added += 1;
            }
        }

        settings::set_setting(&self.pool, SETTING_LEGACY_IMPORTED, &serde_json::json!(true))
            .await?;
        debug!(path = %path.display(), added, "Legacy bookmark file processed");
        Ok(added)
    }
}

fn bookmark_from_row(row: &SqliteRow) -> Result<Option<Bookmark>> {
    let surah: i64 = row.try_get("surah")?;
    let ayah: i64 = row.try_get("ayah")?;
    let created_at: i64 = row.try_get("created_at")?;

    let surah = u16::try_from(surah).ok().and_then(|n| SurahNumber::new(n).ok());
    let ayah = u16::try_from(ayah).ok().and_then(|n| VerseNumber::new(n).ok());
    let (Some(surah), Some(ayah)) = (surah, ayah) else {
        return Ok(None);
    };

    Ok(Some(Bookmark {
        surah,
        ayah,
        surah_name: row.try_get("surah_name")?,
        arabic_text: row.try_get("arabic_text")?,
        translation_text: row.try_get("translation_text")?,
        created_at: DateTime::from_timestamp_millis(created_at),
    }))
}
