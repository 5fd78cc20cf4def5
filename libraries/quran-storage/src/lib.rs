//! Quran Reader Storage
//!
//! `SQLite` persistence for bookmarks and reader preferences.
//!
//! Preferences are key/value pairs with JSON-encoded values in the `settings`
//! table; bookmarks have a table of their own. A `bookmarked_ayahs.json` file
//! written by the web reader is imported once, the first time a data
//! directory is opened.
//!
//! # Example
//!
//! ```rust,no_run
//! use quran_core::{Bookmark, SurahNumber, Verse, VerseNumber};
//! use quran_storage::{open_data_dir, BookmarkStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = open_data_dir("./data").await?;
//! let bookmarks = BookmarkStore::new(pool);
//!
//! let verse = Verse {
//!     surah: SurahNumber::new(2)?,
//!     number_in_surah: VerseNumber::new(255)?,
//!     arabic_text: "ٱللَّهُ لَآ إِلَٰهَ إِلَّا هُوَ".into(),
//!     translated_text: None,
//!     audio_url: None,
//!     page: None,
//! };
//! bookmarks.add(Bookmark::from_verse(&verse, "Al-Baqara")).await?;
//! # Ok(())
//! # }
//! ```

mod error;

pub mod bookmarks;
pub mod preferences;
pub mod settings;

pub use bookmarks::{BookmarkStore, LEGACY_BOOKMARKS_FILE};
pub use error::{Result, StorageError};
pub use preferences::{Preferences, Theme};

use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

/// Database file inside the data directory
pub const DATABASE_FILE: &str = "quran.db";

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Bring the schema up to date
///
/// # Errors
///
/// Returns an error if migrations fail to run
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    MIGRATOR.run(pool).await?;
    Ok(())
}

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g. `sqlite://quran.db`)
///
/// # Errors
///
/// Returns an error if the connection fails
pub async fn create_pool(database_url: &str) -> Result<SqlitePool> {
    debug!(url = %database_url, "Creating pool");
    connect(SqliteConnectOptions::from_str(database_url)?).await
}

async fn connect(options: SqliteConnectOptions) -> Result<SqlitePool> {
    let options = options
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    Ok(pool)
}

/// Open the database in `dir`, creating and migrating it as needed
///
/// Bookmarks left in `dir` by the web reader are imported on first open.
pub async fn open_data_dir(dir: impl Into<PathBuf>) -> Result<SqlitePool> {
    let dir = dir.into();
    tokio::fs::create_dir_all(&dir).await?;

    let pool = connect(SqliteConnectOptions::new().filename(dir.join(DATABASE_FILE))).await?;
    run_migrations(&pool).await?;

    let imported = BookmarkStore::new(pool.clone())
        .import_legacy_file(&dir.join(LEGACY_BOOKMARKS_FILE))
        .await?;
    if imported > 0 {
        info!(count = imported, "Imported web reader bookmarks");
    }

    debug!(dir = %dir.display(), "Opened data directory");
    Ok(pool)
}
