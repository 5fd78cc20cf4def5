//! Test databases backed by real `SQLite` files in a temporary directory

#![allow(dead_code)]

use sqlx::SqlitePool;
use tempfile::TempDir;

/// Migrated database that is deleted on drop
pub struct TestDb {
    pub pool: SqlitePool,
    pub dir: TempDir,
}

impl TestDb {
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        Self::in_dir(dir).await
    }

    /// Open a database in `dir`, which may already hold web reader files
    pub async fn in_dir(dir: TempDir) -> Self {
        let pool = quran_storage::open_data_dir(dir.path())
            .await
            .expect("Failed to open data directory");
        Self { pool, dir }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
