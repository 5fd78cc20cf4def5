//! On-disk copies of API responses and audio clips.
//!
//! JSON documents are cached network-first: a fresh response always wins and
//! overwrites the copy, which is only read back when the network is down.
//! Audio clips never change for a given URL and are cached cache-first.

use crate::error::{ApiClientError, Result};
use reqwest::Client;
use sha2::{Digest, Sha256};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Longest file stem derived from a URL before it is shortened with a hash
const MAX_STEM: usize = 150;

/// Hex digits of the URL digest appended to shortened stems
const DIGEST_CHARS: usize = 16;

/// Map a URL to a stable, filesystem-safe file name
pub(crate) fn file_name_for(url: &str, extension: &str) -> String {
    let trimmed = url
        .trim_start_matches("https://")
        .trim_start_matches("http://");

    let mut stem: String = trimmed
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if stem.len() > MAX_STEM {
        stem.truncate(MAX_STEM);
        let digest = hex::encode(Sha256::digest(trimmed.as_bytes()));
        stem.push('_');
        stem.push_str(&digest[..DIGEST_CHARS]);
    }

    format!("{}.{}", stem, extension)
}

/// Write through a uniquely named temporary file so readers never see a
/// partial document
async fn write_atomic(path: &Path, contents: Vec<u8>) -> std::io::Result<()> {
    let path = path.to_path_buf();
    tokio::task::spawn_blocking(move || {
        let dir = path.parent().unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(dir)?;
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(&contents)?;
        tmp.persist(&path).map_err(|e| e.error)?;
        Ok(())
    })
    .await
    .map_err(std::io::Error::other)?
}

// =============================================================================
// Response cache
// =============================================================================

/// Last good body of each JSON endpoint
#[derive(Debug, Clone)]
pub struct ResponseCache {
    dir: PathBuf,
}

impl ResponseCache {
    /// Cache rooted at `dir` (created on first write)
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the cached documents
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, url: &str) -> PathBuf {
        self.dir.join(file_name_for(url, "json"))
    }

    /// Cached body for `url`, if any
    pub async fn load(&self, url: &str) -> Option<String> {
        match tokio::fs::read_to_string(self.path_for(url)).await {
            Ok(body) => Some(body),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                warn!(url = %url, error = %e, "Unreadable cached response");
                None
            }
        }
    }

    /// Replace the cached body for `url`
    ///
    /// Failures are logged; a broken cache never fails a successful request.
    pub async fn store(&self, url: &str, body: &str) {
        let path = self.path_for(url);
        if let Err(e) = write_atomic(&path, body.as_bytes().to_vec()).await {
            warn!(path = %path.display(), error = %e, "Failed to cache response");
        }
    }
}

// =============================================================================
// Asset cache
// =============================================================================

/// Cache-first store for audio clips
#[derive(Debug, Clone)]
pub struct AssetCache {
    http: Client,
    dir: PathBuf,
}

impl AssetCache {
    pub(crate) fn new(http: Client, dir: impl Into<PathBuf>) -> Self {
        Self {
            http,
            dir: dir.into(),
        }
    }

    /// Where the clip for `url` is (or would be) stored
    pub fn path_for(&self, url: &str) -> PathBuf {
        let extension = Path::new(url)
            .extension()
            .and_then(|e| e.to_str())
            .filter(|e| e.len() <= 4 && e.chars().all(|c| c.is_ascii_alphanumeric()))
            .unwrap_or("bin");
        self.dir.join(file_name_for(url, extension))
    }

    /// Whether the clip for `url` is already on disk
    pub async fn contains(&self, url: &str) -> bool {
        tokio::fs::try_exists(self.path_for(url))
            .await
            .unwrap_or(false)
    }

    /// Bytes of the clip at `url`, downloading it on a miss
    pub async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let path = self.path_for(url);

        match tokio::fs::read(&path).await {
            Ok(bytes) => {
                debug!(url = %url, "Audio cache hit");
                return Ok(bytes);
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!(path = %path.display(), error = %e, "Unreadable cached clip"),
        }

        debug!(url = %url, "Downloading audio clip");
        let response = self.http.get(url).send().await.map_err(|e| {
            if e.is_connect() || e.is_timeout() {
                ApiClientError::Unreachable(e.to_string())
            } else {
                ApiClientError::Request(e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ApiClientError::ServerError {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let bytes = response.bytes().await?.to_vec();
        if let Err(e) = write_atomic(&path, bytes.clone()).await {
            warn!(path = %path.display(), error = %e, "Failed to cache audio clip");
        }
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_names_are_filesystem_safe() {
        let name = file_name_for("https://api.alquran.cloud/v1/surah/2/en.sahih", "json");
        assert_eq!(name, "api.alquran.cloud_v1_surah_2_en.sahih.json");
        assert!(!name.contains('/'));
    }

    #[test]
    fn query_strings_are_kept_apart() {
        let a = file_name_for("https://h/timings/1?latitude=1&longitude=2", "json");
        let b = file_name_for("https://h/timings/1?latitude=1&longitude=3", "json");
        assert_ne!(a, b);
    }

    #[test]
    fn long_urls_are_shortened_with_a_hash() {
        let long = format!("https://h/timingsByAddress/1?address={}", "x".repeat(400));
        let other = format!("https://h/timingsByAddress/1?address={}y", "x".repeat(400));
        let a = file_name_for(&long, "json");
        let b = file_name_for(&other, "json");
        assert!(a.len() < 200);
        assert_ne!(a, b);
        assert_eq!(a, file_name_for(&long, "json"));
    }

    #[test]
    fn shortened_names_end_with_url_digest() {
        let long = format!("https://h/timingsByAddress/1?address={}", "x".repeat(400));
        let name = file_name_for(&long, "json");
        let stem = name.strip_suffix(".json").unwrap();
        let (_, digest) = stem.rsplit_once('_').unwrap();

        let expected = hex::encode(Sha256::digest(long.trim_start_matches("https://").as_bytes()));
        assert_eq!(digest, &expected[..DIGEST_CHARS]);
    }

    #[tokio::test]
    async fn concurrent_stores_leave_one_whole_document() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ResponseCache::new(dir.path().join("responses"));
        let first = "a".repeat(50_000);
        let second = "b".repeat(50_000);

        tokio::join!(
            cache.store("https://h/surah", &first),
            cache.store("https://h/surah", &second)
        );

        let body = cache.load("https://h/surah").await.unwrap();
        assert!(body == first || body == second);
        let leftovers = std::fs::read_dir(cache.dir()).unwrap().count();
        assert_eq!(leftovers, 1);
    }

    #[tokio::test]
    async fn response_cache_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ResponseCache::new(dir.path().join("responses"));

        assert!(cache.load("https://h/surah").await.is_none());
        cache.store("https://h/surah", r#"{"code":200}"#).await;
        assert_eq!(
            cache.load("https://h/surah").await.as_deref(),
            Some(r#"{"code":200}"#)
        );
    }

    #[test]
    fn asset_paths_keep_the_audio_extension() {
        let cache = AssetCache::new(Client::new(), "/tmp/audio");
        let path = cache.path_for("https://cdn.islamic.network/quran/audio/128/ar.alafasy/1.mp3");
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("mp3"));
    }
}
