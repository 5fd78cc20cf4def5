//! Main Quran API client.

use crate::cache::{AssetCache, ResponseCache};
use crate::error::{ApiClientError, Result};
use crate::prayer::PrayerClient;
use crate::quran::QuranClient;
use crate::types::{ApiConfig, Envelope};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

/// Client for the Quran text/recitation API and the prayer-time API.
///
/// # Example
///
/// ```ignore
/// use quran_api_client::{ApiConfig, QuranApiClient};
/// use quran_core::{Reciter, SurahNumber, Translation};
///
/// let client = QuranApiClient::new(ApiConfig::default())?;
///
/// let surahs = client.quran().surah_list().await?;
/// println!("{} surahs", surahs.len());
///
/// let detail = client
///     .quran()
///     .surah_detail(SurahNumber::new(1)?, &Translation::EnglishSahih, Reciter::Alafasy)
///     .await?;
/// println!("{}: {} verses", detail.summary.english_name, detail.verses.len());
/// ```
#[derive(Debug, Clone)]
pub struct QuranApiClient {
    http: Client,
    quran_base: String,
    prayer_base: String,
    cache: Option<ResponseCache>,
    assets: Option<AssetCache>,
}

/// Trim and check a base URL
fn normalize_base(url: &str) -> Result<String> {
    if url.is_empty() {
        return Err(ApiClientError::InvalidUrl("URL cannot be empty".into()));
    }

    let url = url.trim_end_matches('/').to_string();
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ApiClientError::InvalidUrl(
            "URL must start with http:// or https://".into(),
        ));
    }
    url::Url::parse(&url).map_err(|e| ApiClientError::InvalidUrl(e.to_string()))?;

    Ok(url)
}

impl QuranApiClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ApiConfig) -> Result<Self> {
        let quran_base = normalize_base(&config.quran_api_base)?;
        let prayer_base = normalize_base(&config.prayer_api_base)?;

        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("QuranReader/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ApiClientError::Request)?;

        let (cache, assets) = match &config.cache_dir {
            Some(dir) => (
                Some(ResponseCache::new(dir.join("responses"))),
                Some(AssetCache::new(http.clone(), dir.join("audio"))),
            ),
            None => (None, None),
        };

        Ok(Self {
            http,
            quran_base,
            prayer_base,
            cache,
            assets,
        })
    }

    /// Base URL of the Quran API.
    pub fn quran_base(&self) -> &str {
        &self.quran_base
    }

    /// Base URL of the prayer-time API.
    pub fn prayer_base(&self) -> &str {
        &self.prayer_base
    }

    /// Surah, page, ayah and recitation endpoints.
    pub fn quran(&self) -> QuranClient<'_> {
        QuranClient::new(&self.http, &self.quran_base, self.cache.as_ref())
    }

    /// Prayer-time endpoints.
    pub fn prayer(&self) -> PrayerClient<'_> {
        PrayerClient::new(&self.http, &self.prayer_base, self.cache.as_ref())
    }

    /// Audio clip cache, when a cache directory is configured.
    pub fn assets(&self) -> Option<&AssetCache> {
        self.assets.as_ref()
    }

    /// Audio clip cache rooted at `dir`, sharing this client's connection pool.
    pub fn asset_cache(&self, dir: impl Into<std::path::PathBuf>) -> AssetCache {
        AssetCache::new(self.http.clone(), dir)
    }
}

// =============================================================================
// Shared request helpers
// =============================================================================

/// GET `url` and return the body of a successful response
async fn fetch_text(http: &Client, url: &str) -> Result<String> {
    let response = http.get(url).send().await.map_err(|e| {
        if e.is_connect() || e.is_timeout() {
            ApiClientError::Unreachable(e.to_string())
        } else {
            ApiClientError::Request(e)
        }
    })?;

    let status = response.status();

    if status.is_success() {
        Ok(response.text().await?)
    } else {
        let error_text = response.text().await.unwrap_or_default();
        Err(ApiClientError::ServerError {
            status: status.as_u16(),
            message: error_text,
        })
    }
}

/// Unwrap `{code, status, data}` and decode `data`
pub(crate) fn parse_envelope<T: DeserializeOwned>(body: &str, what: &str) -> Result<T> {
    let envelope: Envelope = serde_json::from_str(body)
        .map_err(|e| ApiClientError::ParseError(format!("Failed to parse {}: {}", what, e)))?;

    if envelope.code != 200 {
        return Err(ApiClientError::Api {
            code: envelope.code,
            status: envelope.status,
        });
    }

    serde_json::from_value(envelope.data)
        .map_err(|e| ApiClientError::ParseError(format!("Failed to parse {}: {}", what, e)))
}

/// GET an enveloped JSON document, falling back to the cached copy when offline
pub(crate) async fn get_data<T: DeserializeOwned>(
    http: &Client,
    url: &str,
    cache: Option<&ResponseCache>,
    what: &str,
) -> Result<T> {
    debug!(url = %url, "Fetching {}", what);

    match fetch_text(http, url).await {
        Ok(body) => {
            let data = parse_envelope(&body, what)?;
            if let Some(cache) = cache {
                cache.store(url, &body).await;
            }
            Ok(data)
        }
        Err(e) if e.is_offline() => {
            let cached = match cache {
                Some(cache) => cache.load(url).await,
                None => None,
            };
            match cached {
                Some(body) => {
                    warn!(url = %url, error = %e, "Network unavailable, using cached {}", what);
                    parse_envelope(&body, what)
                }
                None => Err(e),
            }
        }
        Err(e) => Err(e),
    }
}
