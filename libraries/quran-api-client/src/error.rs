//! Error types for the Quran API client.

use quran_core::QuranError;
use thiserror::Error;

/// Errors that can occur when talking to the Quran or prayer-time APIs.
#[derive(Error, Debug)]
pub enum ApiClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API answered with a non-200 `code` in its envelope
    #[error("API error ({code}): {status}")]
    Api { code: u16, status: String },

    /// Server returned an error HTTP status
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// Invalid base URL
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse the response body
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Server is offline or unreachable
    #[error("Server unreachable: {0}")]
    Unreachable(String),

    /// IO error in the on-disk cache
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiClientError {
    /// Whether a cached copy may stand in for this failure
    pub fn is_offline(&self) -> bool {
        match self {
            Self::Unreachable(_) => true,
            Self::Request(e) => e.is_connect() || e.is_timeout(),
            _ => false,
        }
    }
}

impl From<ApiClientError> for QuranError {
    fn from(err: ApiClientError) -> Self {
        match err {
            ApiClientError::Io(e) => QuranError::Io(e),
            other => QuranError::network(other.to_string()),
        }
    }
}

/// Result type for API client operations.
pub type Result<T> = std::result::Result<T, ApiClientError>;
