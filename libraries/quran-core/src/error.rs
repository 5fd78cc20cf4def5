/// Core error types for Quran Reader
use thiserror::Error;

/// Result type alias using `QuranError`
pub type Result<T> = std::result::Result<T, QuranError>;

/// Core error type for Quran Reader
#[derive(Error, Debug)]
pub enum QuranError {
    /// Invalid input (out-of-range surah, verse, page, unknown edition code)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Entity not found
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Local storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Network or remote API errors
    #[error("Network error: {0}")]
    Network(String),

    /// Audio decoding/playback errors
    #[error("Audio error: {0}")]
    Audio(String),

    /// No location is available for prayer times or qibla
    #[error("Location unavailable: {0}")]
    LocationUnavailable(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl QuranError {
    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create a network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Create an audio error
    pub fn audio(msg: impl Into<String>) -> Self {
        Self::Audio(msg.into())
    }
}
