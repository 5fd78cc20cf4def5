/// Reader error types
use quran_api_client::ApiClientError;
use quran_core::QuranError;
use quran_playback::PlaybackError;
use quran_storage::StorageError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Could not reach the Quran service: {0}")]
    Api(#[from] ApiClientError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Playback error: {0}")]
    Playback(#[from] PlaybackError),

    #[error("Audio error: {0}")]
    Audio(String),

    #[error("Location unavailable: {0}")]
    LocationUnavailable(String),

    #[error(transparent)]
    Core(#[from] QuranError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub fn audio(msg: impl Into<String>) -> Self {
        Self::Audio(msg.into())
    }

    /// Follow-up advice printed under the error message
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            CliError::Api(e) if e.is_offline() => {
                Some("Check your internet connection and run the command again.")
            }
            CliError::Api(ApiClientError::ServerError { status, .. }) if *status >= 500 => {
                Some("The service is having trouble; try again in a moment.")
            }
            CliError::Api(_) => Some("Run the command again to retry."),
            CliError::LocationUnavailable(_) => Some(
                "Pass --lat/--lng or --address, or save a location with `quran settings location`.",
            ),
            CliError::Audio(_) => Some("Check that an audio output device is available."),
            CliError::Config(_) => Some("See quran.toml or the QURAN_* environment variables."),
            _ => None,
        }
    }
}
