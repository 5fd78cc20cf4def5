//! Quran Reader command-line application
//!
//! Terminal front end over the Quran Reader libraries: surah index and reading,
//! mushaf pages, verse-by-verse recitation, prayer times, qibla, bookmarks and
//! Hisnul Muslim supplications.
//!
//! This library exposes the command implementations for testing purposes.

pub mod audio;
pub mod commands;
pub mod config;
pub mod error;
pub mod state;

// Re-export commonly used types for convenience
pub use config::CliConfig;
pub use error::{CliError, Result};
pub use state::AppState;
