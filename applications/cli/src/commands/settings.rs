/// Saved reader preferences
use std::io::Write;

use clap::Subcommand;
use quran_core::{
    CalculationMethod, Coordinates, JuristicSchool, PrayerLocation, Reciter, Translation,
};
use quran_playback::RepeatCount;
use quran_storage::Theme;

use crate::error::{CliError, Result};
use crate::state::AppState;

#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum SettingsAction {
    /// Show all saved settings
    Show,
    /// Set the reciter by edition code (e.g. ar.husary)
    Reciter { code: Reciter },
    /// Set the translation by edition code (e.g. en.sahih)
    Translation { code: String },
    /// Set the prayer-time calculation method by id
    Method { id: u8 },
    /// Set the Asr juristic school (0 = Shafi'i, 1 = Hanafi)
    School { id: u8 },
    /// Set the colour theme (light, dark, system)
    Theme { theme: Theme },
    /// Default plays of each verse (0 repeats until stopped)
    Repeat { count: u32 },
    /// Default passes over a verse range
    Passes { count: u32 },
    /// Save the prayer location
    Location {
        #[arg(long, requires = "lng", conflicts_with = "address")]
        lat: Option<f64>,
        #[arg(long, requires = "lat")]
        lng: Option<f64>,
        #[arg(long)]
        address: Option<String>,
    },
    /// Forget the saved prayer location
    ClearLocation,
    /// List available reciters
    Reciters,
    /// List built-in translations
    Translations,
    /// List calculation methods
    Methods,
}

pub async fn run<W: Write>(state: &AppState, action: SettingsAction, out: &mut W) -> Result<()> {
    let prefs = &state.preferences;

    match action {
        SettingsAction::Show => {
            let reciter = prefs.reciter().await?;
            writeln!(out, "Reciter:      {} ({})", reciter.display_name(), reciter.code())?;
            let translation = prefs.translation().await?;
            writeln!(out, "Translation:  {} ({})", translation.display_name(), translation.code())?;
            writeln!(out, "Verse repeat: {}", RepeatCount::from_count(prefs.verse_repeat().await?))?;
            writeln!(out, "Range passes: {}", prefs.range_repeat().await?)?;
            let method = prefs.calculation_method().await?;
            writeln!(out, "Method:       {} ({})", method, method.id())?;
            writeln!(out, "Asr school:   {}", prefs.juristic_school().await?)?;
            match prefs.location().await? {
                Some(PrayerLocation::Coordinates(coords)) => writeln!(out, "Location:     {}", coords)?,
                Some(PrayerLocation::Address(address)) => writeln!(out, "Location:     {}", address)?,
                None => writeln!(out, "Location:     not set")?,
            }
            writeln!(out, "Theme:        {}", prefs.theme().await?)?;
        }
        SettingsAction::Reciter { code } => {
            prefs.set_reciter(code).await?;
            writeln!(out, "Reciter set to {}", code.display_name())?;
        }
        SettingsAction::Translation { code } => {
            let translation = Translation::from_code(&code);
            if translation.code().is_empty() {
                return Err(CliError::Config("translation code must not be empty".to_string()));
            }
            prefs.set_translation(&translation).await?;
            writeln!(out, "Translation set to {}", translation.display_name())?;
        }
        SettingsAction::Method { id } => {
            let method = CalculationMethod::try_from(id)?;
            prefs.set_calculation_method(method).await?;
            writeln!(out, "Calculation method set to {}", method)?;
        }
        SettingsAction::School { id } => {
            let school = JuristicSchool::try_from(id)?;
            prefs.set_juristic_school(school).await?;
            writeln!(out, "Asr school set to {}", school)?;
        }
        SettingsAction::Theme { theme } => {
            prefs.set_theme(theme).await?;
            writeln!(out, "Theme set to {}", theme)?;
        }
        SettingsAction::Repeat { count } => {
            prefs.set_verse_repeat(count).await?;
            writeln!(out, "Verse repeat set to {}", RepeatCount::from_count(count))?;
        }
        SettingsAction::Passes { count } => {
            prefs.set_range_repeat(count).await?;
            writeln!(out, "Range passes set to {}", prefs.range_repeat().await?)?;
        }
        SettingsAction::Location { lat, lng, address } => {
            let location = match (lat, lng, address) {
                (Some(lat), Some(lng), _) => PrayerLocation::Coordinates(Coordinates::new(lat, lng)?),
                (_, _, Some(address)) if !address.trim().is_empty() => {
                    PrayerLocation::Address(address.trim().to_string())
                }
                _ => {
                    return Err(CliError::LocationUnavailable(
                        "give --lat and --lng, or --address".to_string(),
                    ))
                }
            };
            prefs.set_location(&location).await?;
            writeln!(out, "Location set to {}", location_text(&location))?;
        }
        SettingsAction::ClearLocation => {
            if prefs.clear_location().await? {
                writeln!(out, "Saved location removed")?;
            } else {
                writeln!(out, "No location was saved")?;
            }
        }
        SettingsAction::Reciters => {
            let current = prefs.reciter().await?;
            for reciter in Reciter::ALL {
                let marker = if reciter == current { "*" } else { " " };
                writeln!(out, "{} {:<20} {}", marker, reciter.code(), reciter.display_name())?;
            }
        }
        SettingsAction::Translations => {
            let current = prefs.translation().await?;
            for translation in Translation::BUILT_IN.iter() {
                let marker = if *translation == current { "*" } else { " " };
                writeln!(
                    out,
                    "{} {:<20} {}",
                    marker,
                    translation.code(),
                    translation.display_name()
                )?;
            }
        }
        SettingsAction::Methods => {
            let current = prefs.calculation_method().await?;
            for method in CalculationMethod::ALL {
                let marker = if method == current { "*" } else { " " };
                writeln!(out, "{} {:>2}  {}", marker, method.id(), method)?;
            }
        }
    }
    Ok(())
}

fn location_text(location: &PrayerLocation) -> String {
    match location {
        PrayerLocation::Coordinates(coords) => coords.to_string(),
        PrayerLocation::Address(address) => address.clone(),
    }
}
