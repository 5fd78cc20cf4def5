/// Qibla direction
use std::io::Write;

use quran_core::{distance_to_kaaba_km, qibla_bearing, Coordinates, PrayerLocation};

use crate::error::{CliError, Result};
use crate::state::AppState;

const COMPASS_POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// Sixteen-point compass name of a bearing in degrees
pub fn compass_point(bearing: f64) -> &'static str {
    let index = ((bearing.rem_euclid(360.0) / 22.5).round() as usize) % COMPASS_POINTS.len();
    COMPASS_POINTS[index]
}

/// Print the direction of the Kaaba from `coords`, or from the saved or configured position
///
/// A bearing needs coordinates; a location saved as an address is not enough.
pub async fn run<W: Write>(
    state: &AppState,
    coords: Option<Coordinates>,
    out: &mut W,
) -> Result<()> {
    let coords = match coords {
        Some(coords) => coords,
        None => saved_coordinates(state).await?.ok_or_else(|| {
            CliError::LocationUnavailable("the qibla direction needs coordinates".to_string())
        })?,
    };

    let bearing = qibla_bearing(coords);
    writeln!(out, "From {}", coords)?;
    writeln!(
        out,
        "Qibla: {:.1}° from true north ({})",
        bearing,
        compass_point(bearing)
    )?;
    writeln!(out, "Distance to the Kaaba: {:.0} km", distance_to_kaaba_km(coords))?;
    Ok(())
}

async fn saved_coordinates(state: &AppState) -> Result<Option<Coordinates>> {
    if let Some(PrayerLocation::Coordinates(coords)) = state.preferences.location().await? {
        return Ok(Some(coords));
    }
    Ok(match state.config.prayer_location() {
        Some(PrayerLocation::Coordinates(coords)) => Some(coords),
        _ => None,
    })
}
