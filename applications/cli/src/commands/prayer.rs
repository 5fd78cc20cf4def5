/// Daily prayer timetable
use std::io::Write;

use chrono::{NaiveDate, NaiveDateTime};
use quran_core::{CalculationMethod, JuristicSchool, Prayer, PrayerDay, PrayerLocation};
use tracing::info;

use crate::error::Result;
use crate::state::AppState;

/// Options of the `prayer` command; unset fields fall back to saved preferences
#[derive(Debug, Clone, Default)]
pub struct PrayerRequest {
    pub location: Option<PrayerLocation>,
    pub method: Option<CalculationMethod>,
    pub school: Option<JuristicSchool>,
    pub date: Option<NaiveDate>,
    /// Remember location, method and school for later runs
    pub save: bool,
}

/// Fetch and print the timetable
///
/// When the timetable is for the date of `now`, the next prayer is marked.
pub async fn run<W: Write>(
    state: &AppState,
    request: PrayerRequest,
    now: NaiveDateTime,
    out: &mut W,
) -> Result<()> {
    let location = match request.location {
        Some(location) => location,
        None => state.default_location().await?,
    };
    let method = match request.method {
        Some(method) => method,
        None => state.preferences.calculation_method().await?,
    };
    let school = match request.school {
        Some(school) => school,
        None => state.preferences.juristic_school().await?,
    };
    let date = request.date.unwrap_or(now.date());

    let day = state
        .api
        .prayer()
        .timings(date, &location, method, school)
        .await?;

    if request.save {
        state.preferences.set_location(&location).await?;
        state.preferences.set_calculation_method(method).await?;
        state.preferences.set_juristic_school(school).await?;
        info!(location = %location.label(), "Saved prayer settings");
    }

    let next = (date == now.date()).then(|| day.timings.next_prayer(now.time()));
    write_timetable(out, &location, method, school, &day, next)
}

fn write_timetable<W: Write>(
    out: &mut W,
    location: &PrayerLocation,
    method: CalculationMethod,
    school: JuristicSchool,
    day: &PrayerDay,
    next: Option<Prayer>,
) -> Result<()> {
    writeln!(out, "Prayer times for {}", location.label())?;
    if let PrayerLocation::Coordinates(coords) = location {
        writeln!(out, "({})", coords)?;
    }
    writeln!(out, "{}", day.gregorian)?;
    writeln!(out, "{}", day.hijri)?;
    writeln!(out, "Method: {}, Asr: {}", method, school)?;
    writeln!(out)?;

    for prayer in Prayer::ALL {
        let marker = if Some(prayer) == next { ">" } else { " " };
        let suffix = if Some(prayer) == next { "  (next)" } else { "" };
        writeln!(
            out,
            "{} {:<8} {}{}",
            marker,
            prayer.name(),
            day.timings.get(prayer),
            suffix
        )?;
    }
    Ok(())
}
