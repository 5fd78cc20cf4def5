//! Prayer time types
//!
//! Timings come from the aladhan.com API as wall-clock strings in the
//! location's own time zone; no conversion is attempted here.

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{QuranError, Result};

/// Daily prayer (plus sunrise, which the timetable lists but is not a prayer)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Prayer {
    /// Dawn
    Fajr,
    /// Sunrise (end of Fajr time)
    Sunrise,
    /// Midday
    Dhuhr,
    /// Afternoon
    Asr,
    /// Sunset
    Maghrib,
    /// Night
    Isha,
}

impl Prayer {
    /// Timetable rows in display order
    pub const ALL: [Prayer; 6] = [
        Prayer::Fajr,
        Prayer::Sunrise,
        Prayer::Dhuhr,
        Prayer::Asr,
        Prayer::Maghrib,
        Prayer::Isha,
    ];

    /// The five obligatory prayers, in order of the day
    pub const OBLIGATORY: [Prayer; 5] = [
        Prayer::Fajr,
        Prayer::Dhuhr,
        Prayer::Asr,
        Prayer::Maghrib,
        Prayer::Isha,
    ];

    /// Name as used by the timetable API
    pub fn name(self) -> &'static str {
        match self {
            Prayer::Fajr => "Fajr",
            Prayer::Sunrise => "Sunrise",
            Prayer::Dhuhr => "Dhuhr",
            Prayer::Asr => "Asr",
            Prayer::Maghrib => "Maghrib",
            Prayer::Isha => "Isha",
        }
    }
}

impl fmt::Display for Prayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One day's timetable, as returned by the API (`"05:12"`, `"05:12 (EET)"` or `"5:12 AM"`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PrayerTimings {
    /// Fajr time
    pub fajr: String,
    /// Sunrise time
    pub sunrise: String,
    /// Dhuhr time
    pub dhuhr: String,
    /// Asr time
    pub asr: String,
    /// Maghrib time
    pub maghrib: String,
    /// Isha time
    pub isha: String,
}

impl PrayerTimings {
    /// Raw time string for a prayer
    pub fn get(&self, prayer: Prayer) -> &str {
        match prayer {
            Prayer::Fajr => &self.fajr,
            Prayer::Sunrise => &self.sunrise,
            Prayer::Dhuhr => &self.dhuhr,
            Prayer::Asr => &self.asr,
            Prayer::Maghrib => &self.maghrib,
            Prayer::Isha => &self.isha,
        }
    }

    /// Parsed time of a prayer, `None` if the string is not a recognisable clock time
    pub fn time_of(&self, prayer: Prayer) -> Option<NaiveTime> {
        parse_clock(self.get(prayer))
    }

    /// The next obligatory prayer strictly after `now` (minute precision)
    ///
    /// After Isha, the next prayer is the following day's Fajr. Entries that
    /// fail to parse are skipped.
    pub fn next_prayer(&self, now: NaiveTime) -> Prayer {
        let now = NaiveTime::from_hms_opt(now.hour(), now.minute(), 0).unwrap_or(now);

        Prayer::OBLIGATORY
            .into_iter()
            .find(|&p| self.time_of(p).is_some_and(|t| t > now))
            .unwrap_or(Prayer::Fajr)
    }
}

/// Parse `HH:MM`, `HH:MM (TZ)` or `h:MM AM|PM`
fn parse_clock(raw: &str) -> Option<NaiveTime> {
    let mut tokens = raw.split_whitespace();
    let clock = tokens.next()?;

    if let Some(period) = tokens.next() {
        let twelve_hour = format!("{} {}", clock, period);
        if let Ok(time) = NaiveTime::parse_from_str(&twelve_hour, "%I:%M %p") {
            return Some(time);
        }
    }
    NaiveTime::parse_from_str(clock, "%H:%M").ok()
}

/// Prayer time calculation authority (API `method` parameter)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum CalculationMethod {
    /// Islamic Society of North America
    #[default]
    Isna,
    /// University of Islamic Sciences, Karachi
    Karachi,
    /// Muslim World League
    MuslimWorldLeague,
    /// Umm Al-Qura University, Makkah
    UmmAlQura,
    /// Egyptian General Authority of Survey
    Egyptian,
    /// Institute of Geophysics, University of Tehran
    Tehran,
}

impl CalculationMethod {
    /// Menu order
    pub const ALL: [CalculationMethod; 6] = [
        CalculationMethod::Isna,
        CalculationMethod::Karachi,
        CalculationMethod::MuslimWorldLeague,
        CalculationMethod::UmmAlQura,
        CalculationMethod::Egyptian,
        CalculationMethod::Tehran,
    ];

    /// API identifier
    pub fn id(self) -> u8 {
        match self {
            CalculationMethod::Karachi => 1,
            CalculationMethod::Isna => 2,
            CalculationMethod::MuslimWorldLeague => 3,
            CalculationMethod::UmmAlQura => 4,
            CalculationMethod::Egyptian => 5,
            CalculationMethod::Tehran => 7,
        }
    }

    /// Menu label
    pub fn display_name(self) -> &'static str {
        match self {
            CalculationMethod::Isna => "ISNA (North America)",
            CalculationMethod::Karachi => "Karachi (U. Islamic Sciences)",
            CalculationMethod::MuslimWorldLeague => "MWL (Muslim World League)",
            CalculationMethod::UmmAlQura => "Umm Al-Qura (Makkah)",
            CalculationMethod::Egyptian => "Egyptian Authority",
            CalculationMethod::Tehran => "Tehran (U. of Tehran)",
        }
    }
}

impl TryFrom<u8> for CalculationMethod {
    type Error = QuranError;

    fn try_from(value: u8) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|m| m.id() == value)
            .ok_or_else(|| QuranError::invalid_input(format!("unknown calculation method: {}", value)))
    }
}

impl From<CalculationMethod> for u8 {
    fn from(value: CalculationMethod) -> Self {
        value.id()
    }
}

impl fmt::Display for CalculationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Juristic school for the Asr shadow length (API `school` parameter)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum JuristicSchool {
    /// Shafiʻi, Maliki and Hanbali (shadow length 1)
    #[default]
    Shafii,
    /// Hanafi (shadow length 2)
    Hanafi,
}

impl JuristicSchool {
    /// API identifier
    pub fn id(self) -> u8 {
        match self {
            JuristicSchool::Shafii => 0,
            JuristicSchool::Hanafi => 1,
        }
    }

    /// Menu label
    pub fn display_name(self) -> &'static str {
        match self {
            JuristicSchool::Shafii => "Shafiʻī",
            JuristicSchool::Hanafi => "Ḥanafī",
        }
    }
}

impl TryFrom<u8> for JuristicSchool {
    type Error = QuranError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(JuristicSchool::Shafii),
            1 => Ok(JuristicSchool::Hanafi),
            other => Err(QuranError::invalid_input(format!(
                "unknown juristic school: {}",
                other
            ))),
        }
    }
}

impl From<JuristicSchool> for u8 {
    fn from(value: JuristicSchool) -> Self {
        value.id()
    }
}

impl fmt::Display for JuristicSchool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Geographic position in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude, -90..=90
    pub latitude: f64,
    /// Longitude, -180..=180
    pub longitude: f64,
}

impl Coordinates {
    /// Create validated coordinates
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(QuranError::invalid_input(format!(
                "latitude {} is outside -90..=90",
                latitude
            )));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(QuranError::invalid_input(format!(
                "longitude {} is outside -180..=180",
                longitude
            )));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// Where to compute prayer times for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrayerLocation {
    /// A fixed position (the stand-in for device geolocation)
    Coordinates(Coordinates),
    /// Free-form city or address resolved by the API
    Address(String),
}

impl PrayerLocation {
    /// Label shown above the timetable
    pub fn label(&self) -> String {
        match self {
            PrayerLocation::Coordinates(_) => "Current Location".to_string(),
            PrayerLocation::Address(address) => address.clone(),
        }
    }
}

/// Timetable for one date together with its calendar labels
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrayerDay {
    /// Prayer times
    pub timings: PrayerTimings,
    /// Gregorian date label, e.g. `Monday, March 10, 2025`
    pub gregorian: String,
    /// Hijri date label, e.g. `Al Ithnayn, Ramaḍān 10, 1446`
    pub hijri: String,
}
