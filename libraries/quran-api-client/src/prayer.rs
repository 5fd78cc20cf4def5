//! Prayer-time endpoints.

use crate::cache::ResponseCache;
use crate::client::get_data;
use crate::error::{ApiClientError, Result};
use crate::types::TimingsData;
use chrono::NaiveDate;
use quran_core::{CalculationMethod, JuristicSchool, PrayerDay, PrayerLocation};
use reqwest::Client;
use tracing::debug;

/// Prayer-time API client.
pub struct PrayerClient<'a> {
    http: &'a Client,
    base_url: &'a str,
    cache: Option<&'a ResponseCache>,
}

impl<'a> PrayerClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str, cache: Option<&'a ResponseCache>) -> Self {
        Self {
            http,
            base_url,
            cache,
        }
    }

    /// Build the timings URL for a date and location
    ///
    /// The date is sent as the Unix timestamp of its noon (UTC), which falls
    /// on the same calendar day for every inhabited time zone offset.
    pub fn timings_url(
        &self,
        date: NaiveDate,
        location: &PrayerLocation,
        method: CalculationMethod,
        school: JuristicSchool,
    ) -> Result<String> {
        let timestamp = date
            .and_hms_opt(12, 0, 0)
            .map(|noon| noon.and_utc().timestamp())
            .ok_or_else(|| ApiClientError::InvalidUrl(format!("invalid date {}", date)))?;

        let method = method.id().to_string();
        let school = school.id().to_string();

        let url = match location {
            PrayerLocation::Coordinates(coords) => url::Url::parse_with_params(
                &format!("{}/timings/{}", self.base_url, timestamp),
                &[
                    ("latitude", coords.latitude.to_string()),
                    ("longitude", coords.longitude.to_string()),
                    ("method", method),
                    ("school", school),
                ],
            ),
            PrayerLocation::Address(address) => url::Url::parse_with_params(
                &format!("{}/timingsByAddress/{}", self.base_url, timestamp),
                &[
                    ("address", address.clone()),
                    ("method", method),
                    ("school", school),
                ],
            ),
        }
        .map_err(|e| ApiClientError::InvalidUrl(e.to_string()))?;

        Ok(url.into())
    }

    /// Prayer times and calendar labels for `date` at `location`.
    pub async fn timings(
        &self,
        date: NaiveDate,
        location: &PrayerLocation,
        method: CalculationMethod,
        school: JuristicSchool,
    ) -> Result<PrayerDay> {
        let url = self.timings_url(date, location, method, school)?;
        let data: TimingsData = get_data(self.http, &url, self.cache, "prayer times").await?;

        let day = PrayerDay {
            timings: data.timings,
            gregorian: data.date.gregorian.label(),
            hijri: data.date.hijri.label(),
        };

        debug!(
            location = %location.label(),
            method = %method,
            date = %day.gregorian,
            "Fetched prayer times"
        );

        Ok(day)
    }
}
