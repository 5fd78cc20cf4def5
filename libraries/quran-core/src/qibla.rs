//! Qibla direction and distance
//!
//! # Example
//!
//! ```rust
//! use quran_core::{qibla_bearing, Coordinates};
//!
//! let london = Coordinates::new(51.5074, -0.1278).unwrap();
//! let bearing = qibla_bearing(london);
//! assert!((bearing - 119.0).abs() < 1.0);
//! ```

use crate::types::Coordinates;

/// Position of the Kaaba in Makkah
pub const KAABA: Coordinates = Coordinates {
    latitude: 21.422487,
    longitude: 39.826206,
};

/// Mean Earth radius used for distances
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Initial great-circle bearing from `from` to the Kaaba, in degrees clockwise
/// from true north, normalized to `[0, 360)`
pub fn qibla_bearing(from: Coordinates) -> f64 {
    let phi1 = from.latitude.to_radians();
    let phi2 = KAABA.latitude.to_radians();
    let delta_lambda = (KAABA.longitude - from.longitude).to_radians();

    let y = delta_lambda.sin() * phi2.cos();
    let x = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * delta_lambda.cos();

    let bearing = y.atan2(x).to_degrees().rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if bearing >= 360.0 {
        0.0
    } else {
        bearing
    }
}

/// Haversine distance from `from` to the Kaaba in kilometres
pub fn distance_to_kaaba_km(from: Coordinates) -> f64 {
    let d_lat = (KAABA.latitude - from.latitude).to_radians();
    let d_lon = (KAABA.longitude - from.longitude).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + from.latitude.to_radians().cos()
            * KAABA.latitude.to_radians().cos()
            * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}
