//! Sun and moon ephemeris engine.
//!
//! Computes sun/moon positions, sunrise/sunset/twilight times, moonrise/moonset
//! and moon illumination for any date and place, from low-precision orbital
//! models (about one arc-minute).
//!
//! The free functions mirror the classic `getTimes`/`addTime` API and share a
//! process-wide threshold table; [`Ephemeris`] gives each caller its own.

pub mod engine;
pub mod extension;
pub mod shared;

pub use engine::{Ephemeris, EphemerisBuilder, EphemerisConfig};
pub use extension::SolunarDateExt;
pub use shared::{global, SharedEphemeris};
pub use solunar_astronomy::{SunEvent, SunTimes, DEFAULT_THRESHOLDS};
pub use solunar_types::{
    EclipticCoordinate, EquatorialCoordinate, GeoCoordinate, HorizontalCoordinate, MoonIllumination,
    MoonPhase, MoonPosition, MoonTimes, SolunarError, SunPosition, Threshold,
};

/// Lower-level building blocks.
pub mod astronomy {
    pub use solunar_astronomy::{coords, moon, moon_times, sun, times};
}

/// Julian day conversions.
pub mod time {
    pub use solunar_time::*;
}

pub mod prelude {
    pub use crate::{Ephemeris, EphemerisBuilder, SolunarDateExt};
    pub use crate::{GeoCoordinate, MoonIllumination, MoonPhase, MoonPosition, MoonTimes, SunPosition, SunTimes};
    pub use crate::{add_time, get_moon_illumination, get_moon_position, get_moon_times, get_position, get_times};
    pub use crate::SolunarError;
}

use chrono::{DateTime, Utc};

/// Sun azimuth and altitude (radians) at `lat`/`lng` degrees.
pub fn get_position(instant: DateTime<Utc>, lat: f64, lng: f64) -> SunPosition {
    global().snapshot().sun_position(instant, GeoCoordinate::new_unchecked(lat, lng))
}

/// Sun times for the date of `instant`, using the process-wide table.
///
/// # Example
/// ```rust
/// use chrono::{TimeZone, Utc};
///
/// let date = Utc.with_ymd_and_hms(2013, 3, 5, 0, 0, 0).unwrap();
/// let times = solunar_core::get_times(date, 50.5, 30.5).unwrap();
/// println!("sunrise {:?}, sunset {:?}", times.sunrise(), times.sunset());
/// ```
pub fn get_times(instant: DateTime<Utc>, lat: f64, lng: f64) -> Result<SunTimes, SolunarError> {
    global().snapshot().sun_times(instant, GeoCoordinate::new_unchecked(lat, lng))
}

/// Registers a threshold in the process-wide table for all later `get_times` calls.
pub fn add_time(angle: f64, rise_label: impl Into<String>, set_label: impl Into<String>) {
    global().add_threshold(angle, rise_label, set_label);
}

pub fn get_moon_position(instant: DateTime<Utc>, lat: f64, lng: f64) -> MoonPosition {
    global().snapshot().moon_position(instant, GeoCoordinate::new_unchecked(lat, lng))
}

pub fn get_moon_illumination(instant: DateTime<Utc>) -> MoonIllumination {
    global().snapshot().moon_illumination(instant)
}

pub fn get_moon_times(instant: DateTime<Utc>, lat: f64, lng: f64) -> MoonTimes {
    global().snapshot().moon_times(instant, GeoCoordinate::new_unchecked(lat, lng))
}
