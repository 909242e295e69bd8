//! Solar model.
//!
//! Low-precision orbit from http://aa.quae.nl/en/reken/zonpositie.html,
//! good to roughly an arc-minute.

use std::f64::consts::PI;
use chrono::{DateTime, Utc};
use solunar_types::{EclipticCoordinate, EquatorialCoordinate, GeoCoordinate, SunPosition};
use solunar_time::{days_since_j2000, J2000};
use super::coords::{self, RAD};

/// Perihelion of the Earth.
const PERIHELION: f64 = RAD * 102.9372;

pub fn solar_mean_anomaly(d: f64) -> f64 {
    RAD * (357.5291 + 0.985_600_28 * d)
}

pub fn equation_of_center(m: f64) -> f64 {
    RAD * (1.9148 * m.sin() + 0.02 * (2.0 * m).sin() + 0.0003 * (3.0 * m).sin())
}

pub fn ecliptic_longitude(m: f64, c: f64) -> f64 {
    m + c + PERIHELION + PI
}

/// Geocentric equatorial coordinates of the sun, `d` days after J2000.
///
/// The sun's ecliptic latitude is taken as zero.
pub fn sun_coords(d: f64) -> EquatorialCoordinate {
    let m = solar_mean_anomaly(d);
    let c = equation_of_center(m);
    let l = ecliptic_longitude(m, c);

    coords::ecliptic_to_equatorial(EclipticCoordinate { longitude: l, latitude: 0.0 })
}

/// Julian day of solar transit for approximate transit `ds` (days after J2000),
/// mean anomaly `m` and ecliptic longitude `l`.
pub fn solar_transit_j(ds: f64, m: f64, l: f64) -> f64 {
    J2000 + ds + 0.0053 * m.sin() - 0.0069 * (2.0 * l).sin()
}

/// Sun azimuth and altitude for an instant and location.
///
/// # Example
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use solunar_types::GeoCoordinate;
/// use solunar_astronomy::sun::sun_position;
///
/// let noon = Utc.with_ymd_and_hms(2024, 6, 21, 12, 0, 0).unwrap();
/// let greenwich = GeoCoordinate::new_unchecked(51.48, 0.0);
/// let pos = sun_position(noon, greenwich);
/// assert!(pos.altitude > 1.0); // about 62°
/// ```
pub fn sun_position(instant: DateTime<Utc>, coords: GeoCoordinate) -> SunPosition {
    let (lw, phi) = coords::observer_angles(coords);
    let d = days_since_j2000(instant);

    let c = sun_coords(d);
    let h = coords::sidereal_time(d, lw) - c.right_ascension;

    SunPosition {
        azimuth: coords::azimuth(h, phi, c.declination),
        altitude: coords::altitude(h, phi, c.declination),
    }
}
