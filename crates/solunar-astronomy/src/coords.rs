//! Coordinate transforms shared by the sun and moon models.
//!
//! Formulas from http://aa.quae.nl/en/reken/hemelpositie.html. All inputs
//! and outputs are radians. `asin`/`acos` of out-of-range arguments yield NaN,
//! which callers propagate rather than clamp.

use std::f64::consts::PI;
use solunar_types::{EclipticCoordinate, EquatorialCoordinate, GeoCoordinate, HorizontalCoordinate};

/// Degrees to radians.
pub const RAD: f64 = PI / 180.0;

/// Obliquity of the Earth (fixed, J2000).
pub const OBLIQUITY: f64 = RAD * 23.4397;

pub fn right_ascension(l: f64, b: f64) -> f64 {
    (l.sin() * OBLIQUITY.cos() - b.tan() * OBLIQUITY.sin()).atan2(l.cos())
}

pub fn declination(l: f64, b: f64) -> f64 {
    (b.sin() * OBLIQUITY.cos() + b.cos() * OBLIQUITY.sin() * l.sin()).asin()
}

/// Azimuth for hour angle `h`, latitude `phi` and declination `dec`,
/// measured from south and positive towards west.
pub fn azimuth(h: f64, phi: f64, dec: f64) -> f64 {
    h.sin().atan2(h.cos() * phi.sin() - dec.tan() * phi.cos())
}

pub fn altitude(h: f64, phi: f64, dec: f64) -> f64 {
    (phi.sin() * dec.sin() + phi.cos() * dec.cos() * h.cos()).asin()
}

/// Local sidereal time for `d` days since J2000 and west longitude `lw`.
pub fn sidereal_time(d: f64, lw: f64) -> f64 {
    RAD * (280.16 + 360.985_623_5 * d) - lw
}

pub fn parallactic_angle(h: f64, phi: f64, dec: f64) -> f64 {
    h.sin().atan2(phi.tan() * dec.cos() - dec.sin() * h.cos())
}

/// Empirical refraction term added to an altitude near the horizon.
///
/// Singular where `h = -5.10°`; applied unconditionally.
pub fn refraction(h: f64) -> f64 {
    RAD * 0.017 / (h + RAD * 10.26 / (h + RAD * 5.10)).tan()
}

pub fn ecliptic_to_equatorial(ecliptic: EclipticCoordinate) -> EquatorialCoordinate {
    EquatorialCoordinate {
        right_ascension: right_ascension(ecliptic.longitude, ecliptic.latitude),
        declination: declination(ecliptic.longitude, ecliptic.latitude),
    }
}

/// Horizontal position for a local hour angle `h` at the observer.
pub fn equatorial_to_horizontal(h: f64, phi: f64, dec: f64) -> HorizontalCoordinate {
    HorizontalCoordinate {
        azimuth: azimuth(h, phi, dec),
        altitude: altitude(h, phi, dec),
    }
}

/// Observer angles used by every hour-angle formula: west longitude `lw`
/// (the longitude sign is flipped so west is positive) and latitude `phi`.
pub fn observer_angles(coords: GeoCoordinate) -> (f64, f64) {
    (RAD * -coords.lng, RAD * coords.lat)
}
