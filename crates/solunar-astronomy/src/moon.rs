//! Lunar model: geocentric position, observer position and illumination.
//!
//! Position formulas from http://aa.quae.nl/en/reken/hemelpositie.html,
//! illumination from the IDL astrolib `mphase` routine.

use std::f64::consts::PI;
use chrono::{DateTime, Utc};
use solunar_types::{EclipticCoordinate, EquatorialCoordinate, GeoCoordinate, MoonIllumination, MoonPosition};
use solunar_time::days_since_j2000;
use super::coords::{self, RAD};
use super::sun::sun_coords;

/// Mean Earth-sun distance in km.
const SUN_DISTANCE_KM: f64 = 149_598_000.0;

/// Geocentric moon coordinates with distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoonCoords {
    pub equatorial: EquatorialCoordinate,
    /// Earth-moon distance in km.
    pub distance_km: f64,
}

/// Geocentric moon coordinates `d` days after J2000.
pub fn moon_coords(d: f64) -> MoonCoords {
    let l = RAD * (218.316 + 13.176_396 * d); // ecliptic longitude
    let m = RAD * (134.963 + 13.064_993 * d); // mean anomaly
    let f = RAD * (93.272 + 13.229_350 * d); // mean distance

    let ecliptic = EclipticCoordinate {
        longitude: l + RAD * 6.289 * m.sin(),
        latitude: RAD * 5.128 * f.sin(),
    };

    MoonCoords {
        equatorial: coords::ecliptic_to_equatorial(ecliptic),
        distance_km: 385_001.0 - 20_905.0 * m.cos(),
    }
}

/// Geometric (unrefracted) moon altitude. Used by the rise/set scan.
pub(crate) fn moon_geometric_altitude(instant: DateTime<Utc>, coords: GeoCoordinate) -> f64 {
    let (lw, phi) = coords::observer_angles(coords);
    let d = days_since_j2000(instant);

    let c = moon_coords(d);
    let h = coords::sidereal_time(d, lw) - c.equatorial.right_ascension;
    coords::altitude(h, phi, c.equatorial.declination)
}

/// Moon azimuth, refracted altitude, distance and parallactic angle.
pub fn moon_position(instant: DateTime<Utc>, coords: GeoCoordinate) -> MoonPosition {
    let (lw, phi) = coords::observer_angles(coords);
    let d = days_since_j2000(instant);

    let c = moon_coords(d);
    let dec = c.equatorial.declination;
    let h = coords::sidereal_time(d, lw) - c.equatorial.right_ascension;

    let mut alt = coords::altitude(h, phi, dec);
    alt += coords::refraction(alt);

    MoonPosition {
        azimuth: coords::azimuth(h, phi, dec),
        altitude: alt,
        distance_km: c.distance_km,
        parallactic_angle: coords::parallactic_angle(h, phi, dec),
    }
}

/// Illuminated fraction, phase and bright-limb angle of the moon.
///
/// Independent of the observer.
pub fn moon_illumination(instant: DateTime<Utc>) -> MoonIllumination {
    let d = days_since_j2000(instant);
    let s = sun_coords(d);
    let m = moon_coords(d);
    let (ra_s, dec_s) = (s.right_ascension, s.declination);
    let (ra_m, dec_m) = (m.equatorial.right_ascension, m.equatorial.declination);

    // geocentric elongation
    let phi = (dec_s.sin() * dec_m.sin() + dec_s.cos() * dec_m.cos() * (ra_s - ra_m).cos()).acos();
    // selenocentric elongation of the Earth from the sun
    let inc = (SUN_DISTANCE_KM * phi.sin()).atan2(m.distance_km - SUN_DISTANCE_KM * phi.cos());
    let angle = (dec_s.cos() * (ra_s - ra_m).sin())
        .atan2(dec_s.sin() * dec_m.cos() - dec_s.cos() * dec_m.sin() * (ra_s - ra_m).cos());

    let sign = if angle < 0.0 { -1.0 } else { 1.0 };
    let phase = 0.5 + 0.5 * inc * sign / PI;

    MoonIllumination {
        fraction: (1.0 + inc.cos()) / 2.0,
        // an inc of exactly pi while waxing would give 1.0
        phase: if phase >= 1.0 { phase - 1.0 } else { phase },
        angle,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use chrono::TimeZone;

    fn reference_date() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2013, 3, 5, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_reference_position() {
        let pos = moon_position(reference_date(), GeoCoordinate::new_unchecked(50.5, 30.5));

        assert_abs_diff_eq!(pos.azimuth, -0.9783999522438226, epsilon = 1e-9);
        assert_abs_diff_eq!(pos.distance_km, 364121.37256256194, epsilon = 1e-6);
    }

    #[test]
    fn test_reference_illumination() {
        let moon = moon_illumination(reference_date());

        assert_abs_diff_eq!(moon.fraction, 0.4848068202456373, epsilon = 1e-9);
        assert_abs_diff_eq!(moon.phase, 0.7548368838538762, epsilon = 1e-9);
        assert_abs_diff_eq!(moon.angle, 1.6732942678578346, epsilon = 1e-9);
    }

    #[test]
    fn test_reference_altitude_is_refracted() {
        let coords = GeoCoordinate::new_unchecked(50.5, 30.5);
        let t = reference_date();
        let geometric = moon_geometric_altitude(t, coords);
        let refracted = moon_position(t, coords).altitude;

        assert_abs_diff_eq!(refracted, 0.006969727754891917, epsilon = 1e-12);
        assert_abs_diff_eq!(geometric, 0.007061562225962828, epsilon = 1e-12);
        assert_abs_diff_eq!(refracted, geometric + coords::refraction(geometric), epsilon = 1e-15);
    }

    #[test]
    fn test_distance_bounds() {
        for day in 0..60 {
            let c = moon_coords(f64::from(day) * 0.5);
            assert!(c.distance_km >= 385_001.0 - 20_905.0 - 1e-6);
            assert!(c.distance_km <= 385_001.0 + 20_905.0 + 1e-6);
        }
    }

    #[test]
    fn test_new_and_full_moon_2024() {
        // New moon 2024-01-11 11:57 UTC, full moon 2024-01-25 17:54 UTC.
        let new = moon_illumination(Utc.with_ymd_and_hms(2024, 1, 11, 11, 57, 0).unwrap());
        let full = moon_illumination(Utc.with_ymd_and_hms(2024, 1, 25, 17, 54, 0).unwrap());

        assert!(new.fraction < 0.02, "new moon fraction {}", new.fraction);
        assert!(full.fraction > 0.98, "full moon fraction {}", full.fraction);
        assert_abs_diff_eq!(full.phase, 0.5, epsilon = 0.03);
    }

    #[test]
    fn test_first_quarter_is_waxing() {
        // First quarter 2024-01-18 03:52 UTC.
        let moon = moon_illumination(Utc.with_ymd_and_hms(2024, 1, 18, 3, 52, 0).unwrap());
        assert!(moon.angle < 0.0);
        assert_abs_diff_eq!(moon.phase, 0.25, epsilon = 0.03);
        assert_abs_diff_eq!(moon.fraction, 0.5, epsilon = 0.07);
    }
}
