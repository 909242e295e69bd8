//! Core types shared by the solunar crates.
//!
//! Angles on result types are radians; coordinates supplied by callers are
//! degrees. Conversion happens inside the astronomy layer.

pub mod error;

pub use error::SolunarError;

use chrono::{DateTime, Utc};
use serde::{Serialize, Deserialize};
use std::fmt;

/// Observer location in degrees.
///
/// East longitudes and north latitudes are positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoCoordinate {
    pub lat: f64,
    pub lng: f64,
}

impl GeoCoordinate {
    /// Creates a validated coordinate.
    ///
    /// # Errors
    /// Returns `InvalidCoordinate` for non-finite values, latitudes outside
    /// [-90, 90] or longitudes outside [-180, 180].
    pub fn new(lat: f64, lng: f64) -> Result<Self, SolunarError> {
        if !lat.is_finite() || !lng.is_finite() {
            return Err(SolunarError::invalid_coordinate(lat, lng, "coordinates must be finite"));
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(SolunarError::invalid_coordinate(lat, lng, "latitude outside [-90, 90]"));
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(SolunarError::invalid_coordinate(lat, lng, "longitude outside [-180, 180]"));
        }
        Ok(Self { lat, lng })
    }

    /// Creates a coordinate without any checks. The engine accepts whatever
    /// it is given; non-finite values simply yield NaN-derived results.
    pub const fn new_unchecked(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl fmt::Display for GeoCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}°, {:.4}°", self.lat, self.lng)
    }
}

/// Position relative to the ecliptic plane (radians).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EclipticCoordinate {
    pub longitude: f64,
    pub latitude: f64,
}

/// Position relative to the celestial equator (radians).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquatorialCoordinate {
    pub right_ascension: f64,
    pub declination: f64,
}

/// Observer-relative position (radians).
///
/// Azimuth is measured from south, positive towards west.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HorizontalCoordinate {
    pub azimuth: f64,
    pub altitude: f64,
}

/// Sun position for an instant and location.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SunPosition {
    /// Radians from south, positive towards west.
    pub azimuth: f64,
    /// Radians above the horizon.
    pub altitude: f64,
}

/// Moon position for an instant and location.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoonPosition {
    pub azimuth: f64,
    /// Altitude including the refraction term.
    pub altitude: f64,
    /// Earth-moon distance in kilometres.
    pub distance_km: f64,
    pub parallactic_angle: f64,
}

/// Illuminated fraction and phase of the moon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoonIllumination {
    /// Illuminated fraction in [0, 1].
    pub fraction: f64,
    /// 0 = new, 0.25 = first quarter, 0.5 = full, 0.75 = last quarter.
    pub phase: f64,
    /// Position angle of the bright limb (radians). Negative while waxing.
    pub angle: f64,
}

impl MoonIllumination {
    pub fn is_waxing(&self) -> bool {
        self.phase < 0.5
    }

    /// Named phase, by eighths centred on the four principal phases.
    pub fn phase_name(&self) -> MoonPhase {
        MoonPhase::from_phase(self.phase)
    }

    /// Quantizes the phase onto `steps` discrete images (0 = new moon).
    ///
    /// `phase` lies in [0, 1), so the rounded product is never negative and
    /// the cast cannot truncate. A phase just below 1 rounds up to `steps`,
    /// which wraps to image 0.
    ///
    /// ```rust
    /// use solunar_types::MoonIllumination;
    ///
    /// let full = MoonIllumination { fraction: 1.0, phase: 0.5, angle: 0.0 };
    /// assert_eq!(full.phase_index(28), 14);
    /// ```
    pub fn phase_index(&self, steps: u32) -> u32 {
        if steps == 0 {
            return 0;
        }
        ((self.phase * f64::from(steps)).round() as u32) % steps
    }
}

/// The eight conventional phases of the moon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoonPhase {
    New,
    WaxingCrescent,
    FirstQuarter,
    WaxingGibbous,
    Full,
    WaningGibbous,
    LastQuarter,
    WaningCrescent,
}

impl MoonPhase {
    const ORDER: [MoonPhase; 8] = [
        MoonPhase::New,
        MoonPhase::WaxingCrescent,
        MoonPhase::FirstQuarter,
        MoonPhase::WaxingGibbous,
        MoonPhase::Full,
        MoonPhase::WaningGibbous,
        MoonPhase::LastQuarter,
        MoonPhase::WaningCrescent,
    ];

    pub fn from_phase(phase: f64) -> Self {
        let idx = ((phase * 8.0).round() as i64).rem_euclid(8) as usize;
        Self::ORDER[idx]
    }
}

impl fmt::Display for MoonPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MoonPhase::New => "New Moon",
            MoonPhase::WaxingCrescent => "Waxing Crescent",
            MoonPhase::FirstQuarter => "First Quarter",
            MoonPhase::WaxingGibbous => "Waxing Gibbous",
            MoonPhase::Full => "Full Moon",
            MoonPhase::WaningGibbous => "Waning Gibbous",
            MoonPhase::LastQuarter => "Last Quarter",
            MoonPhase::WaningCrescent => "Waning Crescent",
        };
        write!(f, "{}", s)
    }
}

/// Moonrise and moonset within one UTC day.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoonTimes {
    pub rise: Option<DateTime<Utc>>,
    pub set: Option<DateTime<Utc>>,
    /// Neither event occurs and the moon stays above the horizon.
    pub always_up: bool,
    /// Neither event occurs and the moon stays below the horizon.
    pub always_down: bool,
}

/// A sun altitude with the names of its morning and evening crossings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Threshold {
    /// Sun altitude in degrees.
    pub angle: f64,
    /// Label of the morning (rising) crossing.
    pub rise: String,
    /// Label of the evening (setting) crossing.
    pub set: String,
}

impl Threshold {
    pub fn new(angle: f64, rise: impl Into<String>, set: impl Into<String>) -> Self {
        Self { angle, rise: rise.into(), set: set.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geo_coordinate_validation() {
        assert!(GeoCoordinate::new(50.5, 30.5).is_ok());
        assert!(GeoCoordinate::new(-90.0, 180.0).is_ok());
        assert!(matches!(
            GeoCoordinate::new(90.5, 0.0),
            Err(SolunarError::InvalidCoordinate { .. })
        ));
        assert!(GeoCoordinate::new(0.0, -180.1).is_err());
        assert!(GeoCoordinate::new(f64::NAN, 0.0).is_err());
        assert!(GeoCoordinate::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_unchecked_accepts_anything() {
        let c = GeoCoordinate::new_unchecked(123.0, 999.0);
        assert_eq!(c.lat, 123.0);
        assert_eq!(c.lng, 999.0);
    }

    #[test]
    fn test_moon_phase_names() {
        assert_eq!(MoonPhase::from_phase(0.0), MoonPhase::New);
        assert_eq!(MoonPhase::from_phase(0.97), MoonPhase::New);
        assert_eq!(MoonPhase::from_phase(0.12), MoonPhase::WaxingCrescent);
        assert_eq!(MoonPhase::from_phase(0.25), MoonPhase::FirstQuarter);
        assert_eq!(MoonPhase::from_phase(0.5), MoonPhase::Full);
        assert_eq!(MoonPhase::from_phase(0.75), MoonPhase::LastQuarter);
        assert_eq!(MoonPhase::from_phase(0.88), MoonPhase::WaningCrescent);
        assert_eq!(MoonPhase::Full.to_string(), "Full Moon");
    }

    #[test]
    fn test_phase_index_wraps() {
        let m = |phase| MoonIllumination { fraction: 0.0, phase, angle: 0.0 };
        assert_eq!(m(0.0).phase_index(28), 0);
        assert_eq!(m(0.25).phase_index(28), 7);
        assert_eq!(m(0.99).phase_index(28), 0);
        assert_eq!(m(0.5).phase_index(0), 0);
    }

    #[test]
    fn test_waxing() {
        let m = |phase| MoonIllumination { fraction: 0.5, phase, angle: 0.0 };
        assert!(m(0.2).is_waxing());
        assert!(!m(0.7).is_waxing());
    }
}
