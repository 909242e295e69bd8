//! The ephemeris engine and its configuration.
//!
//! An [`Ephemeris`] owns its threshold table, so two engines never see each
//! other's custom times. Use [`crate::SharedEphemeris`] when several threads
//! must register into one table.

use chrono::{DateTime, Utc};
use serde::{Serialize, Deserialize};
use solunar_astronomy::{self as astronomy, SunTimes};
use solunar_types::{
    GeoCoordinate, MoonIllumination, MoonPosition, MoonTimes, SolunarError, SunPosition, Threshold,
};

/// Labels always present in sun times and therefore unavailable to thresholds
/// in strict mode.
const RESERVED_LABELS: [&str; 2] = ["solarNoon", "nadir"];

/// Sun and moon calculator with its own table of sun-altitude thresholds.
#[derive(Debug, Clone, PartialEq)]
pub struct Ephemeris {
    thresholds: Vec<Threshold>,
}

impl Default for Ephemeris {
    fn default() -> Self {
        Self { thresholds: astronomy::default_thresholds() }
    }
}

impl Ephemeris {
    /// Engine with the six default thresholds.
    pub fn new() -> Self { Self::default() }

    /// Engine with no thresholds; sun times then report only noon and nadir.
    pub fn empty() -> Self {
        Self { thresholds: Vec::new() }
    }

    pub fn builder() -> EphemerisBuilder { EphemerisBuilder::new() }

    /// Builds an engine from a deserialized configuration.
    pub fn from_config(config: &EphemerisConfig) -> Result<Self, SolunarError> {
        let mut builder = EphemerisBuilder::new()
            .include_defaults(config.include_defaults)
            .strict(config.strict);
        for t in &config.thresholds {
            builder = builder.threshold(t.angle, t.rise.clone(), t.set.clone());
        }
        builder.build()
    }

    /// Returns the engine with one more threshold appended.
    pub fn with_threshold(mut self, angle: f64, rise: impl Into<String>, set: impl Into<String>) -> Self {
        self.add_threshold(angle, rise, set);
        self
    }

    /// Appends a threshold. No validation and no de-duplication: a colliding
    /// label shadows the earlier one in later results.
    pub fn add_threshold(&mut self, angle: f64, rise: impl Into<String>, set: impl Into<String>) {
        let threshold = Threshold::new(angle, rise, set);
        for label in [&threshold.rise, &threshold.set] {
            if self.has_label(label) {
                log::warn!("threshold label '{}' already registered; the new {}° entry shadows it", label, angle);
            }
        }
        log::debug!("registered threshold {}° ({}/{})", angle, threshold.rise, threshold.set);
        self.thresholds.push(threshold);
    }

    pub fn thresholds(&self) -> &[Threshold] {
        &self.thresholds
    }

    fn has_label(&self, label: &str) -> bool {
        self.thresholds.iter().any(|t| t.rise == label || t.set == label)
    }

    pub fn sun_position(&self, instant: DateTime<Utc>, coords: GeoCoordinate) -> SunPosition {
        astronomy::sun_position(instant, coords)
    }

    /// Solar noon, nadir and every threshold's morning/evening time.
    ///
    /// # Errors
    /// `InstantOutOfRange` for non-finite coordinates.
    pub fn sun_times(&self, instant: DateTime<Utc>, coords: GeoCoordinate) -> Result<SunTimes, SolunarError> {
        astronomy::sun_times(instant, coords, &self.thresholds)
    }

    pub fn moon_position(&self, instant: DateTime<Utc>, coords: GeoCoordinate) -> MoonPosition {
        astronomy::moon_position(instant, coords)
    }

    pub fn moon_illumination(&self, instant: DateTime<Utc>) -> MoonIllumination {
        astronomy::moon_illumination(instant)
    }

    pub fn moon_times(&self, instant: DateTime<Utc>, coords: GeoCoordinate) -> MoonTimes {
        astronomy::moon_times(instant, coords)
    }
}

/// Builder with validation for [`Ephemeris`].
#[derive(Debug, Default)]
pub struct EphemerisBuilder {
    include_defaults: Option<bool>,
    thresholds: Vec<Threshold>,
    strict: bool,
}

impl EphemerisBuilder {
    pub fn new() -> Self { Self::default() }

    /// Start from the six default thresholds (default: true).
    pub fn include_defaults(mut self, include: bool) -> Self { self.include_defaults = Some(include); self }
    pub fn threshold(mut self, angle: f64, rise: impl Into<String>, set: impl Into<String>) -> Self {
        self.thresholds.push(Threshold::new(angle, rise, set));
        self
    }

    /// Enables validation of thresholds: finite angles within [-90, 90],
    /// non-empty and unique labels.
    pub fn strict(mut self, strict: bool) -> Self { self.strict = strict; self }

    /// Builds and validates.
    pub fn build(self) -> Result<Ephemeris, SolunarError> {
        let mut engine = if self.include_defaults.unwrap_or(true) {
            Ephemeris::new()
        } else {
            Ephemeris::empty()
        };

        if self.strict {
            validate(engine.thresholds.iter().chain(&self.thresholds))?;
        }

        for t in self.thresholds {
            engine.add_threshold(t.angle, t.rise, t.set);
        }
        Ok(engine)
    }
}

fn validate<'a>(thresholds: impl Iterator<Item = &'a Threshold>) -> Result<(), SolunarError> {
    let mut seen: Vec<&str> = RESERVED_LABELS.to_vec();
    for t in thresholds {
        if !t.angle.is_finite() || !(-90.0..=90.0).contains(&t.angle) {
            return Err(SolunarError::invalid_config(format!(
                "Threshold angle {} outside [-90, 90]", t.angle
            )));
        }
        for label in [t.rise.as_str(), t.set.as_str()] {
            if label.trim().is_empty() {
                return Err(SolunarError::invalid_config(format!(
                    "Threshold at {}° has an empty label", t.angle
                )));
            }
            if seen.contains(&label) {
                return Err(SolunarError::invalid_config(format!("Duplicate label '{}'", label)));
            }
            seen.push(label);
        }
    }
    Ok(())
}

fn default_true() -> bool { true }

/// Serializable engine configuration.
///
/// ```rust
/// use solunar_core::{Ephemeris, EphemerisConfig};
///
/// let config = EphemerisConfig::from_json(
///     r#"{ "thresholds": [{ "angle": -4.0, "rise": "blueHourEnd", "set": "blueHour" }] }"#,
/// ).unwrap();
/// let engine = Ephemeris::from_config(&config).unwrap();
/// assert_eq!(engine.thresholds().len(), 7);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EphemerisConfig {
    #[serde(default = "default_true")]
    pub include_defaults: bool,
    #[serde(default)]
    pub strict: bool,
    #[serde(default)]
    pub thresholds: Vec<Threshold>,
}

impl Default for EphemerisConfig {
    fn default() -> Self {
        Self { include_defaults: true, strict: false, thresholds: Vec::new() }
    }
}

impl EphemerisConfig {
    /// Parses a JSON configuration.
    ///
    /// # Errors
    /// `ConfigParse` on malformed JSON or unknown field types.
    pub fn from_json(json: &str) -> Result<Self, SolunarError> {
        serde_json::from_str(json).map_err(|e| SolunarError::ConfigParse(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String, SolunarError> {
        serde_json::to_string_pretty(self).map_err(|e| SolunarError::ConfigParse(e.to_string()))
    }
}
