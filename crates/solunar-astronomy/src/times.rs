//! Sunrise, sunset and twilight times.
//!
//! One solar transit is computed for the date; each threshold's evening
//! crossing is solved from the hour angle and the morning crossing is its
//! mirror image around transit.

use std::collections::BTreeMap;
use std::f64::consts::PI;
use chrono::{DateTime, Utc};
use serde::ser::{Serialize, SerializeMap, Serializer};
use smallvec::SmallVec;
use solunar_types::{GeoCoordinate, SolunarError, Threshold};
use solunar_time::{days_since_j2000, jd_to_datetime};
use super::coords::{self, RAD};
use super::sun::{ecliptic_longitude, equation_of_center, solar_mean_anomaly, solar_transit_j};

const J0: f64 = 0.0009;

/// Default thresholds: (sun altitude in degrees, morning label, evening label).
pub const DEFAULT_THRESHOLDS: [(f64, &str, &str); 6] = [
    (-0.83, "sunrise", "sunset"),
    (-0.3, "sunriseEnd", "sunsetStart"),
    (-6.0, "dawn", "dusk"),
    (-12.0, "nauticalDawn", "nauticalDusk"),
    (-18.0, "nightEnd", "night"),
    (6.0, "goldenHourEnd", "goldenHour"),
];

/// The six default thresholds as owned values.
pub fn default_thresholds() -> Vec<Threshold> {
    DEFAULT_THRESHOLDS
        .iter()
        .map(|&(angle, rise, set)| Threshold::new(angle, rise, set))
        .collect()
}

pub fn julian_cycle(d: f64, lw: f64) -> f64 {
    (d - J0 - lw / (2.0 * PI)).round()
}

pub fn approx_transit(ht: f64, lw: f64, n: f64) -> f64 {
    J0 + (ht + lw) / (2.0 * PI) + n
}

/// Hour angle at which a body of declination `d` reaches altitude `h`.
///
/// NaN when that altitude is never reached, or never left, at latitude `phi`.
pub fn hour_angle(h: f64, phi: f64, d: f64) -> f64 {
    ((h.sin() - phi.sin() * d.sin()) / (phi.cos() * d.cos())).acos()
}

/// A named sun event. `time` is `None` when the sun never reaches the altitude.
#[derive(Debug, Clone, PartialEq)]
pub struct SunEvent {
    pub label: String,
    pub time: Option<DateTime<Utc>>,
}

/// Sun event times for one date and location.
#[derive(Debug, Clone, PartialEq)]
pub struct SunTimes {
    pub solar_noon: DateTime<Utc>,
    pub nadir: DateTime<Utc>,
    events: SmallVec<[SunEvent; 12]>,
}

impl SunTimes {
    /// Time of the event named `label`. Later thresholds shadow earlier ones
    /// with the same label.
    pub fn get(&self, label: &str) -> Option<DateTime<Utc>> {
        match label {
            "solarNoon" => Some(self.solar_noon),
            "nadir" => Some(self.nadir),
            _ => self.event(label).and_then(|e| e.time),
        }
    }

    /// The event named `label`, if any threshold produces it.
    pub fn event(&self, label: &str) -> Option<&SunEvent> {
        self.events.iter().rev().find(|e| e.label == label)
    }

    pub fn contains(&self, label: &str) -> bool {
        matches!(label, "solarNoon" | "nadir") || self.event(label).is_some()
    }

    /// Threshold events in table order, morning then evening per threshold.
    pub fn events(&self) -> impl Iterator<Item = &SunEvent> {
        self.events.iter()
    }

    pub fn sunrise(&self) -> Option<DateTime<Utc>> { self.get("sunrise") }
    pub fn sunset(&self) -> Option<DateTime<Utc>> { self.get("sunset") }
    pub fn sunrise_end(&self) -> Option<DateTime<Utc>> { self.get("sunriseEnd") }
    pub fn sunset_start(&self) -> Option<DateTime<Utc>> { self.get("sunsetStart") }
    pub fn dawn(&self) -> Option<DateTime<Utc>> { self.get("dawn") }
    pub fn dusk(&self) -> Option<DateTime<Utc>> { self.get("dusk") }
    pub fn nautical_dawn(&self) -> Option<DateTime<Utc>> { self.get("nauticalDawn") }
    pub fn nautical_dusk(&self) -> Option<DateTime<Utc>> { self.get("nauticalDusk") }
    pub fn night_end(&self) -> Option<DateTime<Utc>> { self.get("nightEnd") }
    pub fn night(&self) -> Option<DateTime<Utc>> { self.get("night") }
    pub fn golden_hour_end(&self) -> Option<DateTime<Utc>> { self.get("goldenHourEnd") }
    pub fn golden_hour(&self) -> Option<DateTime<Utc>> { self.get("goldenHour") }

    /// Label → time map, `None` for absent events. Duplicate labels keep the
    /// last registered value.
    pub fn to_map(&self) -> BTreeMap<String, Option<DateTime<Utc>>> {
        let mut map = BTreeMap::new();
        map.insert("solarNoon".to_string(), Some(self.solar_noon));
        map.insert("nadir".to_string(), Some(self.nadir));
        for e in &self.events {
            map.insert(e.label.clone(), e.time);
        }
        map
    }
}

impl Serialize for SunTimes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let map = self.to_map();
        let mut out = serializer.serialize_map(Some(map.len()))?;
        for (label, time) in &map {
            out.serialize_entry(label, time)?;
        }
        out.end()
    }
}

/// Computes sun event times for the date of `instant` at `coords`.
///
/// # Errors
/// Returns `InstantOutOfRange` if solar noon cannot be represented, which
/// only happens for non-finite coordinates.
///
/// # Example
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use solunar_types::GeoCoordinate;
/// use solunar_astronomy::times::{default_thresholds, sun_times};
///
/// let date = Utc.with_ymd_and_hms(2013, 3, 5, 0, 0, 0).unwrap();
/// let kyiv = GeoCoordinate::new_unchecked(50.5, 30.5);
/// let times = sun_times(date, kyiv, &default_thresholds()).unwrap();
/// assert!(times.sunrise().unwrap() < times.solar_noon);
/// ```
pub fn sun_times(
    instant: DateTime<Utc>,
    coords: GeoCoordinate,
    thresholds: &[Threshold],
) -> Result<SunTimes, SolunarError> {
    let (lw, phi) = coords::observer_angles(coords);
    let d = days_since_j2000(instant);

    let n = julian_cycle(d, lw);
    let ds = approx_transit(0.0, lw, n);

    let m = solar_mean_anomaly(ds);
    let c = equation_of_center(m);
    let l = ecliptic_longitude(m, c);

    let dec = coords::declination(l, 0.0);

    let j_noon = solar_transit_j(ds, m, l);
    log::trace!("julian cycle {} for {}: transit at jd {}", n, coords, j_noon);

    let solar_noon = jd_to_datetime(j_noon)
        .ok_or(SolunarError::InstantOutOfRange { julian_day: j_noon })?;
    let nadir = jd_to_datetime(j_noon - 0.5)
        .ok_or(SolunarError::InstantOutOfRange { julian_day: j_noon - 0.5 })?;

    // set time for a given sun altitude
    let set_j = |h: f64| {
        let w = hour_angle(h, phi, dec);
        let a = approx_transit(w, lw, n);
        solar_transit_j(a, m, l)
    };

    let mut events = SmallVec::with_capacity(thresholds.len() * 2);
    for t in thresholds {
        let j_set = set_j(t.angle * RAD);
        let j_rise = j_noon - (j_set - j_noon);

        let rise = jd_to_datetime(j_rise);
        let set = jd_to_datetime(j_set);
        if rise.is_none() || set.is_none() {
            log::debug!(
                "sun does not reach {}° at {} on {}: {}/{} absent",
                t.angle, coords, instant.date_naive(), t.rise, t.set
            );
        }

        events.push(SunEvent { label: t.rise.clone(), time: rise });
        events.push(SunEvent { label: t.set.clone(), time: set });
    }

    Ok(SunTimes { solar_noon, nadir, events })
}
