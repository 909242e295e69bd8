//! Python bindings for Solunar - sun and moon ephemeris engine
//!
//! ```python
//! from datetime import datetime, timezone
//! import solunar
//!
//! times = solunar.get_times(50.5, 30.5, datetime(2013, 3, 5, tzinfo=timezone.utc))
//! print(times["sunrise"], times["sunset"])
//! ```

use std::collections::BTreeMap;
use chrono::{DateTime, Utc};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use solunar_core::{GeoCoordinate, MoonIllumination, MoonPosition, MoonTimes, SolunarError, SunPosition, SunTimes};

type TimesDict = BTreeMap<String, Option<DateTime<Utc>>>;

fn to_py_err(e: SolunarError) -> PyErr {
    PyValueError::new_err(e.to_string())
}

fn resolve(date: Option<DateTime<Utc>>) -> DateTime<Utc> {
    date.unwrap_or_else(Utc::now)
}

#[pyclass(name = "SunPosition", frozen, get_all)]
#[derive(Clone)]
pub struct PySunPosition {
    azimuth: f64,
    altitude: f64,
}

#[pymethods]
impl PySunPosition {
    fn __repr__(&self) -> String {
        format!("SunPosition(azimuth={:.6}, altitude={:.6})", self.azimuth, self.altitude)
    }
}

impl From<SunPosition> for PySunPosition {
    fn from(pos: SunPosition) -> Self {
        Self { azimuth: pos.azimuth, altitude: pos.altitude }
    }
}

#[pyclass(name = "MoonPosition", frozen, get_all)]
#[derive(Clone)]
pub struct PyMoonPosition {
    azimuth: f64,
    altitude: f64,
    distance: f64,
    parallactic_angle: f64,
}

#[pymethods]
impl PyMoonPosition {
    fn __repr__(&self) -> String {
        format!(
            "MoonPosition(azimuth={:.6}, altitude={:.6}, distance={:.1})",
            self.azimuth, self.altitude, self.distance
        )
    }
}

impl From<MoonPosition> for PyMoonPosition {
    fn from(pos: MoonPosition) -> Self {
        Self {
            azimuth: pos.azimuth,
            altitude: pos.altitude,
            distance: pos.distance_km,
            parallactic_angle: pos.parallactic_angle,
        }
    }
}

#[pyclass(name = "MoonIllumination", frozen, get_all)]
#[derive(Clone)]
pub struct PyMoonIllumination {
    fraction: f64,
    phase: f64,
    angle: f64,
    phase_name: String,
}

#[pymethods]
impl PyMoonIllumination {
    fn __repr__(&self) -> String {
        format!("MoonIllumination(fraction={:.4}, phase={:.4}, {})", self.fraction, self.phase, self.phase_name)
    }
}

impl From<MoonIllumination> for PyMoonIllumination {
    fn from(moon: MoonIllumination) -> Self {
        Self {
            fraction: moon.fraction,
            phase: moon.phase,
            angle: moon.angle,
            phase_name: moon.phase_name().to_string(),
        }
    }
}

#[pyclass(name = "MoonTimes", frozen, get_all)]
#[derive(Clone)]
pub struct PyMoonTimes {
    rise: Option<DateTime<Utc>>,
    set: Option<DateTime<Utc>>,
    always_up: bool,
    always_down: bool,
}

impl From<MoonTimes> for PyMoonTimes {
    fn from(times: MoonTimes) -> Self {
        Self { rise: times.rise, set: times.set, always_up: times.always_up, always_down: times.always_down }
    }
}

fn times_dict(times: SunTimes) -> TimesDict {
    times.to_map()
}

/// Sun azimuth and altitude (radians). `date` defaults to now.
#[pyfunction]
#[pyo3(signature = (lat, lng, date=None))]
fn get_position(lat: f64, lng: f64, date: Option<DateTime<Utc>>) -> PySunPosition {
    solunar_core::get_position(resolve(date), lat, lng).into()
}

/// Dict of event label to UTC datetime, `None` where the sun never reaches
/// the threshold.
#[pyfunction]
#[pyo3(signature = (lat, lng, date=None))]
fn get_times(lat: f64, lng: f64, date: Option<DateTime<Utc>>) -> PyResult<TimesDict> {
    solunar_core::get_times(resolve(date), lat, lng).map(times_dict).map_err(to_py_err)
}

/// Registers a custom sun altitude (degrees) for later `get_times` calls.
#[pyfunction]
fn add_time(angle: f64, rise_name: String, set_name: String) {
    solunar_core::add_time(angle, rise_name, set_name);
}

#[pyfunction]
#[pyo3(signature = (lat, lng, date=None))]
fn get_moon_position(lat: f64, lng: f64, date: Option<DateTime<Utc>>) -> PyMoonPosition {
    solunar_core::get_moon_position(resolve(date), lat, lng).into()
}

#[pyfunction]
#[pyo3(signature = (date=None))]
fn get_moon_illumination(date: Option<DateTime<Utc>>) -> PyMoonIllumination {
    solunar_core::get_moon_illumination(resolve(date)).into()
}

#[pyfunction]
#[pyo3(signature = (lat, lng, date=None))]
fn get_moon_times(lat: f64, lng: f64, date: Option<DateTime<Utc>>) -> PyMoonTimes {
    solunar_core::get_moon_times(resolve(date), lat, lng).into()
}

/// Calculator with its own threshold table.
#[pyclass(name = "Ephemeris")]
pub struct PyEphemeris {
    engine: solunar_core::Ephemeris,
}

#[pymethods]
impl PyEphemeris {
    /// `include_defaults=False` starts from an empty threshold table.
    #[new]
    #[pyo3(signature = (include_defaults=true))]
    fn new(include_defaults: bool) -> Self {
        let engine = if include_defaults {
            solunar_core::Ephemeris::new()
        } else {
            solunar_core::Ephemeris::empty()
        };
        Self { engine }
    }

    /// Loads an engine from a JSON configuration string.
    #[staticmethod]
    fn from_json(json: &str) -> PyResult<Self> {
        let config = solunar_core::EphemerisConfig::from_json(json).map_err(to_py_err)?;
        let engine = solunar_core::Ephemeris::from_config(&config).map_err(to_py_err)?;
        Ok(Self { engine })
    }

    fn add_time(&mut self, angle: f64, rise_name: String, set_name: String) {
        self.engine.add_threshold(angle, rise_name, set_name);
    }

    /// List of `(angle, rise_name, set_name)` tuples.
    fn thresholds(&self) -> Vec<(f64, String, String)> {
        self.engine
            .thresholds()
            .iter()
            .map(|t| (t.angle, t.rise.clone(), t.set.clone()))
            .collect()
    }

    #[pyo3(signature = (lat, lng, date=None))]
    fn get_times(&self, lat: f64, lng: f64, date: Option<DateTime<Utc>>) -> PyResult<TimesDict> {
        self.engine
            .sun_times(resolve(date), GeoCoordinate::new_unchecked(lat, lng))
            .map(times_dict)
            .map_err(to_py_err)
    }

    #[pyo3(signature = (lat, lng, date=None))]
    fn get_position(&self, lat: f64, lng: f64, date: Option<DateTime<Utc>>) -> PySunPosition {
        self.engine.sun_position(resolve(date), GeoCoordinate::new_unchecked(lat, lng)).into()
    }

    fn __repr__(&self) -> String {
        format!("Ephemeris({} thresholds)", self.engine.thresholds().len())
    }
}

#[pymodule]
fn solunar(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(get_position, m)?)?;
    m.add_function(wrap_pyfunction!(get_times, m)?)?;
    m.add_function(wrap_pyfunction!(add_time, m)?)?;
    m.add_function(wrap_pyfunction!(get_moon_position, m)?)?;
    m.add_function(wrap_pyfunction!(get_moon_illumination, m)?)?;
    m.add_function(wrap_pyfunction!(get_moon_times, m)?)?;

    m.add_class::<PyEphemeris>()?;
    m.add_class::<PySunPosition>()?;
    m.add_class::<PyMoonPosition>()?;
    m.add_class::<PyMoonIllumination>()?;
    m.add_class::<PyMoonTimes>()?;
    Ok(())
}
