//! WASM bindings for Solunar - sun and moon ephemeris engine
//!
//! Instants cross the boundary as Unix milliseconds (`Date.getTime()`), and
//! event times come back the same way, `null` when the event does not occur.

use std::collections::BTreeMap;
use chrono::{DateTime, Utc};
use serde::Serialize;
use solunar_core::{Ephemeris, GeoCoordinate, MoonIllumination, MoonPosition, MoonTimes, SunPosition, SunTimes};
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

fn to_instant(ms: f64) -> Result<DateTime<Utc>, JsValue> {
    if !ms.is_finite() {
        return Err(JsValue::from_str("Invalid date: expected milliseconds since epoch"));
    }
    DateTime::from_timestamp_millis(ms.round() as i64)
        .ok_or_else(|| JsValue::from_str(&format!("Date out of range: {}", ms)))
}

fn to_ms(instant: Option<DateTime<Utc>>) -> Option<f64> {
    instant.map(|t| t.timestamp_millis() as f64)
}

fn times_to_js(times: &SunTimes) -> Result<JsValue, JsValue> {
    let map: BTreeMap<String, Option<f64>> = times
        .to_map()
        .into_iter()
        .map(|(label, time)| (label, to_ms(time)))
        .collect();
    serde_wasm_bindgen::to_value(&map).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Sun azimuth and altitude in radians.
///
/// # Example (JavaScript)
/// ```js
/// const pos = getPosition(Date.now(), 50.5, 30.5);
/// console.log(pos.altitude * 180 / Math.PI);
/// ```
#[wasm_bindgen(js_name = getPosition)]
pub fn get_position(date_ms: f64, lat: f64, lng: f64) -> Result<WasmSunPosition, JsValue> {
    let instant = to_instant(date_ms)?;
    Ok(solunar_core::get_position(instant, lat, lng).into())
}

/// Sun event times keyed by label, including thresholds added with `addTime`.
#[wasm_bindgen(js_name = getTimes)]
pub fn get_times(date_ms: f64, lat: f64, lng: f64) -> Result<JsValue, JsValue> {
    let instant = to_instant(date_ms)?;
    let times = solunar_core::get_times(instant, lat, lng).map_err(|e| JsValue::from_str(&e.to_string()))?;
    times_to_js(&times)
}

/// Registers a custom sun altitude (degrees) for every later `getTimes` call.
#[wasm_bindgen(js_name = addTime)]
pub fn add_time(angle: f64, rise_name: String, set_name: String) {
    solunar_core::add_time(angle, rise_name, set_name);
}

#[wasm_bindgen(js_name = getMoonPosition)]
pub fn get_moon_position(date_ms: f64, lat: f64, lng: f64) -> Result<WasmMoonPosition, JsValue> {
    let instant = to_instant(date_ms)?;
    Ok(solunar_core::get_moon_position(instant, lat, lng).into())
}

#[wasm_bindgen(js_name = getMoonIllumination)]
pub fn get_moon_illumination(date_ms: f64) -> Result<WasmMoonIllumination, JsValue> {
    let instant = to_instant(date_ms)?;
    Ok(solunar_core::get_moon_illumination(instant).into())
}

/// Moonrise/moonset for the UTC day containing `date_ms`.
#[wasm_bindgen(js_name = getMoonTimes)]
pub fn get_moon_times(date_ms: f64, lat: f64, lng: f64) -> Result<WasmMoonTimes, JsValue> {
    let instant = to_instant(date_ms)?;
    Ok(solunar_core::get_moon_times(instant, lat, lng).into())
}

/// Class-based API with its own threshold table.
///
/// # Example (JavaScript)
/// ```js
/// const calc = new SunCalc(50.5, 30.5);
/// calc.addTime(-4, "blueHourEnd", "blueHour");
/// const times = calc.times(Date.now());
/// console.log(new Date(times.blueHour));
/// ```
#[wasm_bindgen]
pub struct SunCalc {
    engine: Ephemeris,
    coords: GeoCoordinate,
}

#[wasm_bindgen]
impl SunCalc {
    /// Creates a calculator for a location; rejects out-of-range coordinates.
    #[wasm_bindgen(constructor)]
    pub fn new(lat: f64, lng: f64) -> Result<SunCalc, JsValue> {
        console_error_panic_hook::set_once();
        let coords = GeoCoordinate::new(lat, lng).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(SunCalc { engine: Ephemeris::new(), coords })
    }

    #[wasm_bindgen(js_name = addTime)]
    pub fn add_time(&mut self, angle: f64, rise_name: String, set_name: String) {
        self.engine.add_threshold(angle, rise_name, set_name);
    }

    pub fn position(&self, date_ms: f64) -> Result<WasmSunPosition, JsValue> {
        Ok(self.engine.sun_position(to_instant(date_ms)?, self.coords).into())
    }

    pub fn times(&self, date_ms: f64) -> Result<JsValue, JsValue> {
        let times = self
            .engine
            .sun_times(to_instant(date_ms)?, self.coords)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        times_to_js(&times)
    }

    #[wasm_bindgen(js_name = moonPosition)]
    pub fn moon_position(&self, date_ms: f64) -> Result<WasmMoonPosition, JsValue> {
        Ok(self.engine.moon_position(to_instant(date_ms)?, self.coords).into())
    }

    #[wasm_bindgen(js_name = moonTimes)]
    pub fn moon_times(&self, date_ms: f64) -> Result<WasmMoonTimes, JsValue> {
        Ok(self.engine.moon_times(to_instant(date_ms)?, self.coords).into())
    }
}

/// WASM-friendly representation of SunPosition for TypeScript generation.
#[derive(Serialize, tsify::Tsify)]
#[tsify(into_wasm_abi)]
pub struct WasmSunPosition {
    pub azimuth: f64,
    pub altitude: f64,
}

impl From<SunPosition> for WasmSunPosition {
    fn from(pos: SunPosition) -> Self {
        Self { azimuth: pos.azimuth, altitude: pos.altitude }
    }
}

#[derive(Serialize, tsify::Tsify)]
#[tsify(into_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct WasmMoonPosition {
    pub azimuth: f64,
    pub altitude: f64,
    /// Kilometres.
    pub distance: f64,
    pub parallactic_angle: f64,
}

impl From<MoonPosition> for WasmMoonPosition {
    fn from(pos: MoonPosition) -> Self {
        Self {
            azimuth: pos.azimuth,
            altitude: pos.altitude,
            distance: pos.distance_km,
            parallactic_angle: pos.parallactic_angle,
        }
    }
}

#[derive(Serialize, tsify::Tsify)]
#[tsify(into_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct WasmMoonIllumination {
    pub fraction: f64,
    pub phase: f64,
    pub angle: f64,
    pub phase_name: String,
}

impl From<MoonIllumination> for WasmMoonIllumination {
    fn from(moon: MoonIllumination) -> Self {
        Self {
            fraction: moon.fraction,
            phase: moon.phase,
            angle: moon.angle,
            phase_name: moon.phase_name().to_string(),
        }
    }
}

#[derive(Serialize, tsify::Tsify)]
#[tsify(into_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct WasmMoonTimes {
    pub rise: Option<f64>,
    pub set: Option<f64>,
    pub always_up: bool,
    pub always_down: bool,
}

impl From<MoonTimes> for WasmMoonTimes {
    fn from(times: MoonTimes) -> Self {
        Self {
            rise: to_ms(times.rise),
            set: to_ms(times.set),
            always_up: times.always_up,
            always_down: times.always_down,
        }
    }
}
