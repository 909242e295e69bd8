use solunar::prelude::*;
use chrono::{DateTime, Duration, FixedOffset, TimeZone, Timelike, Utc};

fn kyiv_date() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2013, 3, 5, 0, 0, 0).unwrap()
}

fn near(a: f64, b: f64, margin: f64) -> bool {
    (a - b).abs() < margin
}

#[test]
fn test_reference_sun_position() {
    let pos = get_position(kyiv_date(), 50.5, 30.5);
    assert!(near(pos.azimuth, -2.5003175907168385, 1e-9), "azimuth {}", pos.azimuth);
    assert!(near(pos.altitude, -0.7000406838781611, 1e-9), "altitude {}", pos.altitude);
}

#[test]
fn test_reference_moon() {
    let pos = get_moon_position(kyiv_date(), 50.5, 30.5);
    assert!(near(pos.azimuth, -0.9783999522438226, 1e-9), "azimuth {}", pos.azimuth);
    assert!(near(pos.distance_km, 364121.37256256194, 1e-6), "distance {}", pos.distance_km);
    // refracted; the geometric altitude is 0.0070616
    assert!(near(pos.altitude, 0.006969727754891917, 1e-12), "altitude {}", pos.altitude);

    let moon = get_moon_illumination(kyiv_date());
    assert!(near(moon.fraction, 0.4848068202456373, 1e-9));
    assert!(near(moon.phase, 0.7548368838538762, 1e-9));
    assert!(near(moon.angle, 1.6732942678578346, 1e-9));
    assert_eq!(moon.phase_name(), MoonPhase::LastQuarter);
}

#[test]
fn test_reference_sun_times_seconds() {
    let times = get_times(kyiv_date(), 50.5, 30.5).unwrap();
    let hms = |t: Option<DateTime<Utc>>| t.map(|t| t.format("%H:%M:%S").to_string());

    assert_eq!(hms(Some(times.solar_noon)).as_deref(), Some("10:10:57"));
    assert_eq!(hms(times.sunrise()).as_deref(), Some("04:34:57"));
    assert_eq!(hms(times.sunset()).as_deref(), Some("15:46:56"));
    assert_eq!(hms(times.dawn()).as_deref(), Some("04:02:17"));
    assert_eq!(hms(times.dusk()).as_deref(), Some("16:19:36"));
}

#[test]
fn test_brighton_midsummer() {
    // Local clock is BST (UTC+1).
    let bst = FixedOffset::east_opt(3600).unwrap();
    let date = Utc.with_ymd_and_hms(2024, 6, 17, 0, 0, 0).unwrap();
    let times = get_times(date, 50.5, -0.12).unwrap();

    let sunrise = times.sunrise().unwrap().with_timezone(&bst);
    let sunset = times.sunset().unwrap().with_timezone(&bst);
    let minutes = |h: u32, m: u32| i64::from(h * 60 + m);

    let rise_min = minutes(sunrise.hour(), sunrise.minute());
    let set_min = minutes(sunset.hour(), sunset.minute());
    assert!((rise_min - minutes(4, 40)).abs() <= 20, "sunrise {}", sunrise);
    assert!((set_min - minutes(21, 20)).abs() <= 20, "sunset {}", sunset);
}

#[test]
fn test_event_order_mid_latitude() {
    let engine = Ephemeris::new();
    let times = engine
        .sun_times(Utc.with_ymd_and_hms(2024, 3, 20, 0, 0, 0).unwrap(), GeoCoordinate::new(40.7, -74.0).unwrap())
        .unwrap();

    let order = [
        times.night_end(),
        times.nautical_dawn(),
        times.dawn(),
        times.sunrise(),
        times.sunrise_end(),
        times.golden_hour_end(),
        Some(times.solar_noon),
        times.golden_hour(),
        times.sunset_start(),
        times.sunset(),
        times.dusk(),
        times.nautical_dusk(),
        times.night(),
    ];
    for w in order.windows(2) {
        assert!(w[0].unwrap() < w[1].unwrap(), "{:?} should precede {:?}", w[0], w[1]);
    }
}

#[test]
fn test_white_nights_have_no_astronomical_night() {
    // At 60°N on the solstice the sun bottoms out near -6.6°.
    let date = Utc.with_ymd_and_hms(2024, 6, 21, 0, 0, 0).unwrap();
    let times = get_times(date, 60.0, 30.0).unwrap();

    assert_eq!(times.night(), None);
    assert_eq!(times.night_end(), None);
    assert_eq!(times.nautical_dusk(), None);
    assert!(times.sunrise().is_some());
    assert!(times.sunset().is_some());
}

#[test]
fn test_arctic_circle_solstice() {
    let date = Utc.with_ymd_and_hms(2024, 6, 21, 0, 0, 0).unwrap();
    let times = get_times(date, 66.5, 25.0).unwrap();

    assert_eq!(times.night(), None);
    assert_eq!(times.night_end(), None);
    assert_eq!(times.dawn(), None);
    // the sun bottoms out near -0.06°, above the sunrise altitude
    assert_eq!(times.sunrise(), None);
    assert!(times.golden_hour_end().is_some());
}

#[test]
fn test_midnight_sun_has_no_sunset() {
    let date = Utc.with_ymd_and_hms(2024, 6, 21, 0, 0, 0).unwrap();
    let times = get_times(date, 70.0, 25.0).unwrap();

    assert_eq!(times.sunrise(), None);
    assert_eq!(times.sunset(), None);
    assert_eq!(times.night(), None);
    // golden hour (+6°) still happens
    assert!(times.golden_hour().is_some());
}

#[test]
fn test_serialized_times_use_null_for_absent_events() {
    let date = Utc.with_ymd_and_hms(2024, 6, 21, 0, 0, 0).unwrap();
    let times = get_times(date, 60.0, 30.0).unwrap();
    let json = serde_json::to_value(&times).unwrap();

    assert!(json["night"].is_null());
    assert!(json["sunrise"].is_string());
    assert!(json["solarNoon"].is_string());
    assert!(json["nadir"].is_string());
}

#[test]
fn test_lunar_month_cycle() {
    // New moon 2024-01-11 11:57 UTC; next new moon 2024-02-09 22:59 UTC.
    let start = Utc.with_ymd_and_hms(2024, 1, 11, 12, 0, 0).unwrap();
    let hourly: Vec<f64> = (0..=30 * 24)
        .map(|h| get_moon_illumination(start + Duration::hours(h)).fraction)
        .collect();

    for w in hourly.windows(2) {
        assert!((w[1] - w[0]).abs() < 0.01, "fraction jumped from {} to {}", w[0], w[1]);
    }
    let min = hourly.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = hourly.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    assert!(min < 0.02);
    assert!(max > 0.98);

    let daily: Vec<f64> = hourly.iter().step_by(24).cloned().collect();
    for d in 1..13 {
        assert!(daily[d + 1] > daily[d], "waxing day {}", d);
    }
    for d in 16..27 {
        assert!(daily[d + 1] < daily[d], "waning day {}", d);
    }
}

#[test]
fn test_moon_phase_index_for_watch_face() {
    let full = get_moon_illumination(Utc.with_ymd_and_hms(2024, 1, 25, 17, 54, 0).unwrap());
    assert_eq!(full.phase_index(28), 14);
    let new = get_moon_illumination(Utc.with_ymd_and_hms(2024, 1, 11, 11, 57, 0).unwrap());
    assert_eq!(new.phase_index(28), 0);
}

#[test]
fn test_checked_coordinates() {
    assert!(matches!(
        GeoCoordinate::new(95.0, 0.0),
        Err(SolunarError::InvalidCoordinate { .. })
    ));
}
