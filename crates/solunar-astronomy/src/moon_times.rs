//! Moonrise and moonset.
//!
//! The moon moves too fast for the transit trick used for the sun, so the
//! UTC day is scanned in two-hour chunks and a quadratic through three
//! altitude samples locates each horizon crossing.

use chrono::{DateTime, Utc};
use solunar_types::{GeoCoordinate, MoonTimes};
use solunar_time::{hours_later, start_of_utc_day};
use super::coords::RAD;
use super::moon::moon_geometric_altitude;

/// Altitude of the moon's centre at rise/set.
const MOON_HORIZON: f64 = 0.133 * RAD;

/// Computes moonrise and moonset for the UTC day containing `instant`.
///
/// # Example
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use solunar_types::GeoCoordinate;
/// use solunar_astronomy::moon_times::moon_times;
///
/// let date = Utc.with_ymd_and_hms(2013, 3, 4, 0, 0, 0).unwrap();
/// let times = moon_times(date, GeoCoordinate::new_unchecked(50.5, 30.5));
/// assert!(times.rise.is_some() || times.set.is_some() || times.always_up || times.always_down);
/// ```
pub fn moon_times(instant: DateTime<Utc>, coords: GeoCoordinate) -> MoonTimes {
    let t = start_of_utc_day(instant);
    let alt_at = |hours: f64| moon_geometric_altitude(hours_later(t, hours), coords) - MOON_HORIZON;

    let mut h0 = alt_at(0.0);
    let mut rise: Option<f64> = None;
    let mut set: Option<f64> = None;
    let mut ye = 0.0;

    // two-hour chunks: samples at i-1, i, i+1
    for i in (1..=23).step_by(2) {
        let i = f64::from(i);
        let h1 = alt_at(i);
        let h2 = alt_at(i + 1.0);

        let a = (h0 + h2) / 2.0 - h1;
        let b = (h2 - h0) / 2.0;
        let xe = -b / (2.0 * a);
        ye = (a * xe + b) * xe + h1;
        let d = b * b - 4.0 * a * h1;

        let mut roots = 0;
        let (mut x1, mut x2) = (0.0, 0.0);
        if d >= 0.0 {
            let dx = d.sqrt() / (a.abs() * 2.0);
            x1 = xe - dx;
            x2 = xe + dx;
            if x1.abs() <= 1.0 {
                roots += 1;
            }
            if x2.abs() <= 1.0 {
                roots += 1;
            }
            if x1 < -1.0 {
                x1 = x2;
            }
        }

        match roots {
            1 if h0 < 0.0 => rise = Some(i + x1),
            1 => set = Some(i + x1),
            2 => {
                rise = Some(i + if ye < 0.0 { x2 } else { x1 });
                set = Some(i + if ye < 0.0 { x1 } else { x2 });
            }
            _ => {}
        }

        if rise.is_some() && set.is_some() {
            break;
        }
        h0 = h2;
    }

    log::trace!("moon scan for {} at {}: rise {:?}h, set {:?}h", t.date_naive(), coords, rise, set);

    let none_found = rise.is_none() && set.is_none();
    MoonTimes {
        rise: rise.map(|h| hours_later(t, h)),
        set: set.map(|h| hours_later(t, h)),
        always_up: none_found && ye > 0.0,
        always_down: none_found && ye <= 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_events_fall_within_the_day() {
        let coords = GeoCoordinate::new_unchecked(50.5, 30.5);
        for offset in 0..30 {
            let day = Utc.with_ymd_and_hms(2013, 3, 1, 0, 0, 0).unwrap() + Duration::days(offset);
            let times = moon_times(day + Duration::hours(15), coords);

            for t in [times.rise, times.set].into_iter().flatten() {
                assert!(t >= day && t <= day + Duration::hours(24), "{} outside {}", t, day);
            }
            assert!(!(times.always_up && times.always_down));
            if times.rise.is_some() || times.set.is_some() {
                assert!(!times.always_up && !times.always_down);
            }
        }
    }

    #[test]
    fn test_moon_is_near_horizon_at_rise() {
        let coords = GeoCoordinate::new_unchecked(40.7, -74.0);
        let day = Utc.with_ymd_and_hms(2024, 1, 20, 0, 0, 0).unwrap();
        let times = moon_times(day, coords);

        if let Some(rise) = times.rise {
            let alt = moon_geometric_altitude(rise, coords);
            assert!((alt - MOON_HORIZON).abs() < 0.5 * RAD, "altitude {} at rise", alt / RAD);
        }
        if let Some(set) = times.set {
            let alt = moon_geometric_altitude(set, coords);
            assert!((alt - MOON_HORIZON).abs() < 0.5 * RAD, "altitude {} at set", alt / RAD);
        }
    }

    #[test]
    fn test_circumpolar_moon() {
        // Near the pole the moon stays on one side of the horizon for days.
        let coords = GeoCoordinate::new_unchecked(89.0, 0.0);
        let day = Utc.with_ymd_and_hms(2024, 1, 20, 0, 0, 0).unwrap();
        let times = moon_times(day, coords);
        assert!(times.rise.is_none() && times.set.is_none());
        assert!(times.always_up ^ times.always_down);
    }
}
