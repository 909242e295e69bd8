//! Julian day conversions.
//!
//! Julian days here are the continuous UTC-based day count used by the
//! low-precision sun and moon models: no TT/UT1 distinction is made.

use chrono::{DateTime, Duration, Timelike, Utc};

/// Milliseconds per day.
pub const DAY_MS: f64 = 86_400_000.0;
/// Julian day number of 1970-01-01 (noon); the Unix epoch is `J1970 - 0.5`.
pub const J1970: f64 = 2_440_588.0;
/// Julian day of the J2000.0 epoch.
pub const J2000: f64 = 2_451_545.0;

/// Converts a UTC instant to a Julian day (millisecond resolution).
pub fn datetime_to_jd(instant: DateTime<Utc>) -> f64 {
    instant.timestamp_millis() as f64 / DAY_MS - 0.5 + J1970
}

/// Converts a Julian day back to a UTC instant, rounded to the millisecond.
///
/// Returns `None` for NaN/infinite input or days outside chrono's range.
/// A NaN here is how an impossible rise/set event turns into `None`.
pub fn jd_to_datetime(jd: f64) -> Option<DateTime<Utc>> {
    let ms = ((jd + 0.5 - J1970) * DAY_MS).round();
    if !ms.is_finite() || ms.abs() >= i64::MAX as f64 {
        return None;
    }
    DateTime::from_timestamp_millis(ms as i64)
}

/// Days elapsed since J2000.0 (fractional).
pub fn days_since_j2000(instant: DateTime<Utc>) -> f64 {
    datetime_to_jd(instant) - J2000
}

/// Midnight UTC of the day containing `instant`.
pub fn start_of_utc_day(instant: DateTime<Utc>) -> DateTime<Utc> {
    let secs_into_day = i64::from(instant.num_seconds_from_midnight());
    let truncated = instant - Duration::seconds(secs_into_day);
    truncated - Duration::nanoseconds(i64::from(truncated.nanosecond()))
}

/// `instant` shifted by a fractional number of hours, to the millisecond.
pub fn hours_later(instant: DateTime<Utc>, hours: f64) -> DateTime<Utc> {
    instant + Duration::milliseconds((hours * 3_600_000.0).round() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    #[test]
    fn test_unix_epoch() {
        let epoch = Utc.with_ymd_and_hms(1970, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(datetime_to_jd(epoch), 2_440_587.5);
    }

    #[test]
    fn test_j2000_epoch() {
        let j2000 = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
        assert_eq!(datetime_to_jd(j2000), J2000);
        assert_eq!(days_since_j2000(j2000), 0.0);
        assert_eq!(jd_to_datetime(J2000), Some(j2000));
    }

    #[test]
    fn test_non_finite_is_none() {
        assert_eq!(jd_to_datetime(f64::NAN), None);
        assert_eq!(jd_to_datetime(f64::INFINITY), None);
        assert_eq!(jd_to_datetime(1e300), None);
    }

    #[test]
    fn test_start_of_day() {
        let t = Utc.with_ymd_and_hms(2013, 3, 5, 17, 42, 9).unwrap() + Duration::milliseconds(250);
        let midnight = Utc.with_ymd_and_hms(2013, 3, 5, 0, 0, 0).unwrap();
        assert_eq!(start_of_utc_day(t), midnight);
        assert_eq!(start_of_utc_day(midnight), midnight);
    }

    #[test]
    fn test_hours_later() {
        let t = Utc.with_ymd_and_hms(2013, 3, 5, 0, 0, 0).unwrap();
        assert_eq!(hours_later(t, 1.5), Utc.with_ymd_and_hms(2013, 3, 5, 1, 30, 0).unwrap());
        assert_eq!(hours_later(t, -24.0), Utc.with_ymd_and_hms(2013, 3, 4, 0, 0, 0).unwrap());
    }

    proptest! {
        /// Invariant: Julian day conversion round-trips to the millisecond.
        #[test]
        fn julian_round_trip(ms in -8_000_000_000_000i64..8_000_000_000_000i64) {
            let t = DateTime::from_timestamp_millis(ms).unwrap();
            prop_assert_eq!(jd_to_datetime(datetime_to_jd(t)), Some(t));
        }
    }
}
