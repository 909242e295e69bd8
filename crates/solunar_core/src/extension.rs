//! Extension trait for `DateTime<Utc>`.

use chrono::{DateTime, Utc};
use solunar_astronomy::SunTimes;
use solunar_types::{GeoCoordinate, MoonIllumination, MoonPhase, MoonPosition, MoonTimes, SolunarError, SunPosition};
use crate::shared::global;

/// One-call sun and moon queries on an instant, using the process-wide
/// threshold table.
pub trait SolunarDateExt {
    fn sun_position(&self, coords: GeoCoordinate) -> SunPosition;

    /// Sun times for this instant's date, including registered custom thresholds.
    fn sun_times(&self, coords: GeoCoordinate) -> Result<SunTimes, SolunarError>;

    fn moon_position(&self, coords: GeoCoordinate) -> MoonPosition;

    fn moon_illumination(&self) -> MoonIllumination;

    /// Named phase of the moon at this instant.
    fn moon_phase(&self) -> MoonPhase;

    fn moon_times(&self, coords: GeoCoordinate) -> MoonTimes;
}

impl SolunarDateExt for DateTime<Utc> {
    fn sun_position(&self, coords: GeoCoordinate) -> SunPosition {
        global().snapshot().sun_position(*self, coords)
    }

    fn sun_times(&self, coords: GeoCoordinate) -> Result<SunTimes, SolunarError> {
        global().snapshot().sun_times(*self, coords)
    }

    fn moon_position(&self, coords: GeoCoordinate) -> MoonPosition {
        global().snapshot().moon_position(*self, coords)
    }

    fn moon_illumination(&self) -> MoonIllumination {
        global().snapshot().moon_illumination(*self)
    }

    fn moon_phase(&self) -> MoonPhase {
        self.moon_illumination().phase_name()
    }

    fn moon_times(&self, coords: GeoCoordinate) -> MoonTimes {
        global().snapshot().moon_times(*self, coords)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_extension_trait() {
        let date = Utc.with_ymd_and_hms(2024, 1, 25, 17, 54, 0).unwrap();
        let coords = GeoCoordinate::new_unchecked(21.4225, 39.8262);

        assert_eq!(date.moon_phase(), MoonPhase::Full);
        let times = date.sun_times(coords).unwrap();
        assert!(times.sunrise().is_some());
        assert_eq!(date.sun_position(coords), global().snapshot().sun_position(date, coords));
    }
}
