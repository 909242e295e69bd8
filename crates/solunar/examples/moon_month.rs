//! Prints the moon's phase at 00:00 UTC for the next 30 days.

use chrono::{Duration, Utc};
use solunar::prelude::*;

fn main() {
    env_logger::init();

    let start = solunar::time::start_of_utc_day(Utc::now());
    for day in 0..30 {
        let instant = start + Duration::days(day);
        let moon = instant.moon_illumination();
        let bar = "#".repeat((moon.fraction * 20.0).round() as usize);
        println!(
            "{}  {:<16} {:>5.1}%  {:<20} image {:>2}/28",
            instant.format("%Y-%m-%d"),
            moon.phase_name().to_string(),
            moon.fraction * 100.0,
            bar,
            moon.phase_index(28),
        );
    }
}
