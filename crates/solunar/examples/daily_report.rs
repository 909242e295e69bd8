//! Prints a day's sun and moon report for a location.
//!
//! Run with: cargo run --example daily_report -- 50.82 -0.14 2024-06-21
//! Set RUST_LOG=debug to see which thresholds the sun never reaches.

use anyhow::Context;
use chrono::{FixedOffset, NaiveDate, TimeZone, Utc};
use solunar::prelude::*;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let lat: f64 = args.first().map(|s| s.parse()).transpose()?.unwrap_or(50.82);
    let lng: f64 = args.get(1).map(|s| s.parse()).transpose()?.unwrap_or(-0.14);
    let date = match args.get(2) {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")?,
        None => Utc::now().date_naive(),
    };

    let coords = GeoCoordinate::new(lat, lng)?;
    let noon = date.and_hms_opt(12, 0, 0).context("invalid date")?;
    let instant = Utc.from_utc_datetime(&noon);
    // rough local clock from longitude, 15° per hour
    let offset = FixedOffset::east_opt(((lng / 15.0).round() as i32) * 3600).context("longitude out of range")?;

    let engine = Ephemeris::new().with_threshold(-4.0, "blueHourEnd", "blueHour");
    let times = engine.sun_times(instant, coords)?;

    println!("=====================================");
    println!("  {} on {}", coords, date);
    println!("=====================================");
    let mut events: Vec<_> = times.to_map().into_iter().collect();
    events.sort_by_key(|(_, t)| *t);
    for (label, time) in events {
        match time {
            Some(t) => println!("  {:<16} {}", label, t.with_timezone(&offset).format("%H:%M:%S")),
            None => println!("  {:<16} --", label),
        }
    }

    let moon = engine.moon_illumination(instant);
    let moon_times = engine.moon_times(instant, coords);
    println!("-------------------------------------");
    println!("  Moon: {} ({:.0}% lit)", moon.phase_name(), moon.fraction * 100.0);
    match (moon_times.rise, moon_times.set) {
        (Some(r), Some(s)) => println!("  Moonrise {}  Moonset {}", r.with_timezone(&offset).format("%H:%M"), s.with_timezone(&offset).format("%H:%M")),
        (Some(r), None) => println!("  Moonrise {}", r.with_timezone(&offset).format("%H:%M")),
        (None, Some(s)) => println!("  Moonset {}", s.with_timezone(&offset).format("%H:%M")),
        (None, None) if moon_times.always_up => println!("  Moon above the horizon all day"),
        (None, None) => println!("  Moon below the horizon all day"),
    }
    println!("=====================================");
    Ok(())
}
