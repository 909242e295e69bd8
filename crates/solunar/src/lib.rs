//! # Solunar
//!
//! Sun and moon positions, sunrise/sunset/twilight times, moonrise/moonset
//! and moon illumination for any date and geographic coordinate.
//!
//! This crate is a facade that re-exports functionality from the `solunar` ecosystem.
//!
//! ## Modules
//!
//! - `astronomy`: Coordinate transforms, solar and lunar models
//! - `time`: Julian day conversions
//! - `engine`: The [`Ephemeris`] engine, its builder and JSON configuration
//! - `shared`: Thread-safe process-wide threshold table
//!
//! ## Usage
//!
//! ```rust
//! use solunar::prelude::*;
//! use chrono::{TimeZone, Utc};
//!
//! let date = Utc.with_ymd_and_hms(2013, 3, 5, 0, 0, 0).unwrap();
//! let engine = Ephemeris::new().with_threshold(-4.0, "blueHourEnd", "blueHour");
//! let times = engine.sun_times(date, GeoCoordinate::new(50.5, 30.5)?)?;
//! assert!(times.get("blueHour").is_some());
//! # Ok::<(), SolunarError>(())
//! ```

pub use solunar_core::*;
