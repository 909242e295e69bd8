//! Sun and moon ephemeris for solunar.
//!
//! A low-precision model (about one arc-minute) suited to rise/set timing:
//!
//! - [`coords`]: ecliptic → equatorial → horizontal transforms
//! - [`sun`]: solar orbit, sun position
//! - [`moon`]: lunar orbit, moon position and illumination
//! - [`times`]: sunrise, sunset and twilight from a threshold table
//! - [`moon_times`]: moonrise and moonset

pub mod coords;
pub mod sun;
pub mod moon;
pub mod times;
pub mod moon_times;

pub use sun::sun_position;
pub use moon::{moon_illumination, moon_position};
pub use times::{default_thresholds, sun_times, SunEvent, SunTimes, DEFAULT_THRESHOLDS};
pub use moon_times::moon_times;
