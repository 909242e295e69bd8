use serde::{Serialize, Deserialize};
use thiserror::Error;

/// Errors from solunar operations.
///
/// Astronomically impossible events (the sun never reaching an altitude at a
/// given latitude and date) are not errors; they surface as `None`.
#[derive(Debug, Error, Clone, PartialEq, Serialize, Deserialize)]
pub enum SolunarError {
    /// Latitude/longitude rejected by the checked constructor.
    #[error("Invalid coordinate ({lat}, {lng}): {reason}")]
    InvalidCoordinate {
        lat: f64,
        lng: f64,
        reason: String,
    },

    /// Invalid engine configuration.
    #[error("Invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },

    /// A Julian day that cannot be represented as a UTC instant.
    #[error("Julian day {julian_day} is outside the representable time range")]
    InstantOutOfRange { julian_day: f64 },

    /// Engine configuration could not be parsed.
    #[error("Failed to parse configuration: {0}")]
    ConfigParse(String),
}

impl SolunarError {
    /// Creates an `InvalidCoordinate` error.
    pub fn invalid_coordinate(lat: f64, lng: f64, reason: impl Into<String>) -> Self {
        Self::InvalidCoordinate { lat, lng, reason: reason.into() }
    }

    /// Creates an `InvalidConfiguration` error.
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration { reason: reason.into() }
    }
}
