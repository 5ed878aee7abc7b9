//! Latitude/longitude pair

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::DomainError;

/// A validated point on the globe, in decimal degrees
///
/// Serialized as `{"lat": .., "lon": ..}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinates")]
pub struct Coordinates {
    lat: f64,
    lon: f64,
}

#[derive(Deserialize)]
struct RawCoordinates {
    lat: f64,
    lon: f64,
}

impl TryFrom<RawCoordinates> for Coordinates {
    type Error = DomainError;

    fn try_from(raw: RawCoordinates) -> Result<Self, Self::Error> {
        Self::new(raw.lat, raw.lon)
    }
}

impl Coordinates {
    /// Create validated coordinates
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCoordinates` unless latitude is within
    /// [-90, 90] and longitude within [-180, 180].
    pub fn new(lat: f64, lon: f64) -> Result<Self, DomainError> {
        if (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lon) {
            Ok(Self { lat, lon })
        } else {
            Err(DomainError::InvalidCoordinates {
                latitude: lat,
                longitude: lon,
            })
        }
    }

    /// Latitude in degrees
    #[must_use]
    pub const fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in degrees
    #[must_use]
    pub const fn lon(&self) -> f64 {
        self.lon
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.lat, self.lon)
    }
}
