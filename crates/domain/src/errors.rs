//! Domain-level errors

use thiserror::Error;

use crate::air_quality::AqiError;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// AQI engine contract violation
    #[error(transparent)]
    AirQuality(#[from] AqiError),

    /// Latitude or longitude out of range
    #[error("Invalid coordinates: latitude {latitude} must be -90 to 90, longitude {longitude} must be -180 to 180")]
    InvalidCoordinates {
        /// Offending latitude
        latitude: f64,
        /// Offending longitude
        longitude: f64,
    },

    /// Timezone name not found in the IANA database
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::air_quality::Pollutant;

    #[test]
    fn air_quality_error_is_transparent() {
        let err = DomainError::from(AqiError::MissingBreakpoints(Pollutant::So2));
        assert_eq!(err.to_string(), "No breakpoints defined for pollutant so2");
    }

    #[test]
    fn invalid_coordinates_error_message() {
        let err = DomainError::InvalidCoordinates {
            latitude: 91.0,
            longitude: 0.0,
        };
        assert!(err.to_string().contains("latitude 91"));
    }

    #[test]
    fn invalid_timezone_error_message() {
        let err = DomainError::InvalidTimezone("Mars/Olympus".to_string());
        assert_eq!(err.to_string(), "Invalid timezone: Mars/Olympus");
    }

    #[test]
    fn validation_error_message() {
        let err = DomainError::ValidationError("city name is empty".to_string());
        assert_eq!(err.to_string(), "Validation failed: city name is empty");
    }
}
