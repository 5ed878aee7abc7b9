//! Saved-city configuration

use domain::entities::City;
use domain::errors::DomainError;
use domain::value_objects::Coordinates;
use serde::{Deserialize, Serialize};

/// One saved city as written in the config file
///
/// ```toml
/// [[cities]]
/// name = "Gainesville"
/// state_abbr = "FL"
/// latitude = 29.6516
/// longitude = -82.3248
/// timezone = "America/New_York"
/// pinned = true
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityConfig {
    /// City name
    pub name: String,

    /// State or region abbreviation
    #[serde(default)]
    pub state_abbr: String,

    /// Latitude in degrees
    pub latitude: f64,

    /// Longitude in degrees
    pub longitude: f64,

    /// IANA timezone name
    pub timezone: String,

    /// Whether this is the favourite city
    #[serde(default)]
    pub pinned: bool,
}

impl CityConfig {
    /// Validate into a domain city
    ///
    /// # Errors
    ///
    /// Returns a `DomainError` for out-of-range coordinates, an empty name or
    /// an unknown timezone.
    pub fn to_city(&self) -> Result<City, DomainError> {
        City::new(
            self.name.clone(),
            self.state_abbr.clone(),
            Coordinates::new(self.latitude, self.longitude)?,
            self.timezone.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gainesville() -> CityConfig {
        CityConfig {
            name: "Gainesville".to_string(),
            state_abbr: "FL".to_string(),
            latitude: 29.6516,
            longitude: -82.3248,
            timezone: "America/New_York".to_string(),
            pinned: false,
        }
    }

    #[test]
    fn to_city_valid() {
        let city = gainesville().to_city().unwrap();
        assert_eq!(city.display_name(), "Gainesville, FL");
    }

    #[test]
    fn to_city_rejects_bad_coordinates() {
        let config = CityConfig {
            latitude: 120.0,
            ..gainesville()
        };
        assert!(matches!(
            config.to_city(),
            Err(DomainError::InvalidCoordinates { .. })
        ));
    }

    #[test]
    fn to_city_rejects_unknown_timezone() {
        let config = CityConfig {
            timezone: "Mars/Olympus_Mons".to_string(),
            ..gainesville()
        };
        assert!(matches!(
            config.to_city(),
            Err(DomainError::InvalidTimezone(_))
        ));
    }
}
