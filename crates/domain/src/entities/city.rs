//! Saved city entity

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;
use crate::value_objects::Coordinates;

/// A city the user has saved
///
/// Two cities are the same city when name, state, exact coordinates and
/// timezone all match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCity")]
pub struct City {
    /// City name, e.g. "Gainesville"
    pub name: String,
    /// State or region abbreviation, e.g. "FL"
    pub state_abbr: String,
    /// Where the city is
    pub location: Coordinates,
    /// IANA timezone name, e.g. "America/New_York"
    pub timezone: String,
}

#[derive(Deserialize)]
struct RawCity {
    name: String,
    #[serde(default)]
    state_abbr: String,
    location: Coordinates,
    timezone: String,
}

impl TryFrom<RawCity> for City {
    type Error = DomainError;

    fn try_from(raw: RawCity) -> Result<Self, Self::Error> {
        Self::new(raw.name, raw.state_abbr, raw.location, raw.timezone)
    }
}

impl City {
    /// Create a city
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ValidationError` for an empty name and
    /// `DomainError::InvalidTimezone` for an unknown timezone.
    pub fn new(
        name: impl Into<String>,
        state_abbr: impl Into<String>,
        location: Coordinates,
        timezone: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let city = Self {
            name: name.into(),
            state_abbr: state_abbr.into(),
            location,
            timezone: timezone.into(),
        };

        if city.name.trim().is_empty() {
            return Err(DomainError::ValidationError(
                "city name must not be empty".to_string(),
            ));
        }
        city.tz()?;

        Ok(city)
    }

    /// "Name, ST", or just the name when there is no state
    #[must_use]
    pub fn display_name(&self) -> String {
        if self.state_abbr.is_empty() {
            self.name.clone()
        } else {
            format!("{}, {}", self.name, self.state_abbr)
        }
    }

    /// Parsed timezone
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTimezone` if the name is not in the IANA database.
    pub fn tz(&self) -> Result<Tz, DomainError> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| DomainError::InvalidTimezone(self.timezone.clone()))
    }

    /// Wall-clock time in the city as `hh:mm AM`
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTimezone` if the timezone is unknown.
    pub fn local_time(&self, now: DateTime<Utc>) -> Result<String, DomainError> {
        let tz = self.tz()?;
        Ok(now.with_timezone(&tz).format("%I:%M %p").to_string())
    }
}
