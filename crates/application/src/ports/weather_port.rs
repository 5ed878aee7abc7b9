//! Weather service port
//!
//! Defines the interface for current-conditions retrieval.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::value_objects::Coordinates;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

/// Current conditions at a location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    /// When this data was observed
    pub observed_at: DateTime<Utc>,
    /// Feels-like temperature in the provider's configured unit
    pub apparent_temperature: f64,
    /// WMO weather code
    pub weather_code: u8,
    /// Icon code for the condition, empty when the code is unknown
    pub icon: String,
    /// Human-readable condition
    pub condition: String,
    /// UV index
    pub uv_index: f64,
    /// Forecast for the next hour
    pub next_hour: Option<NextHour>,
}

/// Short-term forecast shown beneath the current values
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NextHour {
    /// Feels-like temperature
    pub apparent_temperature: f64,
    /// UV index
    pub uv_index: f64,
}

/// Port for weather service operations
#[allow(clippy::struct_field_names)] // automock generates struct with `get_*` prefixes
#[cfg_attr(test, automock)]
#[async_trait]
pub trait WeatherPort: Send + Sync {
    /// Get current conditions and the next-hour forecast for a location
    async fn get_conditions(
        &self,
        location: &Coordinates,
    ) -> Result<CurrentConditions, ApplicationError>;

    /// Check if the weather service is available
    async fn is_available(&self) -> bool;
}
