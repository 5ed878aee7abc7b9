//! Weather wheel card

use serde::{Deserialize, Serialize};

use crate::air_quality::Pollutant;
use crate::value_objects::Aqi;

/// Everything the weather wheel shows for one city
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherCard {
    /// Display name of the location
    pub name: String,
    /// Condition icon code
    pub icon: String,
    /// Current feels-like temperature, rounded
    pub temperature: i32,
    /// Current UV index, rounded
    pub uv: u8,
    /// Reported AQI
    pub aqi: Aqi,
    /// Pollutant that set the AQI, if any
    #[serde(default)]
    pub dominant_pollutant: Option<Pollutant>,
    /// Feels-like temperature in the next hour
    #[serde(default)]
    pub next_temperature: Option<i32>,
    /// UV index in the next hour
    #[serde(default)]
    pub next_uv: Option<u8>,
}

impl WeatherCard {
    /// Next-hour temperature for display, `-` when unknown
    #[must_use]
    pub fn next_temperature_label(&self) -> String {
        self.next_temperature
            .map_or_else(|| "-".to_string(), |t| format!("{t}°"))
    }

    /// Next-hour UV index for display, `-` when unknown
    #[must_use]
    pub fn next_uv_label(&self) -> String {
        self.next_uv
            .map_or_else(|| "-".to_string(), |uv| uv.to_string())
    }

    /// One-line summary
    #[must_use]
    pub fn summary(&self) -> String {
        let dominant = self
            .dominant_pollutant
            .map(|p| format!(", {}", p.display_name()))
            .unwrap_or_default();
        format!(
            "{}: {}° UV {} AQI {} ({}{dominant}) | next {} UV {}",
            self.name,
            self.temperature,
            self.uv,
            self.aqi,
            self.aqi.category(),
            self.next_temperature_label(),
            self.next_uv_label(),
        )
    }
}
