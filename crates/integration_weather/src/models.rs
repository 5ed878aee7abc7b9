//! Weather and air-quality data models
//!
//! Types for data returned by the Open-Meteo forecast and air-quality APIs.

use chrono::{DateTime, Utc};
use domain::air_quality::{Pollutant, PollutantReading};
use serde::{Deserialize, Serialize};

/// WMO weather interpretation code as reported by Open-Meteo
///
/// See: <https://open-meteo.com/en/docs> for the code table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeatherCode(pub u8);

impl WeatherCode {
    /// Human-readable description, `None` for codes outside the WMO table
    #[must_use]
    pub const fn description(self) -> Option<&'static str> {
        Some(match self.0 {
            0 => "Clear sky",
            1 => "Mainly clear",
            2 => "Partly cloudy",
            3 => "Overcast",
            45 => "Fog",
            48 => "Freezing fog",
            51 => "Light drizzle",
            53 => "Moderate drizzle",
            55 => "Dense drizzle",
            56 => "Light freezing drizzle",
            57 => "Dense freezing drizzle",
            61 => "Slight rain",
            63 => "Moderate rain",
            65 => "Heavy rain",
            66 => "Light freezing rain",
            67 => "Heavy freezing rain",
            71 => "Slight snow",
            73 => "Moderate snow",
            75 => "Heavy snow",
            77 => "Snow grains",
            80 => "Slight rain showers",
            81 => "Moderate rain showers",
            82 => "Violent rain showers",
            85 => "Slight snow showers",
            86 => "Heavy snow showers",
            95 => "Thunderstorm",
            96 => "Thunderstorm with slight hail",
            99 => "Thunderstorm with heavy hail",
            _ => return None,
        })
    }

    /// Icon number in the WeatherAPI icon set the weather wheel draws
    /// (`113` is clear, `122` overcast, ...)
    #[must_use]
    pub const fn icon(self) -> Option<u16> {
        Some(match self.0 {
            0 => 113,
            1 | 2 => 116,
            3 => 122,
            45 => 248,
            48 => 260,
            51 | 53 | 55 => 266,
            56 => 281,
            57 => 284,
            61 => 293,
            63 => 302,
            65 => 308,
            66 => 311,
            67 => 314,
            71 => 323,
            73 => 332,
            75 => 338,
            77 => 350,
            80 => 353,
            81 => 356,
            82 => 359,
            85 => 368,
            86 => 371,
            95 => 386,
            96 => 389,
            99 => 395,
            _ => return None,
        })
    }
}

impl std::fmt::Display for WeatherCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.description() {
            Some(description) => f.write_str(description),
            None => write!(f, "Unknown ({})", self.0),
        }
    }
}

/// One hourly forecast point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HourlyPoint {
    /// Start of the hour (UTC)
    pub time: DateTime<Utc>,
    /// Feels-like temperature in the configured unit
    pub apparent_temperature: f32,
    /// UV index
    pub uv_index: f32,
}

/// Current conditions plus the next hourly point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    /// Observation time (UTC)
    pub time: DateTime<Utc>,
    /// Feels-like temperature in the configured unit
    pub apparent_temperature: f32,
    /// WMO weather code
    pub weather_code: WeatherCode,
    /// UV index
    pub uv_index: f32,
    /// First hourly point after `time`
    pub next_hour: Option<HourlyPoint>,
}

/// Pollutant concentrations in µg/m³; `None` where the provider had no data
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AirQuality {
    /// Observation time (UTC)
    pub time: DateTime<Utc>,
    /// Carbon monoxide
    pub carbon_monoxide: Option<f64>,
    /// Nitrogen dioxide
    pub nitrogen_dioxide: Option<f64>,
    /// Ozone
    pub ozone: Option<f64>,
    /// Sulphur dioxide
    pub sulphur_dioxide: Option<f64>,
    /// PM2.5
    pub pm2_5: Option<f64>,
    /// PM10
    pub pm10: Option<f64>,
}

impl AirQuality {
    /// Concentration for one pollutant
    #[must_use]
    pub const fn concentration(&self, pollutant: Pollutant) -> Option<f64> {
        match pollutant {
            Pollutant::Co => self.carbon_monoxide,
            Pollutant::O3 => self.ozone,
            Pollutant::No2 => self.nitrogen_dioxide,
            Pollutant::So2 => self.sulphur_dioxide,
            Pollutant::Pm25 => self.pm2_5,
            Pollutant::Pm10 => self.pm10,
        }
    }

    /// Reading for the AQI engine; missing pollutants stay missing
    #[must_use]
    pub fn reading(&self) -> PollutantReading {
        Pollutant::ALL
            .into_iter()
            .filter_map(|p| self.concentration(p).map(|c| (p, c)))
            .collect()
    }
}

/// Raw current block from the forecast API
#[derive(Debug, Clone, Deserialize)]
pub struct RawCurrent {
    pub time: String,
    pub apparent_temperature: f32,
    pub weather_code: u8,
    #[serde(default)]
    pub uv_index: Option<f32>,
}

/// Raw hourly block from the forecast API
#[derive(Debug, Clone, Deserialize)]
pub struct RawHourly {
    pub time: Vec<String>,
    pub apparent_temperature: Vec<Option<f32>>,
    pub uv_index: Vec<Option<f32>>,
}

/// Raw forecast API response
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastResponse {
    pub latitude: f64,
    pub longitude: f64,
    pub current: Option<RawCurrent>,
    pub hourly: Option<RawHourly>,
}

/// Raw current block from the air-quality API
#[derive(Debug, Clone, Deserialize)]
pub struct RawAirQuality {
    pub time: String,
    #[serde(default)]
    pub carbon_monoxide: Option<f64>,
    #[serde(default)]
    pub nitrogen_dioxide: Option<f64>,
    #[serde(default)]
    pub ozone: Option<f64>,
    #[serde(default)]
    pub sulphur_dioxide: Option<f64>,
    #[serde(default)]
    pub pm2_5: Option<f64>,
    #[serde(default)]
    pub pm10: Option<f64>,
}

/// Raw air-quality API response
#[derive(Debug, Clone, Deserialize)]
pub struct AirQualityResponse {
    pub latitude: f64,
    pub longitude: f64,
    pub current: Option<RawAirQuality>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weather_code_descriptions() {
        assert_eq!(WeatherCode(0).description(), Some("Clear sky"));
        assert_eq!(WeatherCode(48).description(), Some("Freezing fog"));
        assert_eq!(
            WeatherCode(99).description(),
            Some("Thunderstorm with heavy hail")
        );
        assert_eq!(WeatherCode(4).description(), None);
    }

    #[test]
    fn test_weather_code_icons() {
        assert_eq!(WeatherCode(0).icon(), Some(113));
        assert_eq!(WeatherCode(1).icon(), Some(116));
        assert_eq!(WeatherCode(2).icon(), Some(116));
        assert_eq!(WeatherCode(3).icon(), Some(122));
        assert_eq!(WeatherCode(55).icon(), Some(266));
        assert_eq!(WeatherCode(95).icon(), Some(386));
        assert_eq!(WeatherCode(100).icon(), None);
    }

    #[test]
    fn test_every_described_code_has_an_icon() {
        for code in 0..=u8::MAX {
            let code = WeatherCode(code);
            assert_eq!(code.description().is_some(), code.icon().is_some(), "{code:?}");
        }
    }

    #[test]
    fn test_weather_code_display() {
        assert_eq!(WeatherCode(61).to_string(), "Slight rain");
        assert_eq!(WeatherCode(42).to_string(), "Unknown (42)");
    }

    #[test]
    fn test_air_quality_reading_skips_missing() {
        let air = AirQuality {
            time: Utc::now(),
            carbon_monoxide: Some(220.0),
            nitrogen_dioxide: None,
            ozone: Some(64.0),
            sulphur_dioxide: None,
            pm2_5: Some(9.0),
            pm10: Some(12.5),
        };

        let reading = air.reading();
        assert_eq!(reading.len(), 4);
        assert_eq!(reading.get(Pollutant::Pm25), Some(9.0));
        assert_eq!(reading.get(Pollutant::No2), None);
    }

    #[test]
    fn test_raw_air_quality_tolerates_nulls() {
        let raw: RawAirQuality = serde_json::from_value(serde_json::json!({
            "time": "2025-02-13T20:00",
            "carbon_monoxide": 180.0,
            "ozone": null,
            "pm2_5": 4.2
        }))
        .unwrap();

        assert_eq!(raw.carbon_monoxide, Some(180.0));
        assert_eq!(raw.ozone, None);
        assert_eq!(raw.pm10, None);
    }
}
