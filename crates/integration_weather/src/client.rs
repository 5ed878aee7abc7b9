//! Open-Meteo weather client
//!
//! HTTP client for the Open-Meteo forecast and air-quality APIs.

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::models::{
    AirQuality, AirQualityResponse, CurrentConditions, ForecastResponse, HourlyPoint, RawHourly,
    WeatherCode,
};

/// Variables requested from the forecast API `current` block
const CURRENT_VARIABLES: &str = "apparent_temperature,weather_code,uv_index";

/// Variables requested from the forecast API `hourly` block
const HOURLY_VARIABLES: &str = "apparent_temperature,uv_index";

/// Pollutants requested from the air-quality API, all in µg/m³
const AIR_QUALITY_VARIABLES: &str =
    "carbon_monoxide,nitrogen_dioxide,ozone,sulphur_dioxide,pm2_5,pm10";

/// Weather client errors
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Connection to the weather service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to the weather service failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Failed to parse response from weather service
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Invalid coordinates provided
    #[error("Invalid coordinates: latitude must be -90 to 90, longitude must be -180 to 180")]
    InvalidCoordinates,

    /// Service is temporarily unavailable
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,
}

/// Unit for reported temperatures
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    /// Degrees Fahrenheit
    #[default]
    Fahrenheit,
    /// Degrees Celsius
    Celsius,
}

impl TemperatureUnit {
    /// Query parameter value understood by Open-Meteo
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fahrenheit => "fahrenheit",
            Self::Celsius => "celsius",
        }
    }
}

/// Weather service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Open-Meteo forecast API base URL (default: <https://api.open-meteo.com/v1>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Open-Meteo air-quality API base URL
    /// (default: <https://air-quality-api.open-meteo.com/v1>)
    #[serde(default = "default_air_quality_base_url")]
    pub air_quality_base_url: String,

    /// Connection timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Temperature unit (default: fahrenheit)
    #[serde(default)]
    pub temperature_unit: TemperatureUnit,
}

fn default_base_url() -> String {
    "https://api.open-meteo.com/v1".to_string()
}

fn default_air_quality_base_url() -> String {
    "https://air-quality-api.open-meteo.com/v1".to_string()
}

const fn default_timeout() -> u64 {
    30
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            air_quality_base_url: default_air_quality_base_url(),
            timeout_secs: default_timeout(),
            temperature_unit: TemperatureUnit::default(),
        }
    }
}

/// Weather client trait for fetching weather and air-quality data
#[async_trait]
pub trait WeatherClient: Send + Sync {
    /// Get current conditions and the next hourly point for a location
    async fn get_conditions(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<CurrentConditions, WeatherError>;

    /// Get current pollutant concentrations for a location
    async fn get_air_quality(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<AirQuality, WeatherError>;

    /// Check if the weather service is healthy
    async fn is_healthy(&self) -> bool;
}

/// Open-Meteo HTTP client implementation
#[derive(Debug)]
pub struct OpenMeteoClient {
    client: Client,
    config: WeatherConfig,
}

impl OpenMeteoClient {
    /// Create a new Open-Meteo client with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: WeatherConfig) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| WeatherError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Create a new client with default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn with_defaults() -> Result<Self, WeatherError> {
        Self::new(WeatherConfig::default())
    }

    /// Configuration this client was built with
    #[must_use]
    pub const fn config(&self) -> &WeatherConfig {
        &self.config
    }

    /// Validate coordinates
    fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), WeatherError> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(WeatherError::InvalidCoordinates);
        }
        Ok(())
    }

    /// Build the API URL for a conditions request
    ///
    /// No `timezone` parameter is sent, so all times come back in UTC.
    fn build_conditions_url(&self, latitude: f64, longitude: f64) -> String {
        format!(
            "{}/forecast?latitude={}&longitude={}&current={}&hourly={}&forecast_hours=2&temperature_unit={}",
            self.config.base_url,
            latitude,
            longitude,
            CURRENT_VARIABLES,
            HOURLY_VARIABLES,
            self.config.temperature_unit.as_str(),
        )
    }

    /// Build the API URL for an air-quality request
    fn build_air_quality_url(&self, latitude: f64, longitude: f64) -> String {
        format!(
            "{}/air-quality?latitude={}&longitude={}&current={}",
            self.config.air_quality_base_url, latitude, longitude, AIR_QUALITY_VARIABLES,
        )
    }

    /// Issue a GET and decode the JSON body, mapping HTTP failures
    async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, WeatherError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| WeatherError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(WeatherError::RateLimitExceeded);
        }
        if status.is_server_error() {
            return Err(WeatherError::ServiceUnavailable(format!("HTTP {status}")));
        }
        if !status.is_success() {
            return Err(WeatherError::RequestFailed(format!("HTTP {status}")));
        }

        response
            .json()
            .await
            .map_err(|e| WeatherError::ParseError(e.to_string()))
    }

    /// First hourly point strictly after `after`
    fn next_hour(
        hourly: &RawHourly,
        after: DateTime<Utc>,
    ) -> Result<Option<HourlyPoint>, WeatherError> {
        for (i, raw_time) in hourly.time.iter().enumerate() {
            let time = Self::parse_datetime(raw_time)?;
            if time <= after {
                continue;
            }

            let temperature = hourly.apparent_temperature.get(i).copied().flatten();
            let uv = hourly.uv_index.get(i).copied().flatten();
            return Ok(match (temperature, uv) {
                (Some(apparent_temperature), Some(uv_index)) => Some(HourlyPoint {
                    time,
                    apparent_temperature,
                    uv_index,
                }),
                _ => None,
            });
        }

        Ok(None)
    }

    fn parse_conditions(response: &ForecastResponse) -> Result<CurrentConditions, WeatherError> {
        let current = response.current.as_ref().ok_or_else(|| {
            WeatherError::ParseError("No current weather data in response".to_string())
        })?;

        let time = Self::parse_datetime(&current.time)?;
        let next_hour = match &response.hourly {
            Some(hourly) => Self::next_hour(hourly, time)?,
            None => None,
        };

        Ok(CurrentConditions {
            time,
            apparent_temperature: current.apparent_temperature,
            weather_code: WeatherCode(current.weather_code),
            // UV is absent at night for some grid cells
            uv_index: current.uv_index.unwrap_or(0.0),
            next_hour,
        })
    }

    fn parse_air_quality(response: &AirQualityResponse) -> Result<AirQuality, WeatherError> {
        let current = response.current.as_ref().ok_or_else(|| {
            WeatherError::ParseError("No current air-quality data in response".to_string())
        })?;

        Ok(AirQuality {
            time: Self::parse_datetime(&current.time)?,
            carbon_monoxide: current.carbon_monoxide,
            nitrogen_dioxide: current.nitrogen_dioxide,
            ozone: current.ozone,
            sulphur_dioxide: current.sulphur_dioxide,
            pm2_5: current.pm2_5,
            pm10: current.pm10,
        })
    }

    /// Parse datetime string to `DateTime<Utc>`
    fn parse_datetime(s: &str) -> Result<DateTime<Utc>, WeatherError> {
        // Open-Meteo default (2026-02-05T14:00)
        if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M") {
            return Ok(Utc.from_utc_datetime(&dt));
        }

        if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
            return Ok(Utc.from_utc_datetime(&dt));
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(dt.with_timezone(&Utc));
        }

        Err(WeatherError::ParseError(format!(
            "Invalid datetime format: {s}"
        )))
    }
}

#[async_trait]
impl WeatherClient for OpenMeteoClient {
    #[instrument(skip(self), fields(lat = %latitude, lon = %longitude))]
    async fn get_conditions(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<CurrentConditions, WeatherError> {
        Self::validate_coordinates(latitude, longitude)?;

        let url = self.build_conditions_url(latitude, longitude);
        debug!(url = %url, "Fetching current conditions");

        let response: ForecastResponse = self.fetch_json(&url).await?;
        Self::parse_conditions(&response)
    }

    #[instrument(skip(self), fields(lat = %latitude, lon = %longitude))]
    async fn get_air_quality(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<AirQuality, WeatherError> {
        Self::validate_coordinates(latitude, longitude)?;

        let url = self.build_air_quality_url(latitude, longitude);
        debug!(url = %url, "Fetching air quality");

        let response: AirQualityResponse = self.fetch_json(&url).await?;
        Self::parse_air_quality(&response)
    }

    async fn is_healthy(&self) -> bool {
        // Gainesville, FL
        self.get_conditions(29.65, -82.32).await.is_ok()
    }
}
