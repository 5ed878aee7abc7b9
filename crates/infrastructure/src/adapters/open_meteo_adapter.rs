//! Open-Meteo adapter - Implements the weather and air-quality ports using
//! integration_weather

use application::error::ApplicationError;
use application::ports::{AirQualityPort, CurrentConditions, NextHour, WeatherPort};
use async_trait::async_trait;
use domain::air_quality::PollutantReading;
use domain::value_objects::Coordinates;
use integration_weather::{
    CurrentConditions as IntegrationConditions, OpenMeteoClient, WeatherClient, WeatherConfig,
    WeatherError,
};
use tracing::{debug, instrument};

/// Adapter for weather and air-quality data from the Open-Meteo APIs
pub struct OpenMeteoAdapter {
    client: OpenMeteoClient,
}

impl std::fmt::Debug for OpenMeteoAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenMeteoAdapter")
            .field("base_url", &self.client.config().base_url)
            .field(
                "air_quality_base_url",
                &self.client.config().air_quality_base_url,
            )
            .finish()
    }
}

impl OpenMeteoAdapter {
    /// Create a new adapter with default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn new() -> Result<Self, ApplicationError> {
        Self::with_config(WeatherConfig::default())
    }

    /// Create with custom configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn with_config(config: WeatherConfig) -> Result<Self, ApplicationError> {
        let client =
            OpenMeteoClient::new(config).map_err(|e| ApplicationError::Internal(e.to_string()))?;
        Ok(Self { client })
    }

    /// Map integration weather error to application error
    fn map_error(err: WeatherError) -> ApplicationError {
        match err {
            WeatherError::ConnectionFailed(e) | WeatherError::RequestFailed(e) => {
                ApplicationError::ExternalService(e)
            },
            WeatherError::ServiceUnavailable(e) => {
                ApplicationError::ExternalService(format!("Open-Meteo unavailable: {e}"))
            },
            WeatherError::ParseError(e) => ApplicationError::Internal(e),
            WeatherError::InvalidCoordinates => {
                ApplicationError::InvalidOperation("Invalid coordinates".into())
            },
            WeatherError::RateLimitExceeded => ApplicationError::RateLimited,
        }
    }

    /// Convert integration conditions to application conditions
    fn map_conditions(conditions: &IntegrationConditions) -> CurrentConditions {
        CurrentConditions {
            observed_at: conditions.time,
            apparent_temperature: f64::from(conditions.apparent_temperature),
            weather_code: conditions.weather_code.0,
            icon: conditions
                .weather_code
                .icon()
                .map(|icon| icon.to_string())
                .unwrap_or_default(),
            condition: conditions.weather_code.to_string(),
            uv_index: f64::from(conditions.uv_index),
            next_hour: conditions.next_hour.map(|next| NextHour {
                apparent_temperature: f64::from(next.apparent_temperature),
                uv_index: f64::from(next.uv_index),
            }),
        }
    }
}

#[async_trait]
impl WeatherPort for OpenMeteoAdapter {
    #[instrument(skip(self), fields(lat = location.lat(), lon = location.lon()))]
    async fn get_conditions(
        &self,
        location: &Coordinates,
    ) -> Result<CurrentConditions, ApplicationError> {
        let result = self
            .client
            .get_conditions(location.lat(), location.lon())
            .await
            .map_err(Self::map_error);

        match &result {
            Ok(conditions) => {
                debug!(
                    temperature = conditions.apparent_temperature,
                    condition = %conditions.weather_code,
                    "Retrieved current conditions"
                );
            },
            Err(e) => {
                debug!(error = %e, "Failed to get current conditions");
            },
        }

        result.map(|c| Self::map_conditions(&c))
    }

    #[instrument(skip(self))]
    async fn is_available(&self) -> bool {
        self.client.is_healthy().await
    }
}

#[async_trait]
impl AirQualityPort for OpenMeteoAdapter {
    #[instrument(skip(self), fields(lat = location.lat(), lon = location.lon()))]
    async fn get_pollutants(
        &self,
        location: &Coordinates,
    ) -> Result<PollutantReading, ApplicationError> {
        let result = self
            .client
            .get_air_quality(location.lat(), location.lon())
            .await
            .map_err(Self::map_error);

        match &result {
            Ok(air) => {
                debug!(pollutants = air.reading().len(), "Retrieved air quality");
            },
            Err(e) => {
                debug!(error = %e, "Failed to get air quality");
            },
        }

        result.map(|air| air.reading())
    }

    #[instrument(skip(self))]
    async fn is_available(&self) -> bool {
        // Berlin
        self.client.get_air_quality(52.52, 13.41).await.is_ok()
    }
}
