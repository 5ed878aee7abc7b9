//! Air-quality service port

use async_trait::async_trait;
use domain::air_quality::PollutantReading;
use domain::value_objects::Coordinates;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for pollutant concentration lookups
///
/// Implementations report concentrations in µg/m³ and leave out any
/// pollutant the provider has no value for.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AirQualityPort: Send + Sync {
    /// Get current pollutant concentrations for a location
    async fn get_pollutants(
        &self,
        location: &Coordinates,
    ) -> Result<PollutantReading, ApplicationError>;

    /// Check if the air-quality service is available
    async fn is_available(&self) -> bool;
}
