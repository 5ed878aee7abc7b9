//! Weather card service
//!
//! Assembles the weather-wheel card for a city from the weather and
//! air-quality ports, running the AQI engine over the pollutant reading.

use std::sync::Arc;

use domain::air_quality::{AirQualityReport, BreakpointTable, aggregate};
use domain::entities::{City, WeatherCard};
use domain::value_objects::Coordinates;
use futures::future::join_all;
use tracing::{debug, instrument, warn};

use crate::error::ApplicationError;
use crate::ports::{AirQualityPort, CurrentConditions, WeatherPort};

/// Builds weather cards
pub struct WeatherCardService {
    weather: Arc<dyn WeatherPort>,
    air_quality: Arc<dyn AirQualityPort>,
}

impl std::fmt::Debug for WeatherCardService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherCardService").finish_non_exhaustive()
    }
}

impl WeatherCardService {
    /// Create a service over the given ports
    #[must_use]
    pub fn new(weather: Arc<dyn WeatherPort>, air_quality: Arc<dyn AirQualityPort>) -> Self {
        Self {
            weather,
            air_quality,
        }
    }

    /// Build the card for a saved city
    ///
    /// # Errors
    ///
    /// Returns the first failure from either port, or a domain error if the
    /// AQI engine rejects the reading.
    #[instrument(skip(self, city), fields(city = %city.display_name()))]
    pub async fn card_for(&self, city: &City) -> Result<WeatherCard, ApplicationError> {
        self.card_for_location(city.display_name(), &city.location)
            .await
    }

    /// Build a card for an arbitrary location under the given display name
    ///
    /// # Errors
    ///
    /// Same as [`Self::card_for`].
    pub async fn card_for_location(
        &self,
        name: String,
        location: &Coordinates,
    ) -> Result<WeatherCard, ApplicationError> {
        let (conditions, reading) = futures::try_join!(
            self.weather.get_conditions(location),
            self.air_quality.get_pollutants(location),
        )?;

        let report = aggregate(BreakpointTable::epa(), &reading)?;
        debug!(
            aqi = report.aqi().value(),
            pollutants = reading.len(),
            "Built weather card"
        );

        Ok(build_card(name, &conditions, &report))
    }

    /// Build cards for several cities concurrently
    ///
    /// Results come back in input order; a failing city yields an `Err` in
    /// its slot without affecting the others.
    pub async fn cards_for(&self, cities: &[City]) -> Vec<Result<WeatherCard, ApplicationError>> {
        let results = join_all(cities.iter().map(|city| self.card_for(city))).await;

        for (city, result) in cities.iter().zip(&results) {
            if let Err(e) = result {
                warn!(city = %city.display_name(), error = %e, "Failed to build weather card");
            }
        }

        results
    }
}

fn build_card(name: String, conditions: &CurrentConditions, report: &AirQualityReport) -> WeatherCard {
    WeatherCard {
        name,
        icon: conditions.icon.clone(),
        temperature: round_temperature(conditions.apparent_temperature),
        uv: round_uv(conditions.uv_index),
        aqi: report.aqi(),
        dominant_pollutant: report.dominant_pollutant(),
        next_temperature: conditions
            .next_hour
            .map(|next| round_temperature(next.apparent_temperature)),
        next_uv: conditions.next_hour.map(|next| round_uv(next.uv_index)),
    }
}

#[allow(clippy::cast_possible_truncation)]
fn round_temperature(value: f64) -> i32 {
    value
        .round()
        .clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn round_uv(value: f64) -> u8 {
    value.round().clamp(0.0, f64::from(u8::MAX)) as u8
}
