//! Open-Meteo weather and air-quality integration
//!
//! Client for the Open-Meteo forecast API (<https://open-meteo.com>) and its
//! air-quality API. Provides current conditions, the next hourly point, and
//! pollutant concentrations in µg/m³ without requiring an API key.

pub mod client;
mod models;

pub use client::{OpenMeteoClient, TemperatureUnit, WeatherClient, WeatherConfig, WeatherError};
pub use models::{AirQuality, CurrentConditions, HourlyPoint, WeatherCode};
