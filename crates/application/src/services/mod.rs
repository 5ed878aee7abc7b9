//! Application services - Use case implementations

mod health_service;
mod weather_card_service;

pub use health_service::{HealthReport, HealthService, ServiceHealth};
pub use weather_card_service::WeatherCardService;
