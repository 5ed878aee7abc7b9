//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer and owns the process
//! plumbing: configuration loading and logging setup.

pub mod adapters;
pub mod config;
pub mod telemetry;

pub use adapters::*;
pub use config::{AppConfig, CityConfig};
pub use telemetry::{LogFormat, LoggingConfig, TelemetryError, init_logging};
