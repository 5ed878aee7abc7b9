//! Logging infrastructure
//!
//! Sets up the `tracing` subscriber with a text or JSON formatter.

mod logging;

pub use logging::{LogFormat, LoggingConfig, TelemetryError, init_logging};
