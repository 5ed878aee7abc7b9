//! Application layer - Use cases and orchestration
//!
//! Contains the port definitions the weather wheel depends on and the
//! service that assembles a weather card from them. Adapters in the
//! infrastructure layer implement the ports.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
