//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod open_meteo_adapter;

pub use open_meteo_adapter::OpenMeteoAdapter;
