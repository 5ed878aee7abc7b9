//! Domain layer for Nobs Weather
//!
//! Contains the US EPA Air Quality Index engine together with the value
//! objects and entities shared by the rest of the workspace. Nothing in this
//! crate performs I/O.

pub mod air_quality;
pub mod entities;
pub mod errors;
pub mod value_objects;

pub use air_quality::{
    AirQualityReport, AqiError, Breakpoint, BreakpointTable, Classification, ClassificationUnit,
    Pollutant, PollutantReading, SubIndex, aggregate, classify, classify_named, compute_aqi,
    normalize, sub_index,
};
pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
