//! US Air Quality Index engine
//!
//! Converts raw pollutant concentrations (µg/m³) into the EPA's
//! piecewise-linear AQI scale and reduces the per-pollutant sub-indices to the
//! single reported value.
//!
//! The pipeline runs in three pure steps:
//!
//! 1. [`normalize`] converts a concentration into the unit the EPA table for
//!    that pollutant is expressed in.
//! 2. [`classify`] finds the matching [`Breakpoint`] and interpolates.
//! 3. [`aggregate`] reports the highest sub-index across a [`PollutantReading`].
//!
//! # Examples
//!
//! ```
//! use domain::air_quality::{Pollutant, PollutantReading, compute_aqi};
//!
//! let reading = PollutantReading::new()
//!     .with(Pollutant::Pm25, 35.4)
//!     .with(Pollutant::O3, 108.0);
//!
//! let aqi = compute_aqi(&reading).expect("EPA table covers every pollutant");
//! assert_eq!(aqi.value(), 100);
//! ```

mod aggregator;
mod breakpoint;
mod classifier;
mod error;
mod normalizer;
mod pollutant;

pub use aggregator::{AirQualityReport, PollutantReading, SubIndex, aggregate, compute_aqi};
pub use breakpoint::{Breakpoint, BreakpointTable};
pub use classifier::{Classification, classify, classify_named, sub_index};
pub use error::AqiError;
pub use normalizer::{conversion_divisor, normalize};
pub use pollutant::{ClassificationUnit, Pollutant};
