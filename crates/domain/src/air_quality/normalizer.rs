//! Unit normalizer
//!
//! Providers report every pollutant in µg/m³. The EPA tables use ppm for
//! CO and O3 and ppb for NO2 and SO2, so those four are divided by a fixed
//! mass-to-volume factor (25 °C, 1 atm). Particulates pass through unchanged.

use super::Pollutant;

/// µg/m³ of CO per ppm
const CO_UG_PER_PPM: f64 = 1240.0;
/// µg/m³ of O3 per ppm
const O3_UG_PER_PPM: f64 = 2000.0;
/// µg/m³ of NO2 per ppb
const NO2_UG_PER_PPB: f64 = 1.88;
/// µg/m³ of SO2 per ppb
const SO2_UG_PER_PPB: f64 = 2.62;

/// Divisor applied to a µg/m³ concentration, `None` for particulates
#[must_use]
pub const fn conversion_divisor(pollutant: Pollutant) -> Option<f64> {
    match pollutant {
        Pollutant::Co => Some(CO_UG_PER_PPM),
        Pollutant::O3 => Some(O3_UG_PER_PPM),
        Pollutant::No2 => Some(NO2_UG_PER_PPB),
        Pollutant::So2 => Some(SO2_UG_PER_PPB),
        Pollutant::Pm25 | Pollutant::Pm10 => None,
    }
}

/// Convert a µg/m³ concentration into the pollutant's classification unit
///
/// The concentration is expected to be non-negative; negative input is not
/// checked here and will be reported as unclassifiable by the classifier.
#[must_use]
pub fn normalize(pollutant: Pollutant, micrograms_per_m3: f64) -> f64 {
    conversion_divisor(pollutant).map_or(micrograms_per_m3, |divisor| {
        micrograms_per_m3 / divisor
    })
}
