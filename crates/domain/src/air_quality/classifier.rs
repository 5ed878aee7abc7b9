//! Breakpoint classifier
//!
//! Maps a normalized concentration onto the AQI scale:
//!
//! ```text
//! AQI = round((I_high - I_low) / (C_high - C_low) * (C - C_low) + I_low)
//! ```
//!
//! Rows are scanned in ascending order and the first row whose inclusive
//! bounds contain the concentration wins, so a value on a shared edge lands
//! in the lower row. Rounding is half away from zero.

use super::{AqiError, Breakpoint, BreakpointTable, Pollutant, normalize};
use crate::value_objects::Aqi;

/// Outcome of classifying one concentration
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Classification {
    /// The concentration mapped to an index
    Indexed(Aqi),
    /// No row matched the concentration (negative, NaN, or outside a
    /// partial table). Never a real AQI.
    Unclassifiable {
        /// The normalized concentration that failed to match
        concentration: f64,
    },
}

impl Classification {
    /// The index, if one was found
    #[must_use]
    pub const fn aqi(&self) -> Option<Aqi> {
        match self {
            Self::Indexed(aqi) => Some(*aqi),
            Self::Unclassifiable { .. } => None,
        }
    }

    /// Whether the concentration mapped to an index
    #[must_use]
    pub const fn is_indexed(&self) -> bool {
        matches!(self, Self::Indexed(_))
    }

    /// Integer form used by callers that expect `-1` for unclassifiable
    #[must_use]
    pub fn sentinel_value(&self) -> i32 {
        match self {
            Self::Indexed(aqi) => i32::from(aqi.value()),
            Self::Unclassifiable { .. } => -1,
        }
    }
}

/// Classify a concentration already expressed in the pollutant's
/// classification unit
///
/// A concentration that falls in the resolution gap between one row's
/// `c_high` and the next row's `c_low` (for example PM2.5 at 9.05 µg/m³)
/// is reported as the lower row's `i_high`, the value EPA truncation to
/// table precision gives.
///
/// # Errors
///
/// Returns [`AqiError::MissingBreakpoints`] if `table` has no rows for
/// `pollutant`.
pub fn classify(
    table: &BreakpointTable,
    pollutant: Pollutant,
    concentration: f64,
) -> Result<Classification, AqiError> {
    let rows = table.breakpoints(pollutant);
    if rows.is_empty() {
        return Err(AqiError::MissingBreakpoints(pollutant));
    }
    Ok(locate(rows, concentration))
}

/// Classify by pollutant identifier
///
/// # Errors
///
/// Returns [`AqiError::UnknownPollutant`] if `pollutant` is not one of the
/// six identifiers, or [`AqiError::MissingBreakpoints`] as [`classify`].
pub fn classify_named(
    table: &BreakpointTable,
    pollutant: &str,
    concentration: f64,
) -> Result<Classification, AqiError> {
    classify(table, pollutant.parse()?, concentration)
}

/// Normalize a raw µg/m³ concentration, then classify it
///
/// # Errors
///
/// Same as [`classify`].
pub fn sub_index(
    table: &BreakpointTable,
    pollutant: Pollutant,
    micrograms_per_m3: f64,
) -> Result<Classification, AqiError> {
    classify(table, pollutant, normalize(pollutant, micrograms_per_m3))
}

fn locate(rows: &[Breakpoint], concentration: f64) -> Classification {
    for (i, row) in rows.iter().enumerate() {
        if row.contains(concentration) {
            return Classification::Indexed(Aqi::from_interpolated(row.interpolate(concentration)));
        }

        let in_gap = rows
            .get(i + 1)
            .is_some_and(|next| concentration > row.c_high && concentration < next.c_low);
        if in_gap {
            return Classification::Indexed(Aqi::clamped(row.i_high));
        }
    }

    Classification::Unclassifiable { concentration }
}
