//! AQI engine errors

use thiserror::Error;

use super::Pollutant;

/// Contract violations raised by the AQI engine
///
/// These indicate a mismatch between the caller and the breakpoint table,
/// never a bad measurement. Unclassifiable measurements are reported through
/// [`Classification::Unclassifiable`](super::Classification::Unclassifiable).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AqiError {
    /// Identifier does not name one of the six pollutants
    #[error("Unknown pollutant: {0}")]
    UnknownPollutant(String),

    /// The table in use has no rows for this pollutant
    #[error("No breakpoints defined for pollutant {0}")]
    MissingBreakpoints(Pollutant),

    /// Breakpoint rows are malformed
    #[error("Invalid breakpoint table for {pollutant}: {reason}")]
    InvalidTable {
        /// Pollutant whose rows failed validation
        pollutant: Pollutant,
        /// What was wrong with them
        reason: String,
    },
}

impl AqiError {
    pub(crate) fn invalid_table(pollutant: Pollutant, reason: impl Into<String>) -> Self {
        Self::InvalidTable {
            pollutant,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_pollutant_message() {
        let err = AqiError::UnknownPollutant("lead".to_string());
        assert_eq!(err.to_string(), "Unknown pollutant: lead");
    }

    #[test]
    fn invalid_table_message() {
        let err = AqiError::invalid_table(Pollutant::Pm10, "rows overlap");
        assert_eq!(
            err.to_string(),
            "Invalid breakpoint table for pm10: rows overlap"
        );
    }
}
