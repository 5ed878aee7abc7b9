//! Aggregator: reduce per-pollutant sub-indices to the reported AQI
//!
//! The reported AQI is the highest sub-index across the measured pollutants.
//! Pollutants without a reading are skipped rather than counted as zero.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{AqiError, BreakpointTable, Classification, Pollutant, classify, normalize};
use crate::value_objects::Aqi;

/// Raw concentrations (µg/m³) for one location at one instant
///
/// Holds at most one value per pollutant.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PollutantReading {
    values: [Option<f64>; Pollutant::COUNT],
}

impl PollutantReading {
    /// An empty reading
    #[must_use]
    pub const fn new() -> Self {
        Self {
            values: [None; Pollutant::COUNT],
        }
    }

    /// Builder-style [`set`](Self::set)
    #[must_use]
    pub const fn with(mut self, pollutant: Pollutant, micrograms_per_m3: f64) -> Self {
        self.values[pollutant.index()] = Some(micrograms_per_m3);
        self
    }

    /// Record a concentration, replacing any previous value
    pub fn set(&mut self, pollutant: Pollutant, micrograms_per_m3: f64) {
        self.values[pollutant.index()] = Some(micrograms_per_m3);
    }

    /// Forget a pollutant's concentration
    pub fn remove(&mut self, pollutant: Pollutant) -> Option<f64> {
        self.values[pollutant.index()].take()
    }

    /// Concentration for a pollutant, if measured
    #[must_use]
    pub const fn get(&self, pollutant: Pollutant) -> Option<f64> {
        self.values[pollutant.index()]
    }

    /// Measured pollutants in [`Pollutant::ALL`] order
    pub fn iter(&self) -> impl Iterator<Item = (Pollutant, f64)> + '_ {
        Pollutant::ALL
            .into_iter()
            .filter_map(|pollutant| self.get(pollutant).map(|value| (pollutant, value)))
    }

    /// Number of measured pollutants
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.iter().flatten().count()
    }

    /// Whether nothing was measured
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.iter().all(Option::is_none)
    }
}

impl FromIterator<(Pollutant, f64)> for PollutantReading {
    fn from_iter<I: IntoIterator<Item = (Pollutant, f64)>>(iter: I) -> Self {
        let mut reading = Self::new();
        for (pollutant, value) in iter {
            reading.set(pollutant, value);
        }
        reading
    }
}

/// One pollutant's contribution to a report
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubIndex {
    /// Pollutant measured
    pub pollutant: Pollutant,
    /// Raw concentration in µg/m³
    pub concentration: f64,
    /// Concentration in the pollutant's classification unit
    pub normalized: f64,
    /// Classified index
    pub aqi: Aqi,
}

/// Result of aggregating a [`PollutantReading`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AirQualityReport {
    aqi: Aqi,
    dominant: Option<Pollutant>,
    sub_indices: Vec<SubIndex>,
    unclassifiable: Vec<Pollutant>,
}

impl AirQualityReport {
    /// Reported AQI: the highest sub-index, 0 when nothing was classified
    #[must_use]
    pub const fn aqi(&self) -> Aqi {
        self.aqi
    }

    /// Pollutant whose sub-index set the reported AQI
    ///
    /// `None` when no pollutant scored above 0. Ties keep the pollutant that
    /// comes first in [`Pollutant::ALL`].
    #[must_use]
    pub const fn dominant_pollutant(&self) -> Option<Pollutant> {
        self.dominant
    }

    /// Every classified sub-index, in [`Pollutant::ALL`] order
    #[must_use]
    pub fn sub_indices(&self) -> &[SubIndex] {
        &self.sub_indices
    }

    /// Sub-index for one pollutant
    #[must_use]
    pub fn sub_index(&self, pollutant: Pollutant) -> Option<&SubIndex> {
        self.sub_indices.iter().find(|s| s.pollutant == pollutant)
    }

    /// Measured pollutants whose concentration matched no breakpoint
    #[must_use]
    pub fn unclassifiable(&self) -> &[Pollutant] {
        &self.unclassifiable
    }

    /// Whether every measured pollutant was classified
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.unclassifiable.is_empty()
    }
}

/// Aggregate a reading against `table`
///
/// Unclassifiable sub-indices are logged and listed in the report but never
/// raise the reported AQI.
///
/// # Errors
///
/// Returns [`AqiError::MissingBreakpoints`] if the reading contains a
/// pollutant the table does not cover.
pub fn aggregate(
    table: &BreakpointTable,
    reading: &PollutantReading,
) -> Result<AirQualityReport, AqiError> {
    let mut report = AirQualityReport::default();

    for pollutant in Pollutant::ALL {
        let Some(concentration) = reading.get(pollutant) else {
            continue;
        };

        let normalized = normalize(pollutant, concentration);
        match classify(table, pollutant, normalized)? {
            Classification::Indexed(aqi) => {
                if aqi > report.aqi {
                    report.aqi = aqi;
                    report.dominant = Some(pollutant);
                }
                report.sub_indices.push(SubIndex {
                    pollutant,
                    concentration,
                    normalized,
                    aqi,
                });
            },
            Classification::Unclassifiable { concentration: c } => {
                warn!(
                    pollutant = %pollutant,
                    concentration,
                    normalized = c,
                    "Concentration matched no breakpoint, excluded from AQI"
                );
                report.unclassifiable.push(pollutant);
            },
        }
    }

    debug!(
        aqi = report.aqi.value(),
        dominant = ?report.dominant,
        measured = reading.len(),
        "Aggregated air quality"
    );

    Ok(report)
}

/// Reported AQI for a reading using the EPA table
///
/// # Errors
///
/// Only fails if the EPA table were missing a pollutant, which its
/// construction rules out.
pub fn compute_aqi(reading: &PollutantReading) -> Result<Aqi, AqiError> {
    aggregate(BreakpointTable::epa(), reading).map(|report| report.aqi())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::air_quality::Breakpoint;

    #[test]
    fn empty_reading_reports_zero() {
        let report = aggregate(BreakpointTable::epa(), &PollutantReading::new()).unwrap();
        assert_eq!(report.aqi().value(), 0);
        assert_eq!(report.dominant_pollutant(), None);
        assert!(report.sub_indices().is_empty());
        assert!(report.is_complete());
    }

    #[test]
    fn reports_worst_pollutant() {
        let reading = PollutantReading::new()
            .with(Pollutant::Pm25, 35.4)
            .with(Pollutant::O3, 0.054 * 2000.0);

        let report = aggregate(BreakpointTable::epa(), &reading).unwrap();
        assert_eq!(report.aqi().value(), 100);
        assert_eq!(report.dominant_pollutant(), Some(Pollutant::Pm25));
        assert_eq!(report.sub_index(Pollutant::O3).map(|s| s.aqi.value()), Some(50));
        assert_eq!(report.sub_indices().len(), 2);
    }

    #[test]
    fn missing_pollutants_are_skipped_not_zeroed() {
        let reading = PollutantReading::new().with(Pollutant::Pm10, 100.0);
        let report = aggregate(BreakpointTable::epa(), &reading).unwrap();
        assert_eq!(report.sub_indices().len(), 1);
        assert!(report.sub_index(Pollutant::Co).is_none());
    }

    #[test]
    fn all_clean_reading_has_no_dominant() {
        let reading: PollutantReading = Pollutant::ALL.iter().map(|p| (*p, 0.0)).collect();
        let report = aggregate(BreakpointTable::epa(), &reading).unwrap();
        assert_eq!(report.aqi().value(), 0);
        assert_eq!(report.dominant_pollutant(), None);
        assert_eq!(report.sub_indices().len(), 6);
    }

    #[test]
    fn ties_keep_first_pollutant() {
        // pm25 9.0 and pm10 54 both classify to 50
        let reading = PollutantReading::new()
            .with(Pollutant::Pm10, 54.0)
            .with(Pollutant::Pm25, 9.0);
        let report = aggregate(BreakpointTable::epa(), &reading).unwrap();
        assert_eq!(report.aqi().value(), 50);
        assert_eq!(report.dominant_pollutant(), Some(Pollutant::Pm25));
    }

    #[test]
    fn unclassifiable_is_reported_not_counted() {
        let reading = PollutantReading::new()
            .with(Pollutant::Pm25, -5.0)
            .with(Pollutant::Pm10, 27.0);
        let report = aggregate(BreakpointTable::epa(), &reading).unwrap();
        assert_eq!(report.aqi().value(), 25);
        assert_eq!(report.unclassifiable(), &[Pollutant::Pm25]);
        assert!(!report.is_complete());
    }

    #[test]
    fn uncovered_pollutant_propagates_error() {
        let table = BreakpointTable::new([(
            Pollutant::Pm25,
            vec![Breakpoint::new(0.0, 9.0, 0, 50)],
        )])
        .unwrap();
        let reading = PollutantReading::new()
            .with(Pollutant::Pm25, 1.0)
            .with(Pollutant::So2, 1.0);

        assert_eq!(
            aggregate(&table, &reading),
            Err(AqiError::MissingBreakpoints(Pollutant::So2))
        );
    }

    #[test]
    fn sub_index_records_normalized_value() {
        let reading = PollutantReading::new().with(Pollutant::Co, 1240.0);
        let report = aggregate(BreakpointTable::epa(), &reading).unwrap();
        let co = report.sub_index(Pollutant::Co).unwrap();
        assert!((co.concentration - 1240.0).abs() < f64::EPSILON);
        assert!((co.normalized - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn compute_aqi_uses_epa_table() {
        let reading = PollutantReading::new().with(Pollutant::Pm25, 9.1);
        assert_eq!(compute_aqi(&reading).unwrap().value(), 51);
    }

    #[test]
    fn reading_accessors() {
        let mut reading = PollutantReading::new();
        assert!(reading.is_empty());

        reading.set(Pollutant::No2, 20.0);
        reading.set(Pollutant::No2, 30.0);
        assert_eq!(reading.len(), 1);
        assert_eq!(reading.get(Pollutant::No2), Some(30.0));

        assert_eq!(reading.remove(Pollutant::No2), Some(30.0));
        assert!(reading.is_empty());
    }

    #[test]
    fn reading_iterates_in_pollutant_order() {
        let reading = PollutantReading::new()
            .with(Pollutant::Pm10, 1.0)
            .with(Pollutant::Co, 2.0);
        let order: Vec<_> = reading.iter().map(|(p, _)| p).collect();
        assert_eq!(order, vec![Pollutant::Co, Pollutant::Pm10]);
    }
}
