//! EPA breakpoint rows and the per-pollutant breakpoint table
//!
//! Values come from the EPA *Technical Assistance Document for the Reporting
//! of Daily Air Quality* (<https://document.airnow.gov/technical-assistance-document-for-the-reporting-of-daily-air-quailty.pdf>).

use std::sync::LazyLock;

use super::{AqiError, Pollutant};
use crate::value_objects::Aqi;

/// One segment of the piecewise-linear concentration to index mapping
///
/// Concentrations are in the pollutant's classification unit. The final
/// segment of every EPA table is open-ended (`c_high` is `+∞`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Breakpoint {
    /// Lowest concentration in the segment
    pub c_low: f64,
    /// Highest concentration in the segment
    pub c_high: f64,
    /// Index at `c_low`
    pub i_low: u16,
    /// Index at `c_high`
    pub i_high: u16,
}

impl Breakpoint {
    /// Create a bounded segment
    #[must_use]
    pub const fn new(c_low: f64, c_high: f64, i_low: u16, i_high: u16) -> Self {
        Self {
            c_low,
            c_high,
            i_low,
            i_high,
        }
    }

    /// Create the open-ended top segment, which tops out at index 500
    #[must_use]
    pub const fn open_ended(c_low: f64, i_low: u16) -> Self {
        Self::new(c_low, f64::INFINITY, i_low, Aqi::MAX)
    }

    /// Whether the segment has no upper concentration bound
    #[must_use]
    pub fn is_open_ended(&self) -> bool {
        self.c_high == f64::INFINITY
    }

    /// Whether `concentration` lies in `[c_low, c_high]`
    #[must_use]
    pub fn contains(&self, concentration: f64) -> bool {
        self.c_low <= concentration && concentration <= self.c_high
    }

    /// Linear interpolation of the index for a concentration in this segment
    ///
    /// The open-ended segment has no finite slope, so it reports its index
    /// floor `i_low` for every concentration it contains.
    #[must_use]
    pub fn interpolate(&self, concentration: f64) -> f64 {
        let span = self.c_high - self.c_low;
        if self.is_open_ended() || span <= 0.0 {
            return f64::from(self.i_low);
        }

        let slope = (f64::from(self.i_high) - f64::from(self.i_low)) / span;
        slope.mul_add(concentration - self.c_low, f64::from(self.i_low))
    }
}

const CO_BREAKPOINTS: [Breakpoint; 6] = [
    Breakpoint::new(0.0, 4.4, 0, 50),
    Breakpoint::new(4.5, 9.4, 51, 100),
    Breakpoint::new(9.5, 12.4, 101, 150),
    Breakpoint::new(12.5, 15.4, 151, 200),
    Breakpoint::new(15.5, 30.4, 201, 300),
    Breakpoint::open_ended(30.5, 301),
];

const O3_BREAKPOINTS: [Breakpoint; 6] = [
    Breakpoint::new(0.0, 0.054, 0, 50),
    Breakpoint::new(0.055, 0.070, 51, 100),
    Breakpoint::new(0.071, 0.085, 101, 150),
    Breakpoint::new(0.086, 0.105, 151, 200),
    Breakpoint::new(0.106, 0.200, 201, 300),
    Breakpoint::open_ended(0.201, 301),
];

const NO2_BREAKPOINTS: [Breakpoint; 6] = [
    Breakpoint::new(0.0, 53.0, 0, 50),
    Breakpoint::new(54.0, 100.0, 51, 100),
    Breakpoint::new(101.0, 360.0, 101, 150),
    Breakpoint::new(361.0, 649.0, 151, 200),
    Breakpoint::new(650.0, 1249.0, 201, 300),
    Breakpoint::open_ended(1250.0, 301),
];

const SO2_BREAKPOINTS: [Breakpoint; 6] = [
    Breakpoint::new(0.0, 35.0, 0, 50),
    Breakpoint::new(36.0, 75.0, 51, 100),
    Breakpoint::new(76.0, 185.0, 101, 150),
    Breakpoint::new(186.0, 304.0, 151, 200),
    Breakpoint::new(305.0, 604.0, 201, 300),
    Breakpoint::open_ended(605.0, 301),
];

const PM25_BREAKPOINTS: [Breakpoint; 6] = [
    Breakpoint::new(0.0, 9.0, 0, 50),
    Breakpoint::new(9.1, 35.4, 51, 100),
    Breakpoint::new(35.5, 55.4, 101, 150),
    Breakpoint::new(55.5, 125.4, 151, 200),
    Breakpoint::new(125.5, 225.4, 201, 300),
    Breakpoint::open_ended(225.5, 301),
];

const PM10_BREAKPOINTS: [Breakpoint; 6] = [
    Breakpoint::new(0.0, 54.0, 0, 50),
    Breakpoint::new(55.0, 154.0, 51, 100),
    Breakpoint::new(155.0, 254.0, 101, 150),
    Breakpoint::new(255.0, 354.0, 151, 200),
    Breakpoint::new(355.0, 424.0, 201, 300),
    Breakpoint::open_ended(425.0, 301),
];

const fn epa_rows(pollutant: Pollutant) -> &'static [Breakpoint] {
    match pollutant {
        Pollutant::Co => &CO_BREAKPOINTS,
        Pollutant::O3 => &O3_BREAKPOINTS,
        Pollutant::No2 => &NO2_BREAKPOINTS,
        Pollutant::So2 => &SO2_BREAKPOINTS,
        Pollutant::Pm25 => &PM25_BREAKPOINTS,
        Pollutant::Pm10 => &PM10_BREAKPOINTS,
    }
}

static EPA_TABLE: LazyLock<BreakpointTable> = LazyLock::new(|| BreakpointTable {
    rows: Pollutant::ALL.map(|pollutant| epa_rows(pollutant).to_vec()),
});

/// Ordered breakpoint rows for each pollutant
///
/// Immutable once built. The EPA table is shared process-wide through
/// [`BreakpointTable::epa`]; other tables can be built with
/// [`BreakpointTable::new`] and passed to the classifier explicitly.
#[derive(Debug, Clone, PartialEq)]
pub struct BreakpointTable {
    rows: [Vec<Breakpoint>; Pollutant::COUNT],
}

impl BreakpointTable {
    /// The EPA table: six pollutants, six rows each
    #[must_use]
    pub fn epa() -> &'static Self {
        &EPA_TABLE
    }

    /// Build a table from per-pollutant rows
    ///
    /// Pollutants that are not supplied have no rows; classifying them fails
    /// with [`AqiError::MissingBreakpoints`].
    ///
    /// # Errors
    ///
    /// Returns [`AqiError::InvalidTable`] if a pollutant is supplied twice or
    /// its rows are empty, inverted, unsorted, overlapping, exceed index 500,
    /// or contain an open-ended row anywhere but last. Adjacent rows may
    /// share an edge.
    pub fn new(
        entries: impl IntoIterator<Item = (Pollutant, Vec<Breakpoint>)>,
    ) -> Result<Self, AqiError> {
        let mut rows: [Vec<Breakpoint>; Pollutant::COUNT] = Default::default();

        for (pollutant, breakpoints) in entries {
            validate_rows(pollutant, &breakpoints)?;
            let slot = &mut rows[pollutant.index()];
            if !slot.is_empty() {
                return Err(AqiError::invalid_table(pollutant, "supplied more than once"));
            }
            *slot = breakpoints;
        }

        Ok(Self { rows })
    }

    /// Rows for a pollutant, empty when the table does not cover it
    #[must_use]
    pub fn breakpoints(&self, pollutant: Pollutant) -> &[Breakpoint] {
        &self.rows[pollutant.index()]
    }

    /// Whether the table has rows for a pollutant
    #[must_use]
    pub fn covers(&self, pollutant: Pollutant) -> bool {
        !self.breakpoints(pollutant).is_empty()
    }

    /// Covered pollutants with their rows, in [`Pollutant::ALL`] order
    pub fn iter(&self) -> impl Iterator<Item = (Pollutant, &[Breakpoint])> {
        Pollutant::ALL
            .into_iter()
            .map(|pollutant| (pollutant, self.breakpoints(pollutant)))
            .filter(|(_, rows)| !rows.is_empty())
    }
}

fn validate_rows(pollutant: Pollutant, rows: &[Breakpoint]) -> Result<(), AqiError> {
    if rows.is_empty() {
        return Err(AqiError::invalid_table(pollutant, "no rows"));
    }

    let last = rows.len() - 1;
    for (i, row) in rows.iter().enumerate() {
        // Written so that NaN bounds fail too
        if !(row.c_low >= 0.0 && row.c_low <= row.c_high) {
            return Err(AqiError::invalid_table(
                pollutant,
                format!("row {i} has concentration bounds {} > {}", row.c_low, row.c_high),
            ));
        }
        if row.i_low > row.i_high || row.i_high > Aqi::MAX {
            return Err(AqiError::invalid_table(
                pollutant,
                format!("row {i} has index bounds {}-{}", row.i_low, row.i_high),
            ));
        }
        if row.is_open_ended() && i != last {
            return Err(AqiError::invalid_table(
                pollutant,
                format!("row {i} is open-ended but not last"),
            ));
        }
    }

    for (i, pair) in rows.windows(2).enumerate() {
        let (lower, upper) = (&pair[0], &pair[1]);
        // A shared edge is allowed; the lower row claims it
        if lower.c_high > upper.c_low || lower.i_high >= upper.i_low {
            return Err(AqiError::invalid_table(
                pollutant,
                format!("rows {i} and {} overlap or are out of order", i + 1),
            ));
        }
    }

    Ok(())
}
