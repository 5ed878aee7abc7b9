//! The six pollutants covered by the US AQI

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::AqiError;

/// Criteria pollutant identifier
///
/// The set is closed: every breakpoint table and every reading is keyed by
/// exactly these six variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pollutant {
    /// Carbon monoxide
    Co,
    /// Ozone
    O3,
    /// Nitrogen dioxide
    No2,
    /// Sulfur dioxide
    So2,
    /// Fine particulate matter (PM2.5)
    Pm25,
    /// Coarse particulate matter (PM10)
    Pm10,
}

/// Unit a pollutant's breakpoint table is expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationUnit {
    /// Parts per million
    Ppm,
    /// Parts per billion
    Ppb,
    /// Micrograms per cubic metre
    MicrogramsPerCubicMeter,
}

impl ClassificationUnit {
    /// Unit symbol for display
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Ppm => "ppm",
            Self::Ppb => "ppb",
            Self::MicrogramsPerCubicMeter => "µg/m³",
        }
    }
}

impl fmt::Display for ClassificationUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl Pollutant {
    /// Number of pollutants
    pub const COUNT: usize = 6;

    /// Every pollutant, in the order aggregation visits them
    pub const ALL: [Self; Self::COUNT] =
        [Self::Co, Self::O3, Self::No2, Self::So2, Self::Pm25, Self::Pm10];

    /// Short identifier (`co`, `o3`, `no2`, `so2`, `pm25`, `pm10`)
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Co => "co",
            Self::O3 => "o3",
            Self::No2 => "no2",
            Self::So2 => "so2",
            Self::Pm25 => "pm25",
            Self::Pm10 => "pm10",
        }
    }

    /// Human-readable name
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Co => "Carbon monoxide",
            Self::O3 => "Ozone",
            Self::No2 => "Nitrogen dioxide",
            Self::So2 => "Sulfur dioxide",
            Self::Pm25 => "PM2.5",
            Self::Pm10 => "PM10",
        }
    }

    /// Unit the EPA breakpoints for this pollutant use
    #[must_use]
    pub const fn classification_unit(self) -> ClassificationUnit {
        match self {
            Self::Co | Self::O3 => ClassificationUnit::Ppm,
            Self::No2 | Self::So2 => ClassificationUnit::Ppb,
            Self::Pm25 | Self::Pm10 => ClassificationUnit::MicrogramsPerCubicMeter,
        }
    }

    /// Dense index into per-pollutant arrays
    pub(crate) const fn index(self) -> usize {
        match self {
            Self::Co => 0,
            Self::O3 => 1,
            Self::No2 => 2,
            Self::So2 => 3,
            Self::Pm25 => 4,
            Self::Pm10 => 5,
        }
    }
}

impl fmt::Display for Pollutant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Pollutant {
    type Err = AqiError;

    /// Parses the short identifier, case-insensitively, and the field names
    /// used by air-quality providers (`pm2_5`, `ozone`, `sulphur_dioxide`, ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "co" | "carbon_monoxide" => Ok(Self::Co),
            "o3" | "ozone" => Ok(Self::O3),
            "no2" | "nitrogen_dioxide" => Ok(Self::No2),
            "so2" | "sulphur_dioxide" | "sulfur_dioxide" => Ok(Self::So2),
            "pm25" | "pm2_5" | "pm2.5" => Ok(Self::Pm25),
            "pm10" => Ok(Self::Pm10),
            _ => Err(AqiError::UnknownPollutant(s.to_string())),
        }
    }
}
