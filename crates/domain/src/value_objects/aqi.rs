//! AQI value object
//!
//! A US Air Quality Index value on the EPA's 0-500 scale.
//!
//! # Examples
//!
//! ```
//! use domain::value_objects::{Aqi, AqiCategory};
//!
//! let aqi = Aqi::new(42).expect("valid AQI");
//! assert_eq!(aqi.category(), AqiCategory::Good);
//!
//! assert!(Aqi::new(501).is_err());
//! assert_eq!(Aqi::clamped(900).value(), 500);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use thiserror::Error;

/// Error returned when an AQI value is above the scale
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("invalid AQI: {0} is out of range (must be 0-500)")]
pub struct InvalidAqi(u16);

/// Air Quality Index value (0-500)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Aqi(u16);

impl Aqi {
    /// Highest reportable index
    pub const MAX: u16 = 500;

    /// Index 0
    pub const ZERO: Self = Self(0);

    /// Create a validated AQI value
    ///
    /// # Errors
    ///
    /// Returns `InvalidAqi` if the value is greater than 500.
    pub const fn new(value: u16) -> Result<Self, InvalidAqi> {
        if value > Self::MAX {
            Err(InvalidAqi(value))
        } else {
            Ok(Self(value))
        }
    }

    /// Create an AQI value, clamping anything above 500
    #[must_use]
    pub const fn clamped(value: u16) -> Self {
        if value > Self::MAX {
            Self(Self::MAX)
        } else {
            Self(value)
        }
    }

    /// Round an interpolated index half away from zero and clamp to 0-500
    ///
    /// NaN maps to 0.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_interpolated(index: f64) -> Self {
        if index.is_nan() {
            return Self::ZERO;
        }
        Self(index.round().clamp(0.0, f64::from(Self::MAX)) as u16)
    }

    /// Get the AQI as a u16
    #[must_use]
    pub const fn value(self) -> u16 {
        self.0
    }

    /// EPA reporting category for this value
    #[must_use]
    pub const fn category(self) -> AqiCategory {
        AqiCategory::from_value(self.0)
    }
}

impl fmt::Display for Aqi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u16> for Aqi {
    type Error = InvalidAqi;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Aqi> for u16 {
    fn from(aqi: Aqi) -> Self {
        aqi.0
    }
}

impl<'de> Deserialize<'de> for Aqi {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = u16::deserialize(deserializer)?;
        Self::new(value).map_err(serde::de::Error::custom)
    }
}

/// EPA AQI reporting category
///
/// The aggregator never applies these; they exist for the display layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AqiCategory {
    /// 0-50
    Good,
    /// 51-100
    Moderate,
    /// 101-150
    UnhealthyForSensitiveGroups,
    /// 151-200
    Unhealthy,
    /// 201-300
    VeryUnhealthy,
    /// 301-500
    Hazardous,
}

impl AqiCategory {
    const fn from_value(value: u16) -> Self {
        match value {
            0..=50 => Self::Good,
            51..=100 => Self::Moderate,
            101..=150 => Self::UnhealthyForSensitiveGroups,
            151..=200 => Self::Unhealthy,
            201..=300 => Self::VeryUnhealthy,
            _ => Self::Hazardous,
        }
    }

    /// Label used in EPA public reporting
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Moderate => "Moderate",
            Self::UnhealthyForSensitiveGroups => "Unhealthy for Sensitive Groups",
            Self::Unhealthy => "Unhealthy",
            Self::VeryUnhealthy => "Very Unhealthy",
            Self::Hazardous => "Hazardous",
        }
    }

    /// EPA colour as `#RRGGBB`
    #[must_use]
    pub const fn color_hex(self) -> &'static str {
        match self {
            Self::Good => "#00E400",
            Self::Moderate => "#FFFF00",
            Self::UnhealthyForSensitiveGroups => "#FF7E00",
            Self::Unhealthy => "#FF0000",
            Self::VeryUnhealthy => "#8F3F97",
            Self::Hazardous => "#7E0023",
        }
    }

    /// Index values covered by the category
    #[must_use]
    pub const fn range(self) -> RangeInclusive<u16> {
        match self {
            Self::Good => 0..=50,
            Self::Moderate => 51..=100,
            Self::UnhealthyForSensitiveGroups => 101..=150,
            Self::Unhealthy => 151..=200,
            Self::VeryUnhealthy => 201..=300,
            Self::Hazardous => 301..=500,
        }
    }
}

impl fmt::Display for AqiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
