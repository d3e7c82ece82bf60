//! Human-readable weather conditions derived from WMO weather codes.
//!
//! # Examples
//! ```
//! use mealcast_core::Condition;
//!
//! assert_eq!(Condition::from_code(63), Condition::Rain);
//! assert_eq!(Condition::from_code(999).as_str(), "cloudy");
//! ```

use serde::{Deserialize, Serialize};

/// Broad weather condition shown to diners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Condition {
    /// Clear sky.
    Clear,
    /// Partly cloudy or overcast. Also used for unmapped codes.
    Cloudy,
    /// Fog or depositing rime fog.
    Fog,
    /// Drizzle, rain, or freezing rain.
    Rain,
    /// Snowfall, snow grains, or snow showers.
    Snow,
}

impl Condition {
    /// Map a WMO weather interpretation code onto a condition.
    ///
    /// Codes outside the documented sets fall back to [`Condition::Cloudy`].
    #[must_use]
    pub const fn from_code(code: i32) -> Self {
        match code {
            0 => Self::Clear,
            45 | 48 => Self::Fog,
            51 | 53 | 55 | 56 | 57 | 61 | 63 | 65 | 66 | 67 => Self::Rain,
            71 | 73 | 75 | 77 | 85 | 86 => Self::Snow,
            _ => Self::Cloudy,
        }
    }

    /// Return the condition as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Clear => "clear",
            Self::Cloudy => "cloudy",
            Self::Fog => "fog",
            Self::Rain => "rain",
            Self::Snow => "snow",
        }
    }

    /// Report whether the condition brings precipitation people shelter from.
    #[must_use]
    pub const fn is_wet(self) -> bool {
        matches!(self, Self::Rain | Self::Snow)
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Condition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "clear" => Ok(Self::Clear),
            "cloudy" => Ok(Self::Cloudy),
            "fog" => Ok(Self::Fog),
            "rain" => Ok(Self::Rain),
            "snow" => Ok(Self::Snow),
            _ => Err(format!("unknown condition '{s}'")),
        }
    }
}
