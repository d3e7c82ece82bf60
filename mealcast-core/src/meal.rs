//! Meal periods derived from local wall-clock time.
//!
//! Boundaries are half-open on the hour: breakfast runs from 05:00 up to
//! 10:00, lunch from 10:00 up to 16:00, and dinner from 16:00 up to 22:00.
//! Everything else is [`MealPeriod::OffHours`].
//!
//! # Examples
//! ```
//! use chrono::{TimeZone, Utc};
//! use mealcast_core::{MealClock, MealPeriod};
//!
//! let clock = MealClock::new(chrono_tz::America::New_York);
//! // 15:30 UTC is 11:30 in New York during daylight saving time.
//! let now = Utc.with_ymd_and_hms(2024, 7, 1, 15, 30, 0).unwrap();
//! assert_eq!(clock.period_at(now), MealPeriod::Lunch);
//! ```

use chrono::{DateTime, NaiveDate, Timelike, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Time zone used when none is configured.
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::America::New_York;

/// Meal period used to query menus and shown to diners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MealPeriod {
    /// 05:00 to 09:59.
    Breakfast,
    /// 10:00 to 15:59.
    Lunch,
    /// 16:00 to 21:59.
    Dinner,
    /// Outside the staffed meal windows.
    OffHours,
}

impl MealPeriod {
    /// Classify a local hour in `0..24`.
    #[must_use]
    pub const fn from_hour(hour: u32) -> Self {
        match hour {
            5..=9 => Self::Breakfast,
            10..=15 => Self::Lunch,
            16..=21 => Self::Dinner,
            _ => Self::OffHours,
        }
    }

    /// Return the period label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Breakfast => "breakfast",
            Self::Lunch => "lunch",
            Self::Dinner => "dinner",
            Self::OffHours => "off-hours",
        }
    }
}

impl std::fmt::Display for MealPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maps instants onto meal periods in a fixed time zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MealClock {
    timezone: Tz,
}

impl Default for MealClock {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEZONE)
    }
}

impl MealClock {
    /// Create a clock for `timezone`.
    #[must_use]
    pub const fn new(timezone: Tz) -> Self {
        Self { timezone }
    }

    /// Time zone the clock reads in.
    #[must_use]
    pub const fn timezone(&self) -> Tz {
        self.timezone
    }

    /// Meal period in effect at `now`.
    #[must_use]
    pub fn period_at(&self, now: DateTime<Utc>) -> MealPeriod {
        MealPeriod::from_hour(now.with_timezone(&self.timezone).hour())
    }

    /// Local calendar date at `now`, used to key menu requests.
    #[must_use]
    pub fn local_date(&self, now: DateTime<Utc>) -> NaiveDate {
        now.with_timezone(&self.timezone).date_naive()
    }
}
