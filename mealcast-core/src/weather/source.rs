//! Weather source trait and the raw observation it yields.

use geo::Coord;
use serde::{Deserialize, Serialize};

use super::condition::Condition;
use super::error::WeatherError;

/// A single current-conditions reading.
///
/// `temperature_c` is optional because upstream services occasionally omit
/// it; temperature-driven rules and the temperature clause of a reason are
/// skipped when it is unknown.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherObservation {
    /// Air temperature in degrees Celsius.
    pub temperature_c: Option<f64>,
    /// Precipitation in millimetres over the preceding interval.
    pub precipitation_mm: f64,
    /// WMO weather interpretation code.
    pub condition_code: i32,
}

impl WeatherObservation {
    /// Build an observation with a known temperature.
    #[must_use]
    pub const fn new(temperature_c: f64, precipitation_mm: f64, condition_code: i32) -> Self {
        Self {
            temperature_c: Some(temperature_c),
            precipitation_mm,
            condition_code,
        }
    }

    /// Condition label for [`Self::condition_code`].
    #[must_use]
    pub const fn condition(&self) -> Condition {
        Condition::from_code(self.condition_code)
    }
}

/// Fetch the current weather around a location.
///
/// `origin` uses WGS84 with `x = longitude` and `y = latitude`.
/// Implementations must be `Send + Sync` so a recommender can be shared
/// between request handlers.
///
/// # Examples
///
/// ```rust
/// use geo::Coord;
/// use mealcast_core::{WeatherError, WeatherObservation, WeatherSource};
///
/// struct Drizzle;
///
/// impl WeatherSource for Drizzle {
///     fn current_weather(&self, _origin: Coord<f64>) -> Result<WeatherObservation, WeatherError> {
///         Ok(WeatherObservation::new(12.0, 0.4, 53))
///     }
/// }
///
/// let reading = Drizzle.current_weather(Coord { x: -83.0, y: 40.0 })?;
/// assert_eq!(reading.condition().as_str(), "rain");
/// # Ok::<(), WeatherError>(())
/// ```
pub trait WeatherSource: Send + Sync {
    /// Return the current observation at `origin`.
    ///
    /// # Errors
    /// Returns [`WeatherError`] when the reading cannot be obtained.
    fn current_weather(&self, origin: Coord<f64>) -> Result<WeatherObservation, WeatherError>;
}
