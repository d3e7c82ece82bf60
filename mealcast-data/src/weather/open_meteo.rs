//! Open-Meteo forecast response types.

use serde::Deserialize;

/// Body of `GET /v1/forecast` when `current=` variables are requested.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ForecastResponse {
    pub(crate) current: Option<CurrentConditions>,
}

/// The `current` block. Any variable may be missing or null.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CurrentConditions {
    #[serde(default)]
    pub(crate) temperature_2m: Option<f64>,
    #[serde(default)]
    pub(crate) precipitation: Option<f64>,
    #[serde(default)]
    pub(crate) weather_code: Option<i32>,
}

/// Variables requested in the `current` query parameter.
pub(crate) const CURRENT_VARIABLES: &str = "temperature_2m,precipitation,weather_code";
