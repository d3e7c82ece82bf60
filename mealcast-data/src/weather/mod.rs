//! Current-conditions lookup against the Open-Meteo forecast API.

mod open_meteo;
mod provider;

pub use provider::{DEFAULT_WEATHER_BASE_URL, OpenMeteoSource, OpenMeteoSourceConfig};
