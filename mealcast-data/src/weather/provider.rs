//! HTTP-based [`WeatherSource`] backed by Open-Meteo.
//!
//! The source asks for the current temperature, precipitation, and WMO
//! weather code at the campus coordinates and converts the answer into a
//! [`WeatherObservation`].
//!
//! # Example
//!
//! ```no_run
//! use geo::Coord;
//! use mealcast_core::WeatherSource;
//! use mealcast_data::OpenMeteoSource;
//!
//! let source = OpenMeteoSource::new("https://api.open-meteo.com")?;
//! let reading = source.current_weather(Coord { x: -71.1167, y: 42.3770 })?;
//! println!("code {}", reading.condition_code);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::time::Duration;

use geo::Coord;
use log::debug;
use mealcast_core::{WeatherError, WeatherObservation, WeatherSource};
use reqwest::{Client, Url};

use super::open_meteo::{CURRENT_VARIABLES, ForecastResponse};
use crate::ProviderBuildError;
use crate::http::{
    DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT, RequestFailure, build_client, endpoint,
    parse_base_url,
};
use crate::runtime::BlockingRuntime;

/// Public Open-Meteo endpoint.
pub const DEFAULT_WEATHER_BASE_URL: &str = "https://api.open-meteo.com";

/// Configuration for [`OpenMeteoSource`].
#[derive(Debug, Clone)]
pub struct OpenMeteoSourceConfig {
    /// Base URL of the forecast service; `/v1/forecast` is appended.
    pub base_url: String,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl Default for OpenMeteoSourceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_WEATHER_BASE_URL.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl OpenMeteoSourceConfig {
    /// Create a new configuration with the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Weather source that blocks on Open-Meteo HTTP requests.
///
/// See the crate documentation for how the blocking bridge chooses a
/// runtime.
#[derive(Debug)]
pub struct OpenMeteoSource {
    client: Client,
    forecast_url: Url,
    timeout_secs: u64,
    runtime: BlockingRuntime,
}

impl OpenMeteoSource {
    /// Create a source with default timeout and user agent.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client or
    /// runtime fails to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ProviderBuildError> {
        Self::with_config(OpenMeteoSourceConfig::new(base_url))
    }

    /// Create a source with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client or
    /// runtime fails to build.
    pub fn with_config(config: OpenMeteoSourceConfig) -> Result<Self, ProviderBuildError> {
        let base = parse_base_url(&config.base_url)?;
        Ok(Self {
            client: build_client(&config.user_agent, config.timeout)?,
            forecast_url: endpoint(&base, ["v1", "forecast"]),
            timeout_secs: config.timeout.as_secs(),
            runtime: BlockingRuntime::new()?,
        })
    }

    fn build_forecast_url(&self, origin: Coord<f64>) -> Url {
        let mut url = self.forecast_url.clone();
        url.query_pairs_mut()
            .append_pair("latitude", &origin.y.to_string())
            .append_pair("longitude", &origin.x.to_string())
            .append_pair("current", CURRENT_VARIABLES)
            .append_pair("timezone", "auto");
        url
    }

    async fn fetch_async(&self, origin: Coord<f64>) -> Result<WeatherObservation, WeatherError> {
        let url = self.build_forecast_url(origin);
        debug!("requesting current weather from {url}");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, &url))?
            .error_for_status()
            .map_err(|err| self.convert_reqwest_error(&err, &url))?;

        let forecast: ForecastResponse =
            response.json().await.map_err(|err| WeatherError::Parse {
                message: err.to_string(),
            })?;

        convert_response(forecast)
    }

    fn convert_reqwest_error(&self, error: &reqwest::Error, url: &Url) -> WeatherError {
        let url = url.to_string();
        match RequestFailure::classify(error) {
            RequestFailure::Timeout => WeatherError::Timeout {
                url,
                timeout_secs: self.timeout_secs,
            },
            RequestFailure::Status { status, message } => WeatherError::HttpStatus {
                url,
                status,
                message,
            },
            RequestFailure::Network { message } => WeatherError::Network { url, message },
        }
    }
}

/// Convert a forecast body into an observation.
///
/// The weather code is required. Missing precipitation counts as dry and a
/// missing temperature stays unknown.
fn convert_response(response: ForecastResponse) -> Result<WeatherObservation, WeatherError> {
    let current = response
        .current
        .ok_or(WeatherError::MissingField { field: "current" })?;
    let condition_code = current.weather_code.ok_or(WeatherError::MissingField {
        field: "current.weather_code",
    })?;
    Ok(WeatherObservation {
        temperature_c: current.temperature_2m,
        precipitation_mm: current.precipitation.unwrap_or(0.0),
        condition_code,
    })
}

impl WeatherSource for OpenMeteoSource {
    fn current_weather(&self, origin: Coord<f64>) -> Result<WeatherObservation, WeatherError> {
        self.runtime.block_on(self.fetch_async(origin))
    }
}
