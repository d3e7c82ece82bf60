//! HTTP-based [`MenuSource`].
//!
//! Menus are addressed as `{base}/{slug}/{meal}/{yyyy}/{mm}/{dd}` and the
//! body is returned as untyped JSON for [`mealcast_core::normalize_external`].

use std::time::Duration;

use log::debug;
use mealcast_core::{MenuFetchError, MenuRequest, MenuSource};
use reqwest::{Client, Url};
use serde_json::Value;

use crate::ProviderBuildError;
use crate::http::{
    DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT, RequestFailure, build_client, endpoint,
    parse_base_url,
};
use crate::runtime::BlockingRuntime;

/// Configuration for [`HttpMenuSource`].
#[derive(Debug, Clone)]
pub struct HttpMenuSourceConfig {
    /// Base URL of the menu service.
    pub base_url: String,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl HttpMenuSourceConfig {
    /// Create a new configuration with the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
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

/// Menu source that blocks on HTTP requests to the menu service.
#[derive(Debug)]
pub struct HttpMenuSource {
    client: Client,
    base_url: Url,
    timeout_secs: u64,
    runtime: BlockingRuntime,
}

impl HttpMenuSource {
    /// Create a source with default timeout and user agent.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client or
    /// runtime fails to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ProviderBuildError> {
        Self::with_config(HttpMenuSourceConfig::new(base_url))
    }

    /// Create a source with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client or
    /// runtime fails to build.
    pub fn with_config(config: HttpMenuSourceConfig) -> Result<Self, ProviderBuildError> {
        Ok(Self {
            base_url: parse_base_url(&config.base_url)?,
            client: build_client(&config.user_agent, config.timeout)?,
            timeout_secs: config.timeout.as_secs(),
            runtime: BlockingRuntime::new()?,
        })
    }

    fn build_menu_url(&self, request: &MenuRequest) -> Url {
        let date = request.date;
        let year = date.format("%Y").to_string();
        let month = date.format("%m").to_string();
        let day = date.format("%d").to_string();
        endpoint(
            &self.base_url,
            [
                request.slug.as_str(),
                request.meal.as_str(),
                year.as_str(),
                month.as_str(),
                day.as_str(),
            ],
        )
    }

    async fn fetch_async(&self, request: &MenuRequest) -> Result<Value, MenuFetchError> {
        let url = self.build_menu_url(request);
        debug!("requesting menu from {url}");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, &url))?
            .error_for_status()
            .map_err(|err| self.convert_reqwest_error(&err, &url))?;

        response.json().await.map_err(|err| MenuFetchError::Parse {
            url: url.to_string(),
            message: err.to_string(),
        })
    }

    fn convert_reqwest_error(&self, error: &reqwest::Error, url: &Url) -> MenuFetchError {
        let url = url.to_string();
        match RequestFailure::classify(error) {
            RequestFailure::Timeout => MenuFetchError::Timeout {
                url,
                timeout_secs: self.timeout_secs,
            },
            RequestFailure::Status { status, message } => MenuFetchError::HttpStatus {
                url,
                status,
                message,
            },
            RequestFailure::Network { message } => MenuFetchError::Network { url, message },
        }
    }
}

impl MenuSource for HttpMenuSource {
    fn fetch_menu(&self, request: &MenuRequest) -> Result<Value, MenuFetchError> {
        self.runtime.block_on(self.fetch_async(request))
    }
}
