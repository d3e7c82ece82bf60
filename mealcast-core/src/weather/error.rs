use thiserror::Error;

/// Errors from [`crate::WeatherSource::current_weather`].
///
/// Weather is a precondition for tag derivation, so every variant aborts the
/// recommendation pass that requested it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WeatherError {
    /// The request did not complete within the configured timeout.
    #[error("weather request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Requested URL.
        url: String,
        /// Timeout that elapsed.
        timeout_secs: u64,
    },
    /// The service answered with a non-success status.
    #[error("weather service at {url} returned HTTP {status}: {message}")]
    HttpStatus {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Error description from the client.
        message: String,
    },
    /// The service could not be reached.
    #[error("weather request to {url} failed: {message}")]
    Network {
        /// Requested URL.
        url: String,
        /// Error description from the client.
        message: String,
    },
    /// The response body was not valid JSON of the expected shape.
    #[error("failed to parse weather response: {message}")]
    Parse {
        /// Parser error description.
        message: String,
    },
    /// A required reading was absent from the response.
    #[error("weather response is missing `{field}`")]
    MissingField {
        /// Dotted path of the missing field.
        field: &'static str,
    },
}
