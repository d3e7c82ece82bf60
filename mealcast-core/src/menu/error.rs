use thiserror::Error;

/// Errors from [`crate::MenuSource::fetch_menu`].
///
/// Menu failures are isolated per venue: the recommender logs them and
/// scores the venue with an empty menu.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MenuFetchError {
    /// The venue is marked as externally sourced but has no slug.
    #[error("venue {venue_id} has no menu slug")]
    MissingSlug {
        /// Identifier of the venue.
        venue_id: String,
    },
    /// The request did not complete within the configured timeout.
    #[error("menu request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Requested URL.
        url: String,
        /// Timeout that elapsed.
        timeout_secs: u64,
    },
    /// The service answered with a non-success status.
    #[error("menu service at {url} returned HTTP {status}: {message}")]
    HttpStatus {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Error description from the client.
        message: String,
    },
    /// The service could not be reached.
    #[error("menu request to {url} failed: {message}")]
    Network {
        /// Requested URL.
        url: String,
        /// Error description from the client.
        message: String,
    },
    /// The response body was not valid JSON.
    #[error("failed to parse menu response from {url}: {message}")]
    Parse {
        /// Requested URL.
        url: String,
        /// Parser error description.
        message: String,
    },
}
