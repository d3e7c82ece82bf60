use thiserror::Error;

use crate::{StoreError, WeatherError};

/// Failures that abort a recommendation pass.
///
/// Menu failures never appear here: a venue whose menu cannot be fetched is
/// scored with an empty menu instead.
#[derive(Debug, Error)]
pub enum RecommendError {
    /// Current weather could not be obtained.
    #[error("weather unavailable: {0}")]
    Weather(#[from] WeatherError),
    /// Venues could not be loaded or the top pick could not be saved.
    #[error(transparent)]
    Store(#[from] StoreError),
}
