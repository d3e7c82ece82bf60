//! In-memory collaborators used by unit and behaviour tests.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use geo::Coord;
use serde_json::Value;

use crate::{
    MenuFetchError, MenuRequest, MenuSource, RecommendationDocument, StoreError, Venue,
    VenueStore, WeatherError, WeatherObservation, WeatherSource,
};

/// `WeatherSource` returning a fixed reading or a fixed error.
#[derive(Debug, Clone)]
pub struct StaticWeatherSource {
    outcome: Result<WeatherObservation, WeatherError>,
}

impl StaticWeatherSource {
    /// Always report `observation`.
    #[must_use]
    pub const fn new(observation: WeatherObservation) -> Self {
        Self {
            outcome: Ok(observation),
        }
    }

    /// Always fail with `error`.
    #[must_use]
    pub const fn failing(error: WeatherError) -> Self {
        Self {
            outcome: Err(error),
        }
    }
}

impl WeatherSource for StaticWeatherSource {
    fn current_weather(&self, _origin: Coord<f64>) -> Result<WeatherObservation, WeatherError> {
        self.outcome.clone()
    }
}

/// `MenuSource` serving canned payloads keyed by slug.
///
/// Unknown slugs fail with a 404 status. Every request is recorded.
#[derive(Debug, Default)]
pub struct StaticMenuSource {
    menus: HashMap<String, Value>,
    requests: Mutex<Vec<MenuRequest>>,
}

impl StaticMenuSource {
    /// Serve `payload` for `slug`.
    #[must_use]
    pub fn with_menu(mut self, slug: impl Into<String>, payload: Value) -> Self {
        self.menus.insert(slug.into(), payload);
        self
    }

    /// Requests received so far.
    #[must_use]
    pub fn requests(&self) -> Vec<MenuRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl MenuSource for StaticMenuSource {
    fn fetch_menu(&self, request: &MenuRequest) -> Result<Value, MenuFetchError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.clone());
        self.menus
            .get(&request.slug)
            .cloned()
            .ok_or_else(|| MenuFetchError::HttpStatus {
                url: format!("memory://{}", request.slug),
                status: 404,
                message: "no such menu".to_owned(),
            })
    }
}

/// `VenueStore` holding venues in memory and recording saved documents.
#[derive(Debug, Default)]
pub struct MemoryVenueStore {
    venues: Vec<Venue>,
    saved: Mutex<Vec<RecommendationDocument>>,
    fail_saves: bool,
}

impl MemoryVenueStore {
    /// Create a store over `venues`.
    #[must_use]
    pub fn with_venues(venues: Vec<Venue>) -> Self {
        Self {
            venues,
            ..Self::default()
        }
    }

    /// Make every save fail.
    #[must_use]
    pub const fn failing_saves(mut self) -> Self {
        self.fail_saves = true;
        self
    }

    /// Documents saved so far, oldest first.
    #[must_use]
    pub fn saved(&self) -> Vec<RecommendationDocument> {
        self.saved
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl VenueStore for MemoryVenueStore {
    fn load_venues(&self) -> Result<Vec<Venue>, StoreError> {
        Ok(self.venues.clone())
    }

    fn save_recommendation(&self, document: &RecommendationDocument) -> Result<(), StoreError> {
        if self.fail_saves {
            return Err(StoreError::Save {
                location: format!("memory://{}", RecommendationDocument::KEY),
                message: "saving disabled".to_owned(),
            });
        }
        self.saved
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(document.clone());
        Ok(())
    }
}
