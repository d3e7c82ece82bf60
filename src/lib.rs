//! Facade crate for the Mealcast dining recommender.
//!
//! This crate re-exports the core domain types and, behind the `http`
//! feature, the HTTP weather and menu clients and the JSON file store.

#![forbid(unsafe_code)]

pub use mealcast_core::{
    BonusScorer, CandidateFilter, Condition, DesiredTags, MealClock, MealPeriod, MenuFetchError,
    MenuItem, MenuOrigin, MenuRequest, MenuSource, Pick, ReasonComposer, RecommendError,
    RecommendPolicy, RecommendResponse, RecommendationDocument, Recommender, RecommenderConfig,
    ScoreResult, ScoreWeights, Scorer, StoreError, TaggedMenuItem, Venue, VenueStore,
    WeatherAssessment, WeatherError, WeatherObservation, WeatherSource,
};

#[cfg(feature = "test-support")]
pub use mealcast_core::test_support;

#[cfg(feature = "http")]
pub use mealcast_data::{
    FileStoreError, HttpMenuSource, HttpMenuSourceConfig, JsonFileStore, OpenMeteoSource,
    OpenMeteoSourceConfig, ProviderBuildError,
};
