//! Core domain logic for the Mealcast dining recommender.
//!
//! Given the current weather, the local time, and a set of dining venues
//! with their menus, the crate decides which venues to suggest and explains
//! why. The pipeline is:
//!
//! - [`WeatherAssessment::classify`] labels the sky condition and derives
//!   the [`DesiredTags`] the weather calls for;
//! - [`MealClock`] maps the instant onto a [`MealPeriod`];
//! - [`normalize_embedded`] and [`normalize_external`] coerce raw menus into
//!   [`MenuItem`] records, which [`tag_item`] annotates with attribute tags;
//! - a [`Scorer`] rates each venue, [`RecommendPolicy`] ranks and selects,
//!   and [`ReasonComposer`] writes the justification;
//! - [`Recommender`] runs the whole pass against the [`WeatherSource`],
//!   [`MenuSource`], and [`VenueStore`] collaborators.
//!
//! The crate performs no I/O itself; adapters live in `mealcast-data`.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod meal;
mod menu;
mod reason;
mod recommend;
mod scoring;
mod tags;
mod venue;
mod weather;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use meal::{DEFAULT_TIMEZONE, MealClock, MealPeriod};
pub use menu::{
    MenuFetchError, MenuItem, MenuRequest, MenuSource, PLACEHOLDER_NAME, RawMenuItem,
    TaggedMenuItem, derive_item_id, normalize_embedded, normalize_external, tag_item, tag_menu,
};
pub use reason::{Mood, ReasonComposer, ReasonContext, distance_miles, select_mood};
pub use recommend::{
    CandidateFilter, Pick, RecommendError, RecommendPolicy, RecommendResponse,
    RecommendationDocument, Recommender, RecommenderConfig, ScoredVenue, Selection,
};
pub use scoring::{
    BonusScorer, MAX_SAMPLE_ITEMS, MODERATE_WAIT_MINUTES, SHORT_WAIT_MINUTES, ScoreResult,
    ScoreWeights, Scorer, parse_wait_minutes,
};
pub use tags::{BALANCED, COLD, COMFORT, DRINK, DesiredTags, HOT, SALAD, SOUP};
pub use venue::{MenuOrigin, StoreError, Venue, VenueStore};
pub use weather::{
    COLD_THRESHOLD_C, Condition, HOT_THRESHOLD_C, WeatherAssessment, WeatherError,
    WeatherObservation, WeatherSource, desired_tags,
};
