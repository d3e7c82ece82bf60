//! One recommendation pass from weather to ranked, explained picks.
//!
//! [`Recommender`] sequences the collaborators: it reads the weather,
//! derives the desired tags and meal period, resolves every venue's menu,
//! scores and ranks the venues under a [`RecommendPolicy`], composes a
//! reason per pick, and persists the top pick.
//!
//! Venue menus are resolved concurrently on scoped threads. Each venue is
//! independent: a failed or panicking menu fetch leaves that venue with an
//! empty menu and is logged, while the others proceed. Weather and store
//! failures abort the pass.

mod error;
mod policy;
mod response;

use std::thread;

use chrono::{DateTime, NaiveDate, Utc};
use geo::Coord;
use log::{debug, info, warn};

pub use error::RecommendError;
pub use policy::{CandidateFilter, RecommendPolicy, ScoredVenue, Selection};
pub use response::{Pick, RecommendResponse, RecommendationDocument};

use crate::{
    BonusScorer, MealClock, MealPeriod, MenuFetchError, MenuItem, MenuOrigin, MenuRequest,
    MenuSource, ReasonComposer, ReasonContext, Scorer, TaggedMenuItem, Venue, VenueStore,
    WeatherAssessment, WeatherSource, distance_miles, normalize_embedded, normalize_external,
    tag_menu,
};

/// Settings for a [`Recommender`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecommenderConfig {
    /// Campus location; weather is read here and distances measured from it.
    pub campus: Coord<f64>,
    /// Clock used to derive the meal period and menu date.
    pub clock: MealClock,
    /// Selection policy.
    pub policy: RecommendPolicy,
}

impl RecommenderConfig {
    /// Configuration with the default clock and policy.
    #[must_use]
    pub fn new(campus: Coord<f64>) -> Self {
        Self {
            campus,
            clock: MealClock::default(),
            policy: RecommendPolicy::default(),
        }
    }
}

/// Produces recommendations from a weather source, a menu source, and a
/// venue store.
pub struct Recommender<W, M, S, C = BonusScorer>
where
    W: WeatherSource,
    M: MenuSource,
    S: VenueStore,
    C: Scorer,
{
    weather: W,
    menus: M,
    store: S,
    scorer: C,
    config: RecommenderConfig,
}

impl<W, M, S> Recommender<W, M, S>
where
    W: WeatherSource,
    M: MenuSource,
    S: VenueStore,
{
    /// Construct a recommender with the default scorer.
    #[must_use]
    pub fn new(weather: W, menus: M, store: S, config: RecommenderConfig) -> Self {
        Self::with_scorer(weather, menus, store, BonusScorer::default(), config)
    }
}

impl<W, M, S, C> Recommender<W, M, S, C>
where
    W: WeatherSource,
    M: MenuSource,
    S: VenueStore,
    C: Scorer,
{
    /// Construct a recommender with an explicit scorer.
    #[must_use]
    pub const fn with_scorer(
        weather: W,
        menus: M,
        store: S,
        scorer: C,
        config: RecommenderConfig,
    ) -> Self {
        Self {
            weather,
            menus,
            store,
            scorer,
            config,
        }
    }

    /// Settings in use.
    #[must_use]
    pub const fn config(&self) -> &RecommenderConfig {
        &self.config
    }

    /// Venue store the recommender reads from and saves to.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Run one pass at instant `now`.
    ///
    /// # Errors
    /// Returns [`RecommendError::Weather`] when the weather cannot be read
    /// and [`RecommendError::Store`] when venues cannot be loaded or the top
    /// pick cannot be saved. Nothing is persisted on error.
    pub fn recommend(&self, now: DateTime<Utc>) -> Result<RecommendResponse, RecommendError> {
        let observation = self.weather.current_weather(self.config.campus)?;
        let weather = WeatherAssessment::classify(observation);
        let meal = self.config.clock.period_at(now);
        let date = self.config.clock.local_date(now);
        debug!(
            "weather {} ({:?} C), meal {meal}, desired tags {:?}",
            weather.condition,
            weather.observation.temperature_c,
            weather.desired_tags.as_slice()
        );

        let venues = self.store.load_venues()?;
        let menus = self.resolve_menus(&venues, meal, date);
        let scored: Vec<ScoredVenue> = venues
            .into_iter()
            .zip(menus)
            .map(|(venue, menu)| {
                let result = self.scorer.score(&venue, &menu, &weather.desired_tags);
                ScoredVenue { venue, result }
            })
            .collect();
        let total = scored.len();

        let selection = self.config.policy.select(scored);
        if selection.fallback {
            info!("no venue passed the candidate filter; ranking all {total} venues");
        }
        let picks: Vec<Pick> = selection
            .picks
            .iter()
            .map(|entry| self.pick(entry, &weather, selection.fallback))
            .collect();

        let response = RecommendResponse {
            desired_tags: weather.desired_tags.clone(),
            weather,
            meal,
            picks,
        };
        match response.top_pick() {
            Some(top) => {
                self.store.save_recommendation(&RecommendationDocument {
                    updated_at: now,
                    weather: response.weather.clone(),
                    meal,
                    pick: top.clone(),
                })?;
                info!(
                    "recommended {} ({}) with score {}",
                    top.name, top.venue_id, top.score
                );
            }
            None => info!("no venue selected from {total}; stored recommendation unchanged"),
        }
        Ok(response)
    }

    fn resolve_menus(
        &self,
        venues: &[Venue],
        meal: MealPeriod,
        date: NaiveDate,
    ) -> Vec<Vec<TaggedMenuItem>> {
        thread::scope(|scope| {
            let handles: Vec<_> = venues
                .iter()
                .map(|venue| scope.spawn(move || self.resolve_menu(venue, meal, date)))
                .collect();
            handles
                .into_iter()
                .zip(venues)
                .map(|(handle, venue)| {
                    handle.join().unwrap_or_else(|_| {
                        warn!("menu resolution for venue {} panicked", venue.id);
                        Vec::new()
                    })
                })
                .collect()
        })
    }

    fn resolve_menu(&self, venue: &Venue, meal: MealPeriod, date: NaiveDate) -> Vec<TaggedMenuItem> {
        let items = match venue.menu_source {
            MenuOrigin::Embedded => {
                normalize_embedded(venue.raw_menu_items.as_deref().unwrap_or_default())
            }
            MenuOrigin::External => self.fetch_external(venue, meal, date).unwrap_or_else(|err| {
                warn!("menu for venue {} unavailable: {err}", venue.id);
                Vec::new()
            }),
        };
        debug!("venue {} has {} menu items", venue.id, items.len());
        tag_menu(items)
    }

    fn fetch_external(
        &self,
        venue: &Venue,
        meal: MealPeriod,
        date: NaiveDate,
    ) -> Result<Vec<MenuItem>, MenuFetchError> {
        let slug = venue
            .menu_slug
            .as_deref()
            .map(str::trim)
            .filter(|slug| !slug.is_empty())
            .ok_or_else(|| MenuFetchError::MissingSlug {
                venue_id: venue.id.clone(),
            })?;
        let request = MenuRequest {
            slug: slug.to_owned(),
            meal,
            date,
        };
        let payload = self.menus.fetch_menu(&request)?;
        Ok(normalize_external(&payload))
    }

    fn pick(&self, entry: &ScoredVenue, weather: &WeatherAssessment, fallback: bool) -> Pick {
        let ScoredVenue { venue, result } = entry;
        let reason = ReasonComposer.compose(&ReasonContext {
            temperature_c: weather.observation.temperature_c,
            condition: weather.condition,
            matched_tags: &result.matched_tags,
            wait_text: venue.wait_minutes_text.as_deref(),
            distance_miles: venue
                .location()
                .map(|location| distance_miles(self.config.campus, location)),
            sample_items: &result.sample_items,
            fallback,
        });
        Pick {
            venue_id: venue.id.clone(),
            name: venue.name.clone(),
            score: result.score,
            reason,
            sample_items: result.sample_items.clone(),
            lat: venue.latitude,
            lon: venue.longitude,
        }
    }
}
