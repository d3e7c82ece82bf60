//! Shapes returned to callers and persisted to the venue store.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{DesiredTags, MealPeriod, WeatherAssessment};

/// A venue selected for output.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pick {
    /// Identifier of the venue.
    #[serde(rename = "hallId")]
    pub venue_id: String,
    /// Display name of the venue.
    pub name: String,
    /// Score the venue earned.
    pub score: f32,
    /// Human-readable justification.
    pub reason: String,
    /// Up to three relevant items on the menu.
    pub sample_items: Vec<String>,
    /// Latitude, when the venue records one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    /// Longitude, when the venue records one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lon: Option<f64>,
}

/// Result of one recommendation pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendResponse {
    /// Weather the pass was based on.
    pub weather: WeatherAssessment,
    /// Tags the weather called for.
    pub desired_tags: DesiredTags,
    /// Meal period in effect.
    pub meal: MealPeriod,
    /// Ranked picks, best first.
    pub picks: Vec<Pick>,
}

impl RecommendResponse {
    /// Best pick, if any venue was selected.
    #[must_use]
    pub fn top_pick(&self) -> Option<&Pick> {
        self.picks.first()
    }
}

/// The single stored recommendation, overwritten on every pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationDocument {
    /// When the pass ran.
    pub updated_at: DateTime<Utc>,
    /// Weather the pass was based on.
    pub weather: WeatherAssessment,
    /// Meal period in effect.
    pub meal: MealPeriod,
    /// Top pick of the pass.
    pub pick: Pick,
}

impl RecommendationDocument {
    /// Fixed key the document is stored under.
    pub const KEY: &'static str = "global";
}
