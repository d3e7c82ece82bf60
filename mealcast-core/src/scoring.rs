//! Score venues against the tags the weather calls for.
//!
//! A venue's score is the sum of independent bonuses: one per desired tag
//! present anywhere on its menu, one for being open, and one for a short
//! wait. The [`Scorer`] trait lets callers swap the weighting.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::{DesiredTags, TaggedMenuItem, Venue};

/// Waits at or below this many minutes earn the full wait bonus.
pub const SHORT_WAIT_MINUTES: u32 = 5;
/// Waits at or below this many minutes earn the reduced wait bonus.
pub const MODERATE_WAIT_MINUTES: u32 = 10;
/// Maximum number of sample item names reported per venue.
pub const MAX_SAMPLE_ITEMS: usize = 3;

/// Outcome of scoring one venue.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    /// Venue the score belongs to.
    pub venue_id: String,
    /// Sum of all bonuses; never negative.
    pub score: f32,
    /// Desired tags present on the menu, in desired-tag order.
    pub matched_tags: Vec<String>,
    /// Up to [`MAX_SAMPLE_ITEMS`] distinct names of items carrying a desired tag.
    pub sample_items: Vec<String>,
}

/// Bonus weights applied by [`BonusScorer`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreWeights {
    /// Added once per desired tag found on the menu.
    pub tag_match: f32,
    /// Added when the venue is open.
    pub open: f32,
    /// Added when the wait is at most [`SHORT_WAIT_MINUTES`].
    pub short_wait: f32,
    /// Added when the wait is at most [`MODERATE_WAIT_MINUTES`].
    pub moderate_wait: f32,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            tag_match: 2.0_f32,
            open: 1.0_f32,
            short_wait: 1.0_f32,
            moderate_wait: 0.5_f32,
        }
    }
}

/// Calculate a score for a venue and its tagged menu.
///
/// Implementations must be `Send + Sync`, must not return negative or
/// non-finite scores, and must score each venue independently of the others.
///
/// # Examples
///
/// ```rust
/// use mealcast_core::{DesiredTags, ScoreResult, Scorer, TaggedMenuItem, Venue};
///
/// struct OpenOnly;
///
/// impl Scorer for OpenOnly {
///     fn score(&self, venue: &Venue, _menu: &[TaggedMenuItem], _desired: &DesiredTags) -> ScoreResult {
///         ScoreResult {
///             venue_id: venue.id.clone(),
///             score: if venue.is_open { 1.0 } else { 0.0 },
///             matched_tags: Vec::new(),
///             sample_items: Vec::new(),
///         }
///     }
/// }
///
/// let mut venue = Venue::new("east", "East Hall");
/// venue.is_open = true;
/// assert_eq!(OpenOnly.score(&venue, &[], &DesiredTags::balanced()).score, 1.0);
/// ```
pub trait Scorer: Send + Sync {
    /// Score `venue` whose normalised, tagged menu is `menu`.
    fn score(&self, venue: &Venue, menu: &[TaggedMenuItem], desired: &DesiredTags) -> ScoreResult;
}

/// Default additive scorer.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BonusScorer {
    weights: ScoreWeights,
}

impl BonusScorer {
    /// Create a scorer with explicit weights.
    #[must_use]
    pub const fn new(weights: ScoreWeights) -> Self {
        Self { weights }
    }

    /// Wait bonus for a free-text estimate.
    ///
    /// Only the first integer in the text is considered; text without one
    /// earns nothing.
    #[must_use]
    pub fn wait_bonus(&self, wait_text: Option<&str>) -> f32 {
        match wait_text.and_then(parse_wait_minutes) {
            Some(minutes) if minutes <= SHORT_WAIT_MINUTES => self.weights.short_wait,
            Some(minutes) if minutes <= MODERATE_WAIT_MINUTES => self.weights.moderate_wait,
            Some(_) | None => 0.0_f32,
        }
    }
}

impl Scorer for BonusScorer {
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        reason = "the score is a weighted sum of small bonus counts"
    )]
    fn score(&self, venue: &Venue, menu: &[TaggedMenuItem], desired: &DesiredTags) -> ScoreResult {
        let available: BTreeSet<&str> = menu
            .iter()
            .flat_map(|entry| entry.tags.iter().map(String::as_str))
            .collect();
        let matched_tags: Vec<String> = desired
            .iter()
            .filter(|tag| available.contains(tag))
            .map(str::to_owned)
            .collect();

        let tag_bonus = self.weights.tag_match * matched_tags.len() as f32;
        let open_bonus = if venue.is_open {
            self.weights.open
        } else {
            0.0_f32
        };
        let wait_bonus = self.wait_bonus(venue.wait_minutes_text.as_deref());
        let score = (tag_bonus + open_bonus + wait_bonus).max(0.0_f32);

        ScoreResult {
            venue_id: venue.id.clone(),
            score,
            matched_tags,
            sample_items: sample_items(menu, desired),
        }
    }
}

/// Extract the first run of ASCII digits from `text` as minutes.
///
/// # Examples
/// ```
/// use mealcast_core::parse_wait_minutes;
///
/// assert_eq!(parse_wait_minutes("about 4-8 min"), Some(4));
/// assert_eq!(parse_wait_minutes("no line"), None);
/// ```
#[must_use]
pub fn parse_wait_minutes(text: &str) -> Option<u32> {
    let digits: String = text
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}

fn sample_items(menu: &[TaggedMenuItem], desired: &DesiredTags) -> Vec<String> {
    let mut samples: Vec<String> = Vec::new();
    for entry in menu {
        if samples.len() == MAX_SAMPLE_ITEMS {
            break;
        }
        let wanted = entry.tags.iter().any(|tag| desired.contains(tag));
        if wanted && !samples.contains(&entry.item.name) {
            samples.push(entry.item.name.clone());
        }
    }
    samples
}
