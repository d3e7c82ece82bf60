//! Candidate filtering, ranking, and top-N selection.

use crate::{ScoreResult, Venue};

/// Which scored venues are eligible before ranking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CandidateFilter {
    /// Venues that scored above zero.
    #[default]
    PositiveScore,
    /// Venues that are open, whatever their score.
    OpenVenues,
}

/// Selection policy for a recommendation pass.
///
/// # Examples
/// ```
/// use mealcast_core::{CandidateFilter, RecommendPolicy};
///
/// let policy = RecommendPolicy::default();
/// assert_eq!(policy.top_n, 3);
/// assert_eq!(policy.filter, CandidateFilter::PositiveScore);
/// assert!(policy.fallback_to_all);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecommendPolicy {
    /// Maximum number of picks returned. Zero is treated as one.
    pub top_n: usize,
    /// Eligibility rule applied before ranking.
    pub filter: CandidateFilter,
    /// Rank every venue when no candidate survives the filter.
    pub fallback_to_all: bool,
}

impl Default for RecommendPolicy {
    fn default() -> Self {
        Self {
            top_n: 3,
            filter: CandidateFilter::PositiveScore,
            fallback_to_all: true,
        }
    }
}

/// A venue paired with its score.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredVenue {
    /// Venue as loaded from the store.
    pub venue: Venue,
    /// Score computed from its menu.
    pub result: ScoreResult,
}

/// Venues chosen by [`RecommendPolicy::select`].
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    /// Chosen venues, best first.
    pub picks: Vec<ScoredVenue>,
    /// Whether the fallback path produced the picks.
    pub fallback: bool,
}

impl RecommendPolicy {
    const fn admits(&self, scored: &ScoredVenue) -> bool {
        match self.filter {
            CandidateFilter::PositiveScore => scored.result.score > 0.0_f32,
            CandidateFilter::OpenVenues => scored.venue.is_open,
        }
    }

    /// Filter, rank, and truncate `scored`.
    ///
    /// Ranking is by descending score and stable, so venues with equal
    /// scores keep their input order.
    #[must_use]
    pub fn select(&self, scored: Vec<ScoredVenue>) -> Selection {
        let (candidates, rest): (Vec<_>, Vec<_>) =
            scored.into_iter().partition(|entry| self.admits(entry));
        let (mut picks, fallback) = if candidates.is_empty() && self.fallback_to_all {
            (rest, true)
        } else {
            (candidates, false)
        };
        picks.sort_by(|a, b| b.result.score.total_cmp(&a.result.score));
        picks.truncate(self.top_n.max(1));
        Selection { picks, fallback }
    }
}
