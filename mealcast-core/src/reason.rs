//! Human-readable justification for a pick.
//!
//! A reason is a comma-joined list of clauses (temperature, mood, wait,
//! distance) followed by `: try` and up to two sample items. The mood phrase
//! is chosen by the first matching entry of an ordered rule table.

use std::borrow::Cow;

use geo::{Coord, Distance, Haversine, Point};

use crate::Condition;
use crate::tags::{COLD, COMFORT, DRINK, SOUP};

const METRES_PER_MILE: f64 = 1_609.344;
const SAMPLES_IN_REASON: usize = 2;

/// Mood expressed by a reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mood {
    /// Wet weather and a warming menu.
    ComfortForWeather,
    /// Clear skies and something cold to drink.
    RefreshingForClear,
    /// Warming dishes on offer.
    Comfort,
    /// Cold dishes or drinks on offer.
    Refreshing,
    /// Nothing in particular matched.
    Solid,
    /// Picked only because nothing scored above zero.
    Fallback,
}

impl Mood {
    /// Phrase used in the reason text.
    #[must_use]
    pub fn phrase(self, condition: Condition) -> Cow<'static, str> {
        match self {
            Self::ComfortForWeather => {
                Cow::Owned(format!("warm comfort food for a {condition} day"))
            }
            Self::RefreshingForClear => Cow::Borrowed("something refreshing for a clear day"),
            Self::Comfort => Cow::Borrowed("comfort food on the menu"),
            Self::Refreshing => Cow::Borrowed("refreshing options available"),
            Self::Solid => Cow::Borrowed("solid option right now"),
            Self::Fallback => Cow::Borrowed("top option right now"),
        }
    }
}

type Predicate = fn(Condition, &[String]) -> bool;

fn has_any(matched: &[String], wanted: &[&str]) -> bool {
    matched.iter().any(|tag| wanted.contains(&tag.as_str()))
}

/// Ordered mood rules; the first predicate that holds wins.
const MOOD_RULES: &[(Predicate, Mood)] = &[
    (
        |condition, matched| condition.is_wet() && has_any(matched, &[SOUP, COMFORT]),
        Mood::ComfortForWeather,
    ),
    (
        |condition, matched| condition == Condition::Clear && has_any(matched, &[COLD, DRINK]),
        Mood::RefreshingForClear,
    ),
    (
        |_, matched| has_any(matched, &[SOUP, COMFORT]),
        Mood::Comfort,
    ),
    (
        |_, matched| has_any(matched, &[COLD, DRINK]),
        Mood::Refreshing,
    ),
];

/// Select the mood for a scored pick.
///
/// # Examples
/// ```
/// use mealcast_core::{Condition, Mood, select_mood};
///
/// let matched = vec!["soup".to_owned()];
/// assert_eq!(select_mood(Condition::Rain, &matched), Mood::ComfortForWeather);
/// assert_eq!(select_mood(Condition::Cloudy, &matched), Mood::Comfort);
/// assert_eq!(select_mood(Condition::Clear, &[]), Mood::Solid);
/// ```
#[must_use]
pub fn select_mood(condition: Condition, matched_tags: &[String]) -> Mood {
    MOOD_RULES
        .iter()
        .find(|(applies, _)| applies(condition, matched_tags))
        .map_or(Mood::Solid, |(_, mood)| *mood)
}

/// Everything a reason may mention about one pick.
#[derive(Debug, Clone, Copy)]
pub struct ReasonContext<'a> {
    /// Air temperature in degrees Celsius, when known.
    pub temperature_c: Option<f64>,
    /// Current sky condition.
    pub condition: Condition,
    /// Desired tags the venue matched.
    pub matched_tags: &'a [String],
    /// Free-text wait estimate.
    pub wait_text: Option<&'a str>,
    /// Distance from campus in miles.
    pub distance_miles: Option<f64>,
    /// Sample item names, most relevant first.
    pub sample_items: &'a [String],
    /// Whether the pick was selected by the fallback path.
    pub fallback: bool,
}

/// Builds reason strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReasonComposer;

impl ReasonComposer {
    /// Compose the reason for one pick.
    ///
    /// # Examples
    /// ```
    /// use mealcast_core::{Condition, ReasonComposer, ReasonContext};
    ///
    /// let matched = vec!["soup".to_owned()];
    /// let samples = vec!["Chicken Noodle Soup".to_owned()];
    /// let reason = ReasonComposer.compose(&ReasonContext {
    ///     temperature_c: Some(2.0),
    ///     condition: Condition::Rain,
    ///     matched_tags: &matched,
    ///     wait_text: Some("4-8 min"),
    ///     distance_miles: None,
    ///     sample_items: &samples,
    ///     fallback: false,
    /// });
    /// assert_eq!(
    ///     reason,
    ///     "36°F and rain, warm comfort food for a rain day, wait 4-8 min: try Chicken Noodle Soup"
    /// );
    /// ```
    #[must_use]
    pub fn compose(self, context: &ReasonContext<'_>) -> String {
        let mood = if context.fallback {
            Mood::Fallback
        } else {
            select_mood(context.condition, context.matched_tags)
        };

        let mut clauses: Vec<String> = Vec::with_capacity(4);
        if let Some(celsius) = context.temperature_c {
            clauses.push(format!(
                "{}°F and {}",
                fahrenheit(celsius),
                context.condition
            ));
        }
        clauses.push(mood.phrase(context.condition).into_owned());
        if let Some(wait) = context.wait_text.map(str::trim).filter(|w| !w.is_empty()) {
            clauses.push(format!("wait {wait}"));
        }
        if let Some(miles) = context.distance_miles {
            clauses.push(format!("{miles:.1} mi away"));
        }

        let joined = clauses.join(", ");
        let samples: Vec<&str> = context
            .sample_items
            .iter()
            .take(SAMPLES_IN_REASON)
            .map(String::as_str)
            .collect();
        if samples.is_empty() {
            joined
        } else {
            format!("{joined}: try {}", samples.join(", "))
        }
    }
}

/// Convert Celsius to whole degrees Fahrenheit, rounding half away from zero.
#[expect(
    clippy::float_arithmetic,
    clippy::cast_possible_truncation,
    reason = "temperatures are small finite values"
)]
fn fahrenheit(celsius: f64) -> i64 {
    (celsius * 9.0 / 5.0 + 32.0).round() as i64
}

/// Great-circle distance between two WGS84 coordinates in miles.
#[must_use]
#[expect(clippy::float_arithmetic, reason = "unit conversion")]
pub fn distance_miles(from: Coord<f64>, to: Coord<f64>) -> f64 {
    Haversine.distance(Point::from(from), Point::from(to)) / METRES_PER_MILE
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn owned(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_owned()).collect()
    }

    fn context<'a>(matched: &'a [String], samples: &'a [String]) -> ReasonContext<'a> {
        ReasonContext {
            temperature_c: None,
            condition: Condition::Cloudy,
            matched_tags: matched,
            wait_text: None,
            distance_miles: None,
            sample_items: samples,
            fallback: false,
        }
    }

    #[rstest]
    #[case::wet_comfort(Condition::Rain, &["comfort"], Mood::ComfortForWeather)]
    #[case::snow_soup(Condition::Snow, &["soup"], Mood::ComfortForWeather)]
    #[case::wet_drink(Condition::Rain, &["drink"], Mood::Refreshing)]
    #[case::clear_cold(Condition::Clear, &["cold"], Mood::RefreshingForClear)]
    #[case::clear_prefers_refreshing(Condition::Clear, &["soup", "drink"], Mood::RefreshingForClear)]
    #[case::cloudy_soup(Condition::Cloudy, &["soup"], Mood::Comfort)]
    #[case::fog_drink(Condition::Fog, &["drink"], Mood::Refreshing)]
    #[case::nothing(Condition::Clear, &["salad"], Mood::Solid)]
    #[case::empty(Condition::Rain, &[], Mood::Solid)]
    fn mood_rules_apply_in_order(
        #[case] condition: Condition,
        #[case] matched: &[&str],
        #[case] expected: Mood,
    ) {
        assert_eq!(select_mood(condition, &owned(matched)), expected);
    }

    #[rstest]
    #[case(2.0, 36)]
    #[case(0.0, 32)]
    #[case(-40.0, -40)]
    #[case(28.0, 82)]
    #[case(21.5, 71)]
    fn converts_to_fahrenheit(#[case] celsius: f64, #[case] expected: i64) {
        assert_eq!(fahrenheit(celsius), expected);
    }

    #[rstest]
    fn only_mood_when_nothing_else_known() {
        let reason = ReasonComposer.compose(&context(&[], &[]));
        assert_eq!(reason, "solid option right now");
    }

    #[rstest]
    fn includes_every_clause_in_order() {
        let matched = owned(&["drink"]);
        let samples = owned(&["Iced Tea", "Cold Brew", "Berry Smoothie"]);
        let reason = ReasonComposer.compose(&ReasonContext {
            temperature_c: Some(30.0),
            condition: Condition::Clear,
            wait_text: Some(" 3 min "),
            distance_miles: Some(0.44),
            ..context(&matched, &samples)
        });
        assert_eq!(
            reason,
            "86°F and clear, something refreshing for a clear day, wait 3 min, 0.4 mi away: try Iced Tea, Cold Brew"
        );
    }

    #[rstest]
    fn blank_wait_text_is_omitted() {
        let reason = ReasonComposer.compose(&ReasonContext {
            wait_text: Some("  "),
            ..context(&[], &[])
        });
        assert_eq!(reason, "solid option right now");
    }

    #[rstest]
    fn fallback_uses_top_option_phrase() {
        let matched = owned(&["soup"]);
        let reason = ReasonComposer.compose(&ReasonContext {
            fallback: true,
            ..context(&matched, &[])
        });
        assert_eq!(reason, "top option right now");
    }

    #[rstest]
    fn measures_distance_in_miles() {
        let a = Coord { x: -0.1278, y: 51.5074 };
        let b = Coord { x: -0.1278, y: 51.5219 };
        let miles = distance_miles(a, b);
        assert!((miles - 1.0).abs() < 0.05, "got {miles}");
        assert!(distance_miles(a, a).abs() < f64::EPSILON);
    }
}
