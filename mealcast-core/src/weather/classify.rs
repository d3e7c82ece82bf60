//! Derive desired food tags from a weather observation.

use serde::Serialize;

use super::condition::Condition;
use super::source::WeatherObservation;
use crate::tags::{COLD, COMFORT, DRINK, HOT, SALAD, SOUP};
use crate::DesiredTags;

/// At or above this temperature people want something cold.
pub const HOT_THRESHOLD_C: f64 = 28.0;
/// At or below this temperature people want something warming.
pub const COLD_THRESHOLD_C: f64 = 10.0;

const RAIN_TAGS: [&str; 3] = [SOUP, COMFORT, HOT];
const SNOW_TAGS: [&str; 3] = [SOUP, HOT, COMFORT];
const HOT_DAY_TAGS: [&str; 3] = [COLD, SALAD, DRINK];
const COLD_DAY_TAGS: [&str; 3] = [SOUP, HOT, COMFORT];

/// Compute the tags the current weather calls for.
///
/// Every matching rule contributes its tags; duplicates collapse. The result
/// is never empty: when no rule fires it is exactly `{"balanced"}`.
///
/// # Examples
/// ```
/// use mealcast_core::{WeatherObservation, desired_tags};
///
/// let tags = desired_tags(&WeatherObservation::new(2.0, 1.2, 61));
/// assert_eq!(tags.iter().collect::<Vec<_>>(), ["soup", "comfort", "hot"]);
///
/// let mild = desired_tags(&WeatherObservation::new(18.0, 0.0, 2));
/// assert_eq!(mild.iter().collect::<Vec<_>>(), ["balanced"]);
/// ```
#[must_use]
pub fn desired_tags(observation: &WeatherObservation) -> DesiredTags {
    let mut tags = DesiredTags::new();
    match observation.condition() {
        Condition::Rain => tags.extend(RAIN_TAGS),
        Condition::Snow => tags.extend(SNOW_TAGS),
        Condition::Clear | Condition::Cloudy | Condition::Fog => {}
    }
    if let Some(temperature) = observation.temperature_c {
        if temperature >= HOT_THRESHOLD_C {
            tags.extend(HOT_DAY_TAGS);
        }
        if temperature <= COLD_THRESHOLD_C {
            tags.extend(COLD_DAY_TAGS);
        }
    }
    if tags.is_empty() {
        return DesiredTags::balanced();
    }
    tags
}

/// Classifier output for one recommendation pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherAssessment {
    /// Reading the assessment was derived from.
    #[serde(flatten)]
    pub observation: WeatherObservation,
    /// Condition label for the reading.
    pub condition: Condition,
    /// Tags the weather calls for.
    #[serde(skip)]
    pub desired_tags: DesiredTags,
}

impl WeatherAssessment {
    /// Classify `observation`.
    #[must_use]
    pub fn classify(observation: WeatherObservation) -> Self {
        Self {
            condition: observation.condition(),
            desired_tags: desired_tags(&observation),
            observation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tags::BALANCED;
    use rstest::rstest;

    fn tags_of(temperature: f64, code: i32) -> Vec<String> {
        desired_tags(&WeatherObservation::new(temperature, 0.0, code))
            .as_slice()
            .to_vec()
    }

    #[rstest]
    #[case::rain(15.0, 61, &["soup", "comfort", "hot"])]
    #[case::snow(15.0, 73, &["soup", "hot", "comfort"])]
    #[case::hot_clear(30.0, 0, &["cold", "salad", "drink"])]
    #[case::hot_boundary(28.0, 0, &["cold", "salad", "drink"])]
    #[case::cold_boundary(10.0, 1, &["soup", "hot", "comfort"])]
    #[case::cold_rain(2.0, 61, &["soup", "comfort", "hot"])]
    #[case::hot_rain(31.0, 63, &["soup", "comfort", "hot", "cold", "salad", "drink"])]
    #[case::mild(18.0, 3, &["balanced"])]
    #[case::just_above_cold(10.1, 45, &["balanced"])]
    #[case::just_below_hot(27.9, 0, &["balanced"])]
    fn rules_union_in_order(#[case] temperature: f64, #[case] code: i32, #[case] expected: &[&str]) {
        assert_eq!(tags_of(temperature, code), expected);
    }

    #[rstest]
    fn unknown_temperature_only_uses_condition() {
        let observation = WeatherObservation {
            temperature_c: None,
            precipitation_mm: 0.0,
            condition_code: 0,
        };
        assert_eq!(desired_tags(&observation).as_slice(), [BALANCED]);
    }

    #[rstest]
    fn assessment_carries_condition_and_tags() {
        let assessment = WeatherAssessment::classify(WeatherObservation::new(2.0, 1.0, 61));
        assert_eq!(assessment.condition, Condition::Rain);
        assert_eq!(assessment.desired_tags.as_slice(), ["soup", "comfort", "hot"]);
    }

    #[rstest]
    fn assessment_serialises_reading_and_condition() {
        let assessment = WeatherAssessment::classify(WeatherObservation::new(2.0, 1.5, 61));
        let json = serde_json::to_value(&assessment).expect("serialise assessment");
        assert_eq!(
            json,
            serde_json::json!({
                "temperatureC": 2.0,
                "precipitationMm": 1.5,
                "conditionCode": 61,
                "condition": "rain",
            })
        );
    }
}
