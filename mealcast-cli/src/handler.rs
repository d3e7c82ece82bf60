//! Transport-agnostic handling of recommendation requests.

use chrono::{DateTime, Utc};
use log::{info, warn};
use serde_json::{Value, json};
use sha2::{Digest, Sha256};

use crate::recommend::RecommendPass;

/// Outcome class of a handled request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ApiStatus {
    Ok,
    Unauthorized,
    Internal,
}

impl ApiStatus {
    pub(crate) const fn code(self) -> u16 {
        match self {
            Self::Ok => 200,
            Self::Unauthorized => 401,
            Self::Internal => 500,
        }
    }
}

/// Status and JSON body to send back.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ApiResponse {
    pub(crate) status: ApiStatus,
    pub(crate) body: Value,
}

impl ApiResponse {
    fn unauthorized() -> Self {
        Self {
            status: ApiStatus::Unauthorized,
            body: json!({ "error": "unauthorized" }),
        }
    }

    pub(crate) fn internal(detail: impl std::fmt::Display) -> Self {
        Self {
            status: ApiStatus::Internal,
            body: json!({ "error": "internal", "detail": detail.to_string() }),
        }
    }
}

/// Authorise the caller, run one pass, and shape the reply.
///
/// Authorisation is checked before anything else runs.
pub(crate) fn handle_recommend(
    pass: &dyn RecommendPass,
    secret: &str,
    presented: Option<&str>,
    now: DateTime<Utc>,
) -> ApiResponse {
    if !presented.is_some_and(|key| secrets_match(secret, key)) {
        warn!("rejected recommendation request with missing or wrong API key");
        return ApiResponse::unauthorized();
    }
    let response = match pass.recommend(now) {
        Ok(response) => response,
        Err(err) => {
            warn!("recommendation pass failed: {err}");
            return ApiResponse::internal(err);
        }
    };
    match serde_json::to_value(&response) {
        Ok(body) => {
            info!(
                "served {} picks for {} ({})",
                response.picks.len(),
                response.meal,
                response.weather.condition
            );
            ApiResponse {
                status: ApiStatus::Ok,
                body,
            }
        }
        Err(err) => ApiResponse::internal(err),
    }
}

/// Compare secrets without stopping at the first differing byte.
///
/// Both sides are hashed first so the comparison length never depends on
/// the presented value.
fn secrets_match(expected: &str, presented: &str) -> bool {
    let expected = Sha256::digest(expected.as_bytes());
    let presented = Sha256::digest(presented.as_bytes());
    expected
        .iter()
        .zip(presented.iter())
        .fold(0_u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use geo::Coord;
    use mealcast_core::test_support::{MemoryVenueStore, StaticMenuSource, StaticWeatherSource};
    use mealcast_core::{Recommender, RecommenderConfig, Venue, WeatherError, WeatherObservation};
    use rstest::{fixture, rstest};

    const SECRET: &str = "s3cret";

    type TestPass = Recommender<StaticWeatherSource, StaticMenuSource, MemoryVenueStore>;

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 11, 20, 17, 0, 0)
            .single()
            .expect("valid instant")
    }

    fn recommender(weather: StaticWeatherSource) -> TestPass {
        let mut venue = Venue::new("north", "North Hall");
        venue.is_open = true;
        venue.raw_menu_items = Some(vec![json!({"name": "Chicken Noodle Soup"})]);
        Recommender::new(
            weather,
            StaticMenuSource::default(),
            MemoryVenueStore::with_venues(vec![venue]),
            RecommenderConfig::new(Coord { x: -71.12, y: 42.38 }),
        )
    }

    #[fixture]
    fn rainy() -> TestPass {
        recommender(StaticWeatherSource::new(WeatherObservation::new(
            3.0, 1.0, 61,
        )))
    }

    #[rstest]
    #[case::missing(None)]
    #[case::wrong(Some("guess"))]
    #[case::prefix(Some("s3cre"))]
    #[case::empty(Some(""))]
    fn rejects_bad_keys(rainy: TestPass, #[case] presented: Option<&str>) {
        let reply = handle_recommend(&rainy, SECRET, presented, noon());

        assert_eq!(reply.status, ApiStatus::Unauthorized);
        assert_eq!(reply.status.code(), 401);
        assert_eq!(reply.body, json!({"error": "unauthorized"}));
    }

    #[rstest]
    fn returns_recommendation_for_valid_key(rainy: TestPass) {
        let reply = handle_recommend(&rainy, SECRET, Some(SECRET), noon());

        assert_eq!(reply.status.code(), 200);
        assert_eq!(reply.body["meal"], "lunch");
        assert_eq!(reply.body["picks"][0]["hallId"], "north");
        assert_eq!(reply.body["desiredTags"][0], "soup");
        assert!(reply.body["weather"].is_object());
    }

    #[rstest]
    fn weather_failure_is_internal_with_detail() {
        let pass = recommender(StaticWeatherSource::failing(WeatherError::Network {
            url: "https://weather.invalid/v1/forecast".to_owned(),
            message: "connection refused".to_owned(),
        }));

        let reply = handle_recommend(&pass, SECRET, Some(SECRET), noon());

        assert_eq!(reply.status.code(), 500);
        assert_eq!(reply.body["error"], "internal");
        let detail = reply.body["detail"].as_str().expect("detail string");
        assert!(detail.contains("connection refused"), "detail was {detail}");
    }

    #[rstest]
    #[case("abc", "abc", true)]
    #[case("abc", "abd", false)]
    #[case("abc", "abcd", false)]
    #[case("", "", true)]
    fn compares_secrets(#[case] expected: &str, #[case] presented: &str, #[case] same: bool) {
        assert_eq!(secrets_match(expected, presented), same);
    }
}
