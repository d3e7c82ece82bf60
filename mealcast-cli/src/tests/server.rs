//! Router tests exercising the HTTP surface over a loopback socket.

use std::sync::Arc;

use geo::Coord;
use mealcast_core::test_support::{MemoryVenueStore, StaticMenuSource, StaticWeatherSource};
use mealcast_core::{Recommender, RecommenderConfig, Venue};
use reqwest::StatusCode;
use rstest::rstest;
use serde_json::{Value, json};

use super::helpers::rainy;
use crate::recommend::RecommendPass;
use crate::server::{API_KEY_HEADER, router};

const SECRET: &str = "s3cret";

fn pass() -> Arc<dyn RecommendPass> {
    let mut venue = Venue::new("north", "North Hall");
    venue.is_open = true;
    venue.raw_menu_items = Some(vec![json!({"name": "Tomato Soup"})]);
    Arc::new(Recommender::new(
        StaticWeatherSource::new(rainy()),
        StaticMenuSource::default(),
        MemoryVenueStore::with_venues(vec![venue]),
        RecommenderConfig::new(Coord { x: -71.12, y: 42.38 }),
    ))
}

async fn spawn_app() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind loopback listener");
    let addr = listener.local_addr().expect("listener address");
    let app = router(pass(), SECRET);
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve test app");
    });
    format!("http://{addr}")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn health_reports_ok() {
    let base = spawn_app().await;

    let response = reqwest::get(format!("{base}/health"))
        .await
        .expect("health request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("health JSON");
    assert_eq!(body, json!({"status": "ok"}));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn missing_key_is_unauthorized() {
    let base = spawn_app().await;

    let response = reqwest::get(format!("{base}/api/recommend"))
        .await
        .expect("recommend request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json().await.expect("error JSON");
    assert_eq!(body, json!({"error": "unauthorized"}));
}

#[rstest]
#[case::get(reqwest::Method::GET)]
#[case::post(reqwest::Method::POST)]
#[tokio::test(flavor = "multi_thread")]
async fn valid_key_returns_picks(#[case] method: reqwest::Method) {
    let base = spawn_app().await;

    let response = reqwest::Client::new()
        .request(method, format!("{base}/api/recommend"))
        .header(API_KEY_HEADER, SECRET)
        .send()
        .await
        .expect("recommend request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("recommendation JSON");
    assert_eq!(body["picks"][0]["hallId"], "north");
    assert_eq!(body["weather"]["condition"], "rain");
    assert!(
        body["picks"][0]["reason"]
            .as_str()
            .is_some_and(|reason| reason.contains("Tomato Soup"))
    );
}
