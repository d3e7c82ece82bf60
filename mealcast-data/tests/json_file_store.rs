//! File-backed venue store tests.

use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use chrono::{TimeZone, Utc};
use geo::Coord;
use mealcast_core::test_support::{StaticMenuSource, StaticWeatherSource};
use mealcast_core::{
    MenuOrigin, Recommender, RecommenderConfig, StoreError, VenueStore, WeatherObservation,
};
use mealcast_data::{FileStoreError, JsonFileStore};
use rstest::{fixture, rstest};
use serde_json::{Value, json};
use tempfile::TempDir;

#[derive(Debug)]
struct StoreFixture {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl StoreFixture {
    fn write_venues(&self, document: &Value) -> Utf8PathBuf {
        let path = self.root.join("venues.json");
        fs::write(&path, document.to_string()).expect("write venues");
        path
    }

    fn store(&self, venues_path: &Utf8Path) -> JsonFileStore {
        JsonFileStore::new(venues_path, self.root.join("out/recommendations"))
    }
}

#[fixture]
fn workspace() -> StoreFixture {
    let dir = TempDir::new().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 tempdir");
    StoreFixture { _dir: dir, root }
}

#[rstest]
fn loads_array_with_stored_aliases(workspace: StoreFixture) {
    let path = workspace.write_venues(&json!([
        {
            "id": "north",
            "name": "North Hall",
            "open": true,
            "waitTime": "4-8 min",
            "menu": [{"name": "Tomato Soup"}, "Iced Tea"],
            "lat": 42.38,
            "lng": -71.12
        },
        {
            "id": "south",
            "name": "South Commons",
            "menuSource": "external",
            "slug": "south-commons"
        }
    ]));

    let venues = workspace.store(&path).load_venues().expect("venues load");

    assert_eq!(venues.len(), 2);
    let north = &venues[0];
    assert!(north.is_open);
    assert_eq!(north.wait_minutes_text.as_deref(), Some("4-8 min"));
    assert_eq!(north.raw_menu_items.as_ref().map(Vec::len), Some(2));
    assert_eq!(north.location(), Some(Coord { x: -71.12, y: 42.38 }));
    let south = &venues[1];
    assert_eq!(south.menu_source, MenuOrigin::External);
    assert_eq!(south.menu_slug.as_deref(), Some("south-commons"));
    assert!(!south.is_open);
}

#[rstest]
fn loads_object_keyed_by_id(workspace: StoreFixture) {
    let path = workspace.write_venues(&json!({
        "west": {"name": "West Hall"},
        "east": {"name": "East Hall", "isOpen": true}
    }));

    let venues = workspace.store(&path).read_venues().expect("venues load");

    let ids: Vec<&str> = venues.iter().map(|venue| venue.id.as_str()).collect();
    assert_eq!(ids, ["east", "west"]);
    assert!(venues[0].is_open);
}

#[rstest]
fn missing_file_is_a_load_error(workspace: StoreFixture) {
    let path = workspace.root.join("absent.json");

    let err = workspace
        .store(&path)
        .load_venues()
        .expect_err("should fail");

    match err {
        StoreError::Load { location, .. } => assert_eq!(location, path.as_str()),
        other => panic!("expected Load error, got {other:?}"),
    }
}

#[rstest]
#[case::not_json("[{\"id\": ")]
#[case::missing_name("[{\"id\": \"north\"}]")]
fn malformed_venues_fail_to_parse(workspace: StoreFixture, #[case] contents: &str) {
    let path = workspace.root.join("venues.json");
    fs::write(&path, contents).expect("write venues");

    let err = workspace.store(&path).read_venues().expect_err("should fail");

    assert!(
        matches!(err, FileStoreError::Parse { .. }),
        "expected Parse error, got {err:?}"
    );
}

#[rstest]
fn recommendation_pass_writes_and_replaces_global_document(workspace: StoreFixture) {
    let path = workspace.write_venues(&json!([
        {"id": "north", "name": "North Hall", "isOpen": true, "menu": ["Chicken Noodle Soup"]},
        {"id": "south", "name": "South Commons", "menu": ["Garden Salad"]}
    ]));
    let store = workspace.store(&path);
    let target = store.recommendation_path();
    let recommender = Recommender::new(
        StaticWeatherSource::new(WeatherObservation::new(4.0, 2.0, 63)),
        StaticMenuSource::default(),
        store,
        RecommenderConfig::new(Coord { x: -71.12, y: 42.38 }),
    );
    let morning = Utc
        .with_ymd_and_hms(2024, 11, 20, 12, 0, 0)
        .single()
        .expect("valid instant");

    recommender.recommend(morning).expect("first pass");
    let response = recommender
        .recommend(morning + chrono::Duration::hours(5))
        .expect("second pass");

    assert!(target.ends_with("out/recommendations/global.json"));
    let written: Value =
        serde_json::from_str(&fs::read_to_string(&target).expect("read recommendation"))
            .expect("recommendation is JSON");
    assert_eq!(written["pick"]["hallId"], "north");
    assert_eq!(written["meal"], "lunch");
    assert_eq!(written["weather"]["condition"], "rain");
    assert_eq!(response.meal.as_str(), "lunch");
    assert!(written.get("updatedAt").is_some());

    let leftovers: Vec<_> = fs::read_dir(workspace.root.join("out/recommendations"))
        .expect("list output")
        .collect();
    assert_eq!(leftovers.len(), 1, "only global.json should remain");
}
