//! Test helpers for composing venue files and stubbed recommendation passes.

use camino::{Utf8Path, Utf8PathBuf};
use chrono::{DateTime, TimeZone, Utc};
use mealcast_core::test_support::{StaticMenuSource, StaticWeatherSource};
use mealcast_core::{Recommender, WeatherError, WeatherObservation};
use mealcast_data::JsonFileStore;
use serde_json::json;
use tempfile::TempDir;

use crate::CliError;
use crate::config::PassConfig;
use crate::recommend::{PassBuilder, RecommendPass};

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path, contents).expect("write test file");
}

/// 12:30 in New York on a weekday.
pub(super) fn lunchtime() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 11, 20, 17, 30, 0)
        .single()
        .expect("valid instant")
}

pub(super) fn rainy() -> WeatherObservation {
    WeatherObservation::new(3.0, 1.5, 63)
}

/// Temporary directory holding a venues file.
#[derive(Debug)]
pub(super) struct VenueFiles {
    _dir: TempDir,
    pub(super) root: Utf8PathBuf,
    pub(super) venues: Utf8PathBuf,
}

impl VenueFiles {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        let venues = root.join("venues.json");
        Self {
            _dir: dir,
            root,
            venues,
        }
    }

    /// Write an open soup kitchen and a closed taco stand.
    pub(super) fn write_default_venues(&self) {
        let document = json!([
            {
                "id": "soup-kitchen",
                "name": "Soup Kitchen",
                "isOpen": true,
                "waitMinutesText": "3 min",
                "rawMenuItems": [{"name": "Chicken Noodle Soup"}],
                "latitude": 42.3915,
                "longitude": -71.12
            },
            {
                "id": "taco-stand",
                "name": "Taco Stand",
                "isOpen": false,
                "rawMenuItems": ["Fish Taco"]
            }
        ]);
        write_utf8(&self.venues, document.to_string().as_bytes());
    }

    pub(super) fn recommendation_file(&self) -> Utf8PathBuf {
        self.root.join("recommendations").join("global.json")
    }
}

/// Builds passes from static weather and the configured JSON file store.
pub(super) struct StubPassBuilder {
    pub(super) weather: Result<WeatherObservation, WeatherError>,
}

impl PassBuilder for StubPassBuilder {
    fn build(&self, config: &PassConfig) -> Result<Box<dyn RecommendPass>, CliError> {
        let weather = match &self.weather {
            Ok(observation) => StaticWeatherSource::new(*observation),
            Err(err) => StaticWeatherSource::failing(err.clone()),
        };
        let store = JsonFileStore::new(
            config.venues_path.clone(),
            config.recommendation_dir.clone(),
        );
        Ok(Box::new(Recommender::new(
            weather,
            StaticMenuSource::default(),
            store,
            config.recommender_config(),
        )))
    }
}
