//! Dining venues and the store they are read from.

use geo::Coord;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::recommend::RecommendationDocument;

/// Where a venue's menu comes from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MenuOrigin {
    /// Items are stored on the venue record itself.
    #[default]
    Embedded,
    /// Items are fetched from the menu service by slug.
    External,
}

/// A dining location as stored.
///
/// Field names follow the stored documents; a few historical aliases are
/// accepted when reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Venue {
    /// Unique identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Whether the venue is serving right now.
    #[serde(default, alias = "open")]
    pub is_open: bool,
    /// Free-text wait estimate such as `"4-8 min"`.
    #[serde(default, alias = "wait", alias = "waitTime")]
    pub wait_minutes_text: Option<String>,
    /// Source of the venue's menu.
    #[serde(default)]
    pub menu_source: MenuOrigin,
    /// Slug understood by the menu service.
    #[serde(default, alias = "slug")]
    pub menu_slug: Option<String>,
    /// Embedded menu entries in their stored shape.
    #[serde(default, alias = "menu", alias = "items")]
    pub raw_menu_items: Option<Vec<Value>>,
    /// Latitude in degrees.
    #[serde(default, alias = "lat")]
    pub latitude: Option<f64>,
    /// Longitude in degrees.
    #[serde(default, alias = "lon", alias = "lng")]
    pub longitude: Option<f64>,
}

impl Venue {
    /// Create a closed venue with no menu.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            is_open: false,
            wait_minutes_text: None,
            menu_source: MenuOrigin::Embedded,
            menu_slug: None,
            raw_menu_items: None,
            latitude: None,
            longitude: None,
        }
    }

    /// Position as a WGS84 coordinate (`x = longitude`, `y = latitude`).
    #[must_use]
    pub fn location(&self) -> Option<Coord<f64>> {
        Some(Coord {
            x: self.longitude?,
            y: self.latitude?,
        })
    }
}

/// Errors raised by a [`VenueStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading the venue collection failed.
    #[error("failed to load venues from {location}: {message}")]
    Load {
        /// Where the collection lives.
        location: String,
        /// Error description.
        message: String,
    },
    /// Writing the recommendation document failed.
    #[error("failed to save recommendation to {location}: {message}")]
    Save {
        /// Where the document lives.
        location: String,
        /// Error description.
        message: String,
    },
}

/// Persistent venue storage.
///
/// The collection is read wholesale on each pass and a single
/// recommendation document, keyed by [`RecommendationDocument::KEY`], is
/// overwritten with the latest top pick.
pub trait VenueStore: Send + Sync {
    /// Return every venue in stored order.
    ///
    /// # Errors
    /// Returns [`StoreError::Load`] when the collection cannot be read.
    fn load_venues(&self) -> Result<Vec<Venue>, StoreError>;

    /// Replace the stored recommendation with `document`.
    ///
    /// # Errors
    /// Returns [`StoreError::Save`] when the document cannot be written.
    fn save_recommendation(&self, document: &RecommendationDocument) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn decodes_canonical_field_names() {
        let venue: Venue = serde_json::from_value(json!({
            "id": "north",
            "name": "North Commons",
            "isOpen": true,
            "waitMinutesText": "4-8 min",
            "menuSource": "external",
            "menuSlug": "north-commons",
            "latitude": 40.0,
            "longitude": -83.0
        }))
        .expect("decode venue");
        assert!(venue.is_open);
        assert_eq!(venue.menu_source, MenuOrigin::External);
        assert_eq!(venue.menu_slug.as_deref(), Some("north-commons"));
        assert_eq!(venue.location(), Some(Coord { x: -83.0, y: 40.0 }));
    }

    #[rstest]
    fn accepts_stored_aliases_and_defaults() {
        let venue: Venue = serde_json::from_value(json!({
            "id": "south",
            "name": "South Cafe",
            "open": true,
            "wait": "3 min",
            "items": [{ "name": "Latte" }],
            "lat": 40.1,
            "lng": -83.1
        }))
        .expect("decode venue");
        assert!(venue.is_open);
        assert_eq!(venue.wait_minutes_text.as_deref(), Some("3 min"));
        assert_eq!(venue.menu_source, MenuOrigin::Embedded);
        assert_eq!(venue.raw_menu_items.as_ref().map(|items| items.len()), Some(1));
        assert!(venue.location().is_some());
    }

    #[rstest]
    fn location_requires_both_coordinates() {
        let mut venue = Venue::new("v", "Venue");
        venue.latitude = Some(1.0);
        assert!(venue.location().is_none());
    }
}
