//! JSON-file [`VenueStore`].
//!
//! Venues are read from a single JSON document holding either an array of
//! venue records or an object keyed by venue id. The recommendation is
//! written to `<dir>/global.json`, replacing any previous file.

use camino::{Utf8Path, Utf8PathBuf};
use log::debug;
use mealcast_core::{RecommendationDocument, StoreError, Venue, VenueStore};
use serde_json::Value;
use thiserror::Error;

/// Errors raised by [`JsonFileStore`].
#[derive(Debug, Error)]
pub enum FileStoreError {
    /// The venues file could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// File that failed.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The venues file is not a valid venue collection.
    #[error("failed to parse venues in {path}: {source}")]
    Parse {
        /// File that failed.
        path: Utf8PathBuf,
        /// Underlying decode error.
        #[source]
        source: serde_json::Error,
    },
    /// The recommendation could not be written.
    #[error("failed to write {path}: {source}")]
    Write {
        /// File that failed.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The recommendation could not be encoded.
    #[error("failed to encode recommendation for {path}: {source}")]
    Encode {
        /// Destination file.
        path: Utf8PathBuf,
        /// Underlying encode error.
        #[source]
        source: serde_json::Error,
    },
}

impl From<FileStoreError> for StoreError {
    fn from(err: FileStoreError) -> Self {
        let message = err.to_string();
        match err {
            FileStoreError::Read { path, .. } | FileStoreError::Parse { path, .. } => {
                Self::Load {
                    location: path.into_string(),
                    message,
                }
            }
            FileStoreError::Write { path, .. } | FileStoreError::Encode { path, .. } => {
                Self::Save {
                    location: path.into_string(),
                    message,
                }
            }
        }
    }
}

/// Venue store backed by JSON files on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    venues_path: Utf8PathBuf,
    recommendation_dir: Utf8PathBuf,
}

impl JsonFileStore {
    /// Create a store reading `venues_path` and writing into
    /// `recommendation_dir`.
    #[must_use]
    pub fn new(
        venues_path: impl Into<Utf8PathBuf>,
        recommendation_dir: impl Into<Utf8PathBuf>,
    ) -> Self {
        Self {
            venues_path: venues_path.into(),
            recommendation_dir: recommendation_dir.into(),
        }
    }

    /// File holding the venue collection.
    #[must_use]
    pub fn venues_path(&self) -> &Utf8Path {
        &self.venues_path
    }

    /// File the recommendation document is written to.
    #[must_use]
    pub fn recommendation_path(&self) -> Utf8PathBuf {
        self.recommendation_dir
            .join(format!("{}.json", RecommendationDocument::KEY))
    }

    /// Read and decode every venue.
    ///
    /// # Errors
    ///
    /// Returns [`FileStoreError::Read`] when the file cannot be read and
    /// [`FileStoreError::Parse`] when it is not a venue array or id-keyed
    /// object.
    pub fn read_venues(&self) -> Result<Vec<Venue>, FileStoreError> {
        let text = mealcast_fs::read_utf8_file(&self.venues_path).map_err(|source| {
            FileStoreError::Read {
                path: self.venues_path.clone(),
                source,
            }
        })?;
        let parse_error = |source| FileStoreError::Parse {
            path: self.venues_path.clone(),
            source,
        };
        let document: Value = serde_json::from_str(&text).map_err(parse_error)?;
        let venues: Vec<Venue> =
            serde_json::from_value(into_venue_array(document)).map_err(parse_error)?;
        debug!("loaded {} venues from {}", venues.len(), self.venues_path);
        Ok(venues)
    }

    /// Encode and write the recommendation document.
    ///
    /// # Errors
    ///
    /// Returns [`FileStoreError::Encode`] or [`FileStoreError::Write`].
    pub fn write_recommendation(
        &self,
        document: &RecommendationDocument,
    ) -> Result<Utf8PathBuf, FileStoreError> {
        let path = self.recommendation_path();
        let body = serde_json::to_vec_pretty(document).map_err(|source| FileStoreError::Encode {
            path: path.clone(),
            source,
        })?;
        mealcast_fs::write_replacing(&path, &body).map_err(|source| FileStoreError::Write {
            path: path.clone(),
            source,
        })?;
        debug!("wrote recommendation to {path}");
        Ok(path)
    }
}

/// Turn an id-keyed object into an array, filling in missing `id` fields.
///
/// Arrays and other values pass through unchanged.
fn into_venue_array(document: Value) -> Value {
    let Value::Object(by_id) = document else {
        return document;
    };
    let venues = by_id
        .into_iter()
        .map(|(id, venue)| match venue {
            Value::Object(mut fields) => {
                fields.entry("id").or_insert(Value::String(id));
                Value::Object(fields)
            }
            other => other,
        })
        .collect();
    Value::Array(venues)
}

impl VenueStore for JsonFileStore {
    fn load_venues(&self) -> Result<Vec<Venue>, StoreError> {
        Ok(self.read_venues()?)
    }

    fn save_recommendation(&self, document: &RecommendationDocument) -> Result<(), StoreError> {
        self.write_recommendation(document)?;
        Ok(())
    }
}
