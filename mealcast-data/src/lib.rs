//! Outbound adapters for the Mealcast recommender.
//!
//! Responsibilities:
//! - Fetch current weather from an Open-Meteo compatible service.
//! - Fetch day menus from the dining menu service.
//! - Read venues from, and write recommendations to, JSON files.
//!
//! Boundaries:
//! - Do not encode domain rules (they live in `mealcast-core`).
//! - Expose only the synchronous collaborator traits; async HTTP is bridged
//!   internally.
//!
//! # Runtime behaviour
//!
//! Each HTTP adapter owns a small multi-threaded Tokio runtime. When called
//! from inside an existing multi-threaded runtime, the caller's handle is
//! used through [`tokio::task::block_in_place`] instead. Calling an adapter
//! from a `current_thread` runtime is not supported and panics.
//!
//! Adapters must be dropped outside of any async context, because dropping
//! the owned runtime there panics.

mod error;
mod http;
mod menu;
mod runtime;
mod store;
mod weather;

pub use error::ProviderBuildError;
pub use http::DEFAULT_USER_AGENT;
pub use menu::{HttpMenuSource, HttpMenuSourceConfig};
pub use store::{FileStoreError, JsonFileStore};
pub use weather::{DEFAULT_WEATHER_BASE_URL, OpenMeteoSource, OpenMeteoSourceConfig};
