//! Day menus fetched from the dining menu service.

mod provider;

pub use provider::{HttpMenuSource, HttpMenuSourceConfig};
