//! Current weather and the food attributes it suggests.
//!
//! A [`WeatherSource`] supplies a raw [`WeatherObservation`]. The classifier
//! turns the coded condition into a [`Condition`] label and derives the
//! [`DesiredTags`](crate::DesiredTags) that drive venue scoring.

mod classify;
mod condition;
mod error;
mod source;

pub use classify::{COLD_THRESHOLD_C, HOT_THRESHOLD_C, WeatherAssessment, desired_tags};
pub use condition::Condition;
pub use error::WeatherError;
pub use source::{WeatherObservation, WeatherSource};
