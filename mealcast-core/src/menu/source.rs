//! Menu source trait for externally hosted menus.

use chrono::NaiveDate;
use serde_json::Value;

use super::error::MenuFetchError;
use crate::MealPeriod;

/// Identifies one day's menu for one venue and meal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuRequest {
    /// Venue slug understood by the menu service.
    pub slug: String,
    /// Meal period to fetch.
    pub meal: MealPeriod,
    /// Local calendar date.
    pub date: NaiveDate,
}

/// Fetch a raw menu payload.
///
/// Implementations return the payload untouched; callers normalise it with
/// [`crate::normalize_external`]. Sources must be `Send + Sync` because the
/// recommender resolves venue menus on scoped threads.
///
/// # Examples
///
/// ```rust
/// use chrono::NaiveDate;
/// use mealcast_core::{MealPeriod, MenuFetchError, MenuRequest, MenuSource, normalize_external};
/// use serde_json::{Value, json};
///
/// struct OneSoup;
///
/// impl MenuSource for OneSoup {
///     fn fetch_menu(&self, _request: &MenuRequest) -> Result<Value, MenuFetchError> {
///         Ok(json!({ "menu_items": [{ "food": { "id": 1, "name": "Lentil Soup" } }] }))
///     }
/// }
///
/// let request = MenuRequest {
///     slug: "north-hall".into(),
///     meal: MealPeriod::Lunch,
///     date: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
/// };
/// let items = normalize_external(&OneSoup.fetch_menu(&request)?);
/// assert_eq!(items[0].name, "Lentil Soup");
/// # Ok::<(), MenuFetchError>(())
/// ```
pub trait MenuSource: Send + Sync {
    /// Return the raw payload for `request`.
    ///
    /// # Errors
    /// Returns [`MenuFetchError`] when the payload cannot be retrieved.
    fn fetch_menu(&self, request: &MenuRequest) -> Result<Value, MenuFetchError>;
}
