//! Canonical menu item records.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Separator between hashed fields; cannot appear in typed menu text.
const ID_FIELD_SEPARATOR: &str = "\u{1f}";
/// Hex characters kept from the digest.
const ID_HEX_LEN: usize = 16;

/// A menu entry after normalisation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    /// Upstream identifier, or one derived from the name and category.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Station or section the item is served from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Dietary and attribute labels supplied by the menu source.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub labels: BTreeSet<String>,
}

impl MenuItem {
    /// Build an item, deriving its id when `id` is `None`.
    #[must_use]
    pub fn new(
        id: Option<String>,
        name: impl Into<String>,
        category: Option<String>,
        labels: BTreeSet<String>,
    ) -> Self {
        let name = name.into();
        let id = id.unwrap_or_else(|| derive_item_id(&name, category.as_deref()));
        Self {
            id,
            name,
            category,
            labels,
        }
    }

    /// Build an item carrying only a name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(None, name, None, BTreeSet::new())
    }
}

/// A [`MenuItem`] annotated with the attribute tags it satisfies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedMenuItem {
    /// The underlying item.
    pub item: MenuItem,
    /// Tags derived from the name, category, and labels.
    pub tags: BTreeSet<String>,
}

/// Derive a stable identifier for an item without one.
///
/// The id depends only on the name and category, so the same dish receives
/// the same id on every invocation.
///
/// # Examples
/// ```
/// use mealcast_core::derive_item_id;
///
/// let first = derive_item_id("Tomato Soup", Some("Soups"));
/// assert_eq!(first, derive_item_id("Tomato Soup", Some("Soups")));
/// assert_ne!(first, derive_item_id("Tomato Soup", None));
/// assert!(first.starts_with("item-"));
/// ```
#[must_use]
pub fn derive_item_id(name: &str, category: Option<&str>) -> String {
    let mut hasher = Sha256::new();
    hasher.update(name.as_bytes());
    hasher.update(ID_FIELD_SEPARATOR.as_bytes());
    if let Some(category) = category {
        hasher.update(category.as_bytes());
    }
    let digest = hex::encode(hasher.finalize());
    let prefix = digest.get(..ID_HEX_LEN).unwrap_or(&digest);
    format!("item-{prefix}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn explicit_ids_are_kept() {
        let item = MenuItem::new(Some("42".into()), "Chili", None, BTreeSet::new());
        assert_eq!(item.id, "42");
    }

    #[rstest]
    fn derived_ids_are_stable_and_distinguish_categories() {
        let a = MenuItem::new(None, "Chili", Some("Soups".into()), BTreeSet::new());
        let b = MenuItem::new(None, "Chili", Some("Soups".into()), BTreeSet::new());
        let c = MenuItem::new(None, "Chili", Some("Grill".into()), BTreeSet::new());
        assert_eq!(a.id, b.id);
        assert_ne!(a.id, c.id);
        assert_eq!(a.id.len(), "item-".len() + ID_HEX_LEN);
    }

    #[rstest]
    fn separator_prevents_field_boundary_collisions() {
        assert_ne!(
            derive_item_id("ab", Some("c")),
            derive_item_id("a", Some("bc"))
        );
    }
}
