//! Food attribute tags shared by the weather classifier, the menu tagger,
//! and the scorer.
//!
//! Tags are plain lowercase strings because menu labels are copied into an
//! item's tag set verbatim. The constants below name the tags the built-in
//! rules produce.

use serde::Serialize;

/// Broth-based dishes.
pub const SOUP: &str = "soup";
/// Hearty, filling food.
pub const COMFORT: &str = "comfort";
/// Served hot.
pub const HOT: &str = "hot";
/// Served cold.
pub const COLD: &str = "cold";
/// Salads and other leafy dishes.
pub const SALAD: &str = "salad";
/// Beverages.
pub const DRINK: &str = "drink";
/// Neutral fallback when no weather rule fires.
pub const BALANCED: &str = "balanced";

/// Ordered, duplicate-free set of tags the current weather calls for.
///
/// Iteration follows insertion order, which keeps matched tags and generated
/// reasons deterministic for the same observation.
///
/// # Examples
/// ```
/// use mealcast_core::DesiredTags;
///
/// let mut tags = DesiredTags::new();
/// assert!(tags.insert("soup"));
/// assert!(!tags.insert("soup"));
/// tags.insert("hot");
/// assert_eq!(tags.iter().collect::<Vec<_>>(), ["soup", "hot"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DesiredTags {
    tags: Vec<String>,
}

impl DesiredTags {
    /// Create an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self { tags: Vec::new() }
    }

    /// The set used when no weather rule applies.
    #[must_use]
    pub fn balanced() -> Self {
        Self {
            tags: vec![BALANCED.to_owned()],
        }
    }

    /// Add `tag` unless already present. Returns `true` when inserted.
    pub fn insert(&mut self, tag: impl Into<String>) -> bool {
        let tag = tag.into();
        if self.contains(&tag) {
            return false;
        }
        self.tags.push(tag);
        true
    }

    /// Report whether `tag` is present.
    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        self.tags.iter().any(|existing| existing == tag)
    }

    /// Iterate tags in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.tags.iter().map(String::as_str)
    }

    /// Number of tags.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.tags.len()
    }

    /// Report whether the set is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Borrow the tags as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.tags
    }
}

impl<S: Into<String>> FromIterator<S> for DesiredTags {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut tags = Self::new();
        for tag in iter {
            tags.insert(tag);
        }
        tags
    }
}

impl<S: Into<String>> Extend<S> for DesiredTags {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for tag in iter {
            self.insert(tag);
        }
    }
}
