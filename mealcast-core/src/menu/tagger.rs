//! Derive attribute tags for menu items from their text.
//!
//! Each rule inspects the lowercased name, category, or labels and
//! contributes a fixed set of tags. Name and category rules match
//! substrings; label rules match whole labels. Rules accumulate into a set, so their
//! order never changes the result, and every label is also copied into the
//! tag set verbatim.

use std::collections::BTreeSet;

use super::item::{MenuItem, TaggedMenuItem};
use crate::tags::{COLD, COMFORT, DRINK, HOT, SALAD, SOUP};

/// Field a rule inspects.
#[derive(Debug, Clone, Copy)]
enum Field {
    Name,
    NameOrCategory,
    Category,
    Labels,
}

/// Any `needle` found in `field` adds `tags`.
struct Rule {
    field: Field,
    needles: &'static [&'static str],
    tags: &'static [&'static str],
}

const RULES: &[Rule] = &[
    Rule {
        field: Field::Name,
        needles: &["soup"],
        tags: &[SOUP],
    },
    Rule {
        field: Field::Name,
        needles: &["salad"],
        tags: &[SALAD],
    },
    Rule {
        field: Field::Name,
        needles: &["cold brew", "iced", "smoothie"],
        tags: &[DRINK, COLD],
    },
    Rule {
        field: Field::NameOrCategory,
        needles: &["burrito"],
        tags: &[COMFORT, HOT],
    },
    Rule {
        field: Field::NameOrCategory,
        needles: &["taco", "bowl"],
        tags: &[COMFORT],
    },
    Rule {
        field: Field::Name,
        needles: &["queso"],
        tags: &[COMFORT, HOT],
    },
    Rule {
        field: Field::Labels,
        needles: &["cheese"],
        tags: &[COMFORT, HOT],
    },
    Rule {
        field: Field::Name,
        needles: &["grill", "pasta", "bbq", "fried"],
        tags: &[COMFORT],
    },
    Rule {
        field: Field::Category,
        needles: &["beverage"],
        tags: &[DRINK],
    },
];

/// Lowercased views of the fields the rules inspect.
struct Haystack {
    name: String,
    category: String,
    labels: Vec<String>,
}

impl Haystack {
    fn of(item: &MenuItem) -> Self {
        Self {
            name: item.name.to_lowercase(),
            category: item.category.as_deref().unwrap_or_default().to_lowercase(),
            labels: item.labels.iter().map(|label| label.to_lowercase()).collect(),
        }
    }

    fn matches(&self, rule: &Rule) -> bool {
        rule.needles.iter().any(|needle| match rule.field {
            Field::Name => self.name.contains(needle),
            Field::Category => self.category.contains(needle),
            Field::NameOrCategory => self.name.contains(needle) || self.category.contains(needle),
            Field::Labels => self.labels.iter().any(|label| label.trim() == *needle),
        })
    }
}

/// Compute the tag set for `item`.
///
/// # Examples
/// ```
/// use mealcast_core::{MenuItem, tag_item};
///
/// let tagged = tag_item(MenuItem::named("Iced Matcha Latte"));
/// assert!(tagged.tags.contains("drink"));
/// assert!(tagged.tags.contains("cold"));
/// ```
#[must_use]
pub fn tag_item(item: MenuItem) -> TaggedMenuItem {
    let haystack = Haystack::of(&item);
    let mut tags: BTreeSet<String> = item.labels.iter().cloned().collect();
    for rule in RULES.iter().filter(|rule| haystack.matches(rule)) {
        tags.extend(rule.tags.iter().map(|tag| (*tag).to_owned()));
    }
    TaggedMenuItem { item, tags }
}

/// Tag every item of a menu, preserving order.
#[must_use]
pub fn tag_menu(items: Vec<MenuItem>) -> Vec<TaggedMenuItem> {
    items.into_iter().map(tag_item).collect()
}
