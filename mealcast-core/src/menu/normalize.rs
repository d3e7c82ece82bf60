//! Coerce raw menu payloads into [`MenuItem`] records.
//!
//! Embedded menus are lists whose entries are objects or JSON-encoded
//! strings. External menus come from a menu service and are either a flat
//! array of entries interleaved with station headers or an arbitrary object
//! graph that has to be searched.

use std::collections::{BTreeSet, HashSet};

use log::debug;
use serde_json::{Map, Value};

use super::item::MenuItem;

/// Name given to items that arrive without one.
pub const PLACEHOLDER_NAME: &str = "Unnamed item";

/// Keys accepted as an item identifier, in priority order.
const ID_KEYS: [&str; 4] = ["id", "food_id", "item_id", "uuid"];
/// Keys accepted as an item's own category, in priority order.
const CATEGORY_KEYS: [&str; 3] = ["category", "food_category", "station"];
/// Flags marking a station or section header in a flat payload.
const HEADER_FLAGS: [&str; 2] = ["is_section_title", "is_station_header"];
/// Nesting limit for the fallback search.
const MAX_SEARCH_DEPTH: usize = 64;

/// One raw menu entry, classified by shape.
#[derive(Debug, Clone, PartialEq)]
pub enum RawMenuItem {
    /// A JSON object carrying item fields.
    Structured(Map<String, Value>),
    /// A string that may hold a JSON-encoded object.
    Encoded(String),
    /// Any other JSON value.
    Other(Value),
}

impl From<Value> for RawMenuItem {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => Self::Structured(map),
            Value::String(text) => Self::Encoded(text),
            other => Self::Other(other),
        }
    }
}

impl RawMenuItem {
    /// Resolve the entry into a canonical item.
    ///
    /// Undecodable strings become the item name; other shapes receive the
    /// placeholder name.
    #[must_use]
    pub fn into_item(self) -> MenuItem {
        match self {
            Self::Structured(map) => item_from_object(&map, None),
            Self::Encoded(text) => match serde_json::from_str::<Value>(&text) {
                Ok(Value::Object(map)) => item_from_object(&map, None),
                Ok(Value::String(inner)) => named_from_text(&inner),
                Ok(_) | Err(_) => named_from_text(&text),
            },
            Self::Other(value) => {
                debug!("menu entry {value} has no usable shape; using placeholder");
                MenuItem::named(PLACEHOLDER_NAME)
            }
        }
    }
}

/// Item named by trimmed free text, or the placeholder when it is blank.
fn named_from_text(text: &str) -> MenuItem {
    match text.trim() {
        "" => MenuItem::named(PLACEHOLDER_NAME),
        name => MenuItem::named(name),
    }
}

/// Normalise an embedded menu list, preserving order.
///
/// # Examples
/// ```
/// use mealcast_core::normalize_embedded;
/// use serde_json::json;
///
/// let items = normalize_embedded(&[
///     json!({ "id": "a1", "name": "Tomato Soup", "labels": ["vegan"] }),
///     json!(r#"{"id":"b2","name":"Iced Tea","category":"Beverages"}"#),
///     json!("{not json"),
/// ]);
/// assert_eq!(items[1].category.as_deref(), Some("Beverages"));
/// assert_eq!(items[2].name, "{not json");
/// ```
#[must_use]
pub fn normalize_embedded(raw: &[Value]) -> Vec<MenuItem> {
    raw.iter()
        .cloned()
        .map(|value| RawMenuItem::from(value).into_item())
        .collect()
}

/// Normalise a payload returned by a menu service.
///
/// When the payload exposes a flat array of entries (the payload itself,
/// `menu_items`, or `days[0].menu_items`), it is walked linearly and each
/// station header becomes the category of the food entries after it.
/// Otherwise the whole tree is searched for objects carrying a `name` and an
/// identifier; candidates are deduplicated by `(id, name)` in first-seen
/// order.
#[must_use]
pub fn normalize_external(payload: &Value) -> Vec<MenuItem> {
    match flat_entries(payload) {
        Some(entries) => walk_flat_entries(entries),
        None => {
            debug!("menu payload has no flat item array; searching the tree");
            search_tree(payload)
        }
    }
}

fn flat_entries(payload: &Value) -> Option<&[Value]> {
    let candidate = match payload {
        Value::Array(entries) => Some(entries),
        Value::Object(map) => map.get("menu_items").and_then(Value::as_array).or_else(|| {
            map.get("days")
                .and_then(Value::as_array)
                .and_then(|days| days.first())
                .and_then(|day| day.get("menu_items"))
                .and_then(Value::as_array)
        }),
        _ => None,
    }?;
    candidate
        .iter()
        .all(Value::is_object)
        .then_some(candidate.as_slice())
}

fn walk_flat_entries(entries: &[Value]) -> Vec<MenuItem> {
    let mut section: Option<String> = None;
    let mut items = Vec::new();
    for entry in entries.iter().filter_map(Value::as_object) {
        if is_header(entry) {
            section = string_field(entry, &["text", "name"]);
            continue;
        }
        let food = entry.get("food").and_then(Value::as_object).unwrap_or(entry);
        if string_field(food, &["name"]).is_none() {
            continue;
        }
        let mut item = item_from_object(food, section.clone());
        if identifier(food).is_none()
            && let Some(id) = identifier(entry)
        {
            item.id = id;
        }
        items.push(item);
    }
    items
}

fn is_header(entry: &Map<String, Value>) -> bool {
    HEADER_FLAGS
        .iter()
        .any(|flag| entry.get(*flag).and_then(Value::as_bool).unwrap_or(false))
}

fn search_tree(payload: &Value) -> Vec<MenuItem> {
    let mut seen: HashSet<(String, String)> = HashSet::new();
    let mut items = Vec::new();
    let mut stack: Vec<(&Value, usize)> = vec![(payload, 0)];

    while let Some((node, depth)) = stack.pop() {
        if depth > MAX_SEARCH_DEPTH {
            debug!("menu payload nested deeper than {MAX_SEARCH_DEPTH}; pruning");
            continue;
        }
        let children: Box<dyn DoubleEndedIterator<Item = &Value> + '_> = match node {
            Value::Object(map) => {
                if let (Some(id), Some(name)) = (identifier(map), string_field(map, &["name"])) {
                    if seen.insert((id, name)) {
                        items.push(item_from_object(map, None));
                    }
                    // A candidate's children are its attributes, not more items.
                    continue;
                }
                Box::new(map.values())
            }
            Value::Array(values) => Box::new(values.iter()),
            _ => continue,
        };
        // Reverse so the stack pops children in document order.
        stack.extend(children.rev().map(|child| (child, depth + 1)));
    }
    items
}

fn item_from_object(map: &Map<String, Value>, section: Option<String>) -> MenuItem {
    let name = string_field(map, &["name"]).unwrap_or_else(|| PLACEHOLDER_NAME.to_owned());
    let category = section.or_else(|| string_field(map, &CATEGORY_KEYS));
    MenuItem::new(identifier(map), name, category, labels(map))
}

fn identifier(map: &Map<String, Value>) -> Option<String> {
    ID_KEYS.iter().find_map(|key| match map.get(*key)? {
        Value::String(id) if !id.trim().is_empty() => Some(id.clone()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    })
}

fn string_field(map: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| {
        map.get(*key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(str::to_owned)
    })
}

/// Collect labels from `labels` and from `icons.food_icons`.
///
/// Labels may be plain strings or objects carrying a `name`.
fn labels(map: &Map<String, Value>) -> BTreeSet<String> {
    let direct = map.get("labels").and_then(Value::as_array);
    let icons = map
        .get("icons")
        .and_then(|icons| icons.get("food_icons"))
        .and_then(Value::as_array);
    direct
        .into_iter()
        .chain(icons)
        .flatten()
        .filter_map(|label| match label {
            Value::String(text) => Some(text.as_str()),
            Value::Object(obj) => obj.get("name").and_then(Value::as_str),
            _ => None,
        })
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_owned)
        .collect()
}
