//! Menu items, their normalisation from raw payloads, and attribute tagging.
//!
//! Raw items arrive in several shapes (objects, JSON-encoded strings, nested
//! API payloads). [`normalize_embedded`] and [`normalize_external`] resolve
//! them into one canonical [`MenuItem`] at the boundary; [`tag_item`] then
//! derives the attribute tags the scorer matches against.

mod error;
mod item;
mod normalize;
mod source;
mod tagger;

pub use error::MenuFetchError;
pub use item::{MenuItem, TaggedMenuItem, derive_item_id};
pub use normalize::{PLACEHOLDER_NAME, RawMenuItem, normalize_embedded, normalize_external};
pub use source::{MenuRequest, MenuSource};
pub use tagger::{tag_item, tag_menu};
