//! Shape-agnostic attribute path resolution
//!
//! Rules are addressed by dot-separated paths that do not depend on how many
//! elements a sequence holds. This module resolves such paths against a
//! `serde_json::Value`, expanding `*` wildcards into per-element results, and
//! flattens documents into dotted-path maps for assertions and tooling.
//!
//! ```
//! use portafilter_core::path::{resolve, Resolution};
//! use serde_json::json;
//!
//! let data = json!({"items": [{"id": 1}, {"id": 2}]});
//! let leaves = resolve("items.*.id", &data).leaves("items.*.id");
//!
//! assert_eq!(leaves[1].0, "items.1.id");
//! assert_eq!(leaves[1].1.value, &json!(2));
//! ```

pub mod flatten;
pub mod resolver;

#[cfg(test)]
mod prop_tests;

pub use flatten::flatten;
pub use resolver::{
    has_wildcard, replace_first_wildcard, resolve, resolve_with_default, Resolution, Resolved,
    SEPARATOR, WILDCARD,
};
