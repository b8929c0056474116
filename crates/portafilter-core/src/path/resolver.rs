//! Attribute path resolution
//!
//! Paths are dot-separated segments. A `*` segment expands over every element
//! of the sequence found at its prefix; a pure-integer segment indexes into a
//! sequence and falls back to a key lookup when the prefix is a map. Missing
//! or mis-shaped intermediate values never raise: the branch resolves to the
//! default value with `exists == false`.
//!
//! Copyright (c) 2025 Portafilter Team
//! Licensed under the Apache-2.0 license

use serde_json::Value;

/// Wildcard segment
pub const WILDCARD: &str = "*";

/// Segment separator
pub const SEPARATOR: char = '.';

pub(crate) static NULL: Value = Value::Null;

/// A single resolved value and whether its final key/index was present
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolved<'a> {
    pub value: &'a Value,
    pub exists: bool,
}

impl<'a> Resolved<'a> {
    /// A value found in the data
    pub fn found(value: &'a Value) -> Self {
        Self { value, exists: true }
    }

    /// A value that was not present in the data
    pub fn missing(default: &'a Value) -> Self {
        Self {
            value: default,
            exists: false,
        }
    }
}

/// Result of resolving an attribute path
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution<'a> {
    /// The path contained no expanded wildcard
    Single(Resolved<'a>),
    /// A wildcard was expanded: one nested resolution per sequence element
    Expanded(Vec<(usize, Resolution<'a>)>),
}

impl<'a> Resolution<'a> {
    /// True when a wildcard segment was expanded
    pub fn is_expanded(&self) -> bool {
        matches!(self, Resolution::Expanded(_))
    }

    /// The single resolved value, if no wildcard was expanded
    pub fn single(&self) -> Option<Resolved<'a>> {
        match self {
            Resolution::Single(resolved) => Some(*resolved),
            Resolution::Expanded(_) => None,
        }
    }

    /// Flatten into `(concrete path, value)` pairs.
    ///
    /// Each expansion level replaces the first remaining `*` segment of
    /// `attribute` with the element index. A wildcard whose container was
    /// absent stays literal in the returned path.
    pub fn leaves(&self, attribute: &str) -> Vec<(String, Resolved<'a>)> {
        let mut leaves = Vec::new();
        collect_leaves(self, attribute.to_string(), &mut leaves);
        leaves
    }
}

fn collect_leaves<'a>(
    resolution: &Resolution<'a>,
    attribute: String,
    leaves: &mut Vec<(String, Resolved<'a>)>,
) {
    match resolution {
        Resolution::Single(resolved) => leaves.push((attribute, *resolved)),
        Resolution::Expanded(items) => {
            for (index, nested) in items {
                collect_leaves(nested, replace_first_wildcard(&attribute, *index), leaves);
            }
        }
    }
}

/// Replace the first `*` segment of a path with a concrete index
pub fn replace_first_wildcard(attribute: &str, index: usize) -> String {
    let mut replaced = false;
    attribute
        .split(SEPARATOR)
        .map(|segment| {
            if !replaced && segment == WILDCARD {
                replaced = true;
                index.to_string()
            } else {
                segment.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(".")
}

/// Whether a path contains at least one wildcard segment
pub fn has_wildcard(attribute: &str) -> bool {
    attribute.split(SEPARATOR).any(|segment| segment == WILDCARD)
}

/// Resolve a path against the data, using `null` for missing values
pub fn resolve<'a>(path: &str, data: &'a Value) -> Resolution<'a> {
    resolve_with_default(path, data, &NULL)
}

/// Resolve a path against the data, using `default` for missing values
pub fn resolve_with_default<'a>(path: &str, data: &'a Value, default: &'a Value) -> Resolution<'a> {
    let segments: Vec<&str> = path.split(SEPARATOR).collect();
    resolve_segments(&segments, data, default)
}

fn resolve_segments<'a>(segments: &[&str], current: &'a Value, default: &'a Value) -> Resolution<'a> {
    let Some((head, rest)) = segments.split_first() else {
        return Resolution::Single(Resolved::found(current));
    };

    if *head == WILDCARD {
        let Some(items) = current.as_array() else {
            return Resolution::Single(Resolved::missing(default));
        };

        let expanded = items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let nested = if rest.is_empty() {
                    Resolution::Single(Resolved::found(item))
                } else {
                    resolve_segments(rest, item, default)
                };
                (index, nested)
            })
            .collect();

        return Resolution::Expanded(expanded);
    }

    match lookup(current, head) {
        Some(child) if rest.is_empty() => Resolution::Single(Resolved::found(child)),
        Some(child) => resolve_segments(rest, child, default),
        None => Resolution::Single(Resolved::missing(default)),
    }
}

/// Look up one segment: an index for sequences, a key for maps
fn lookup<'a>(current: &'a Value, segment: &str) -> Option<&'a Value> {
    match current {
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|index| items.get(index)),
        Value::Object(map) => map.get(segment),
        _ => None,
    }
}
