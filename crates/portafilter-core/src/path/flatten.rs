//! Dotted-path flattening of nested data

use serde_json::{Map, Value};

/// Flatten nested maps and sequences into a dotted-path → leaf map.
///
/// Keys and indices are joined with `.`. Empty containers contribute no
/// entries and a non-container root yields an empty map.
pub fn flatten(data: &Value) -> Map<String, Value> {
    let mut flat = Map::new();
    match data {
        Value::Object(_) | Value::Array(_) => walk(data, None, &mut flat),
        _ => {}
    }
    flat
}

fn walk(value: &Value, prefix: Option<&str>, flat: &mut Map<String, Value>) {
    let join = |segment: &str| match prefix {
        Some(prefix) => format!("{}.{}", prefix, segment),
        None => segment.to_string(),
    };

    match value {
        Value::Object(map) => {
            for (key, child) in map {
                walk(child, Some(&join(key)), flat);
            }
        }
        Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                walk(child, Some(&join(&index.to_string())), flat);
            }
        }
        leaf => {
            if let Some(path) = prefix {
                flat.insert(path.to_string(), leaf.clone());
            }
        }
    }
}
