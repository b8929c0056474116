//! Property tests for path resolution

use super::*;
use crate::proptest_strategies::{json_value_strategy, path_strategy};
use proptest::prelude::*;
use serde_json::Value;

fn count_wildcards(path: &str) -> usize {
    path.split(SEPARATOR).filter(|s| *s == WILDCARD).count()
}

proptest! {
    #[test]
    fn prop_flattened_paths_resolve_to_their_leaves(data in json_value_strategy()) {
        for (path, leaf) in flatten(&data) {
            let resolved = resolve(&path, &data).single();
            prop_assert_eq!(resolved, Some(Resolved::found(&leaf)));
        }
    }

    #[test]
    fn prop_resolution_never_panics(data in json_value_strategy(), path in path_strategy()) {
        let leaves = resolve(&path, &data).leaves(&path);
        let bounded = leaves.iter().all(|(concrete, _)| {
            count_wildcards(concrete) <= count_wildcards(&path)
        });
        prop_assert!(bounded);
    }

    #[test]
    fn prop_missing_values_use_default(data in json_value_strategy(), path in path_strategy()) {
        let default = Value::String("default".to_string());
        for (_, resolved) in resolve_with_default(&path, &data, &default).leaves(&path) {
            if !resolved.exists {
                prop_assert_eq!(resolved.value, &default);
            }
        }
    }

    #[test]
    fn prop_terminal_wildcard_yields_every_element(items in proptest::collection::vec(json_value_strategy(), 0..8)) {
        let len = items.len();
        let data = serde_json::json!({"items": items});
        let leaves = resolve("items.*", &data).leaves("items.*");

        prop_assert_eq!(leaves.len(), len);
        for (index, (concrete, resolved)) in leaves.iter().enumerate() {
            prop_assert_eq!(concrete, &format!("items.{}", index));
            prop_assert!(resolved.exists);
        }
    }
}
