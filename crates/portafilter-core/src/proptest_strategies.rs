//! Property-based testing strategies for generating test data
//!
//! This module provides proptest strategies for generating random nested
//! documents and attribute paths for property testing.

#![cfg(test)]

use proptest::collection::{hash_map, vec};
use proptest::prelude::*;
use serde_json::Value;

/// Strategy for map keys that never collide with path syntax
pub fn key_strategy() -> impl Strategy<Value = String> {
    "[a-z_][a-z0-9_]{0,8}"
}

/// Strategy for scalar leaves
pub fn leaf_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| Value::Number(n.into())),
        "[a-zA-Z0-9 ]{0,20}".prop_map(Value::String),
    ]
}

/// Strategy for nested documents with controlled complexity
pub fn json_value_strategy() -> impl Strategy<Value = Value> {
    leaf_strategy().prop_recursive(
        4,  // max depth
        32, // max size
        5,  // items per collection
        |inner| {
            prop_oneof![
                vec(inner.clone(), 0..5).prop_map(Value::Array),
                hash_map(key_strategy(), inner, 0..5)
                    .prop_map(|m| Value::Object(m.into_iter().collect())),
            ]
        },
    )
}

/// Strategy for attribute paths mixing keys, indices and wildcards
pub fn path_strategy() -> impl Strategy<Value = String> {
    let segment = prop_oneof![
        3 => key_strategy(),
        1 => (0usize..4).prop_map(|i| i.to_string()),
        1 => Just("*".to_string()),
    ];
    vec(segment, 1..5).prop_map(|segments| segments.join("."))
}
