//! Shared test support utilities for integration tests

#![allow(dead_code)]

use portafilter_core::{trans, ValidationErrors, Validator};
use serde_json::{json, Value};

/// A coffee order with nested menu items
pub fn coffee_order() -> Value {
    json!({
        "customer": {
            "name": "Ada",
            "email": "ada@example.com"
        },
        "menu": [
            {"id": 1, "name": "espresso", "price": 2.5, "ingredients": ["robusta", "water"]},
            {"id": 2, "name": "latte", "price": 3.8, "ingredients": ["arabica", "water", "milk"]}
        ],
        "pickup": "2023-05-01",
        "notes": null
    })
}

/// Rules that [`coffee_order`] satisfies
pub fn coffee_rules() -> Vec<(&'static str, &'static str)> {
    vec![
        ("customer", "required|dict:name,email"),
        ("customer.name", "required|string|min:2"),
        ("customer.email", "required|email"),
        ("menu", "required|list:dict|min:1"),
        ("menu.*.id", "required|integer"),
        ("menu.*.name", "required|string|in:espresso,latte,lungo"),
        ("menu.*.price", "required|numeric|between:0.5,10"),
        ("menu.*.ingredients", "required|list:string|contains:water"),
        ("pickup", "required|after:2023-01-01"),
        ("notes", "nullable|string|max:200"),
    ]
}

/// Build a validator, panicking on configuration errors
pub fn validator(data: Value, rules: &[(&str, &str)]) -> Validator {
    Validator::make(data, rules.iter().copied()).expect("rules should compile")
}

/// Run a validator and return its report
pub fn report(data: Value, rules: &[(&str, &str)]) -> ValidationErrors {
    let mut validator = validator(data, rules);
    let _ = validator.fails();
    validator.errors().clone()
}

/// Translate an English message with string substitutions
pub fn en(key: &str, substitutions: &[(&str, &str)]) -> String {
    let substitutions: Vec<(&str, String)> = substitutions
        .iter()
        .map(|(name, value)| (*name, value.to_string()))
        .collect();
    trans(&format!("en.{}", key), &substitutions)
}

/// Assert a report contains exactly these paths, in order
pub fn assert_paths(report: &ValidationErrors, expected: &[&str]) {
    let paths: Vec<&str> = report.paths().collect();
    assert_eq!(paths, expected, "unexpected report: {:?}", report);
}
