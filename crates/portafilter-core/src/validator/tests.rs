//! Tests for the validation system
//!
//! End-to-end behavior of [`Validator`] over nested documents: presence
//! semantics, wildcard expansion, dependent rules and report idempotence.

use super::{ValidationErrors, Validator};
use crate::error::Error;
use crate::messages::trans;
use crate::rules::{Rule, RuleContext, RuleItem, RuleRegistry, RuleSpec, Ruleset};
use serde_json::{json, Value};
use std::sync::Arc;

fn attr(attribute: &str) -> Vec<(&'static str, String)> {
    vec![("attribute", attribute.to_string())]
}

fn msg(key: &str, substitutions: &[(&str, &str)]) -> String {
    let substitutions: Vec<(&str, String)> = substitutions
        .iter()
        .map(|(name, value)| (*name, value.to_string()))
        .collect();
    trans(&format!("en.{}", key), &substitutions)
}

fn validator(data: Value, rules: &[(&str, &str)]) -> Validator {
    Validator::make(data, rules.iter().copied()).unwrap()
}

#[test]
fn test_required_field_absent_or_null() {
    for data in [json!({}), json!({"name": null})] {
        let mut v = validator(data, &[("name", "required|string")]);
        assert!(v.fails());
        assert_eq!(
            v.errors().get("name").unwrap()[0],
            trans("en.required", &attr("name"))
        );
    }
}

#[test]
fn test_required_accepts_false_and_zero() {
    let mut v = validator(
        json!({"is_verified": false, "count": 0}),
        &[("is_verified", "required|boolean"), ("count", "required|integer")],
    );
    assert!(v.passes());
    assert!(v.errors().is_empty());
}

#[test]
fn test_nullable_never_fails_on_null() {
    for rules in ["nullable|integer|min:3", "nullable|email", "nullable|list:dict|size:2", "nullable|after:today"] {
        let mut present = validator(json!({"field": null}), &[("field", rules)]);
        assert!(!present.fails(), "{rules}");

        let mut absent = validator(json!({}), &[("field", rules)]);
        assert!(!absent.fails(), "{rules}");
    }
}

#[test]
fn test_optional_field_semantics() {
    // Missing key: skipped
    assert!(validator(json!({}), &[("age", "integer")]).passes());
    // Present null without nullable: validated
    let mut v = validator(json!({"age": null}), &[("age", "integer")]);
    assert!(v.fails());
    assert_eq!(v.errors().get("age").unwrap(), [trans("en.integer", &attr("age"))]);
}

#[test]
fn test_errors_are_idempotent() {
    let mut v = validator(json!({"age": "x"}), &[("age", "required|integer|min:3")]);

    assert!(v.fails());
    let first = v.errors().clone();
    assert_eq!(v.errors(), &first);

    assert!(v.fails());
    assert_eq!(v.errors(), &first);
    assert_eq!(first.get("age").map(|m| m.len()), Some(2));
}

#[test]
fn test_validate_returns_report_in_error() {
    let mut v = validator(json!({"age": "x"}), &[("age", "integer")]);
    let err = v.validate().unwrap_err();
    assert!(!err.is_configuration());
    assert_eq!(err.validation_errors(), Some(v.errors()));

    let mut ok = validator(json!({"age": 3}), &[("age", "integer")]);
    assert!(ok.validate().is_ok());
}

#[test]
fn test_wildcard_reports_only_failing_element() {
    let mut v = validator(json!({"items": [{"id": 1}, {"id": "x"}]}), &[("items.*.id", "integer")]);

    assert!(v.fails());
    assert_eq!(v.errors().len(), 1);
    assert_eq!(
        v.errors().get("items.1.id").unwrap(),
        [trans("en.integer", &attr("items.1.id"))]
    );
    assert!(!v.errors().contains("items.0.id"));
}

#[test]
fn test_nested_wildcards() {
    let mut v = validator(
        json!({"rows": [{"cells": [{"v": 1}, {"v": "x"}]}]}),
        &[("rows.*.cells.*.v", "integer")],
    );

    assert!(v.fails());
    assert_eq!(v.errors().paths().collect::<Vec<_>>(), vec!["rows.0.cells.1.v"]);
}

#[test]
fn test_nested_wildcards_visit_every_branch() {
    let mut v = validator(
        json!({"rows": [
            {"cells": [{"v": "a"}]},
            {"cells": [{"v": 2}, {"v": "b"}]}
        ]}),
        &[("rows.*.cells.*.v", "integer")],
    );

    assert!(v.fails());
    assert_eq!(
        v.errors().paths().collect::<Vec<_>>(),
        vec!["rows.0.cells.0.v", "rows.1.cells.1.v"]
    );
}

#[test]
fn test_missing_inner_container_keeps_wildcard_literal() {
    let mut v = validator(json!({"a": [{"c": 1}]}), &[("a.*.b.*.c", "required")]);

    assert!(v.fails());
    assert_eq!(v.errors().paths().collect::<Vec<_>>(), vec!["a.0.b.*.c"]);
}

#[test]
fn test_wildcard_over_missing_sequence() {
    let mut v = validator(json!({}), &[("menu.*.name", "required")]);
    assert!(v.fails());
    assert!(v.errors().contains("menu.*.name"));

    assert!(validator(json!({}), &[("menu.*.name", "string")]).passes());
    assert!(validator(json!({"menu": []}), &[("menu.*.name", "required")]).passes());
}

#[test]
fn test_terminal_wildcard_null_element() {
    let mut v = validator(json!({"menu": ["latte", null, 3]}), &[("menu.*", "string")]);
    assert!(v.fails());
    assert_eq!(v.errors().paths().collect::<Vec<_>>(), vec!["menu.1", "menu.2"]);

    assert!(validator(json!({"menu": ["latte", null]}), &[("menu.*", "nullable|string")]).passes());
}

#[test]
fn test_concrete_index_segment() {
    let mut v = validator(
        json!({"coffee_menu": [{"id": 1}, {"id": "two"}]}),
        &[("coffee_menu.1.id", "integer"), ("coffee_menu.0", "dict")],
    );
    assert!(v.fails());
    assert_eq!(v.errors().paths().collect::<Vec<_>>(), vec!["coffee_menu.1.id"]);
}

#[test]
fn test_same_and_different() {
    let mut v = validator(json!({"pw": "a", "pw2": "b"}), &[("pw", "same:pw2")]);
    assert!(v.fails());
    assert_eq!(
        v.errors().get("pw").unwrap(),
        [msg("same", &[("attribute", "pw"), ("other", "pw2")])]
    );

    assert!(validator(json!({"pw": "a", "pw2": "a"}), &[("pw", "same:pw2")]).passes());
    assert!(validator(json!({"pw": "a"}), &[("pw", "same:pw2")]).fails());

    let rules = [("current_password", "required|different:new_password")];
    assert!(validator(json!({"current_password": "a", "new_password": "b"}), &rules).passes());
    assert!(validator(json!({"current_password": "a", "new_password": "a"}), &rules).fails());
    assert!(validator(json!({"current_password": "a"}), &rules).passes());
}

#[test]
fn test_same_inside_wildcard_compares_against_top_level_path() {
    let mut v = validator(
        json!({"default": 1, "items": [{"qty": 1}, {"qty": 2}]}),
        &[("items.*.qty", "same:default")],
    );
    assert!(v.fails());
    assert_eq!(v.errors().paths().collect::<Vec<_>>(), vec!["items.1.qty"]);
}

#[test]
fn test_between_with_date_uses_date_message() {
    let mut v = validator(json!({"d": "2023-01-20"}), &[("d", "date|between:2023-01-01,2023-01-05")]);
    assert!(v.fails());
    assert_eq!(
        v.errors().get("d").unwrap(),
        [msg("between.date", &[("attribute", "d"), ("min", "2023-01-01"), ("max", "2023-01-05")])]
    );
}

#[test]
fn test_magnitude_depends_on_value_type() {
    let mut list = validator(json!({"x": [1, 2]}), &[("x", "list|min:3")]);
    assert!(list.fails());
    assert_eq!(
        list.errors().get("x").unwrap(),
        [msg("min.list", &[("attribute", "x"), ("min", "3")])]
    );

    let mut string = validator(json!({"x": "ab"}), &[("x", "min:3")]);
    assert!(string.fails());
    assert_eq!(
        string.errors().get("x").unwrap(),
        [msg("min.string", &[("attribute", "x"), ("min", "3")])]
    );

    let mut numeric = validator(json!({"x": 2}), &[("x", "integer|min:3")]);
    assert!(numeric.fails());
    assert_eq!(
        numeric.errors().get("x").unwrap(),
        [msg("min.numeric", &[("attribute", "x"), ("min", "3")])]
    );
}

#[test]
fn test_date_comparison_against_other_field() {
    let rules = [("start_date", "before:end_date")];

    let mut v = validator(json!({"start_date": "2023-03-01", "end_date": "2023-02-01"}), &rules);
    assert!(v.fails());
    assert_eq!(
        v.errors().get("start_date").unwrap(),
        [msg("before", &[("attribute", "start_date"), ("date", "end_date")])]
    );

    assert!(validator(json!({"start_date": "2023-01-01", "end_date": "2023-02-01"}), &rules).passes());
}

#[test]
fn test_date_comparison_against_field_holding_keyword() {
    let rules = [("start", "before:end")];

    assert!(validator(json!({"start": "2000-01-01", "end": "today"}), &rules).passes());
    assert!(validator(json!({"start": "2999-01-01", "end": "today"}), &rules).fails());
    assert!(validator(json!({"start": "2000-01-01", "end": "someday"}), &rules).fails());
}

#[test]
fn test_date_comparison_injects_date_rule() {
    let mut v = validator(json!({"date": "not a date"}), &[("date", "after:2022-12-22")]);
    assert!(v.fails());
    assert_eq!(
        v.errors().get("date").unwrap(),
        [
            msg("after", &[("attribute", "date"), ("date", "2022-12-22")]),
            msg("date", &[("attribute", "date")]),
        ]
    );
}

#[test]
fn test_date_keywords() {
    let today = chrono::Local::now().date_naive().format("%Y-%m-%d").to_string();

    assert!(validator(json!({"date": today.as_str()}), &[("date", "after:yesterday")]).passes());
    assert!(validator(json!({"date": today.as_str()}), &[("date", "before:tomorrow")]).passes());
    assert!(validator(json!({"date": today.as_str()}), &[("date", "after_or_equal:today")]).passes());
    assert!(validator(json!({"date": today.as_str()}), &[("date", "before:today")]).fails());
    // A field's own value is never a keyword
    assert!(validator(json!({"date": "today"}), &[("date", "date")]).fails());
}

#[test]
fn test_every_failing_rule_is_reported_in_order() {
    let mut v = validator(
        json!({"coffee": "mocha"}),
        &[("coffee", "required|string|in:espresso,latte|min:6|starts_with:esp")],
    );
    assert!(v.fails());
    assert_eq!(
        v.errors().get("coffee").unwrap(),
        [
            msg("in", &[("attribute", "coffee")]),
            msg("min.string", &[("attribute", "coffee"), ("min", "6")]),
            msg("starts_with", &[("attribute", "coffee"), ("values", "esp")]),
        ]
    );
}

#[test]
fn test_configuration_errors_fail_construction() {
    let err = Validator::make(json!({}), [("phone", "required|mobile")]).unwrap_err();
    assert!(err.is_configuration());

    let err = Validator::make(json!({}), [("age", "integer|min:three")]).unwrap_err();
    assert!(matches!(err, Error::InvalidRuleParam { .. }));

    let err = Validator::make(json!({}), [("flag", "boolean|max:1")]).unwrap_err();
    assert!(matches!(err, Error::UnsupportedValueType { .. }));
}

#[derive(Debug)]
struct GreaterThan {
    params: Vec<String>,
}

impl Rule for GreaterThan {
    fn name(&self) -> &str {
        "greater_than"
    }

    fn params(&self) -> &[String] {
        &self.params
    }

    fn passes(&self, ctx: &RuleContext<'_>) -> bool {
        let bound = self.params.first().and_then(|p| p.parse::<f64>().ok());
        matches!((ctx.value.as_f64(), bound), (Some(value), Some(bound)) if value > bound)
    }

    fn message(&self, ctx: &RuleContext<'_>) -> String {
        format!("The {} must be greater than {}.", ctx.attribute, self.params[0])
    }
}

#[test]
fn test_custom_rule_instances_and_registry() {
    let rule: Arc<dyn Rule> = Arc::new(GreaterThan { params: vec!["20".to_string()] });
    let spec = RuleSpec::from(vec![RuleItem::from("required"), RuleItem::from("integer"), RuleItem::from(rule)]);

    let mut v = Validator::make(json!({"age": 18}), [("age", spec)]).unwrap();
    assert!(v.fails());
    assert_eq!(v.errors().get("age").unwrap(), ["The age must be greater than 20."]);

    let mut registry = RuleRegistry::new();
    registry
        .register("greater_than", |params| Ok(Arc::new(GreaterThan { params }) as Arc<dyn Rule>))
        .unwrap();
    let mut v = Validator::make_with(json!({"age": 30}), [("age", "integer|greater_than:20")], &registry).unwrap();
    assert!(v.passes());
}

#[test]
fn test_reusable_rulesets() {
    let coffee = Ruleset::parse("required|string|in:espresso,latte").unwrap();
    let mut v = Validator::make(
        json!({"order": {"first": "latte", "second": "tea"}}),
        [("order.first", coffee.clone()), ("order.second", coffee)],
    )
    .unwrap();

    assert!(v.fails());
    assert_eq!(v.errors().paths().collect::<Vec<_>>(), vec!["order.second"]);
}

#[test]
fn test_report_serialization() {
    let mut v = validator(json!({"name": "", "age": "x"}), &[("name", "required"), ("age", "integer")]);
    assert!(v.fails());

    let json = serde_json::to_value(v.errors()).unwrap();
    assert_eq!(
        json,
        json!({
            "name": [trans("en.required", &attr("name"))],
            "age": [trans("en.integer", &attr("age"))],
        })
    );

    let back: ValidationErrors = serde_json::from_value(json).unwrap();
    assert_eq!(back.len(), 2);
}
