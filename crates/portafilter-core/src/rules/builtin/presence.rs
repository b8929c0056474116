//! Presence rules: `required`, `nullable` and `present`

use crate::rules::{Rule, RuleContext};
use serde_json::Value;

/// The field must hold a non-empty value.
///
/// Booleans and numbers always count as filled, so `false` and `0` pass.
/// `null` passes only on nullable fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct Required;

impl Rule for Required {
    fn name(&self) -> &str {
        "required"
    }

    fn passes(&self, ctx: &RuleContext<'_>) -> bool {
        match ctx.value {
            Value::Bool(_) | Value::Number(_) => true,
            Value::Null => ctx.metadata.nullable,
            Value::String(s) => !s.is_empty(),
            Value::Array(items) => !items.is_empty(),
            Value::Object(map) => !map.is_empty(),
        }
    }

    fn message(&self, ctx: &RuleContext<'_>) -> String {
        ctx.trans("required", &[])
    }

    fn is_implicit(&self) -> bool {
        true
    }
}

/// Marks the field as accepting `null`; never fails on its own
#[derive(Debug, Clone, Copy, Default)]
pub struct Nullable;

impl Rule for Nullable {
    fn name(&self) -> &str {
        "nullable"
    }

    fn passes(&self, _ctx: &RuleContext<'_>) -> bool {
        true
    }

    fn message(&self, _ctx: &RuleContext<'_>) -> String {
        String::new()
    }
}

/// The key must exist in the data, whatever its value
#[derive(Debug, Clone, Copy, Default)]
pub struct Present;

impl Rule for Present {
    fn name(&self) -> &str {
        "present"
    }

    fn passes(&self, ctx: &RuleContext<'_>) -> bool {
        ctx.exists
    }

    fn message(&self, ctx: &RuleContext<'_>) -> String {
        ctx.trans("present", &[])
    }

    fn is_implicit(&self) -> bool {
        true
    }
}
