//! Membership rules: `in`, `not_in`, `starts_with`, `ends_with`, `contains`
//! and `contains_one_of`

use crate::error::{Error, Result};
use crate::rules::{join_params, scalar_text, Rule, RuleContext};
use serde_json::Value;

fn require_params(rule: &str, params: &[String]) -> Result<()> {
    if params.is_empty() {
        return Err(Error::invalid_param(rule, "expected at least one parameter"));
    }
    Ok(())
}

/// Scalar equality against a parameter, by text or else by number
fn matches_param(value: &Value, param: &str) -> bool {
    let Some(text) = scalar_text(value) else {
        return false;
    };

    if text == param {
        return true;
    }

    match (value.as_f64(), param.trim().parse::<f64>()) {
        (Some(number), Ok(candidate)) => number == candidate,
        _ => false,
    }
}

/// `in:a,b` and its negation `not_in:a,b`
#[derive(Debug, Clone)]
pub struct InRule {
    params: Vec<String>,
    negated: bool,
}

impl InRule {
    pub fn new(params: Vec<String>, negated: bool) -> Result<Self> {
        let rule = if negated { "not_in" } else { "in" };
        require_params(rule, &params)?;
        Ok(Self { params, negated })
    }

    fn is_listed(&self, value: &Value) -> bool {
        self.params.iter().any(|param| matches_param(value, param))
    }
}

impl Rule for InRule {
    fn name(&self) -> &str {
        if self.negated {
            "not_in"
        } else {
            "in"
        }
    }

    fn params(&self) -> &[String] {
        &self.params
    }

    fn passes(&self, ctx: &RuleContext<'_>) -> bool {
        self.is_listed(ctx.value) != self.negated
    }

    fn message(&self, ctx: &RuleContext<'_>) -> String {
        ctx.trans(self.name(), &[])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AffixKind {
    Prefix,
    Suffix,
}

/// `starts_with:a,b` / `ends_with:a,b`: a string with any of the affixes
#[derive(Debug, Clone)]
pub struct AffixRule {
    params: Vec<String>,
    kind: AffixKind,
}

impl AffixRule {
    pub fn new(params: Vec<String>, kind: AffixKind) -> Result<Self> {
        let rule = match kind {
            AffixKind::Prefix => "starts_with",
            AffixKind::Suffix => "ends_with",
        };
        require_params(rule, &params)?;
        Ok(Self { params, kind })
    }
}

impl Rule for AffixRule {
    fn name(&self) -> &str {
        match self.kind {
            AffixKind::Prefix => "starts_with",
            AffixKind::Suffix => "ends_with",
        }
    }

    fn params(&self) -> &[String] {
        &self.params
    }

    fn passes(&self, ctx: &RuleContext<'_>) -> bool {
        let Some(text) = ctx.value.as_str() else {
            return false;
        };
        self.params.iter().any(|affix| match self.kind {
            AffixKind::Prefix => text.starts_with(affix.as_str()),
            AffixKind::Suffix => text.ends_with(affix.as_str()),
        })
    }

    fn message(&self, ctx: &RuleContext<'_>) -> String {
        ctx.trans(self.name(), &[("values", join_params(&self.params))])
    }
}

/// `contains` needs every parameter, `contains_one_of` any of them.
///
/// Strings are searched for substrings, lists for elements and maps for keys.
#[derive(Debug, Clone)]
pub struct ContainsRule {
    params: Vec<String>,
    any: bool,
}

impl ContainsRule {
    pub fn new(params: Vec<String>, any: bool) -> Result<Self> {
        let rule = if any { "contains_one_of" } else { "contains" };
        require_params(rule, &params)?;
        Ok(Self { params, any })
    }

    fn holds(value: &Value, needle: &str) -> bool {
        match value {
            Value::String(s) => s.contains(needle),
            Value::Array(items) => items.iter().any(|item| matches_param(item, needle)),
            Value::Object(map) => map.contains_key(needle),
            _ => false,
        }
    }
}

impl Rule for ContainsRule {
    fn name(&self) -> &str {
        if self.any {
            "contains_one_of"
        } else {
            "contains"
        }
    }

    fn params(&self) -> &[String] {
        &self.params
    }

    fn passes(&self, ctx: &RuleContext<'_>) -> bool {
        let mut needles = self.params.iter();
        if self.any {
            needles.any(|needle| Self::holds(ctx.value, needle))
        } else {
            needles.all(|needle| Self::holds(ctx.value, needle))
        }
    }

    fn message(&self, ctx: &RuleContext<'_>) -> String {
        ctx.trans(self.name(), &[("values", join_params(&self.params))])
    }
}
