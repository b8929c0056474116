//! Cross-field comparison rules: `same` and `different`

use crate::error::{Error, Result};
use crate::rules::{Rule, RuleContext};
use serde_json::Value;

/// Compares the field with the value at another attribute path.
///
/// The other value is resolved by the validator and handed in through
/// [`RuleContext::dependency`]; the rule never looks at the data itself.
#[derive(Debug, Clone)]
pub struct FieldComparison {
    params: Vec<String>,
    equal: bool,
}

impl FieldComparison {
    pub fn same(params: Vec<String>) -> Result<Self> {
        Self::new(params, true)
    }

    pub fn different(params: Vec<String>) -> Result<Self> {
        Self::new(params, false)
    }

    fn new(params: Vec<String>, equal: bool) -> Result<Self> {
        if params.len() != 1 || params[0].is_empty() {
            let rule = if equal { "same" } else { "different" };
            return Err(Error::invalid_param(rule, "expected exactly one attribute path"));
        }
        Ok(Self { params, equal })
    }

    pub fn other(&self) -> &str {
        &self.params[0]
    }
}

impl Rule for FieldComparison {
    fn name(&self) -> &str {
        if self.equal {
            "same"
        } else {
            "different"
        }
    }

    fn params(&self) -> &[String] {
        &self.params
    }

    fn passes(&self, ctx: &RuleContext<'_>) -> bool {
        match ctx.dependency {
            Some(other) if other.exists => loosely_equal(other.value, ctx.value) == self.equal,
            // An absent field is never the same as anything
            _ => !self.equal,
        }
    }

    fn message(&self, ctx: &RuleContext<'_>) -> String {
        ctx.trans(self.name(), &[("other", self.other().to_string())])
    }

    fn dependency(&self) -> Option<&str> {
        Some(self.other())
    }
}

/// Structural equality where `1` and `1.0` are the same number
fn loosely_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => match (a.as_f64(), b.as_f64()) {
            (Some(a), Some(b)) => a == b,
            _ => a == b,
        },
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(a, b)| loosely_equal(a, b))
        }
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a.iter().all(|(key, a)| b.get(key).is_some_and(|b| loosely_equal(a, b)))
        }
        _ => left == right,
    }
}
