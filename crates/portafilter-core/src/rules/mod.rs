//! Rules, rule registry and rulesets
//!
//! A [`Rule`] is one checkable condition over a single resolved value. Rules
//! are immutable and shared behind `Arc`: everything that varies per call
//! (the value, whether its key existed, the field metadata, a resolved
//! dependency) travels in a [`RuleContext`], so the same compiled
//! [`Ruleset`] can validate any number of wildcard elements without cloning.
//!
//! # Expression syntax
//!
//! `name1:p1,p2|name2|name3:p1`, where `|` separates rules and the first `:`
//! separates a rule name from its comma-separated parameters.
//!
//! ```
//! use portafilter_core::rules::Ruleset;
//! use portafilter_core::ValueType;
//!
//! let ruleset = Ruleset::parse("required|list:integer|min:2").unwrap();
//! assert_eq!(ruleset.value_type(), ValueType::List);
//! assert!(ruleset.metadata().required);
//! ```

pub mod builtin;
pub mod registry;
pub mod rule_list;
pub mod ruleset;

pub use registry::{normalize_rule_name, RuleFactory, RuleRegistry};
pub use rule_list::RuleList;
pub use ruleset::{RuleItem, RuleSpec, Ruleset};

use crate::error::Result;
use crate::messages::Translator;
use crate::path::Resolved;
use crate::value_type::ValueType;
use serde_json::Value;
use std::fmt;

/// Field-level facts shared by every rule of a ruleset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RuleMetadata {
    /// Inferred from the first type rule in the ruleset
    pub value_type: ValueType,
    pub required: bool,
    pub nullable: bool,
    /// Set when the ruleset declares (or was given) a `date` rule
    pub date: bool,
}

/// Where rule messages are looked up
#[derive(Debug, Clone, Copy)]
pub struct MessageScope<'a> {
    pub translator: &'a dyn Translator,
    pub locale: &'a str,
}

impl<'a> MessageScope<'a> {
    pub fn new(translator: &'a dyn Translator, locale: &'a str) -> Self {
        Self { translator, locale }
    }

    /// Translate a locale-relative key such as `min.string`
    pub fn trans(&self, key: &str, substitutions: &[(&str, String)]) -> String {
        self.translator
            .translate(&format!("{}.{}", self.locale, key), substitutions)
    }
}

/// Immutable per-call input to [`Rule::passes`] and [`Rule::message`]
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    pub attribute: &'a str,
    pub value: &'a Value,
    pub exists: bool,
    pub metadata: &'a RuleMetadata,
    /// The other field this rule depends on, when it declares one
    pub dependency: Option<Resolved<'a>>,
    pub scope: MessageScope<'a>,
}

impl<'a> RuleContext<'a> {
    pub fn new(
        attribute: &'a str,
        value: &'a Value,
        exists: bool,
        metadata: &'a RuleMetadata,
        scope: MessageScope<'a>,
    ) -> Self {
        Self {
            attribute,
            value,
            exists,
            metadata,
            dependency: None,
            scope,
        }
    }

    pub fn with_dependency(mut self, dependency: Option<Resolved<'a>>) -> Self {
        self.dependency = dependency;
        self
    }

    /// A null value on an optional field is not validated: the field must be
    /// not required, and either nullable or absent from the data.
    pub fn is_skippable(&self) -> bool {
        self.value.is_null()
            && !self.metadata.required
            && (self.metadata.nullable || !self.exists)
    }

    /// Translate `key` with `:attribute` bound to this field
    pub fn trans(&self, key: &str, extra: &[(&str, String)]) -> String {
        let mut substitutions = Vec::with_capacity(extra.len() + 1);
        substitutions.push(("attribute", self.attribute.to_string()));
        substitutions.extend(extra.iter().map(|(name, value)| (*name, value.clone())));
        self.scope.trans(key, &substitutions)
    }
}

/// A single unit of validation logic
pub trait Rule: Send + Sync + fmt::Debug {
    /// The snake-case token this rule is written as
    fn name(&self) -> &str;

    /// Parameters as written in the expression
    fn params(&self) -> &[String] {
        &[]
    }

    fn passes(&self, ctx: &RuleContext<'_>) -> bool;

    fn message(&self, ctx: &RuleContext<'_>) -> String;

    /// Implicit rules run even when the rest of the ruleset is skipped
    fn is_implicit(&self) -> bool {
        false
    }

    /// Reject parameter/metadata combinations the rule cannot evaluate
    fn check(&self, _metadata: &RuleMetadata) -> Result<()> {
        Ok(())
    }

    /// Attribute path whose value this rule compares against
    fn dependency(&self) -> Option<&str> {
        None
    }
}

/// Join rule parameters for messages
pub(crate) fn join_params(params: &[String]) -> String {
    params.join(", ")
}

/// Render a scalar as text for membership comparisons
pub(crate) fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
pub(crate) mod test_helpers {
    use super::*;
    use crate::messages::CatalogTranslator;

    pub static TRANSLATOR: CatalogTranslator = CatalogTranslator::new();

    pub fn scope() -> MessageScope<'static> {
        MessageScope::new(&TRANSLATOR, "en")
    }

    pub fn ctx<'a>(value: &'a Value, metadata: &'a RuleMetadata) -> RuleContext<'a> {
        RuleContext::new("field", value, true, metadata, scope())
    }
}

#[cfg(test)]
mod tests {
    use super::test_helpers::scope;
    use super::*;
    use serde_json::json;

    #[test]
    fn test_skippable_matrix() {
        let null = Value::Null;
        let optional = RuleMetadata::default();
        let nullable = RuleMetadata { nullable: true, ..Default::default() };
        let required = RuleMetadata { required: true, nullable: true, ..Default::default() };

        // Absent optional field
        assert!(RuleContext::new("f", &null, false, &optional, scope()).is_skippable());
        // Present-but-null optional field is validated
        assert!(!RuleContext::new("f", &null, true, &optional, scope()).is_skippable());
        assert!(RuleContext::new("f", &null, true, &nullable, scope()).is_skippable());
        assert!(!RuleContext::new("f", &null, false, &required, scope()).is_skippable());

        let value = json!("x");
        assert!(!RuleContext::new("f", &value, false, &nullable, scope()).is_skippable());
    }

    #[test]
    fn test_context_trans_binds_attribute() {
        let value = json!(1);
        let metadata = RuleMetadata::default();
        let ctx = RuleContext::new("age", &value, true, &metadata, scope());
        assert_eq!(
            ctx.trans("min.numeric", &[("min", "5".to_string())]),
            "The age must be at least 5."
        );
    }
}
