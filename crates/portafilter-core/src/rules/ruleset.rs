//! Ordered rule collections bound to one attribute

use super::builtin::{DateComparisonKind, DateRule};
use super::{MessageScope, Rule, RuleContext, RuleMetadata, RuleRegistry};
use crate::error::Result;
use crate::path::Resolved;
use crate::value_type::ValueType;
use serde_json::Value;
use std::sync::Arc;
use tracing::trace;

/// One element of a literal rule sequence
#[derive(Debug, Clone)]
pub enum RuleItem {
    /// A `name:params` token
    Name(String),
    /// A prebuilt rule, used as is
    Rule(Arc<dyn Rule>),
    /// Another ruleset whose rules are spliced in
    Ruleset(Ruleset),
}

impl From<&str> for RuleItem {
    fn from(token: &str) -> Self {
        RuleItem::Name(token.to_string())
    }
}

impl From<String> for RuleItem {
    fn from(token: String) -> Self {
        RuleItem::Name(token)
    }
}

impl From<Arc<dyn Rule>> for RuleItem {
    fn from(rule: Arc<dyn Rule>) -> Self {
        RuleItem::Rule(rule)
    }
}

impl From<Ruleset> for RuleItem {
    fn from(ruleset: Ruleset) -> Self {
        RuleItem::Ruleset(ruleset)
    }
}

/// The rules declared for one attribute
#[derive(Debug, Clone)]
pub enum RuleSpec {
    /// `required|min:3`
    Expression(String),
    Items(Vec<RuleItem>),
    Ruleset(Ruleset),
}

impl From<&str> for RuleSpec {
    fn from(expression: &str) -> Self {
        RuleSpec::Expression(expression.to_string())
    }
}

impl From<String> for RuleSpec {
    fn from(expression: String) -> Self {
        RuleSpec::Expression(expression)
    }
}

impl From<Vec<RuleItem>> for RuleSpec {
    fn from(items: Vec<RuleItem>) -> Self {
        RuleSpec::Items(items)
    }
}

impl From<Ruleset> for RuleSpec {
    fn from(ruleset: Ruleset) -> Self {
        RuleSpec::Ruleset(ruleset)
    }
}

/// Ordered, named rules compiled from one rule expression
///
/// Rule order only decides message order: every applicable rule runs.
/// Adding a rule whose name is already present replaces it in place.
#[derive(Debug, Clone, Default)]
pub struct Ruleset {
    rules: Vec<Arc<dyn Rule>>,
    metadata: RuleMetadata,
}

impl Ruleset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile an expression with the built-in registry
    pub fn parse(expression: &str) -> Result<Self> {
        Self::parse_with(expression, RuleRegistry::global())
    }

    pub fn parse_with(expression: &str, registry: &RuleRegistry) -> Result<Self> {
        let mut ruleset = Self::new();
        for token in expression.split('|') {
            ruleset.push(registry.parse_token(token)?);
        }
        ruleset.finalize()?;
        Ok(ruleset)
    }

    /// Compile a literal sequence of tokens, rules and rulesets
    pub fn from_items(items: Vec<RuleItem>, registry: &RuleRegistry) -> Result<Self> {
        let mut ruleset = Self::new();
        for item in items {
            match item {
                RuleItem::Name(token) => ruleset.push(registry.parse_token(&token)?),
                RuleItem::Rule(rule) => ruleset.push(rule),
                RuleItem::Ruleset(other) => {
                    for rule in other.rules {
                        ruleset.push(rule);
                    }
                }
            }
        }
        ruleset.finalize()?;
        Ok(ruleset)
    }

    pub fn compile(spec: RuleSpec, registry: &RuleRegistry) -> Result<Self> {
        match spec {
            RuleSpec::Expression(expression) => Self::parse_with(&expression, registry),
            RuleSpec::Items(items) => Self::from_items(items, registry),
            RuleSpec::Ruleset(ruleset) => Ok(ruleset),
        }
    }

    /// Add (or replace) a rule and re-derive the field metadata
    pub fn add_rule(&mut self, rule: Arc<dyn Rule>) -> Result<()> {
        self.push(rule);
        self.finalize()
    }

    fn push(&mut self, rule: Arc<dyn Rule>) {
        match self.rules.iter_mut().find(|existing| existing.name() == rule.name()) {
            Some(existing) => *existing = rule,
            None => self.rules.push(rule),
        }
    }

    /// Inject implied rules, derive metadata and check every rule against it
    fn finalize(&mut self) -> Result<()> {
        let compares_dates = self
            .names()
            .any(DateComparisonKind::is_date_comparison);
        if compares_dates && !self.has_rule("date") {
            self.rules.push(Arc::new(DateRule));
        }

        let value_type = self
            .names()
            .find_map(ValueType::from_rule_name)
            .unwrap_or_default();
        self.metadata = RuleMetadata {
            value_type,
            required: self.has_rule("required"),
            nullable: self.has_rule("nullable"),
            date: self.has_rule("date"),
        };

        for rule in &self.rules {
            rule.check(&self.metadata)?;
        }
        Ok(())
    }

    pub fn rules(&self) -> &[Arc<dyn Rule>] {
        &self.rules
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|rule| rule.name())
    }

    pub fn has_rule(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Rule>> {
        self.rules.iter().find(|rule| rule.name() == name)
    }

    pub fn metadata(&self) -> &RuleMetadata {
        &self.metadata
    }

    pub fn value_type(&self) -> ValueType {
        self.metadata.value_type
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Attribute paths the rules of this set compare against
    pub fn dependencies(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().filter_map(|rule| rule.dependency())
    }

    /// Run every rule against one value and collect the failure messages.
    ///
    /// `dependencies` holds the resolved value of each path returned by
    /// [`Ruleset::dependencies`]; a missing entry reads as an absent field.
    pub fn validate(
        &self,
        attribute: &str,
        value: &Value,
        exists: bool,
        scope: MessageScope<'_>,
        dependencies: &[(&str, Resolved<'_>)],
    ) -> Vec<String> {
        let mut messages = Vec::new();

        for rule in &self.rules {
            let dependency = rule.dependency().and_then(|path| {
                dependencies
                    .iter()
                    .find(|(candidate, _)| *candidate == path)
                    .map(|(_, resolved)| *resolved)
            });
            let ctx = RuleContext::new(attribute, value, exists, &self.metadata, scope)
                .with_dependency(dependency);

            if !rule.is_implicit() && ctx.is_skippable() {
                trace!(attribute, rule = rule.name(), "skipping rule");
                continue;
            }

            if !rule.passes(&ctx) {
                messages.push(rule.message(&ctx));
            }
        }

        messages
    }
}
