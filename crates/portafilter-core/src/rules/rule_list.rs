//! Attribute path → ruleset mapping

use super::{Rule, RuleRegistry, RuleSpec, Ruleset};
use crate::error::Result;
use std::sync::Arc;

/// Compiled rules configuration, in declaration order
#[derive(Debug, Clone, Default)]
pub struct RuleList {
    entries: Vec<(String, Ruleset)>,
}

impl RuleList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile `(attribute, spec)` pairs with the built-in registry
    pub fn parse<I, K, S>(rules: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, S)>,
        K: Into<String>,
        S: Into<RuleSpec>,
    {
        Self::parse_with(rules, RuleRegistry::global())
    }

    pub fn parse_with<I, K, S>(rules: I, registry: &RuleRegistry) -> Result<Self>
    where
        I: IntoIterator<Item = (K, S)>,
        K: Into<String>,
        S: Into<RuleSpec>,
    {
        let mut list = Self::new();
        for (attribute, spec) in rules {
            let ruleset = Ruleset::compile(spec.into(), registry)?;
            list.insert(attribute, ruleset);
        }
        Ok(list)
    }

    /// Bind a ruleset to an attribute, replacing any existing one
    pub fn insert(&mut self, attribute: impl Into<String>, ruleset: Ruleset) {
        let attribute = attribute.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == attribute) {
            Some((_, existing)) => *existing = ruleset,
            None => self.entries.push((attribute, ruleset)),
        }
    }

    /// Add one rule to an attribute's ruleset, creating the ruleset if needed
    pub fn add_rule(&mut self, attribute: &str, rule: Arc<dyn Rule>) -> Result<()> {
        match self.entries.iter_mut().find(|(existing, _)| existing == attribute) {
            Some((_, ruleset)) => ruleset.add_rule(rule),
            None => {
                let mut ruleset = Ruleset::new();
                ruleset.add_rule(rule)?;
                self.entries.push((attribute.to_string(), ruleset));
                Ok(())
            }
        }
    }

    pub fn get(&self, attribute: &str) -> Option<&Ruleset> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == attribute)
            .map(|(_, ruleset)| ruleset)
    }

    pub fn attributes(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(attribute, _)| attribute.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Ruleset)> {
        self.entries
            .iter()
            .map(|(attribute, ruleset)| (attribute.as_str(), ruleset))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
