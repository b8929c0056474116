//! Rule name → implementation dispatch
//!
//! Rule tokens are looked up under a normalized identifier
//! (`after_or_equal` → `AfterOrEqual`), so registering `contains_one_of` or
//! `ContainsOneOf` refers to the same entry.

use super::builtin::register_builtins;
use super::Rule;
use crate::error::{Error, Result};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

/// Builds a rule from its expression parameters
pub type RuleFactory = Arc<dyn Fn(Vec<String>) -> Result<Arc<dyn Rule>> + Send + Sync>;

static GLOBAL: OnceLock<RuleRegistry> = OnceLock::new();

/// Convert a snake-case rule name into its registry identifier
pub fn normalize_rule_name(name: &str) -> String {
    name.trim()
        .split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Registry of rule factories keyed by normalized name
#[derive(Clone)]
pub struct RuleRegistry {
    factories: HashMap<String, RuleFactory>,
}

impl RuleRegistry {
    /// A registry holding every built-in rule
    pub fn new() -> Self {
        let mut registry = Self::empty();
        register_builtins(&mut registry);
        registry
    }

    /// A registry with no rules at all
    pub fn empty() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Shared built-in registry used by [`super::Ruleset::parse`]
    pub fn global() -> &'static RuleRegistry {
        GLOBAL.get_or_init(RuleRegistry::new)
    }

    pub(crate) fn insert<F>(&mut self, name: &str, factory: F)
    where
        F: Fn(Vec<String>) -> Result<Arc<dyn Rule>> + Send + Sync + 'static,
    {
        self.factories
            .insert(normalize_rule_name(name), Arc::new(factory));
    }

    /// Register a rule factory, replacing any rule of the same name
    pub fn register<F>(&mut self, name: &str, factory: F) -> Result<&mut Self>
    where
        F: Fn(Vec<String>) -> Result<Arc<dyn Rule>> + Send + Sync + 'static,
    {
        if !is_valid_name(name) {
            return Err(Error::InvalidRule {
                name: name.to_string(),
            });
        }
        if self.contains(name) {
            log::warn!("Overriding registered rule '{}'", name);
        }
        self.insert(name, factory);
        Ok(self)
    }

    /// Register a prebuilt rule under its own name; parameters are ignored
    pub fn register_rule(&mut self, rule: Arc<dyn Rule>) -> Result<&mut Self> {
        let name = rule.name().to_string();
        self.register(&name, move |_| Ok(Arc::clone(&rule)))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(&normalize_rule_name(name))
    }

    /// Registered identifiers, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Instantiate a rule by name
    pub fn create(&self, name: &str, params: Vec<String>) -> Result<Arc<dyn Rule>> {
        let factory = is_valid_name(name)
            .then(|| self.factories.get(&normalize_rule_name(name)))
            .flatten()
            .ok_or_else(|| Error::InvalidRule {
                name: name.to_string(),
            })?;
        (**factory)(params)
    }

    /// Parse one `name:p1,p2` token. Only the first `:` separates the name.
    pub fn parse_token(&self, token: &str) -> Result<Arc<dyn Rule>> {
        let token = token.trim();
        let (name, params) = match token.split_once(':') {
            Some((name, params)) if params.trim().is_empty() => (name, Vec::new()),
            Some((name, params)) => (
                name,
                params.split(',').map(|p| p.trim().to_string()).collect(),
            ),
            None => (token, Vec::new()),
        };
        self.create(name.trim(), params)
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleRegistry")
            .field("rules", &self.names())
            .finish()
    }
}
