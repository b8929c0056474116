//! Validator orchestration
//!
//! For each attribute of the rule list the validator resolves the ruleset's
//! dependencies, resolves the attribute path, expands wildcards into one run
//! per element and records failures under the concrete element path.
//!
//! Copyright (c) 2025 Portafilter Team
//! Licensed under the Apache-2.0 license

use super::dependent::resolve_dependencies;
use super::ValidationErrors;
use crate::config::ValidatorConfig;
use crate::error::{Error, Result};
use crate::messages::Translator;
use crate::path::{resolve, Resolution};
use crate::rules::{MessageScope, RuleList, RuleRegistry, RuleSpec};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, trace};

/// Validates one document against a compiled rule list
///
/// ```
/// use portafilter_core::Validator;
/// use serde_json::json;
///
/// let mut validator = Validator::make(
///     json!({"items": [{"id": 1}, {"id": "x"}]}),
///     [("items.*.id", "integer")],
/// ).unwrap();
///
/// assert!(validator.fails());
/// assert_eq!(
///     validator.errors().get("items.1.id").unwrap(),
///     ["The items.1.id must be an integer."]
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Validator {
    data: Value,
    rules: RuleList,
    config: ValidatorConfig,
    translator: Arc<dyn Translator>,
    errors: ValidationErrors,
}

impl Validator {
    /// Create a validator from an already compiled rule list
    pub fn new(data: Value, rules: RuleList) -> Self {
        let config = ValidatorConfig::default();
        let translator = Arc::new(config.translator());
        Self {
            data,
            rules,
            config,
            translator,
            errors: ValidationErrors::new(),
        }
    }

    /// Compile `(attribute, spec)` pairs with the built-in registry
    pub fn make<I, K, S>(data: Value, rules: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, S)>,
        K: Into<String>,
        S: Into<RuleSpec>,
    {
        Ok(Self::new(data, RuleList::parse(rules)?))
    }

    /// Compile `(attribute, spec)` pairs with a custom registry
    pub fn make_with<I, K, S>(data: Value, rules: I, registry: &RuleRegistry) -> Result<Self>
    where
        I: IntoIterator<Item = (K, S)>,
        K: Into<String>,
        S: Into<RuleSpec>,
    {
        Ok(Self::new(data, RuleList::parse_with(rules, registry)?))
    }

    /// Use a configuration; its messages directory replaces the translator
    pub fn with_config(mut self, config: ValidatorConfig) -> Self {
        self.translator = Arc::new(config.translator());
        self.config = config;
        self
    }

    pub fn with_translator(mut self, translator: Arc<dyn Translator>) -> Self {
        self.translator = translator;
        self
    }

    pub fn data(&self) -> &Value {
        &self.data
    }

    pub fn rules(&self) -> &RuleList {
        &self.rules
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Run every ruleset and return a fresh report, without storing it
    pub fn run(&self) -> ValidationErrors {
        let scope = MessageScope::new(self.translator.as_ref(), &self.config.locale);
        let mut report = ValidationErrors::new();

        debug!(attributes = self.rules.len(), locale = %self.config.locale, "validation started");

        for (attribute, ruleset) in self.rules.iter() {
            let dependencies = resolve_dependencies(ruleset, &self.data);
            let resolution = resolve(attribute, &self.data);

            match resolution {
                Resolution::Single(resolved) => {
                    trace!(attribute, exists = resolved.exists, "validating attribute");
                    let messages = ruleset.validate(
                        attribute,
                        resolved.value,
                        resolved.exists,
                        scope,
                        &dependencies,
                    );
                    report.insert(attribute, messages);
                }
                expanded @ Resolution::Expanded(_) => {
                    let leaves = expanded.leaves(attribute);
                    debug!(attribute, elements = leaves.len(), "expanding wildcard");
                    for (path, resolved) in leaves {
                        let messages = ruleset.validate(
                            &path,
                            resolved.value,
                            resolved.exists,
                            scope,
                            &dependencies,
                        );
                        report.insert(path, messages);
                    }
                }
            }
        }

        debug!(failed = report.len(), "validation finished");
        report
    }

    /// Validate the data, failing with [`Error::Validation`] on violations.
    ///
    /// The stored report is rebuilt on every call.
    pub fn validate(&mut self) -> Result<()> {
        self.errors = self.run();
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(Error::Validation(self.errors.clone()))
        }
    }

    pub fn fails(&mut self) -> bool {
        self.validate().is_err()
    }

    pub fn passes(&mut self) -> bool {
        !self.fails()
    }

    /// Report from the last [`Validator::validate`] call
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Take the report out of the validator
    pub fn into_errors(self) -> ValidationErrors {
        self.errors
    }
}
