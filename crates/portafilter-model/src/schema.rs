//! Model schemas: named fields with types, rules and defaults
//!
//! A schema compiles its fields into a [`RuleList`] once, at build time, so
//! rule configuration errors surface before any data is seen. Validation
//! fills defaults, rejects undeclared keys, runs the engine and then
//! descends into nested models, prefixing their report paths with the
//! field name.
//!
//! Copyright (c) 2025 Portafilter Team
//! Licensed under the Apache-2.0 license

use crate::error::{ModelError, ModelResult};
use crate::field::{FieldType, FieldTypeRegistry};
use portafilter_core::{
    RuleItem, RuleList, RuleRegistry, RuleSpec, Ruleset, Translator, ValidationErrors,
    Validator, ValidatorConfig,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, trace};

/// One declared field
#[derive(Debug, Clone)]
pub struct FieldDef {
    name: String,
    field_type: Option<FieldType>,
    rules: Option<RuleSpec>,
    default: Option<Value>,
}

impl FieldDef {
    fn new(name: String) -> Self {
        Self {
            name,
            field_type: None,
            rules: None,
            default: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn field_type(&self) -> Option<&FieldType> {
        self.field_type.as_ref()
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// Type rules first, so the declared type drives value-type inference
    fn compile(&self, types: &FieldTypeRegistry, registry: &RuleRegistry) -> ModelResult<Ruleset> {
        let mut items: Vec<RuleItem> = Vec::new();
        if let Some(field_type) = &self.field_type {
            items.extend(split_expression(&types.expression(field_type)));
        }
        match self.rules.clone() {
            Some(RuleSpec::Expression(expression)) => items.extend(split_expression(&expression)),
            Some(RuleSpec::Items(explicit)) => items.extend(explicit),
            Some(RuleSpec::Ruleset(ruleset)) => items.push(RuleItem::Ruleset(ruleset)),
            None => {}
        }
        Ok(Ruleset::from_items(items, registry)?)
    }
}

fn split_expression(expression: &str) -> impl Iterator<Item = RuleItem> + '_ {
    expression.split('|').map(RuleItem::from)
}

/// Builder for [`ModelSchema`]
#[derive(Debug)]
pub struct ModelSchemaBuilder {
    name: String,
    fields: Vec<FieldDef>,
    config: ValidatorConfig,
    types: Option<FieldTypeRegistry>,
}

impl ModelSchemaBuilder {
    fn entry(&mut self, name: impl Into<String>) -> &mut FieldDef {
        let name = name.into();
        let index = match self.fields.iter().position(|field| field.name == name) {
            Some(index) => index,
            None => {
                self.fields.push(FieldDef::new(name));
                self.fields.len() - 1
            }
        };
        &mut self.fields[index]
    }

    /// Declare a typed field
    pub fn field(mut self, name: impl Into<String>, field_type: FieldType) -> Self {
        self.entry(name).field_type = Some(field_type);
        self
    }

    /// Attach explicit rules to a field, declaring it if needed
    pub fn rules(mut self, name: impl Into<String>, rules: impl Into<RuleSpec>) -> Self {
        self.entry(name).rules = Some(rules.into());
        self
    }

    /// Value used when the input omits the field
    pub fn default(mut self, name: impl Into<String>, value: Value) -> Self {
        self.entry(name).default = Some(value);
        self
    }

    pub fn config(mut self, config: ValidatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Use a custom type table instead of the shared one
    pub fn field_types(mut self, types: FieldTypeRegistry) -> Self {
        self.types = Some(types);
        self
    }

    pub fn build(self) -> ModelResult<ModelSchema> {
        self.build_with(RuleRegistry::global())
    }

    /// Build, resolving rule names through a custom registry
    pub fn build_with(self, registry: &RuleRegistry) -> ModelResult<ModelSchema> {
        let types = self.types.as_ref().unwrap_or_else(|| FieldTypeRegistry::global());

        let mut rules = RuleList::new();
        for field in &self.fields {
            let ruleset = field.compile(types, registry)?;
            let names: Vec<&str> = ruleset.names().collect();
            trace!(model = %self.name, field = %field.name, rules = ?names, "Compiled field");
            if !ruleset.is_empty() {
                rules.insert(field.name.clone(), ruleset);
            }
        }

        Ok(ModelSchema {
            name: self.name,
            fields: self.fields,
            rules,
            config: self.config,
        })
    }
}

/// A validated, named record shape
///
/// ```
/// use portafilter_model::{FieldType, ModelSchema};
/// use serde_json::json;
///
/// let schema = ModelSchema::builder("Coffee")
///     .field("name", FieldType::Str)
///     .field("shots", FieldType::Int)
///     .rules("shots", "min:1|max:4")
///     .default("shots", json!(1))
///     .build()?;
///
/// let coffee = schema.validate(&json!({"name": "ristretto"}))?;
/// assert_eq!(coffee["shots"], json!(1));
///
/// let err = schema.validate(&json!({"name": "doppio", "shots": 9})).unwrap_err();
/// assert!(err.validation_errors().unwrap().contains("shots"));
/// # Ok::<(), portafilter_model::ModelError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ModelSchema {
    name: String,
    fields: Vec<FieldDef>,
    rules: RuleList,
    config: ValidatorConfig,
}

impl ModelSchema {
    pub fn builder(name: impl Into<String>) -> ModelSchemaBuilder {
        ModelSchemaBuilder {
            name: name.into(),
            fields: Vec::new(),
            config: ValidatorConfig::default(),
            types: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// The compiled rules, keyed by field name
    pub fn rules(&self) -> &RuleList {
        &self.rules
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Report message for a field this model does not declare, in the
    /// configured locale
    pub fn unknown_field_message(&self, field: &str) -> String {
        self.config.translator().translate(
            &format!("{}.unknown_field", self.config.locale),
            &[("model", self.name.clone()), ("attribute", field.to_string())],
        )
    }

    /// Replace the validator configuration here and in every nested model
    pub fn with_config(mut self, config: ValidatorConfig) -> Self {
        self.set_config(&config);
        self
    }

    fn set_config(&mut self, config: &ValidatorConfig) {
        for field in &mut self.fields {
            if let Some(nested) = field.field_type.as_mut().and_then(FieldType::nested_model_mut) {
                nested.set_config(config);
            }
        }
        self.config = config.clone();
    }

    /// Validate an object, returning it with defaults filled in
    pub fn validate(&self, data: &Value) -> ModelResult<Map<String, Value>> {
        let object = data.as_object().ok_or_else(|| ModelError::NotAnObject {
            model: self.name.clone(),
            found: json_kind(data),
        })?;

        if let Some(unknown) = object.keys().find(|key| self.field(key).is_none()) {
            return Err(ModelError::UnknownField {
                model: self.name.clone(),
                field: unknown.clone(),
            });
        }

        let mut values = object.clone();
        for field in &self.fields {
            if let Some(default) = &field.default {
                if !values.contains_key(&field.name) {
                    values.insert(field.name.clone(), default.clone());
                }
            }
        }

        debug!(model = %self.name, fields = values.len(), "Validating model");
        let validator = Validator::new(Value::Object(values.clone()), self.rules.clone())
            .with_config(self.config.clone());
        let mut errors = validator.run();

        for field in &self.fields {
            let Some(schema) = field.field_type.as_ref().and_then(FieldType::nested_model) else {
                continue;
            };
            if let Some(value) = values.get_mut(&field.name) {
                schema.validate_nested(&field.name, value, &mut errors)?;
            }
        }

        if errors.is_empty() {
            Ok(values)
        } else {
            debug!(model = %self.name, violations = errors.len(), "Model validation failed");
            Err(ModelError::Validation(errors))
        }
    }

    /// Validate and deserialize into a typed record
    pub fn instantiate<T: DeserializeOwned>(&self, data: &Value) -> ModelResult<T> {
        let values = self.validate(data)?;
        serde_json::from_value(Value::Object(values)).map_err(|source| ModelError::Deserialize {
            model: self.name.clone(),
            source,
        })
    }

    // Objects are validated as this model; arrays element-wise. Anything else
    // was already reported by the parent's type rules.
    fn validate_nested(
        &self,
        prefix: &str,
        value: &mut Value,
        errors: &mut ValidationErrors,
    ) -> ModelResult<()> {
        match value {
            Value::Object(_) => match self.validate(value) {
                Ok(validated) => *value = Value::Object(validated),
                Err(ModelError::Validation(nested)) => errors.merge_prefixed(prefix, nested),
                Err(ModelError::UnknownField { field, .. }) => {
                    let mut nested = ValidationErrors::new();
                    nested.insert(field.clone(), vec![self.unknown_field_message(&field)]);
                    errors.merge_prefixed(prefix, nested);
                }
                Err(other) => return Err(other),
            },
            Value::Array(items) => {
                for (index, item) in items.iter_mut().enumerate() {
                    if item.is_object() {
                        self.validate_nested(&format!("{}.{}", prefix, index), item, errors)?;
                    }
                }
            }
            _ => {}
        }
        Ok(())
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
