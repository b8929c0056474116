//! Loading data, rules and schema definitions from YAML or JSON files
//!
//! Rules documents map attribute paths to either an expression string or a
//! list of rule tokens:
//!
//! ```yaml
//! name: required|string|min:2
//! menu.*.price: [required, numeric, "between:0.5,10"]
//! ```
//!
//! Schema documents declare a model's fields:
//!
//! ```yaml
//! name: Order
//! fields:
//!   id: int
//!   note: { type: optional<str>, rules: max:200, default: null }
//!   customer:
//!     fields:
//!       email: { type: str, rules: email }
//! ```
//!
//! Copyright (c) 2025 Portafilter Team
//! Licensed under the Apache-2.0 license

use crate::error::{ModelError, ModelResult};
use crate::field::FieldType;
use crate::schema::{ModelSchema, ModelSchemaBuilder};
use portafilter_core::{RuleItem, RuleSpec};
use serde_json::{Map, Value};
use std::path::Path;
use tracing::debug;

/// Supported document formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// YAML format (.yaml, .yml)
    Yaml,
    /// JSON format (.json)
    Json,
}

impl Format {
    /// Detect format from file extension
    pub fn from_path(path: &Path) -> ModelResult<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase);
        match extension.as_deref() {
            Some("yaml") | Some("yml") => Ok(Format::Yaml),
            Some("json") => Ok(Format::Json),
            _ => Err(ModelError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

/// Read and parse a document, detecting the format from the extension
pub fn load_document(path: &Path) -> ModelResult<Value> {
    let format = Format::from_path(path)?;
    let content = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), ?format, "Loaded document");
    parse_document(&content, format, path)
}

/// Parse document content; `path` is only used for error context
pub fn parse_document(content: &str, format: Format, path: &Path) -> ModelResult<Value> {
    match format {
        Format::Yaml => {
            let yaml: serde_yaml::Value =
                serde_yaml::from_str(content).map_err(|source| ModelError::YamlParse {
                    path: path.to_path_buf(),
                    source,
                })?;
            serde_json::to_value(yaml).map_err(|source| ModelError::JsonParse {
                path: path.to_path_buf(),
                source,
            })
        }
        Format::Json => serde_json::from_str(content).map_err(|source| ModelError::JsonParse {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Convert a rules document into `(attribute, spec)` pairs, in document order
pub fn rules_from_value(document: &Value) -> ModelResult<Vec<(String, RuleSpec)>> {
    let entries = document
        .as_object()
        .ok_or_else(|| ModelError::invalid_definition("rules must be a mapping of attribute to rules"))?;

    entries
        .iter()
        .map(|(attribute, rules)| Ok((attribute.clone(), rule_spec(attribute, rules)?)))
        .collect()
}

fn rule_spec(attribute: &str, rules: &Value) -> ModelResult<RuleSpec> {
    match rules {
        Value::String(expression) => Ok(RuleSpec::from(expression.as_str())),
        Value::Array(tokens) => tokens
            .iter()
            .map(|token| match token {
                Value::String(token) => Ok(RuleItem::from(token.as_str())),
                other => Err(ModelError::invalid_definition(format!(
                    "rule tokens for '{}' must be strings, got {}",
                    attribute, other
                ))),
            })
            .collect::<ModelResult<Vec<_>>>()
            .map(RuleSpec::from),
        other => Err(ModelError::invalid_definition(format!(
            "rules for '{}' must be a string or a list of strings, got {}",
            attribute, other
        ))),
    }
}

/// Build a schema from a definition document
pub fn schema_from_value(default_name: &str, document: &Value) -> ModelResult<ModelSchema> {
    let definition = document
        .as_object()
        .ok_or_else(|| ModelError::invalid_definition("schema must be a mapping"))?;
    let name = definition
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or(default_name);
    let fields = definition
        .get("fields")
        .and_then(Value::as_object)
        .ok_or_else(|| ModelError::invalid_definition(format!("schema '{}' has no fields mapping", name)))?;

    let mut builder = ModelSchema::builder(name);
    for (field, declaration) in fields {
        builder = declare_field(builder, field, declaration)?;
    }
    builder.build()
}

fn declare_field(
    mut builder: ModelSchemaBuilder,
    field: &str,
    declaration: &Value,
) -> ModelResult<ModelSchemaBuilder> {
    let options = match declaration {
        Value::String(field_type) => return Ok(builder.field(field, field_type.parse()?)),
        Value::Object(options) => options,
        other => {
            return Err(ModelError::invalid_definition(format!(
                "field '{}' must be a type name or a mapping, got {}",
                field, other
            )))
        }
    };

    if let Some(field_type) = field_type(field, options)? {
        builder = builder.field(field, field_type);
    }
    if let Some(rules) = options.get("rules") {
        builder = builder.rules(field, rule_spec(field, rules)?);
    }
    if let Some(default) = options.get("default") {
        builder = builder.default(field, default.clone());
    }
    Ok(builder)
}

// A nested `fields` mapping declares an inline model
fn field_type(field: &str, options: &Map<String, Value>) -> ModelResult<Option<FieldType>> {
    let declared = match options.get("type") {
        Some(Value::String(text)) => Some(text.parse::<FieldType>()?),
        Some(other) => {
            return Err(ModelError::invalid_definition(format!(
                "type of '{}' must be a string, got {}",
                field, other
            )))
        }
        None => None,
    };

    if !options.contains_key("fields") {
        return Ok(declared);
    }

    let nested = FieldType::Model(schema_from_value(field, &Value::Object(options.clone()))?);
    match declared {
        None => Ok(Some(nested)),
        Some(FieldType::Dict) => Ok(Some(nested)),
        Some(FieldType::Optional(inner)) if matches!(*inner, FieldType::Dict) => {
            Ok(Some(FieldType::optional(nested)))
        }
        Some(FieldType::List(item)) if matches!(item.inner(), FieldType::Dict | FieldType::Any) => {
            Ok(Some(FieldType::list(nested)))
        }
        Some(other) => Err(ModelError::invalid_definition(format!(
            "field '{}' declares nested fields but has type {}",
            field, other
        ))),
    }
}
