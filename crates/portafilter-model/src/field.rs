//! Field types and the rule expressions derived from them

use crate::error::{ModelError, ModelResult};
use crate::schema::ModelSchema;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, OnceLock};

/// Declared type of a model field
#[derive(Debug, Clone)]
pub enum FieldType {
    Str,
    Int,
    Float,
    Bool,
    List(Box<FieldType>),
    Dict,
    /// Any value, only presence is checked
    Any,
    /// A nested model, validated recursively
    Model(ModelSchema),
    /// The field may be null or missing
    Optional(Box<FieldType>),
}

impl FieldType {
    pub fn list(item: FieldType) -> Self {
        FieldType::List(Box::new(item))
    }

    pub fn optional(inner: FieldType) -> Self {
        FieldType::Optional(Box::new(inner))
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            FieldType::Str => FieldKind::Str,
            FieldType::Int => FieldKind::Int,
            FieldType::Float => FieldKind::Float,
            FieldType::Bool => FieldKind::Bool,
            FieldType::List(_) => FieldKind::List,
            FieldType::Dict => FieldKind::Dict,
            FieldType::Any => FieldKind::Any,
            FieldType::Model(_) => FieldKind::Model,
            FieldType::Optional(inner) => inner.kind(),
        }
    }

    pub fn is_optional(&self) -> bool {
        matches!(self, FieldType::Optional(_))
    }

    /// The type with every `Optional` layer removed
    pub fn inner(&self) -> &FieldType {
        match self {
            FieldType::Optional(inner) => inner.inner(),
            other => other,
        }
    }

    /// The nested model, for `Model` and `List(Model)` fields
    pub fn nested_model(&self) -> Option<&ModelSchema> {
        match self.inner() {
            FieldType::Model(schema) => Some(schema),
            FieldType::List(item) => match item.inner() {
                FieldType::Model(schema) => Some(schema),
                _ => None,
            },
            _ => None,
        }
    }

    pub(crate) fn nested_model_mut(&mut self) -> Option<&mut ModelSchema> {
        match self {
            FieldType::Optional(inner) => inner.nested_model_mut(),
            FieldType::Model(schema) => Some(schema),
            FieldType::List(item) => item.model_mut(),
            _ => None,
        }
    }

    fn model_mut(&mut self) -> Option<&mut ModelSchema> {
        match self {
            FieldType::Optional(inner) => inner.model_mut(),
            FieldType::Model(schema) => Some(schema),
            _ => None,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::List(item) => write!(f, "list<{}>", item),
            FieldType::Optional(inner) => write!(f, "optional<{}>", inner),
            FieldType::Model(schema) => write!(f, "{}", schema.name()),
            other => write!(f, "{}", other.kind()),
        }
    }
}

/// Parses `str`, `int`, `float`, `bool`, `dict`, `any`, `list`, `list<T>`
/// and `optional<T>`. Nested models cannot be named in text.
impl FromStr for FieldType {
    type Err = ModelError;

    fn from_str(text: &str) -> ModelResult<Self> {
        let text = text.trim();
        if let Some(inner) = generic_argument(text, "list") {
            return Ok(FieldType::list(inner.parse()?));
        }
        if let Some(inner) = generic_argument(text, "optional") {
            return Ok(FieldType::optional(inner.parse()?));
        }

        match text.to_lowercase().as_str() {
            "str" | "string" => Ok(FieldType::Str),
            "int" | "integer" => Ok(FieldType::Int),
            "float" | "numeric" => Ok(FieldType::Float),
            "bool" | "boolean" => Ok(FieldType::Bool),
            "list" => Ok(FieldType::list(FieldType::Any)),
            "dict" => Ok(FieldType::Dict),
            "any" => Ok(FieldType::Any),
            _ => Err(ModelError::invalid_definition(format!(
                "unknown field type '{}'",
                text
            ))),
        }
    }
}

fn generic_argument<'a>(text: &'a str, name: &str) -> Option<&'a str> {
    let rest = text.strip_prefix(name)?;
    rest.trim_start()
        .strip_prefix('<')?
        .strip_suffix('>')
        .map(str::trim)
}

/// Type family used as the [`FieldTypeRegistry`] key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Str,
    Int,
    Float,
    Bool,
    List,
    Dict,
    Any,
    Model,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldKind::Str => "str",
            FieldKind::Int => "int",
            FieldKind::Float => "float",
            FieldKind::Bool => "bool",
            FieldKind::List => "list",
            FieldKind::Dict => "dict",
            FieldKind::Any => "any",
            FieldKind::Model => "model",
        };
        f.write_str(name)
    }
}

/// Produces the type rules for a field type, without presence rules
pub type TypeRulesFactory = Arc<dyn Fn(&FieldType) -> Option<String> + Send + Sync>;

/// Maps field kinds to rule expressions
///
/// Every declared field gets `present` (or `nullable` when optional)
/// followed by the rules its kind produces:
///
/// ```
/// use portafilter_model::{FieldType, FieldTypeRegistry};
///
/// let registry = FieldTypeRegistry::new();
/// assert_eq!(registry.expression(&FieldType::Int), "present|integer");
/// assert_eq!(registry.expression(&FieldType::optional(FieldType::Int)), "nullable|integer");
/// assert_eq!(registry.expression(&FieldType::list(FieldType::Str)), "present|list:string");
/// ```
#[derive(Clone)]
pub struct FieldTypeRegistry {
    factories: HashMap<FieldKind, TypeRulesFactory>,
}

impl FieldTypeRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            factories: HashMap::new(),
        };
        registry
            .register(FieldKind::Str, |_| Some("string".to_string()))
            .register(FieldKind::Int, |_| Some("integer".to_string()))
            .register(FieldKind::Float, |_| Some("numeric".to_string()))
            .register(FieldKind::Bool, |_| Some("boolean".to_string()))
            .register(FieldKind::Dict, |_| Some("dict".to_string()))
            .register(FieldKind::Model, |_| Some("dict".to_string()))
            .register(FieldKind::Any, |_| None)
            .register(FieldKind::List, |field_type| {
                let item = match field_type.inner() {
                    FieldType::List(item) => item_token(item),
                    _ => None,
                };
                Some(match item {
                    Some(token) => format!("list:{}", token),
                    None => "list".to_string(),
                })
            });
        registry
    }

    /// The registry shared by schemas that do not bring their own
    pub fn global() -> &'static Self {
        static REGISTRY: OnceLock<FieldTypeRegistry> = OnceLock::new();
        REGISTRY.get_or_init(Self::new)
    }

    /// Replace the type rules produced for a kind
    pub fn register<F>(&mut self, kind: FieldKind, factory: F) -> &mut Self
    where
        F: Fn(&FieldType) -> Option<String> + Send + Sync + 'static,
    {
        self.factories.insert(kind, Arc::new(factory));
        self
    }

    /// Type rules for a field type, e.g. `list:string`
    pub fn type_rules(&self, field_type: &FieldType) -> Option<String> {
        let factory = self.factories.get(&field_type.kind())?;
        (**factory)(field_type).filter(|rules| !rules.is_empty())
    }

    /// Full rule expression for a field type
    pub fn expression(&self, field_type: &FieldType) -> String {
        let presence = if field_type.is_optional() {
            "nullable"
        } else {
            "present"
        };
        match self.type_rules(field_type) {
            Some(rules) => format!("{}|{}", presence, rules),
            None => presence.to_string(),
        }
    }
}

impl Default for FieldTypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FieldTypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<String> = self.factories.keys().map(ToString::to_string).collect();
        kinds.sort();
        f.debug_struct("FieldTypeRegistry")
            .field("kinds", &kinds)
            .finish()
    }
}

// `list:<type>` only checks scalar item kinds and dicts
fn item_token(item: &FieldType) -> Option<&'static str> {
    match item.inner() {
        FieldType::Str => Some("string"),
        FieldType::Int => Some("integer"),
        FieldType::Float => Some("numeric"),
        FieldType::Bool => Some("boolean"),
        FieldType::Dict | FieldType::Model(_) => Some("dict"),
        FieldType::List(_) => Some("list"),
        FieldType::Any | FieldType::Optional(_) => None,
    }
}
