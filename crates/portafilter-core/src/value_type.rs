//! Value type classification for fields
//!
//! A field's [`ValueType`] decides what magnitude rules (`min`, `max`, `size`,
//! `between`) measure: characters for strings, elements for lists and the
//! number itself for integer and numeric fields.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Closed set of field value types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    #[default]
    String,
    List,
    Integer,
    Numeric,
    Dict,
    Boolean,
}

impl ValueType {
    /// All value types in declaration order
    pub const ALL: [ValueType; 6] = [
        ValueType::String,
        ValueType::List,
        ValueType::Integer,
        ValueType::Numeric,
        ValueType::Dict,
        ValueType::Boolean,
    ];

    /// Map a rule name onto the value type it declares, if any
    pub fn from_rule_name(name: &str) -> Option<Self> {
        match name {
            "string" => Some(ValueType::String),
            "list" => Some(ValueType::List),
            "integer" => Some(ValueType::Integer),
            "numeric" => Some(ValueType::Numeric),
            "dict" => Some(ValueType::Dict),
            "boolean" => Some(ValueType::Boolean),
            _ => None,
        }
    }

    /// The rule token for this type
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueType::String => "string",
            ValueType::List => "list",
            ValueType::Integer => "integer",
            ValueType::Numeric => "numeric",
            ValueType::Dict => "dict",
            ValueType::Boolean => "boolean",
        }
    }

    /// Check whether a JSON value is of this type
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            ValueType::String => value.is_string(),
            ValueType::List => value.is_array(),
            ValueType::Integer => value.is_i64() || value.is_u64(),
            ValueType::Numeric => value.is_number(),
            ValueType::Dict => value.is_object(),
            ValueType::Boolean => value.is_boolean(),
        }
    }

    /// Whether magnitude rules can measure values of this type
    pub fn is_measurable(&self) -> bool {
        !matches!(self, ValueType::Dict | ValueType::Boolean)
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValueType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ValueType::from_rule_name(s).ok_or_else(|| format!("unknown value type '{}'", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_rule_name() {
        assert_eq!(ValueType::from_rule_name("list"), Some(ValueType::List));
        assert_eq!(ValueType::from_rule_name("required"), None);
        assert_eq!("numeric".parse::<ValueType>(), Ok(ValueType::Numeric));
        assert!("array".parse::<ValueType>().is_err());
    }

    #[test]
    fn test_matches_distinguishes_integer_from_numeric() {
        assert!(ValueType::Integer.matches(&json!(10)));
        assert!(!ValueType::Integer.matches(&json!(10.5)));
        assert!(!ValueType::Integer.matches(&json!(10.0)));
        assert!(ValueType::Numeric.matches(&json!(10.5)));
        assert!(!ValueType::Numeric.matches(&json!("10")));
        assert!(!ValueType::Integer.matches(&json!(true)));
    }

    #[test]
    fn test_measurable() {
        assert!(ValueType::String.is_measurable());
        assert!(!ValueType::Dict.is_measurable());
        assert!(!ValueType::Boolean.is_measurable());
    }
}
