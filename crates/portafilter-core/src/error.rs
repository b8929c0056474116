//! Error types for the Portafilter core library
//!
//! This module defines the error handling system for Portafilter, using
//! thiserror for ergonomic error definitions and anyhow for flexible error
//! contexts. Configuration errors (bad rule expressions, unsupported
//! rule/type pairings) are programmer errors and fail fast; data violations
//! travel separately as [`ValidationErrors`].

use crate::validator::ValidationErrors;
use crate::value_type::ValueType;
use thiserror::Error;

/// Main error type for Portafilter operations
#[derive(Error, Debug)]
pub enum Error {
    /// A rule name that is not present in the rule registry
    #[error("Invalid rule: '{name}'")]
    InvalidRule { name: String },

    /// A rule parameter that cannot be used by the rule
    #[error("Invalid parameter for rule '{rule}': {message}")]
    InvalidRuleParam { rule: String, message: String },

    /// A rule that cannot operate on the field's inferred value type
    #[error("Rule '{rule}' does not support {value_type} fields")]
    UnsupportedValueType { rule: String, value_type: ValueType },

    /// The data violated one or more rules
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// Message catalog errors
    #[error("Translation error: {message}")]
    Translation {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// JSON parsing and serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Build an [`Error::InvalidRuleParam`]
    pub fn invalid_param(rule: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidRuleParam {
            rule: rule.into(),
            message: message.into(),
        }
    }

    /// True for errors caused by a malformed rule configuration
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::InvalidRule { .. }
                | Self::InvalidRuleParam { .. }
                | Self::UnsupportedValueType { .. }
        )
    }

    /// The violation report, if this error carries one
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

// Conversion implementations
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io {
            message: err.to_string(),
            source: err,
        }
    }
}
