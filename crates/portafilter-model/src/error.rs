//! Error types for model validation and document loading
//!
//! Copyright (c) 2025 Portafilter Team
//! Licensed under the Apache-2.0 license

use portafilter_core::ValidationErrors;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for model operations
pub type ModelResult<T> = Result<T, ModelError>;

#[derive(Error, Debug)]
pub enum ModelError {
    /// The input for a model was not a JSON object
    #[error("{model} expects an object, got {found}")]
    NotAnObject { model: String, found: &'static str },

    /// A key that the model does not declare
    #[error("{model} object has no attribute '{field}'")]
    UnknownField { model: String, field: String },

    /// More positional arguments than declared parameter names
    #[error("expected at most {expected} positional arguments, got {given}")]
    TooManyArguments { expected: usize, given: usize },

    /// The data violated the model's rules
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    /// Engine configuration errors (unknown rules, bad parameters)
    #[error(transparent)]
    Core(portafilter_core::Error),

    /// A schema or rules document that does not have the expected shape
    #[error("Invalid definition: {message}")]
    InvalidDefinition { message: String },

    /// Validated data could not be converted into the target type
    #[error("Failed to deserialize {model}: {source}")]
    Deserialize {
        model: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to read file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse YAML file '{path}': {source}")]
    YamlParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Failed to parse JSON file '{path}': {source}")]
    JsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unsupported file format for '{path}'. Expected .yaml, .yml, or .json")]
    UnsupportedFormat { path: PathBuf },
}

impl ModelError {
    pub fn invalid_definition(message: impl Into<String>) -> Self {
        Self::InvalidDefinition {
            message: message.into(),
        }
    }

    /// The violation report, when this error carries one
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Validation(errors) => Some(errors),
            Self::Core(error) => error.validation_errors(),
            _ => None,
        }
    }
}

// A failed `Validator::validate` surfaces as a model violation, not an engine error
impl From<portafilter_core::Error> for ModelError {
    fn from(error: portafilter_core::Error) -> Self {
        match error {
            portafilter_core::Error::Validation(errors) => Self::Validation(errors),
            other => Self::Core(other),
        }
    }
}

impl From<ValidationErrors> for ModelError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}
