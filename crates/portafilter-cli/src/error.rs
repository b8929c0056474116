//! Error types and handling for the CLI
//!
//! This module provides error types and utilities for handling
//! various failure modes in the CLI application.

use std::io;
use std::path::PathBuf;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for CLI operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error (file operations, etc.)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The document violated its rules; the report has already been written
    #[error("Validation failed with {count} violation(s)")]
    Violations { count: usize },

    /// Error from the validation engine (bad rule expressions, etc.)
    #[error("Rule error: {0}")]
    Core(#[from] portafilter_core::Error),

    /// Error loading documents, rules or schemas
    #[error("{0}")]
    Model(#[from] portafilter_model::ModelError),

    /// File not found
    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// Invalid argument value
    #[error("Invalid arguments: {0}")]
    InvalidArgs(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Generic error with context
    #[error("{message}")]
    Other { message: String },
}

impl Error {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
        }
    }

    /// Create an invalid arguments error
    pub fn invalid_args(message: impl Into<String>) -> Self {
        Self::InvalidArgs(message.into())
    }

    /// Create a generic error with message
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Io(_) => 1,
            Self::Violations { .. } => 2,
            Self::Core(_) => 3,
            Self::Model(_) => 4,
            Self::FileNotFound { .. } => 5,
            Self::Config { .. } => 6,
            Self::InvalidArgs(_) => 7,
            Self::Json(_) => 12,
            Self::Yaml(_) => 13,
            Self::Other { .. } => 99,
        }
    }

    /// Check if this error should display usage help
    pub fn should_show_help(&self) -> bool {
        matches!(self, Self::InvalidArgs(_))
    }
}

/// Format an error for display to the user
pub fn format_error(error: &Error, use_color: bool) -> String {
    if use_color {
        use colored::Colorize;
        format!("{} {}", "Error:".red().bold(), error)
    } else {
        format!("Error: {}", error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(Error::Violations { count: 3 }.exit_code(), 2);
        assert_eq!(Error::invalid_args("x").exit_code(), 7);
        assert_eq!(
            Error::from(portafilter_core::Error::InvalidRule {
                name: "shiny".to_string()
            })
            .exit_code(),
            3
        );
        assert!(Error::invalid_args("x").should_show_help());
        assert!(!Error::config("x").should_show_help());
    }

    #[test]
    fn test_format_error_plain() {
        let formatted = format_error(&Error::Violations { count: 2 }, false);
        assert_eq!(formatted, "Error: Validation failed with 2 violation(s)");
    }
}
