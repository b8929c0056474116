//! Portafilter Core - Declarative, path-addressed data validation
//!
//! This crate validates arbitrary nested documents (`serde_json::Value`)
//! against per-field rule expressions and reports every violation under the
//! concrete path where it occurred.
//!
//! # Main Components
//!
//! - **Path Resolution**: Dot-separated attribute paths with `*` wildcards
//! - **Rules**: Built-in and custom rules, compiled into rulesets from
//!   expressions such as `required|list:integer|min:2`
//! - **Validator**: Orchestrates rule lists over a document, expanding
//!   wildcards and resolving cross-field dependencies
//! - **Messages**: Locale catalogs for human-readable violation messages
//! - **Error Handling**: Configuration errors via `thiserror`, violations as a
//!   separate [`ValidationErrors`] report
//!
//! # Example
//!
//! ```
//! use portafilter_core::{Result, Validator};
//! use serde_json::json;
//!
//! fn example() -> Result<()> {
//!     let data = json!({
//!         "name": "espresso",
//!         "sizes": [{"ml": 30}, {"ml": "large"}],
//!     });
//!
//!     let mut validator = Validator::make(data, [
//!         ("name", "required|string|min:3"),
//!         ("sizes.*.ml", "required|integer"),
//!     ])?;
//!
//!     assert!(validator.fails());
//!     assert!(validator.errors().contains("sizes.1.ml"));
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

pub mod config;
pub mod dates;
pub mod error;
pub mod messages;
pub mod path;
pub mod rules;
pub mod validator;
pub mod value_type;

#[cfg(test)]
mod proptest_strategies;

// Re-export main types for convenience
pub use config::ValidatorConfig;
pub use error::{Error, Result};
pub use messages::{trans, CatalogTranslator, Translator};
pub use path::{flatten, resolve, resolve_with_default, Resolution, Resolved};
pub use rules::{
    Rule, RuleContext, RuleItem, RuleList, RuleMetadata, RuleRegistry, RuleSpec, Ruleset,
};
pub use validator::{ValidationErrors, Validator};
pub use value_type::ValueType;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_error_creation() {
        let err = Error::InvalidRule {
            name: "Test error".to_string(),
        };
        assert!(err.to_string().contains("Test error"));
    }
}
