//! Portafilter Model - typed schemas on top of the validation engine
//!
//! This crate turns field declarations into engine rule lists and adds the
//! record-level behavior the engine itself does not have:
//!
//! - **Field types**: `str`, `int`, `float`, `bool`, `list<T>`, `dict`,
//!   `any`, nested models and `optional<T>`, each mapped to a rule
//!   expression through an overridable [`FieldTypeRegistry`]
//! - **Model schemas**: defaults, rejection of undeclared keys and
//!   recursive validation of nested models with prefixed report paths
//! - **Argument validation**: [`validate_args`] binds positional and named
//!   values to parameter names before validating them
//! - **Loading**: YAML and JSON documents for data, rules and schema
//!   definitions
//!
//! ## Quick Start
//!
//! ```rust
//! use portafilter_model::{FieldType, ModelSchema};
//! use serde_json::json;
//!
//! let customer = ModelSchema::builder("Customer")
//!     .field("email", FieldType::Str)
//!     .rules("email", "email")
//!     .build()
//!     .unwrap();
//!
//! let order = ModelSchema::builder("Order")
//!     .field("id", FieldType::Int)
//!     .field("customer", FieldType::Model(customer))
//!     .field("note", FieldType::optional(FieldType::Str))
//!     .build()
//!     .unwrap();
//!
//! let err = order
//!     .validate(&json!({"id": 7, "customer": {"email": "not-an-email"}}))
//!     .unwrap_err();
//! assert!(err.validation_errors().unwrap().contains("customer.email"));
//! ```
//!
//! Copyright (c) 2025 Portafilter Team
//! Licensed under the Apache-2.0 license

pub mod args;
pub mod error;
pub mod field;
pub mod loader;
pub mod schema;

pub use args::validate_args;
pub use error::{ModelError, ModelResult};
pub use field::{FieldKind, FieldType, FieldTypeRegistry, TypeRulesFactory};
pub use loader::{load_document, parse_document, rules_from_value, schema_from_value, Format};
pub use schema::{FieldDef, ModelSchema, ModelSchemaBuilder};
