//! Rule-driven validation of nested documents
//!
//! The validator is organized into focused modules:
//! - `types`: the path-keyed violation report
//! - `core`: the [`Validator`] and its per-attribute orchestration
//! - `dependent`: resolution of cross-field rule dependencies
//! - `tests`: end-to-end behavior of the validator

pub mod core;
mod dependent;
pub mod types;

#[cfg(test)]
mod tests;

pub use self::core::Validator;
pub use types::ValidationErrors;
