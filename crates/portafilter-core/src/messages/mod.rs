//! Human-readable violation messages
//!
//! Rules never format messages themselves: they hand a namespaced key such
//! as `en.min.string` and a list of substitutions to a [`Translator`]. The
//! default [`CatalogTranslator`] reads nested JSON catalogs where each
//! template uses `:name` placeholders.

pub mod catalog;

pub use catalog::{load_locale, register_locale, CatalogTranslator, DEFAULT_LOCALE};

use std::fmt;

/// Message lookup service
pub trait Translator: Send + Sync + fmt::Debug {
    /// Resolve `{locale}.{dotted.key}` and substitute `:name` placeholders.
    /// Unknown keys come back unchanged.
    fn translate(&self, key: &str, substitutions: &[(&str, String)]) -> String;
}

/// Translate through the default catalog
pub fn trans(key: &str, substitutions: &[(&str, String)]) -> String {
    CatalogTranslator::new().translate(key, substitutions)
}

/// Replace `:name` placeholders, longest name first so `:attribute` is
/// never clobbered by a shorter `:attr`.
pub fn substitute(template: &str, substitutions: &[(&str, String)]) -> String {
    let mut ordered: Vec<&(&str, String)> = substitutions.iter().collect();
    ordered.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

    ordered
        .into_iter()
        .fold(template.to_string(), |text, (name, value)| {
            text.replace(&format!(":{}", name), value)
        })
}
