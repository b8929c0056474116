//! Engine configuration

use crate::messages::{CatalogTranslator, DEFAULT_LOCALE};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable overriding the message locale
pub const LOCALE_ENV: &str = "PORTAFILTER_LOCALE";

/// Environment variable pointing at extra message catalogs
pub const MESSAGES_DIR_ENV: &str = "PORTAFILTER_MESSAGES_DIR";

/// Settings shared by every validation run of a [`crate::Validator`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Locale used to namespace message keys
    pub locale: String,

    /// Directory holding `{locale}.json` catalogs
    pub messages_dir: Option<PathBuf>,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            locale: DEFAULT_LOCALE.to_string(),
            messages_dir: None,
        }
    }
}

impl ValidatorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    pub fn messages_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.messages_dir = Some(dir.into());
        self
    }

    /// Apply `PORTAFILTER_LOCALE` and `PORTAFILTER_MESSAGES_DIR` overrides
    pub fn merge_with_env(mut self) -> Self {
        if let Ok(locale) = std::env::var(LOCALE_ENV) {
            if !locale.trim().is_empty() {
                self.locale = locale.trim().to_string();
            }
        }
        if let Ok(dir) = std::env::var(MESSAGES_DIR_ENV) {
            if !dir.trim().is_empty() {
                self.messages_dir = Some(PathBuf::from(dir));
            }
        }
        self
    }

    /// Translator honoring the configured messages directory
    pub fn translator(&self) -> CatalogTranslator {
        match &self.messages_dir {
            Some(dir) => CatalogTranslator::with_messages_dir(dir),
            None => CatalogTranslator::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_locale() {
        let config = ValidatorConfig::default();
        assert_eq!(config.locale, "en");
        assert!(config.messages_dir.is_none());
    }

    #[test]
    fn test_builder_and_serde_defaults() {
        let config = ValidatorConfig::new().locale("nl").messages_dir("/tmp/messages");
        assert_eq!(config.translator().messages_dir(), Some(std::path::Path::new("/tmp/messages")));

        let parsed: ValidatorConfig = serde_json::from_str(r#"{"messages_dir": "lang"}"#).unwrap();
        assert_eq!(parsed.locale, "en");
        assert_eq!(parsed.messages_dir, Some(PathBuf::from("lang")));
    }
}
