//! Process-wide catalog of locale message files

use super::{substitute, Translator};
use crate::error::{Error, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock, RwLock};
use tracing::{debug, warn};

/// Locale shipped with the crate
pub const DEFAULT_LOCALE: &str = "en";

const EMBEDDED_EN: &str = include_str!("en.json");

type Catalogs = RwLock<HashMap<String, Arc<Value>>>;

static CATALOGS: OnceLock<Catalogs> = OnceLock::new();

fn catalogs() -> &'static Catalogs {
    CATALOGS.get_or_init(|| RwLock::new(HashMap::new()))
}

/// Register (or replace) the catalog for a locale
pub fn register_locale(locale: impl Into<String>, catalog: Value) -> Result<()> {
    if !catalog.is_object() {
        return Err(Error::Translation {
            message: "a message catalog must be a JSON object".to_string(),
            source: None,
        });
    }

    let locale = locale.into();
    debug!(locale = %locale, "registering message catalog");
    let mut guard = catalogs().write().map_err(|_| Error::Translation {
        message: "message catalog lock poisoned".to_string(),
        source: None,
    })?;
    guard.insert(locale, Arc::new(catalog));
    Ok(())
}

/// Load `{dir}/{locale}.json` and register it
pub fn load_locale(dir: &Path, locale: &str) -> Result<()> {
    let path = dir.join(format!("{}.json", locale));
    let content = std::fs::read_to_string(&path).map_err(|e| Error::Translation {
        message: format!("failed to read message catalog {}", path.display()),
        source: Some(e.into()),
    })?;
    let catalog: Value = serde_json::from_str(&content).map_err(|e| Error::Translation {
        message: format!("invalid message catalog {}", path.display()),
        source: Some(e.into()),
    })?;
    register_locale(locale, catalog)
}

fn cached(locale: &str) -> Option<Arc<Value>> {
    catalogs()
        .read()
        .ok()
        .and_then(|guard| guard.get(locale).cloned())
}

/// Translator backed by the process-wide catalog cache.
///
/// Catalogs are loaded on first use of a locale: the built-in `en` catalog
/// comes from the crate itself, other locales from the optional messages
/// directory. Loaded catalogs are never invalidated.
#[derive(Debug, Clone, Default)]
pub struct CatalogTranslator {
    messages_dir: Option<PathBuf>,
}

impl CatalogTranslator {
    pub const fn new() -> Self {
        Self { messages_dir: None }
    }

    /// Look up locales that are not yet cached in this directory
    pub fn with_messages_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            messages_dir: Some(dir.into()),
        }
    }

    pub fn messages_dir(&self) -> Option<&Path> {
        self.messages_dir.as_deref()
    }

    fn catalog(&self, locale: &str) -> Option<Arc<Value>> {
        if let Some(catalog) = cached(locale) {
            return Some(catalog);
        }

        if let Some(dir) = &self.messages_dir {
            match load_locale(dir, locale) {
                Ok(()) => return cached(locale),
                Err(e) if locale != DEFAULT_LOCALE => {
                    warn!(locale = %locale, error = %e, "message catalog unavailable");
                    return None;
                }
                Err(_) => {}
            }
        }

        if locale == DEFAULT_LOCALE {
            match serde_json::from_str::<Value>(EMBEDDED_EN) {
                Ok(catalog) => {
                    if let Err(e) = register_locale(DEFAULT_LOCALE, catalog) {
                        warn!(error = %e, "failed to cache built-in catalog");
                    }
                    return cached(locale);
                }
                Err(e) => warn!(error = %e, "built-in catalog is not valid JSON"),
            }
        }

        None
    }
}

impl Translator for CatalogTranslator {
    fn translate(&self, key: &str, substitutions: &[(&str, String)]) -> String {
        let Some((locale, path)) = key.split_once('.') else {
            return key.to_string();
        };

        let template = self.catalog(locale).and_then(|catalog| {
            path.split('.')
                .try_fold(catalog.as_ref(), |node, segment| node.get(segment))
                .and_then(Value::as_str)
                .map(str::to_string)
        });

        match template {
            Some(template) => substitute(&template, substitutions),
            None => key.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_builtin_catalog() {
        let translator = CatalogTranslator::new();
        assert_eq!(
            translator.translate("en.required", &[("attribute", "name".to_string())]),
            "The name field is required."
        );
        assert_eq!(
            translator.translate(
                "en.min.list",
                &[("attribute", "menu".to_string()), ("min", "3".to_string())]
            ),
            "The menu must have at least 3 items."
        );
    }

    #[test]
    fn test_missing_key_returns_key() {
        let translator = CatalogTranslator::new();
        assert_eq!(translator.translate("en.nope.nothing", &[]), "en.nope.nothing");
        assert_eq!(translator.translate("en.min", &[]), "en.min");
        assert_eq!(translator.translate("zz_missing.required", &[]), "zz_missing.required");
        assert_eq!(translator.translate("plain", &[]), "plain");
    }

    #[test]
    fn test_register_locale() {
        register_locale("test_reg", json!({"required": "Champ :attribute requis."})).unwrap();
        let translator = CatalogTranslator::new();
        assert_eq!(
            translator.translate("test_reg.required", &[("attribute", "nom".to_string())]),
            "Champ nom requis."
        );
        assert!(register_locale("test_bad", json!(["not", "a", "map"])).is_err());
    }

    #[test]
    fn test_lazy_load_from_directory() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("test_dir.json"),
            r#"{"email": {"nested": "E-mail :attribute ongeldig"}}"#,
        )
        .unwrap();

        let translator = CatalogTranslator::with_messages_dir(dir.path());
        assert_eq!(
            translator.translate("test_dir.email.nested", &[("attribute", "adres".to_string())]),
            "E-mail adres ongeldig"
        );
    }

    #[test]
    fn test_load_locale_rejects_invalid_json() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("broken.json"), "{not json").unwrap();
        let err = load_locale(dir.path(), "broken").unwrap_err();
        assert!(matches!(err, Error::Translation { .. }));
    }
}
