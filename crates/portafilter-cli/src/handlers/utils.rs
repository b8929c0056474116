//! Shared utilities for command handlers

use crate::error::{Error, Result};
use portafilter_model::load_document;
use serde_json::Value;
use std::path::Path;
use tracing::debug;

/// Load a JSON or YAML document, reporting a missing file distinctly
pub fn load_input(path: &Path) -> Result<Value> {
    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let document = load_document(path)?;
    debug!(path = %path.display(), "Document loaded");
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_load_input_yaml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.yml");
        std::fs::write(&path, "name: espresso\nshots: 2\n").unwrap();

        assert_eq!(load_input(&path).unwrap(), json!({"name": "espresso", "shots": 2}));
    }

    #[test]
    fn test_load_input_missing() {
        let err = load_input(Path::new("/nonexistent/data.json")).unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
        assert_eq!(err.exit_code(), 5);
    }

    #[test]
    fn test_load_input_unsupported_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.txt");
        std::fs::write(&path, "x").unwrap();

        assert!(matches!(load_input(&path).unwrap_err(), Error::Model(_)));
    }
}
