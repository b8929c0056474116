//! Configuration management for the CLI
//!
//! This module handles loading configuration from:
//! - Default values
//! - Configuration files (YAML/JSON)
//! - Environment variables (validator locale and messages directory)
//!
//! Command-line arguments are applied on top by the handlers.

use crate::cli::OutputFormat;
use crate::error::{Error, Result};
use portafilter_core::ValidatorConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Engine settings (locale, messages directory)
    pub validator: ValidatorConfig,

    /// Output settings
    pub output: OutputConfig,
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format
    pub format: OutputFormat,

    /// Use colored output by default
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Human,
            color: true,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        let is_yaml = matches!(
            path.extension().and_then(|s| s.to_str()),
            Some("yaml") | Some("yml")
        );
        let parsed: anyhow::Result<Self> = if is_yaml {
            serde_yaml::from_str(&content).map_err(anyhow::Error::from)
        } else {
            serde_json::from_str(&content).map_err(anyhow::Error::from)
        };

        parsed.map_err(|source| Error::Config {
            message: format!("failed to parse {}", path.display()),
            source: Some(source),
        })
    }

    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        for path in Self::default_config_paths() {
            if !path.exists() {
                continue;
            }
            match Self::from_file(&path) {
                Ok(config) => {
                    debug!(path = %path.display(), "Loaded configuration");
                    return Ok(config);
                }
                Err(e) => warn!(path = %path.display(), error = %e, "Failed to load config"),
            }
        }

        // Return default config if no config file found
        Ok(Self::default())
    }

    /// Load configuration from a specific file or default locations
    pub fn load_with_file(file: Option<&Path>) -> Result<Self> {
        let mut config = match file {
            Some(path) if !path.exists() => {
                return Err(Error::FileNotFound {
                    path: path.to_path_buf(),
                })
            }
            Some(path) => Self::from_file(path)?,
            None => Self::load()?,
        };
        config.validator = config.validator.merge_with_env();
        Ok(config)
    }

    /// Get default configuration file paths to check
    fn default_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            PathBuf::from(".portafilter.yaml"),
            PathBuf::from(".portafilter.json"),
        ];

        if let Some(config_dir) = dirs::config_dir() {
            let portafilter_dir = config_dir.join("portafilter");
            paths.push(portafilter_dir.join("config.yaml"));
            paths.push(portafilter_dir.join("config.json"));
        }

        if let Some(home_dir) = dirs::home_dir() {
            paths.push(home_dir.join(".portafilter.yaml"));
            paths.push(home_dir.join(".portafilter.json"));
        }

        paths
    }
}
