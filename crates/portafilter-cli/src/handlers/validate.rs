//! Validation command handler

use super::utils::load_input;
use crate::cli::{OutputFormat, ValidateArgs};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use portafilter_core::{ValidationErrors, Validator, ValidatorConfig};
use portafilter_model::{rules_from_value, schema_from_value, ModelError};
use serde_json::Value;
use std::path::Path;
use tracing::{debug, info, instrument, warn};

/// Handle the validate command
#[instrument(skip(config, output), fields(file = %args.data.display()))]
pub fn handle_validate(args: ValidateArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let _timer = Timer::with_details("validate_command", &format!("file: {}", args.data.display()));
    output.info(&format!("Validating {}", args.data.display()))?;

    let validator_config = effective_config(&args, &config.validator);
    debug!(locale = %validator_config.locale, "Using validator configuration");

    let data = load_input(&args.data)?;
    let report = match (&args.rules, &args.model) {
        (Some(rules), _) => validate_with_rules(data, rules, validator_config)?,
        (None, Some(model)) => validate_with_model(&data, model, validator_config)?,
        (None, None) => return Err(Error::invalid_args("either --rules or --model is required")),
    };

    if report.is_empty() {
        info!("Validation completed successfully");
        output.success(&format!("✓ {} is valid", args.data.display()))?;
        if output.format() != OutputFormat::Human {
            output.report(&report)?;
        }
        return Ok(());
    }

    warn!(paths = report.len(), messages = report.message_count(), "Validation failed");
    output.error(&format!("✗ {}", report))?;
    output.report(&report)?;

    Err(Error::Violations {
        count: report.message_count(),
    })
}

/// Config file settings, overridden by command-line flags
fn effective_config(args: &ValidateArgs, base: &ValidatorConfig) -> ValidatorConfig {
    let mut config = base.clone();
    if let Some(locale) = &args.locale {
        config = config.locale(locale.clone());
    }
    if let Some(dir) = &args.messages_dir {
        config = config.messages_dir(dir.clone());
    }
    config
}

fn validate_with_rules(data: Value, rules_path: &Path, config: ValidatorConfig) -> Result<ValidationErrors> {
    let rules = rules_from_value(&load_input(rules_path)?)?;
    debug!(attributes = rules.len(), "Rules loaded");

    let validator = {
        let _compile_timer = Timer::new("rule_compilation");
        Validator::make(data, rules)?.with_config(config)
    };
    Ok(validator.run())
}

fn validate_with_model(data: &Value, schema_path: &Path, config: ValidatorConfig) -> Result<ValidationErrors> {
    let default_name = schema_path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("Model");
    let schema = schema_from_value(default_name, &load_input(schema_path)?)?.with_config(config);
    debug!(model = %schema.name(), fields = schema.fields().len(), "Schema loaded");

    match schema.validate(data) {
        Ok(_) => Ok(ValidationErrors::new()),
        Err(ModelError::Validation(report)) => Ok(report),
        Err(ModelError::UnknownField { field, .. }) => {
            let mut report = ValidationErrors::new();
            report.insert(field.clone(), vec![schema.unknown_field_message(&field)]);
            Ok(report)
        }
        Err(other) => Err(other.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn args(locale: Option<&str>, messages_dir: Option<&str>) -> ValidateArgs {
        ValidateArgs {
            data: PathBuf::from("data.json"),
            rules: Some(PathBuf::from("rules.yaml")),
            model: None,
            locale: locale.map(str::to_string),
            messages_dir: messages_dir.map(PathBuf::from),
        }
    }

    #[test]
    fn test_flags_override_config() {
        let base = ValidatorConfig::new().locale("de").messages_dir("/etc/lang");

        let config = effective_config(&args(None, None), &base);
        assert_eq!(config, base);

        let config = effective_config(&args(Some("nl"), Some("/opt/lang")), &base);
        assert_eq!(config.locale, "nl");
        assert_eq!(config.messages_dir, Some(PathBuf::from("/opt/lang")));
    }
}
