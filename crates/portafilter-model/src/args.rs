//! Validation of function-style argument lists
//!
//! Positional values are bound to parameter names in order, named values
//! are layered on top (a named value wins over a positional one with the
//! same name), and the resulting object is validated in one pass.

use crate::error::{ModelError, ModelResult};
use portafilter_core::{RuleSpec, Validator};
use serde_json::{Map, Value};

/// Bind and validate call arguments, returning the bound object
///
/// ```
/// use portafilter_model::validate_args;
/// use serde_json::{json, Map};
///
/// let bound = validate_args(
///     &["name", "shots"],
///     vec![json!("lungo")],
///     Map::from_iter([("shots".to_string(), json!(2))]),
///     [("name", "required|string"), ("shots", "integer|between:1,4")],
/// )?;
/// assert_eq!(bound["shots"], json!(2));
/// # Ok::<(), portafilter_model::ModelError>(())
/// ```
pub fn validate_args<I, K, S>(
    names: &[&str],
    positional: Vec<Value>,
    named: Map<String, Value>,
    rules: I,
) -> ModelResult<Map<String, Value>>
where
    I: IntoIterator<Item = (K, S)>,
    K: Into<String>,
    S: Into<RuleSpec>,
{
    if positional.len() > names.len() {
        return Err(ModelError::TooManyArguments {
            expected: names.len(),
            given: positional.len(),
        });
    }

    let mut bound: Map<String, Value> = names
        .iter()
        .map(|name| name.to_string())
        .zip(positional)
        .collect();
    bound.extend(named);

    let mut validator = Validator::make(Value::Object(bound.clone()), rules)?;
    validator.validate()?;
    Ok(bound)
}
