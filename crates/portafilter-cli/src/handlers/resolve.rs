//! Resolve command handler

use super::utils::load_input;
use crate::cli::ResolveArgs;
use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use crate::output::{OutputWriter, ResolvedEntry};
use portafilter_core::resolve_with_default;
use serde_json::Value;
use tracing::{debug, instrument};

/// Handle the resolve command
#[instrument(skip(output), fields(file = %args.data.display(), path = %args.path))]
pub fn handle_resolve(args: ResolveArgs, output: &mut OutputWriter) -> Result<()> {
    let _timer = Timer::with_details("resolve_command", &args.path);
    let data = load_input(&args.data)?;
    let default = parse_default(args.default.as_deref())?;

    let resolution = resolve_with_default(&args.path, &data, &default);
    let entries = ResolvedEntry::from_resolution(&args.path, &resolution);
    debug!(
        expanded = resolution.is_expanded(),
        entries = entries.len(),
        "Resolved path"
    );

    output.resolution(&entries)
}

// A bare word that is not valid JSON is taken as a string
fn parse_default(default: Option<&str>) -> Result<Value> {
    match default {
        None => Ok(Value::Null),
        Some(text) if text.trim().is_empty() => {
            Err(Error::invalid_args("--default must not be empty"))
        }
        Some(text) => Ok(serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))),
    }
}
