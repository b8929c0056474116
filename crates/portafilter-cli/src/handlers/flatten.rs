//! Flatten command handler

use super::utils::load_input;
use crate::cli::FlattenArgs;
use crate::error::Result;
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use portafilter_core::flatten;
use tracing::{info, instrument};

/// Handle the flatten command
#[instrument(skip(output), fields(file = %args.data.display()))]
pub fn handle_flatten(args: FlattenArgs, output: &mut OutputWriter) -> Result<()> {
    let _timer = Timer::new("flatten_command");
    let data = load_input(&args.data)?;

    let flattened = flatten(&data);
    info!(paths = flattened.len(), "Flattened document");
    output.flattened(&flattened)
}
