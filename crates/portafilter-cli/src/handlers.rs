//! Command handlers for CLI subcommands
//!
//! This module contains the implementation logic for each CLI subcommand.

mod flatten;
mod resolve;
mod utils;
mod validate;

pub use flatten::handle_flatten;
pub use resolve::handle_resolve;
pub use validate::handle_validate;
