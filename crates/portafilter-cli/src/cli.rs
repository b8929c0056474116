//! Command-line interface argument parsing and definitions
//!
//! This module defines the CLI structure using clap's derive API,
//! providing a type-safe and well-documented command interface.

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::io::IsTerminal;
use std::path::PathBuf;

/// Portafilter CLI - Declarative validation for JSON and YAML documents
///
/// Validate documents against per-field rule expressions, inspect how
/// attribute paths resolve, and list every leaf path of a document.
#[derive(Parser, Debug)]
#[command(
    name = "portafilter",
    version,
    author,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Enable verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "PORTAFILTER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format for results (defaults to the configured format)
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate a document against a rules file or a model schema
    Validate(ValidateArgs),

    /// Show how an attribute path resolves against a document
    Resolve(ResolveArgs),

    /// List every leaf of a document under its dotted path
    Flatten(FlattenArgs),
}

/// Arguments for the validate command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to the document to validate (JSON or YAML)
    #[arg(value_name = "DATA")]
    pub data: PathBuf,

    /// Rules file mapping attribute paths to rule expressions
    #[arg(short, long, value_name = "RULES", required_unless_present = "model")]
    pub rules: Option<PathBuf>,

    /// Model schema file to validate against instead of a rules file
    #[arg(short, long, value_name = "SCHEMA", conflicts_with = "rules")]
    pub model: Option<PathBuf>,

    /// Locale for violation messages
    #[arg(short, long)]
    pub locale: Option<String>,

    /// Directory holding additional `{locale}.json` message catalogs
    #[arg(long, value_name = "DIR")]
    pub messages_dir: Option<PathBuf>,
}

/// Arguments for the resolve command
#[derive(Parser, Debug)]
pub struct ResolveArgs {
    /// Path to the document (JSON or YAML)
    #[arg(value_name = "DATA")]
    pub data: PathBuf,

    /// Dot-separated attribute path, `*` expands sequences
    #[arg(value_name = "PATH")]
    pub path: String,

    /// JSON value reported for missing paths
    #[arg(long, value_name = "JSON")]
    pub default: Option<String>,
}

/// Arguments for the flatten command
#[derive(Parser, Debug)]
pub struct FlattenArgs {
    /// Path to the document (JSON or YAML)
    #[arg(value_name = "DATA")]
    pub data: PathBuf,
}

/// Output format options
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// Human-readable formatted output
    #[default]
    Human,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
    /// Pretty-printed JSON output
    JsonPretty,
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the effective verbosity level (considering quiet flag)
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }

    /// Check if colored output should be used
    pub fn use_color(&self) -> bool {
        !self.no_color && std::io::stdout().is_terminal()
    }
}
