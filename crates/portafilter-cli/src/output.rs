//! Output formatting and writing utilities
//!
//! This module provides utilities for formatting and writing output
//! in various formats (JSON, YAML, human-readable) with specialized
//! support for validation reports, path resolutions and flattened documents.

use crate::cli::OutputFormat;
use crate::error::Result;
use colored::Colorize;
use portafilter_core::{Resolution, ValidationErrors};
use serde::Serialize;
use serde_json::{Map, Value};
use std::io::{self, Write};
use tracing::trace;

/// One concrete path produced by resolving an attribute
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedEntry {
    pub path: String,
    pub exists: bool,
    pub value: Value,
}

impl ResolvedEntry {
    /// Flatten a resolution into one entry per concrete path
    pub fn from_resolution(attribute: &str, resolution: &Resolution<'_>) -> Vec<Self> {
        resolution
            .leaves(attribute)
            .into_iter()
            .map(|(path, resolved)| Self {
                path,
                exists: resolved.exists,
                value: resolved.value.clone(),
            })
            .collect()
    }
}

/// Trait for formatting output with specialized support for common types
pub trait OutputFormatter {
    /// Format a serializable value
    fn format<T: Serialize>(&self, value: &T) -> Result<String>;

    /// Format a violation report grouped by path
    fn format_report(&self, report: &ValidationErrors) -> Result<String>;

    /// Format resolved entries
    fn format_resolution(&self, entries: &[ResolvedEntry]) -> Result<String>;

    /// Format a flattened document
    fn format_flattened(&self, flattened: &Map<String, Value>) -> Result<String>;
}

impl OutputFormatter for OutputFormat {
    fn format<T: Serialize>(&self, value: &T) -> Result<String> {
        match self {
            OutputFormat::Json => Ok(serde_json::to_string(value)?),
            OutputFormat::JsonPretty => Ok(serde_json::to_string_pretty(value)?),
            OutputFormat::Yaml => Ok(serde_yaml::to_string(value)?),
            OutputFormat::Human => {
                // For human format, use pretty JSON as fallback
                Ok(serde_json::to_string_pretty(value)?)
            }
        }
    }

    fn format_report(&self, report: &ValidationErrors) -> Result<String> {
        match self {
            OutputFormat::Human => Ok(format_report_human(report)),
            _ => self.format(report),
        }
    }

    fn format_resolution(&self, entries: &[ResolvedEntry]) -> Result<String> {
        match self {
            OutputFormat::Human => Ok(format_resolution_human(entries)),
            _ => self.format(&entries),
        }
    }

    fn format_flattened(&self, flattened: &Map<String, Value>) -> Result<String> {
        match self {
            OutputFormat::Human => Ok(flattened
                .iter()
                .map(|(path, value)| format!("{} = {}", path, format_value_compact(value)))
                .collect::<Vec<_>>()
                .join("\n")),
            _ => self.format(flattened),
        }
    }
}

/// Output writer that handles different output formats and colors
pub struct OutputWriter {
    format: OutputFormat,
    use_color: bool,
    quiet: bool,
    writer: Box<dyn Write>,
}

impl OutputWriter {
    /// Create a new output writer
    pub fn new(format: OutputFormat, use_color: bool, quiet: bool) -> Self {
        Self::with_writer(format, use_color, quiet, Box::new(io::stdout()))
    }

    /// Create an output writer with a custom writer
    pub fn with_writer(
        format: OutputFormat,
        use_color: bool,
        quiet: bool,
        writer: Box<dyn Write>,
    ) -> Self {
        Self {
            format,
            use_color,
            quiet,
            writer,
        }
    }

    /// Get the output format
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Write a line of output
    pub fn writeln(&mut self, content: &str) -> Result<()> {
        writeln!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write an info message
    pub fn info(&mut self, message: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&format!("{} {}", "ℹ".blue(), message))
        } else {
            self.writeln(&format!("INFO: {}", message))
        }
    }

    /// Write a success message
    pub fn success(&mut self, message: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.green().to_string())
        } else {
            self.writeln(message)
        }
    }

    /// Write an error message
    pub fn error(&mut self, message: &str) -> Result<()> {
        if self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.red().to_string())
        } else {
            self.writeln(&format!("ERROR: {}", message))
        }
    }

    /// Write a violation report
    pub fn report(&mut self, report: &ValidationErrors) -> Result<()> {
        trace!(paths = report.len(), "Outputting report");
        let formatted = self.format.format_report(report)?;
        let formatted = if self.use_color && self.format == OutputFormat::Human {
            colorize_report(&formatted)
        } else {
            formatted
        };
        self.writeln(formatted.trim_end())
    }

    /// Write resolved entries
    pub fn resolution(&mut self, entries: &[ResolvedEntry]) -> Result<()> {
        let formatted = self.format.format_resolution(entries)?;
        self.writeln(formatted.trim_end())
    }

    /// Write a flattened document
    pub fn flattened(&mut self, flattened: &Map<String, Value>) -> Result<()> {
        let formatted = self.format.format_flattened(flattened)?;
        if formatted.is_empty() {
            return Ok(());
        }
        self.writeln(formatted.trim_end())
    }
}

/// Format a report for human reading
fn format_report_human(report: &ValidationErrors) -> String {
    let mut output = String::new();
    for (path, messages) in report.iter() {
        output.push_str(path);
        output.push('\n');
        for message in messages {
            output.push_str(&format!("  • {}\n", message));
        }
    }
    output
}

// Paths are the unindented lines
fn colorize_report(formatted: &str) -> String {
    formatted
        .lines()
        .map(|line| {
            if line.starts_with(' ') {
                line.to_string()
            } else {
                line.bold().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format resolved entries for human reading
fn format_resolution_human(entries: &[ResolvedEntry]) -> String {
    if entries.is_empty() {
        return "(no elements)".to_string();
    }

    entries
        .iter()
        .map(|entry| {
            let value = format_value_compact(&entry.value);
            if entry.exists {
                format!("{} = {}", entry.path, value)
            } else {
                format!("{} = {} (missing)", entry.path, value)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a JSON value in a compact, human-readable way
fn format_value_compact(value: &Value) -> String {
    match value {
        Value::String(s) => format!("\"{}\"", s),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(arr) => {
            if arr.len() <= 3 {
                format!(
                    "[{}]",
                    arr.iter()
                        .map(format_value_compact)
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            } else {
                format!("[{} items]", arr.len())
            }
        }
        Value::Object(obj) => {
            if obj.len() <= 2 {
                let items: Vec<String> = obj
                    .iter()
                    .map(|(k, v)| format!("{}: {}", k, format_value_compact(v)))
                    .collect();
                format!("{{{}}}", items.join(", "))
            } else {
                format!("{{{} fields}}", obj.len())
            }
        }
    }
}
