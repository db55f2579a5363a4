//! Output formatting and writing utilities
//!
//! This module formats mapped documents, validation reports and schema
//! listings in the configured format (JSON, YAML or human-readable).

use crate::cli::OutputFormat;
use crate::error::Result;
use colored::Colorize;
use hookup_core::{AccessorKind, Resolution};
use serde::Serialize;
use serde_json::Value;
use std::io::{self, Write};
use tracing::{debug, trace};

/// Trait for formatting serializable output
pub trait OutputFormatter {
    /// Format a serializable value
    fn format<T: Serialize>(&self, value: &T) -> Result<String>;
}

impl OutputFormatter for OutputFormat {
    fn format<T: Serialize>(&self, value: &T) -> Result<String> {
        match self {
            OutputFormat::Json => Ok(serde_json::to_string(value)?),
            OutputFormat::JsonPretty | OutputFormat::Human => {
                Ok(serde_json::to_string_pretty(value)?)
            }
            OutputFormat::Yaml => Ok(serde_yaml::to_string(value)?),
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
        debug!("Output info: {}", message);

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

    /// Write a warning message
    pub fn warning(&mut self, message: &str) -> Result<()> {
        if self.format != OutputFormat::Human {
            return Ok(());
        }
        if self.use_color {
            self.writeln(&message.yellow().to_string())
        } else {
            self.writeln(&format!("WARNING: {}", message))
        }
    }

    /// Write a section header
    pub fn section(&mut self, title: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }
        self.writeln("")?;
        if self.use_color {
            self.writeln(&format!("═══ {} ═══", title).bright_blue().to_string())
        } else {
            self.writeln(&format!("=== {} ===", title))
        }
    }

    /// Write data in the configured format
    pub fn data<T: Serialize>(&mut self, value: &T) -> Result<()> {
        let formatted = self.format.format(value)?;
        trace!(bytes = formatted.len(), "Outputting data");
        self.writeln(formatted.trim_end())
    }

    /// Write the validation report of mapped documents
    pub fn report(&mut self, resolutions: &[Resolution]) -> Result<()> {
        let formatted = format_report(resolutions);
        self.writeln(formatted.trim_end())
    }

    /// Write the fields of a schema with their accessor kinds
    pub fn field_kinds(&mut self, kinds: &[(String, AccessorKind)]) -> Result<()> {
        if self.format != OutputFormat::Human {
            #[derive(Serialize)]
            struct FieldKind<'a> {
                field: &'a str,
                kind: AccessorKind,
            }
            let listing: Vec<FieldKind<'_>> = kinds
                .iter()
                .map(|(field, kind)| FieldKind { field, kind: *kind })
                .collect();
            return self.data(&listing);
        }

        let rows = kinds
            .iter()
            .map(|(field, kind)| vec![field.clone(), kind.to_string()])
            .collect();
        self.table(&["FIELD", "KIND"], rows)
    }

    /// Write a table (for human format)
    pub fn table(&mut self, headers: &[&str], rows: Vec<Vec<String>>) -> Result<()> {
        if self.format != OutputFormat::Human {
            return Ok(());
        }

        // Calculate column widths
        let mut widths = headers.iter().map(|h| h.chars().count()).collect::<Vec<_>>();
        for row in &rows {
            for (i, cell) in row.iter().enumerate() {
                if i < widths.len() {
                    widths[i] = widths[i].max(cell.chars().count());
                }
            }
        }

        let header_row = headers
            .iter()
            .enumerate()
            .map(|(i, h)| format!("{:width$}", h, width = widths[i]))
            .collect::<Vec<_>>()
            .join(" │ ");

        let header_row = header_row.trim_end();
        if self.use_color {
            self.writeln(&header_row.bold().to_string())?;
        } else {
            self.writeln(header_row)?;
        }

        let separator = widths
            .iter()
            .map(|w| "─".repeat(*w))
            .collect::<Vec<_>>()
            .join("─┼─");
        self.writeln(&separator)?;

        for row in rows {
            let row_str = row
                .iter()
                .enumerate()
                .map(|(i, cell)| {
                    if i < widths.len() {
                        format!("{:width$}", cell, width = widths[i])
                    } else {
                        cell.clone()
                    }
                })
                .collect::<Vec<_>>()
                .join(" │ ");
            self.writeln(row_str.trim_end())?;
        }

        Ok(())
    }
}

/// Format a validation report for human reading
fn format_report(resolutions: &[Resolution]) -> String {
    let mut output = String::new();
    let invalid = resolutions.iter().filter(|r| !r.is_valid()).count();

    if invalid == 0 {
        output.push_str(&format!("✅ All {} document(s) valid\n", resolutions.len()));
        return output;
    }

    output.push_str(&format!(
        "❌ {} of {} document(s) have invalid fields\n",
        invalid,
        resolutions.len()
    ));
    for (index, resolution) in resolutions.iter().enumerate() {
        if resolution.is_valid() {
            continue;
        }
        output.push_str(&format!("\n📄 Document {}: {}\n", index, resolution.status));
        for error in &resolution.errors {
            output.push_str(&format!("  📍 {}\n", error.field));
            for kind in error.errors.kinds() {
                let detail = error.errors.get(kind).map(format_value_compact).unwrap_or_default();
                output.push_str(&format!("    • {}: {}\n", kind, detail));
            }
        }
    }
    output
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
            if obj.len() <= 3 {
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

#[cfg(test)]
mod tests {
    include!("output/tests.rs");
}
