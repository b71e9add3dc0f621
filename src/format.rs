//! Output formatting for the command-line inspector.

use crate::config::{Resolved, SearchLocation};
use crate::value::ConfigValue;
use clap::ValueEnum;
use serde_json::{Value, json};

/// Output format for lookup results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Bare value, strings unquoted
    #[default]
    Plain,
    /// JSON
    Json,
}

/// Format a single value.
pub fn format_value(value: &ConfigValue, format: OutputFormat) -> String {
    match format {
        OutputFormat::Plain => match value {
            ConfigValue::Document(node @ (Value::Object(_) | Value::Array(_))) => {
                serde_json::to_string_pretty(node).unwrap_or_else(|_| node.to_string())
            }
            other => other.to_string(),
        },
        OutputFormat::Json => value.to_json().to_string(),
    }
}

/// Format a value together with the source that supplied it.
pub fn format_resolved(resolved: &Resolved, format: OutputFormat) -> String {
    match format {
        OutputFormat::Plain => format!(
            "{}\n(from {})",
            format_value(&resolved.value, format),
            resolved.location
        ),
        OutputFormat::Json => json!({
            "value": resolved.value.to_json(),
            "source": resolved.source.to_string(),
            "location": resolved.location.to_string(),
        })
        .to_string(),
    }
}

/// Format the search plan for a key, highest priority first.
pub fn format_locations(locations: &[SearchLocation], format: OutputFormat) -> String {
    match format {
        OutputFormat::Plain => locations
            .iter()
            .enumerate()
            .map(|(i, location)| format!("{}. {}", i + 1, location))
            .collect::<Vec<_>>()
            .join("\n"),
        OutputFormat::Json => Value::Array(
            locations
                .iter()
                .map(|location| Value::String(location.to_string()))
                .collect(),
        )
        .to_string(),
    }
}
