//! Structured error types for configuration lookups.
//!
//! The plain lookup path (`get`, `get_or`) never reports a missing value as an
//! error. `NotFound` and `TypeMismatch` exist for the strict variants
//! (`require`, `get_as`, `require_as`) and for callers that want to raise them
//! on their own.

use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

use crate::config::SearchLocation;

/// Error reported by the YAML parser. Without the `yaml` feature there is no
/// parser and the `YamlParse` variant cannot be constructed.
#[cfg(feature = "yaml")]
pub type YamlError = serde_yaml::Error;
#[cfg(not(feature = "yaml"))]
pub type YamlError = std::convert::Infallible;

/// Error codes for programmatic error handling.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Lookup errors
    NotFound,
    TypeMismatch,

    // Source errors
    ReadFailed,
    ParseFailed,
    EnvNotUnicode,
}

/// Errors raised while resolving configuration values.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A value was found but could not be read as the requested type.
    #[error("Config value '{key}' has the wrong type: expected {expected}, found {actual}")]
    TypeMismatch {
        key: String,
        expected: String,
        actual: String,
    },

    /// No source defines a value for the key.
    #[error("{}", render_not_found(.key, .context.as_deref(), .locations))]
    NotFound {
        key: String,
        /// Every place a value could have been supplied, highest priority first.
        locations: Vec<String>,
        context: Option<String>,
    },

    #[error("Failed to read config file at {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse JSON config file at {}", .path.display())]
    JsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to parse YAML config file at {}", .path.display())]
    YamlParse {
        path: PathBuf,
        #[source]
        source: YamlError,
    },

    #[error("Environment variable {name} is set but is not valid Unicode")]
    EnvNotUnicode { name: String },
}

impl ConfigError {
    /// Build a `NotFound` error from the search plan for `key`.
    pub fn not_found(
        key: impl Into<String>,
        locations: &[SearchLocation],
        context: Option<String>,
    ) -> Self {
        Self::NotFound {
            key: key.into(),
            locations: locations.iter().map(ToString::to_string).collect(),
            context,
        }
    }

    pub fn type_mismatch(
        key: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::TypeMismatch {
            key: key.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ConfigError::NotFound { .. } => ErrorCode::NotFound,
            ConfigError::TypeMismatch { .. } => ErrorCode::TypeMismatch,
            ConfigError::Read { .. } => ErrorCode::ReadFailed,
            ConfigError::JsonParse { .. } => ErrorCode::ParseFailed,
            ConfigError::YamlParse { .. } => ErrorCode::ParseFailed,
            ConfigError::EnvNotUnicode { .. } => ErrorCode::EnvNotUnicode,
        }
    }

    /// Returns true for the "no value anywhere" case.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ConfigError::NotFound { .. })
    }
}

fn render_not_found(key: &str, context: Option<&str>, locations: &[String]) -> String {
    let mut msg = format!("No value configured for '{}'", key);
    if let Some(context) = context {
        msg.push_str(&format!(" ({})", context));
    }
    msg.push_str(". Set it in one of:");
    for location in locations {
        msg.push_str("\n  - ");
        msg.push_str(location);
    }
    msg
}

/// Result type for configuration lookups.
pub type Result<T> = std::result::Result<T, ConfigError>;
