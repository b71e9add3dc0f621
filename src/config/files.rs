//! Lookup sources and their on-disk locations.
//!
//! Sources are consulted in a fixed order and the first one that defines a
//! key wins. File-backed sources live under the resolver root.

use crate::value::ConfigValue;
use std::path::{Path, PathBuf};

/// Directory (under the resolver root) holding the structured config files.
pub const CONFIG_DIR: &str = "config";

/// Name of the mode-independent config files (`config/default.*`).
pub const DEFAULT_STEM: &str = "default";

/// Where a configuration value can come from, highest priority first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Source {
    /// Process environment variable
    Environment,
    /// Entry in the `.env` file
    DotEnv,
    /// `config/<mode>.json`
    ModeJson,
    /// `config/<mode>.yml`
    ModeYaml,
    /// `config/default.json`
    DefaultJson,
    /// `config/default.yml`
    DefaultYaml,
}

impl Source {
    /// All sources in lookup order.
    pub const ORDER: [Source; 6] = [
        Source::Environment,
        Source::DotEnv,
        Source::ModeJson,
        Source::ModeYaml,
        Source::DefaultJson,
        Source::DefaultYaml,
    ];

    /// Format of the file behind this source, if it is a structured file.
    pub fn format(self) -> Option<DocumentFormat> {
        match self {
            Source::Environment | Source::DotEnv => None,
            Source::ModeJson | Source::DefaultJson => Some(DocumentFormat::Json),
            Source::ModeYaml | Source::DefaultYaml => Some(DocumentFormat::Yaml),
        }
    }

    /// Relative path of the structured file for this source under `mode`.
    pub fn relative_path(self, mode: &str) -> Option<PathBuf> {
        let format = self.format()?;
        let stem = match self {
            Source::ModeJson | Source::ModeYaml => mode,
            _ => DEFAULT_STEM,
        };
        Some(Path::new(CONFIG_DIR).join(format!("{}.{}", stem, format.extension())))
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::Environment => write!(f, "environment"),
            Source::DotEnv => write!(f, "dotenv"),
            Source::ModeJson => write!(f, "mode json"),
            Source::ModeYaml => write!(f, "mode yaml"),
            Source::DefaultJson => write!(f, "default json"),
            Source::DefaultYaml => write!(f, "default yaml"),
        }
    }
}

/// Structured config file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    pub fn extension(self) -> &'static str {
        match self {
            DocumentFormat::Json => "json",
            DocumentFormat::Yaml => "yml",
        }
    }
}

impl std::fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentFormat::Json => write!(f, "JSON"),
            DocumentFormat::Yaml => write!(f, "YAML"),
        }
    }
}

/// One place a value for a key may be defined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchLocation {
    pub source: Source,
    /// Environment variable or `.env` entry name, for text sources.
    pub name: Option<String>,
    /// File path, relative to the resolver root, for file-backed sources.
    pub path: Option<PathBuf>,
    /// Property path looked up inside a structured file.
    pub property: Option<String>,
}

impl std::fmt::Display for SearchLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.source {
            Source::Environment => write!(
                f,
                "environment variable {}",
                self.name.as_deref().unwrap_or_default()
            ),
            Source::DotEnv => write!(
                f,
                "{} entry {}",
                self.path.as_deref().unwrap_or(Path::new(".env")).display(),
                self.name.as_deref().unwrap_or_default()
            ),
            _ => write!(
                f,
                "{} at path {}",
                self.path.as_deref().unwrap_or(Path::new(CONFIG_DIR)).display(),
                self.property.as_deref().unwrap_or_default()
            ),
        }
    }
}

/// A resolved value together with where it was found.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
    pub value: ConfigValue,
    pub source: Source,
    pub location: SearchLocation,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_is_priority_order() {
        let mut sorted = Source::ORDER;
        sorted.sort();
        assert_eq!(sorted, Source::ORDER);
        assert_eq!(Source::ORDER[0], Source::Environment);
        assert_eq!(Source::ORDER[5], Source::DefaultYaml);
    }

    #[test]
    fn test_relative_paths() {
        assert_eq!(Source::Environment.relative_path("production"), None);
        assert_eq!(Source::DotEnv.relative_path("production"), None);
        assert_eq!(
            Source::ModeJson.relative_path("production"),
            Some(PathBuf::from("config/production.json"))
        );
        assert_eq!(
            Source::ModeYaml.relative_path("production"),
            Some(PathBuf::from("config/production.yml"))
        );
        assert_eq!(
            Source::DefaultJson.relative_path("production"),
            Some(PathBuf::from("config/default.json"))
        );
        assert_eq!(
            Source::DefaultYaml.relative_path("production"),
            Some(PathBuf::from("config/default.yml"))
        );
    }

    #[test]
    fn test_search_location_display() {
        let env = SearchLocation {
            source: Source::Environment,
            name: Some("DB_HOST".to_string()),
            path: None,
            property: None,
        };
        assert_eq!(env.to_string(), "environment variable DB_HOST");

        let dotenv = SearchLocation {
            source: Source::DotEnv,
            name: Some("DB_HOST".to_string()),
            path: Some(PathBuf::from(".env")),
            property: None,
        };
        assert_eq!(dotenv.to_string(), ".env entry DB_HOST");

        let file = SearchLocation {
            source: Source::DefaultJson,
            name: None,
            path: Some(PathBuf::from("config/default.json")),
            property: Some("db.host".to_string()),
        };
        assert_eq!(file.to_string(), "config/default.json at path db.host");
    }
}
