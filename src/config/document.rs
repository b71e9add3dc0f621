//! Structured config documents (JSON and YAML).
//!
//! Both formats are parsed into a `serde_json::Value` tree so lookups work
//! the same way regardless of the file format. YAML support is a cargo
//! feature; without it the YAML parser reports itself as unavailable instead
//! of failing.

use super::files::DocumentFormat;
use crate::error::{ConfigError, Result};
use crate::key;
use serde_json::Value;
use std::path::Path;

/// Outcome of asking a format's parser to read a document.
#[derive(Debug, Clone, PartialEq)]
pub enum Parsed {
    /// The document was parsed.
    Document(Value),
    /// No parser for this format is compiled in.
    Unavailable,
}

/// Whether a parser for `format` is compiled into this build.
pub fn is_supported(format: DocumentFormat) -> bool {
    match format {
        DocumentFormat::Json => true,
        DocumentFormat::Yaml => cfg!(feature = "yaml"),
    }
}

/// Parse document content read from `path`.
pub fn parse(format: DocumentFormat, content: &str, path: &Path) -> Result<Parsed> {
    match format {
        DocumentFormat::Json => serde_json::from_str::<Value>(content)
            .map(Parsed::Document)
            .map_err(|source| ConfigError::JsonParse {
                path: path.to_path_buf(),
                source,
            }),
        DocumentFormat::Yaml => parse_yaml(content, path),
    }
}

/// Merge keys (`<<: *anchor`) are resolved before conversion.
#[cfg(feature = "yaml")]
fn parse_yaml(content: &str, path: &Path) -> Result<Parsed> {
    let to_error = |source: serde_yaml::Error| ConfigError::YamlParse {
        path: path.to_path_buf(),
        source,
    };
    let mut document: serde_yaml::Value = serde_yaml::from_str(content).map_err(to_error)?;
    document.apply_merge().map_err(to_error)?;
    serde_yaml::from_value::<Value>(document)
        .map(Parsed::Document)
        .map_err(to_error)
}

#[cfg(not(feature = "yaml"))]
fn parse_yaml(_content: &str, _path: &Path) -> Result<Parsed> {
    Ok(Parsed::Unavailable)
}

/// Walk `document` along the dot-separated `key`.
///
/// Objects are indexed by member name and arrays by decimal index. A missing
/// member, an out-of-range index, or a step into a scalar yields `None`.
/// Whatever node sits at the end of the path is returned as-is, `null`
/// included.
pub fn lookup<'a>(document: &'a Value, key: &str) -> Option<&'a Value> {
    key::segments(key).try_fold(document, |node, segment| match node {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => array_index(segment).and_then(|i| items.get(i)),
        _ => None,
    })
}

/// Canonical decimal index: `0`, `1`, `12`, but not `01`, `+1` or `1.0`.
fn array_index(segment: &str) -> Option<usize> {
    if segment.is_empty()
        || !segment.bytes().all(|b| b.is_ascii_digit())
        || (segment.len() > 1 && segment.starts_with('0'))
    {
        return None;
    }
    segment.parse().ok()
}
