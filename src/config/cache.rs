//! Per-resolver memory of file-backed sources.
//!
//! Each slot remembers either the parsed content of a file or the fact that
//! the file was absent. Nothing is re-read from disk until [`Cache::clear`].

use serde_json::Value;
use std::collections::HashMap;
use std::path::PathBuf;

/// State of a file-backed source after its first read.
#[derive(Debug, Clone, PartialEq)]
pub enum Slot<T> {
    /// The file did not exist when it was first checked.
    Missing,
    Loaded(T),
}

impl<T> Slot<T> {
    pub fn loaded(&self) -> Option<&T> {
        match self {
            Slot::Missing => None,
            Slot::Loaded(content) => Some(content),
        }
    }
}

/// Cached `.env` entries and parsed JSON/YAML documents.
#[derive(Debug, Default)]
pub struct Cache {
    /// `.env` name -> raw value; `None` until first read.
    pub dot_env: Option<Slot<HashMap<String, String>>>,
    /// JSON documents keyed by file path.
    pub json: HashMap<PathBuf, Slot<Value>>,
    /// YAML documents keyed by file path.
    pub yaml: HashMap<PathBuf, Slot<Value>>,
}

impl Cache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every cached entry so the next lookup re-reads from disk.
    pub fn clear(&mut self) {
        self.dot_env = None;
        self.json.clear();
        self.yaml.clear();
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.dot_env.is_none() && self.json.is_empty() && self.yaml.is_empty()
    }

    /// Whether `path` has been read (or found missing) in either document slot.
    #[cfg(test)]
    pub(crate) fn contains_document(&self, path: &std::path::Path) -> bool {
        self.json.contains_key(path) || self.yaml.contains_key(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::path::Path;

    #[test]
    fn test_new_cache_is_empty() {
        let cache = Cache::new();
        assert!(cache.is_empty());
        assert!(cache.dot_env.is_none());
    }

    #[test]
    fn test_clear_resets_all_slots() {
        let mut cache = Cache::new();
        cache.dot_env = Some(Slot::Missing);
        cache
            .json
            .insert(PathBuf::from("config/default.json"), Slot::Loaded(json!({"a": 1})));
        cache.yaml.insert(PathBuf::from("config/default.yml"), Slot::Missing);
        assert!(!cache.is_empty());
        assert!(cache.contains_document(Path::new("config/default.yml")));

        cache.clear();

        assert!(cache.is_empty());
        assert!(!cache.contains_document(Path::new("config/default.json")));
    }

    #[test]
    fn test_slot_loaded() {
        let slot = Slot::Loaded(3);
        assert_eq!(slot.loaded(), Some(&3));
        let missing: Slot<i32> = Slot::Missing;
        assert_eq!(missing.loaded(), None);
    }
}
