//! Cascading resolver.
//!
//! Looks a key up in each source in priority order and returns the first
//! value found. File-backed sources are read once and cached per resolver.

use super::cache::{Cache, Slot};
use super::document::{self, Parsed};
use super::dotenv;
use super::files::{DocumentFormat, Resolved, SearchLocation, Source};
use crate::error::{ConfigError, Result};
use crate::key::env_var_name;
use crate::value::{ConfigValue, coerce};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::env::VarError;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, trace};

/// Environment variable selecting the execution mode.
pub const MODE_ENV_VAR: &str = "APP_ENV";

/// Mode used when [`MODE_ENV_VAR`] is unset or empty.
pub const DEFAULT_MODE: &str = "development";

/// Default name of the environment-definition file.
pub const DEFAULT_DOTENV_FILE: &str = ".env";

/// Where a resolver looks for its files and which mode it uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverOptions {
    /// Directory holding the `.env` file and the `config/` directory.
    pub root: PathBuf,
    /// Pinned execution mode. When `None`, the mode is read from
    /// [`MODE_ENV_VAR`] on every lookup.
    pub mode: Option<String>,
    /// File name of the environment-definition file under `root`.
    pub dotenv_file: String,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self::discover()
    }
}

impl ResolverOptions {
    /// Options for the current working directory, mode taken from the environment.
    pub fn discover() -> Self {
        Self::with_root(".")
    }

    /// Options rooted at an explicit directory.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            mode: None,
            dotenv_file: DEFAULT_DOTENV_FILE.to_string(),
        }
    }

    /// Pin the execution mode instead of reading it from the environment.
    pub fn with_mode(mut self, mode: impl Into<String>) -> Self {
        self.mode = Some(mode.into());
        self
    }

    /// Use a different environment-definition file name.
    pub fn with_dotenv_file(mut self, name: impl Into<String>) -> Self {
        self.dotenv_file = name.into();
        self
    }
}

/// Resolves configuration keys across all sources.
///
/// The resolver owns its cache; create one at startup and pass it by
/// reference. It is meant for a single thread and is not `Sync`.
#[derive(Debug)]
pub struct Resolver {
    options: ResolverOptions,
    cache: RefCell<Cache>,
    /// Set once the "no YAML parser" notice has been logged.
    yaml_notice_logged: Cell<bool>,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::discover()
    }
}

impl Resolver {
    pub fn new(options: ResolverOptions) -> Self {
        Self {
            options,
            cache: RefCell::new(Cache::new()),
            yaml_notice_logged: Cell::new(false),
        }
    }

    /// Resolver for the current working directory.
    pub fn discover() -> Self {
        Self::new(ResolverOptions::discover())
    }

    pub fn options(&self) -> &ResolverOptions {
        &self.options
    }

    /// The execution mode used for the mode-specific files.
    pub fn mode(&self) -> Result<String> {
        if let Some(ref mode) = self.options.mode {
            return Ok(mode.clone());
        }
        match std::env::var(MODE_ENV_VAR) {
            Ok(mode) if !mode.is_empty() => Ok(mode),
            Ok(_) | Err(VarError::NotPresent) => Ok(DEFAULT_MODE.to_string()),
            Err(VarError::NotUnicode(_)) => Err(ConfigError::EnvNotUnicode {
                name: MODE_ENV_VAR.to_string(),
            }),
        }
    }

    /// Look up `key`, returning `None` when no source defines it.
    ///
    /// Missing files are not errors. Malformed files and unreadable
    /// environment values are.
    pub fn get(&self, key: &str) -> Result<Option<ConfigValue>> {
        Ok(self.resolve(key)?.map(|resolved| resolved.value))
    }

    /// Look up `key`, falling back to `default` when no source defines it.
    pub fn get_or(&self, key: &str, default: impl Into<ConfigValue>) -> Result<ConfigValue> {
        Ok(self.get(key)?.unwrap_or_else(|| default.into()))
    }

    /// Look up `key` and report which source supplied the value.
    pub fn resolve(&self, key: &str) -> Result<Option<Resolved>> {
        let mode = self.mode()?;
        for location in self.plan(key, &mode) {
            if let Some(value) = self.lookup(&location, key)? {
                trace!(key, source = %location.source, "Resolved config value");
                return Ok(Some(Resolved {
                    value,
                    source: location.source,
                    location,
                }));
            }
        }
        trace!(key, "No source defines config value");
        Ok(None)
    }

    /// Every place a value for `key` may be defined, highest priority first.
    pub fn search_locations(&self, key: &str) -> Result<Vec<SearchLocation>> {
        let mode = self.mode()?;
        Ok(self.plan(key, &mode))
    }

    /// Like [`get`](Self::get), but a missing value is a `NotFound` error.
    pub fn require(&self, key: &str) -> Result<ConfigValue> {
        self.require_inner(key, None)
    }

    /// Like [`require`](Self::require), with a note on why the value is needed.
    pub fn require_with_context(&self, key: &str, context: impl Into<String>) -> Result<ConfigValue> {
        self.require_inner(key, Some(context.into()))
    }

    fn require_inner(&self, key: &str, context: Option<String>) -> Result<ConfigValue> {
        match self.get(key)? {
            Some(value) => Ok(value),
            None => Err(ConfigError::not_found(
                key,
                &self.search_locations(key)?,
                context,
            )),
        }
    }

    /// Look up `key` and deserialize it into `T`.
    ///
    /// A value that cannot be read as `T` is a `TypeMismatch` error.
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.get(key)? {
            Some(value) => convert(key, &value).map(Some),
            None => Ok(None),
        }
    }

    /// Strict form of [`get_as`](Self::get_as).
    pub fn require_as<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        let value = self.require(key)?;
        convert(key, &value)
    }

    /// Forget every cached file so the next lookup re-reads from disk.
    pub fn clear_cache(&self) {
        self.cache.borrow_mut().clear();
        debug!("Config cache cleared");
    }

    fn plan(&self, key: &str, mode: &str) -> Vec<SearchLocation> {
        let name = env_var_name(key);
        Source::ORDER
            .iter()
            .map(|&source| match source {
                Source::Environment => SearchLocation {
                    source,
                    name: Some(name.clone()),
                    path: None,
                    property: None,
                },
                Source::DotEnv => SearchLocation {
                    source,
                    name: Some(name.clone()),
                    path: Some(PathBuf::from(&self.options.dotenv_file)),
                    property: None,
                },
                _ => SearchLocation {
                    source,
                    name: None,
                    path: source.relative_path(mode),
                    property: Some(key.to_string()),
                },
            })
            .collect()
    }

    fn lookup(&self, location: &SearchLocation, key: &str) -> Result<Option<ConfigValue>> {
        match (location.source.format(), &location.name, &location.path) {
            (None, Some(name), _) if location.source == Source::Environment => env_value(name),
            (None, Some(name), _) => self.dotenv_value(name),
            (Some(format), _, Some(path)) => self.document_value(format, path, key),
            _ => Ok(None),
        }
    }

    fn dotenv_value(&self, name: &str) -> Result<Option<ConfigValue>> {
        let mut cache = self.cache.borrow_mut();
        if cache.dot_env.is_none() {
            let path = self.options.root.join(&self.options.dotenv_file);
            let slot = match read_optional(&path)? {
                Some(content) => {
                    let vars = dotenv::parse(&content);
                    debug!(path = %path.display(), entries = vars.len(), "Loaded env file");
                    Slot::Loaded(vars)
                }
                None => {
                    debug!(path = %path.display(), "No env file");
                    Slot::Missing
                }
            };
            cache.dot_env = Some(slot);
        }

        Ok(cache
            .dot_env
            .as_ref()
            .and_then(Slot::loaded)
            .and_then(|vars: &HashMap<String, String>| vars.get(name))
            .map(|raw| coerce(raw)))
    }

    fn document_value(
        &self,
        format: DocumentFormat,
        relative: &Path,
        key: &str,
    ) -> Result<Option<ConfigValue>> {
        if !document::is_supported(format) {
            self.notice_unavailable(format);
            return Ok(None);
        }

        let path = self.options.root.join(relative);
        let mut cache = self.cache.borrow_mut();
        let documents = match format {
            DocumentFormat::Json => &mut cache.json,
            DocumentFormat::Yaml => &mut cache.yaml,
        };

        let slot = match documents.entry(path) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let slot = match read_optional(entry.key())? {
                    Some(content) => match document::parse(format, &content, entry.key())? {
                        Parsed::Document(doc) => {
                            debug!(path = %entry.key().display(), %format, "Loaded config file");
                            Slot::Loaded(doc)
                        }
                        Parsed::Unavailable => {
                            self.notice_unavailable(format);
                            return Ok(None);
                        }
                    },
                    None => {
                        debug!(path = %entry.key().display(), %format, "No config file");
                        Slot::Missing
                    }
                };
                entry.insert(slot)
            }
        };

        Ok(slot
            .loaded()
            .and_then(|doc: &Value| document::lookup(doc, key))
            .cloned()
            .map(ConfigValue::Document))
    }

    fn notice_unavailable(&self, format: DocumentFormat) {
        if !self.yaml_notice_logged.replace(true) {
            info!(
                %format,
                "{} support is not compiled in (enable the `yaml` feature); those config files are skipped",
                format
            );
        }
    }
}

fn env_value(name: &str) -> Result<Option<ConfigValue>> {
    // Names the OS cannot store are never set.
    if name.is_empty() || name.contains(['=', '\0']) {
        return Ok(None);
    }
    match std::env::var(name) {
        Ok(raw) => Ok(Some(coerce(&raw))),
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(_)) => Err(ConfigError::EnvNotUnicode {
            name: name.to_string(),
        }),
    }
}

/// Read a file, treating absence as `None`.
fn read_optional(path: &Path) -> Result<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(source) => Err(ConfigError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn convert<T: DeserializeOwned>(key: &str, value: &ConfigValue) -> Result<T> {
    serde_json::from_value(value.to_json())
        .map_err(|_| ConfigError::type_mismatch(key, std::any::type_name::<T>(), value.kind()))
}
