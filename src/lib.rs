//! Config Cascade Library
//!
//! Resolves a single configuration value from the environment, a `.env`
//! file, and JSON/YAML config files, in that order.
//!
//! The free functions [`get`], [`get_or`] and [`clear_cache`] use a default
//! [`Resolver`] rooted at the working directory, one per thread. Build a
//! [`Resolver`] directly for explicit roots, pinned modes, or isolated caches.
//!
//! ```no_run
//! let secret = config_cascade::get("settings.session.secret")?;
//! let port = config_cascade::get_or("server.port", 8080)?;
//! # Ok::<(), config_cascade::ConfigError>(())
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod format;
pub mod key;
pub mod logging;
pub mod value;

pub use config::{Resolved, Resolver, ResolverOptions, SearchLocation, Source};
pub use error::{ConfigError, ErrorCode, Result};
pub use value::ConfigValue;

thread_local! {
    static DEFAULT_RESOLVER: Resolver = Resolver::discover();
}

/// Look up `key` with the default resolver.
pub fn get(key: &str) -> Result<Option<ConfigValue>> {
    DEFAULT_RESOLVER.with(|resolver| resolver.get(key))
}

/// Look up `key` with the default resolver, falling back to `default`.
pub fn get_or(key: &str, default: impl Into<ConfigValue>) -> Result<ConfigValue> {
    DEFAULT_RESOLVER.with(|resolver| resolver.get_or(key, default))
}

/// Clear the default resolver's cache on this thread.
///
/// Each thread owns its own default resolver. Caches on other threads are
/// left as they are and keep serving what they read before.
pub fn clear_cache() {
    DEFAULT_RESOLVER.with(Resolver::clear_cache);
}
