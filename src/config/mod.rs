//! Cascading configuration lookup.
//!
//! A key such as `settings.session.secret` is looked up in six sources,
//! first match wins:
//! 1. **Environment** - `SETTINGS_SESSION_SECRET`
//! 2. **Env file** - `SETTINGS_SESSION_SECRET=...` in `.env`
//! 3. **Mode JSON** - `config/<mode>.json`, path `settings.session.secret`
//! 4. **Mode YAML** - `config/<mode>.yml`
//! 5. **Default JSON** - `config/default.json`
//! 6. **Default YAML** - `config/default.yml`
//!
//! Text sources (1, 2) are coerced into booleans, numbers, or strings.
//! Structured sources (3-6) return the document node unchanged.
//!
//! ## Environment Variables
//! - `APP_ENV` - Execution mode selecting `config/<mode>.*` (default: `development`)

mod cache;
mod document;
mod dotenv;
mod files;
mod loader;

pub use cache::{Cache, Slot};
pub use document::{Parsed, is_supported, lookup};
pub use dotenv::parse as parse_dotenv;
pub use files::{CONFIG_DIR, DEFAULT_STEM, DocumentFormat, Resolved, SearchLocation, Source};
pub use loader::{DEFAULT_DOTENV_FILE, DEFAULT_MODE, MODE_ENV_VAR, Resolver, ResolverOptions};
