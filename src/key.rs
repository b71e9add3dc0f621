//! Key normalization.
//!
//! Config keys are dotted, camel-case paths such as `settings.session.secret`
//! or `server.maxConnections`. The environment-variable form of a key is its
//! upper-snake-case spelling: `SETTINGS_SESSION_SECRET`, `SERVER_MAX_CONNECTIONS`.

/// Convert a dotted, camel-case key into its environment-variable name.
///
/// An underscore is inserted before every ASCII uppercase letter, every `.`
/// becomes `_`, and the result is upper-cased. Input is not validated:
/// malformed keys map to a deterministic, if unusual, name.
///
/// ```
/// use config_cascade::key::env_var_name;
///
/// assert_eq!(env_var_name("settings.session.secret"), "SETTINGS_SESSION_SECRET");
/// assert_eq!(env_var_name("server.maxConnections"), "SERVER_MAX_CONNECTIONS");
/// ```
pub fn env_var_name(key: &str) -> String {
    let mut name = String::with_capacity(key.len() + 4);
    for c in key.chars() {
        if c.is_ascii_uppercase() {
            name.push('_');
            name.push(c);
        } else if c == '.' {
            name.push('_');
        } else {
            name.extend(c.to_uppercase());
        }
    }
    name
}

/// Split a key into the property path used for structured documents.
pub fn segments(key: &str) -> impl Iterator<Item = &str> {
    key.split('.')
}
