//! Resolved configuration values and text coercion.
//!
//! Values read from the environment and from `.env` files are plain text and
//! go through [`coerce`]. Values read from JSON/YAML documents keep whatever
//! shape the document gave them and are returned as [`ConfigValue::Document`].

use serde::{Serialize, Serializer};
use serde_json::{Number, Value};
use std::fmt;

/// A resolved configuration value.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    Bool(bool),
    Number(f64),
    String(String),
    /// A node from a structured config file (object, array, or scalar).
    Document(Value),
}

impl ConfigValue {
    /// Short label for the kind of value, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            ConfigValue::Bool(_) => "boolean",
            ConfigValue::Number(_) => "number",
            ConfigValue::String(_) => "string",
            ConfigValue::Document(node) => match node {
                Value::Null => "null",
                Value::Bool(_) => "boolean",
                Value::Number(_) => "number",
                Value::String(_) => "string",
                Value::Array(_) => "array",
                Value::Object(_) => "object",
            },
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ConfigValue::Bool(b) => Some(*b),
            ConfigValue::Document(node) => node.as_bool(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ConfigValue::Number(n) => Some(*n),
            ConfigValue::Document(node) => node.as_f64(),
            _ => None,
        }
    }

    /// Integral numbers only; `1.5` yields `None`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ConfigValue::Number(n) => integral(*n),
            ConfigValue::Document(node) => node.as_i64(),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::String(s) => Some(s),
            ConfigValue::Document(node) => node.as_str(),
            _ => None,
        }
    }

    pub fn as_document(&self) -> Option<&Value> {
        match self {
            ConfigValue::Document(node) => Some(node),
            _ => None,
        }
    }

    /// Convert to a JSON value.
    ///
    /// Integral numbers become JSON integers so they deserialize into integer
    /// types. Infinite numbers have no JSON form and become `null`.
    pub fn to_json(&self) -> Value {
        match self {
            ConfigValue::Bool(b) => Value::Bool(*b),
            ConfigValue::Number(n) => match integral(*n) {
                Some(i) => Value::Number(i.into()),
                None => Number::from_f64(*n).map_or(Value::Null, Value::Number),
            },
            ConfigValue::String(s) => Value::String(s.clone()),
            ConfigValue::Document(node) => node.clone(),
        }
    }
}

fn integral(n: f64) -> Option<i64> {
    // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive.
    if n.is_finite() && n.fract() == 0.0 && n >= i64::MIN as f64 && n < i64::MAX as f64 {
        Some(n as i64)
    } else {
        None
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::Bool(b) => write!(f, "{}", b),
            ConfigValue::Number(n) if n.is_infinite() => {
                write!(f, "{}", if *n > 0.0 { "Infinity" } else { "-Infinity" })
            }
            ConfigValue::Number(n) => write!(f, "{}", n),
            ConfigValue::String(s) => write!(f, "{}", s),
            ConfigValue::Document(Value::String(s)) => write!(f, "{}", s),
            ConfigValue::Document(node) => write!(f, "{}", node),
        }
    }
}

impl Serialize for ConfigValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl From<bool> for ConfigValue {
    fn from(b: bool) -> Self {
        ConfigValue::Bool(b)
    }
}

impl From<f64> for ConfigValue {
    fn from(n: f64) -> Self {
        ConfigValue::Number(n)
    }
}

impl From<i64> for ConfigValue {
    fn from(n: i64) -> Self {
        ConfigValue::Number(n as f64)
    }
}

impl From<i32> for ConfigValue {
    fn from(n: i32) -> Self {
        ConfigValue::Number(f64::from(n))
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        ConfigValue::String(s.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(s: String) -> Self {
        ConfigValue::String(s)
    }
}

impl From<Value> for ConfigValue {
    fn from(node: Value) -> Self {
        ConfigValue::Document(node)
    }
}

/// Coerce raw text from the environment or a `.env` file.
///
/// Checks, in order:
/// 1. `"true"` / `"false"` become booleans.
/// 2. Whitespace-only text (including the empty string) is kept as a string.
/// 3. Text accepted by [`parse_number`] becomes a number.
/// 4. Anything else is kept as a string.
pub fn coerce(raw: &str) -> ConfigValue {
    match raw {
        "true" => return ConfigValue::Bool(true),
        "false" => return ConfigValue::Bool(false),
        _ => {}
    }
    if raw.chars().all(is_number_whitespace) {
        return ConfigValue::String(raw.to_string());
    }
    match parse_number(raw) {
        Some(n) => ConfigValue::Number(n),
        None => ConfigValue::String(raw.to_string()),
    }
}

/// Permissive string-to-number conversion.
///
/// Accepted, after trimming surrounding whitespace:
/// - the empty string, as `0`;
/// - `Infinity`, `+Infinity`, `-Infinity`;
/// - unsigned `0x`, `0o`, `0b` integers (either letter case);
/// - decimal literals: optional sign, digits with an optional fraction
///   (`1`, `1.5`, `.5`, `5.`), and an optional exponent (`1e3`, `2E-2`).
///
/// Everything else returns `None`, including `NaN`, `inf`, `1_000` and `+0x10`.
pub fn parse_number(raw: &str) -> Option<f64> {
    let s = raw.trim_matches(is_number_whitespace);
    if s.is_empty() {
        return Some(0.0);
    }

    match s {
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }

    if let Some((radix, digits)) = radix_prefix(s) {
        return parse_radix_digits(digits, radix);
    }

    if !is_decimal_literal(s) {
        return None;
    }
    s.parse::<f64>().ok()
}

/// Whitespace stripped around numeric text: ASCII whitespace plus the
/// Unicode space separators, NBSP, BOM, and line/paragraph separators.
fn is_number_whitespace(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\u{0B}' | '\u{0C}' | '\r' | ' '
            | '\u{A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

fn radix_prefix(s: &str) -> Option<(u32, &str)> {
    let bytes = s.as_bytes();
    if bytes.len() < 2 || bytes[0] != b'0' {
        return None;
    }
    let radix = match bytes[1] {
        b'x' | b'X' => 16,
        b'o' | b'O' => 8,
        b'b' | b'B' => 2,
        _ => return None,
    };
    Some((radix, &s[2..]))
}

fn parse_radix_digits(digits: &str, radix: u32) -> Option<f64> {
    if digits.is_empty() {
        return None;
    }
    let mut value = 0.0_f64;
    for c in digits.chars() {
        let d = c.to_digit(radix)?;
        value = value * f64::from(radix) + f64::from(d);
    }
    Some(value)
}

fn is_decimal_literal(s: &str) -> bool {
    let bytes = s.as_bytes();
    let mut i = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        i += 1;
    }

    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut mantissa_digits = i - int_start;

    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        let frac_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        mantissa_digits += i - frac_start;
    }

    if mantissa_digits == 0 {
        return false;
    }

    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        i += 1;
        if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
            i += 1;
        }
        let exp_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == exp_start {
            return false;
        }
    }

    i == bytes.len()
}
