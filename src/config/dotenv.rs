//! Parser for `.env` environment-definition files.
//!
//! The format is deliberately minimal: one `NAME=value` pair per line, split
//! on the first `=`. There is no comment syntax, quoting, escaping, or
//! trimming; every line is taken verbatim.

use std::collections::HashMap;

/// Parse `.env` content into a name -> raw value map.
///
/// - CRLF line endings are normalized to LF before splitting.
/// - Blank lines are skipped.
/// - A line without `=` defines its whole text as a name with an empty value.
/// - When a name repeats, the last line wins.
pub fn parse(content: &str) -> HashMap<String, String> {
    let normalized = content.replace("\r\n", "\n");
    let mut vars = HashMap::new();

    for line in normalized.split('\n') {
        if line.is_empty() {
            continue;
        }
        let (name, value) = line.split_once('=').unwrap_or((line, ""));
        vars.insert(name.to_string(), value.to_string());
    }

    vars
}
