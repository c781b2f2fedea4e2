//! Display-name sanitisation.
//!
//! Names are free-form UTF-8 with no character-class restriction. Only
//! control characters are removed and the length is capped.

use std::fmt::Display;

/// Default maximum display-name length, in characters.
pub const DEFAULT_NAME_MAX_LEN: usize = 32;

/// Default prefix for generated names of connections that sent no usable one.
pub const DEFAULT_ANONYMOUS_NAME: &str = "anonymousClient";

/// Clean a proposed display name.
///
/// Control characters (CR, LF, tabs, ...) are dropped, surrounding whitespace
/// trimmed and the result capped at `max_len` characters. Returns `None` when
/// nothing usable is left.
///
/// # Examples
///
/// ```
/// use chatrelay_proto::sanitize_name;
///
/// assert_eq!(sanitize_name("  alice\r\n", 32).as_deref(), Some("alice"));
/// assert_eq!(sanitize_name(" \r\n ", 32), None);
/// assert_eq!(sanitize_name("abcdef", 3).as_deref(), Some("abc"));
/// ```
pub fn sanitize_name(raw: &str, max_len: usize) -> Option<String> {
    let cleaned: String = raw.chars().filter(|c| !c.is_control()).collect();
    let capped: String = cleaned.trim().chars().take(max_len).collect();
    let name = capped.trim_end();

    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

/// Generated name for a connection without a usable identity line.
pub fn anonymous_name(prefix: &str, id: impl Display) -> String {
    format!("{prefix}{id}")
}
