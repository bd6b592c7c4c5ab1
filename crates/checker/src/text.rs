//! Whitespace as scripts see it.
//!
//! Unicode `White_Space` with two changes: a byte-order mark (U+FEFF) is
//! whitespace and NEXT LINE (U+0085) is not.

/// Whether `c` counts as whitespace when trimming script text.
pub fn is_script_whitespace(c: char) -> bool {
    (c.is_whitespace() && c != '\u{85}') || c == '\u{feff}'
}

/// Trim script whitespace from both ends.
pub fn trim(s: &str) -> &str {
    s.trim_matches(is_script_whitespace)
}

/// Trim script whitespace from the end.
pub fn trim_end(s: &str) -> &str {
    s.trim_end_matches(is_script_whitespace)
}
