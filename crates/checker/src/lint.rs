//! Per-line style warnings.
//!
//! Warnings are advisory only. They are collected for every line of a script,
//! in line order, and never influence whether the script is valid.

use crate::text;
use serde::{Serialize, Serializer};
use std::fmt;

/// Lua's line comment marker.
pub const LINE_COMMENT: &str = "--";

/// The kind of style problem found on a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// `===` or `!==` borrowed from another language.
    StrictEquality,
    /// `++` or `--` anywhere on the line. Comment markers trip this too.
    IncrementOperator,
    /// A `;` on a line that is not a comment.
    Semicolon,
}

impl WarningKind {
    pub fn message(&self) -> &'static str {
        match self {
            WarningKind::StrictEquality => "Use '==' and '~=' for equality checks in Lua",
            WarningKind::IncrementOperator => "Lua doesn't support increment/decrement operators",
            WarningKind::Semicolon => "Semicolons are optional in Lua",
        }
    }
}

/// A style warning anchored to a 1-indexed line.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Warning {
    line: usize,
    kind: WarningKind,
}

impl Warning {
    pub fn new(line: usize, kind: WarningKind) -> Self {
        Self { line, kind }
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn kind(&self) -> WarningKind {
        self.kind
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Line {}: {}", self.line, self.kind.message())
    }
}

impl Serialize for Warning {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Append the warnings for one line, in a fixed order: equality, increment,
/// semicolon.
pub fn scan_line(line_number: usize, line: &str, warnings: &mut Vec<Warning>) {
    if line.contains("===") || line.contains("!==") {
        warnings.push(Warning::new(line_number, WarningKind::StrictEquality));
    }

    if line.contains("++") || line.contains("--") {
        warnings.push(Warning::new(line_number, WarningKind::IncrementOperator));
    }

    if line.contains(';') && !text::trim(line).starts_with(LINE_COMMENT) {
        warnings.push(Warning::new(line_number, WarningKind::Semicolon));
    }
}
