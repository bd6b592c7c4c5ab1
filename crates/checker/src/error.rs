//! Error types and error reporting for script checks.
//!
//! [`CheckError`] is the fatal half of a [`CheckResult`]: the first problem
//! that made a script invalid. Its `Display` output is the exact message shown
//! to users, so callers can surface it verbatim.
//!
//! [`ErrorReporter`] renders a whole [`CheckResult`] (error and warnings) against
//! the script source using [ariadne](https://crates.io/crates/ariadne).
//!
//! ```rust
//! use growsoft_lua_checker::{check_lua_syntax, ErrorReporter};
//!
//! let source = "local t = {1, 2\nprint(t);";
//! let result = check_lua_syntax(source);
//!
//! let mut out = Vec::new();
//! ErrorReporter::new("broken.lua", source)
//!     .write_result(&result, false, &mut out)
//!     .unwrap();
//! let text = String::from_utf8(out).unwrap();
//! assert!(text.contains("Unbalanced curly braces: missing }"));
//! assert!(text.contains("Semicolons are optional in Lua"));
//! ```

use crate::checker::CheckResult;
use crate::lint::Warning;
use crate::text;
use ariadne::{Color, Config, Label, Report, ReportKind, Source};
use serde::{Serialize, Serializer};
use std::fmt;
use std::io;
use std::ops::Range;
use thiserror::Error;

/// Which way a delimiter balance is off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Imbalance {
    /// More openers than closers.
    Missing,
    /// More closers than openers.
    Extra,
}

impl Imbalance {
    /// Classify a signed open-minus-close count. Zero is balanced.
    pub fn from_balance(balance: i64) -> Option<Self> {
        match balance {
            0 => None,
            b if b > 0 => Some(Imbalance::Missing),
            _ => Some(Imbalance::Extra),
        }
    }
}

impl fmt::Display for Imbalance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Imbalance::Missing => f.write_str("missing"),
            Imbalance::Extra => f.write_str("extra"),
        }
    }
}

/// The first fatal problem found in a script.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckError {
    /// The script is empty or whitespace only.
    #[error("Empty script")]
    EmptyInput,

    #[error("Unbalanced brackets: {0} ]")]
    UnbalancedBrackets(Imbalance),

    #[error("Unbalanced parentheses: {0} )")]
    UnbalancedParens(Imbalance),

    #[error("Unbalanced curly braces: {0} }}")]
    UnbalancedBraces(Imbalance),

    /// `function <name>` definitions and `end` keywords do not pair up.
    #[error("Mismatched function definitions and 'end' statements")]
    MismatchedBlocks { functions: usize, ends: usize },

    /// Scanning itself failed. Not expected for any string input.
    #[error("Failed to check syntax")]
    InternalCheckFailure,
}

impl Serialize for CheckError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Error reporter that uses ariadne for pretty check output.
pub struct ErrorReporter<'src> {
    source_name: String,
    source: &'src str,
}

impl<'src> ErrorReporter<'src> {
    /// Create a new error reporter.
    pub fn new(source_name: impl Into<String>, source: &'src str) -> Self {
        Self {
            source_name: source_name.into(),
            source,
        }
    }

    /// Report a check result to stderr with colors.
    pub fn report_result(&self, result: &CheckResult) -> io::Result<()> {
        self.write_result(result, true, io::stderr())
    }

    /// Write the fatal error (if any) followed by every warning.
    pub fn write_result<W: io::Write>(
        &self,
        result: &CheckResult,
        color: bool,
        mut out: W,
    ) -> io::Result<()> {
        if let Some(error) = result.error() {
            self.write_error(error, color, &mut out)?;
        }
        for warning in result.warnings() {
            self.write_warning(warning, color, &mut out)?;
        }
        Ok(())
    }

    /// Write a single error report.
    pub fn write_error<W: io::Write>(
        &self,
        error: &CheckError,
        color: bool,
        out: W,
    ) -> io::Result<()> {
        let mut report = Report::build(ReportKind::Error, &self.source_name, 0)
            .with_config(Config::default().with_color(color))
            .with_message(error.to_string());

        if let Some(span) = self.error_span(error) {
            report = report.with_label(
                Label::new((&self.source_name, span))
                    .with_color(Color::Red)
                    .with_message(error_label(error)),
            );
        }

        report
            .finish()
            .write((&self.source_name, Source::from(self.source)), out)
    }

    /// Write a single warning report, labelled on the warning's line.
    pub fn write_warning<W: io::Write>(
        &self,
        warning: &Warning,
        color: bool,
        out: W,
    ) -> io::Result<()> {
        let span = self.line_span(warning.line());
        Report::build(ReportKind::Warning, &self.source_name, span.start)
            .with_config(Config::default().with_color(color))
            .with_message(warning.to_string())
            .with_label(
                Label::new((&self.source_name, span))
                    .with_color(Color::Yellow)
                    .with_message(warning.kind().message()),
            )
            .finish()
            .write((&self.source_name, Source::from(self.source)), out)
    }

    /// Missing closers point at the last visible character of the script,
    /// other errors at the first. Blank scripts get no label.
    fn error_span(&self, error: &CheckError) -> Option<Range<usize>> {
        let len = text::trim_end(self.source).chars().count();
        if len == 0 || *error == CheckError::EmptyInput {
            return None;
        }
        match error {
            CheckError::UnbalancedBrackets(Imbalance::Missing)
            | CheckError::UnbalancedParens(Imbalance::Missing)
            | CheckError::UnbalancedBraces(Imbalance::Missing) => Some(len - 1..len),
            _ => Some(0..1),
        }
    }

    /// Char range of a 1-indexed line, excluding its newline.
    fn line_span(&self, line: usize) -> Range<usize> {
        let mut start = 0;
        for (idx, text) in self.source.split('\n').enumerate() {
            let len = text.chars().count();
            if idx + 1 == line {
                return start..start + len;
            }
            start += len + 1;
        }
        start..start
    }
}

fn error_label(error: &CheckError) -> String {
    match error {
        CheckError::EmptyInput => "script has no content".to_string(),
        CheckError::UnbalancedBrackets(Imbalance::Missing)
        | CheckError::UnbalancedParens(Imbalance::Missing)
        | CheckError::UnbalancedBraces(Imbalance::Missing) => {
            "script ends with unclosed delimiters".to_string()
        }
        CheckError::UnbalancedBrackets(Imbalance::Extra)
        | CheckError::UnbalancedParens(Imbalance::Extra)
        | CheckError::UnbalancedBraces(Imbalance::Extra) => {
            "script closes more delimiters than it opens".to_string()
        }
        CheckError::MismatchedBlocks { functions, ends } => {
            format!("{} function definition(s), {} 'end' keyword(s)", functions, ends)
        }
        CheckError::InternalCheckFailure => "checker aborted".to_string(),
    }
}
