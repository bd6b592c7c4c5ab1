//! The script validity checker.
//!
//! [`check_lua_syntax`] is a single linear pass over the script plus two
//! whole-text keyword counts. It never executes or parses the script and it
//! always returns a verdict.

use crate::balance::DelimiterBalance;
use crate::error::CheckError;
use crate::keywords::KeywordCounts;
use crate::lint::{self, Warning};
use crate::text;
use serde::Serialize;
use std::any::Any;
use std::panic::{self, UnwindSafe};

/// Outcome of checking one script.
///
/// `valid` is true exactly when `error` is `None`. Warnings are ordered by line
/// and may be present either way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<CheckError>,
    warnings: Vec<Warning>,
}

impl CheckResult {
    pub fn passed(warnings: Vec<Warning>) -> Self {
        Self {
            valid: true,
            error: None,
            warnings,
        }
    }

    pub fn failed(error: CheckError, warnings: Vec<Warning>) -> Self {
        Self {
            valid: false,
            error: Some(error),
            warnings,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn error(&self) -> Option<&CheckError> {
        self.error.as_ref()
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// The error message as shown to users.
    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(ToString::to_string)
    }

    /// Warning messages in line order.
    pub fn warning_messages(&self) -> Vec<String> {
        self.warnings.iter().map(ToString::to_string).collect()
    }
}

/// Check a Lua script for delimiter balance and function/`end` pairing, and
/// collect style warnings.
///
/// Checks run in a fixed order and the first failure wins: empty script,
/// brackets, parentheses, curly braces, function/`end` pairing.
///
/// ```rust
/// use growsoft_lua_checker::check_lua_syntax;
///
/// let result = check_lua_syntax("function foo()\nend");
/// assert!(result.is_valid());
/// assert!(result.warnings().is_empty());
///
/// let result = check_lua_syntax("local x = [1, 2");
/// assert_eq!(
///     result.error_message().as_deref(),
///     Some("Unbalanced brackets: missing ]")
/// );
/// ```
pub fn check_lua_syntax(content: &str) -> CheckResult {
    let result = contain_failure(|| run_checks(content));

    tracing::debug!(
        valid = result.valid,
        warnings = result.warnings.len(),
        "checked script"
    );
    result
}

/// Run `check`, turning a panic into [`CheckError::InternalCheckFailure`].
fn contain_failure<F>(check: F) -> CheckResult
where
    F: FnOnce() -> CheckResult + UnwindSafe,
{
    match panic::catch_unwind(check) {
        Ok(result) => result,
        Err(payload) => {
            tracing::error!(reason = panic_reason(payload.as_ref()), "syntax check failed");
            CheckResult::failed(CheckError::InternalCheckFailure, Vec::new())
        }
    }
}

fn run_checks(content: &str) -> CheckResult {
    if text::trim(content).is_empty() {
        return CheckResult::failed(CheckError::EmptyInput, Vec::new());
    }

    let mut balance = DelimiterBalance::default();
    let mut warnings = Vec::new();

    for (idx, line) in content.split('\n').enumerate() {
        balance.scan_line(line);
        lint::scan_line(idx + 1, line, &mut warnings);
    }

    let verdict = balance
        .check()
        .and_then(|()| KeywordCounts::count(content).check());

    match verdict {
        Ok(()) => CheckResult::passed(warnings),
        Err(error) => CheckResult::failed(error, warnings),
    }
}

fn panic_reason(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "unknown panic"
    }
}
