//! Request/response shapes for checking scripts over JSON, and the stored
//! status a check assigns to a script record.

use crate::checker::{check_lua_syntax, CheckResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A request to check script content: `{ "content": "..." }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckRequest {
    #[serde(default)]
    pub content: Option<String>,
}

impl CheckRequest {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
        }
    }
}

/// `{ success, valid, error?, warnings[] }`.
///
/// `success` is false only when the request itself was unusable; a script that
/// fails its check is still a successful response with `valid: false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResponse {
    pub success: bool,
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default)]
    pub warnings: Vec<String>,
}

impl CheckResponse {
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self {
            success: false,
            valid: false,
            error: Some(reason.into()),
            warnings: Vec::new(),
        }
    }
}

impl From<&CheckResult> for CheckResponse {
    fn from(result: &CheckResult) -> Self {
        Self {
            success: true,
            valid: result.is_valid(),
            error: result.error_message(),
            warnings: result.warning_messages(),
        }
    }
}

/// Check the content of a request.
///
/// Missing or empty content is rejected before the checker runs.
/// Whitespace-only content is checked and reported as an empty script.
pub fn respond(request: &CheckRequest) -> CheckResponse {
    match request.content.as_deref() {
        None | Some("") => CheckResponse::rejected("Content is required"),
        Some(content) => CheckResponse::from(&check_lua_syntax(content)),
    }
}

/// Validity status stored on a script record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptStatus {
    Valid,
    Error,
}

impl ScriptStatus {
    /// Check `content` and derive the status a saved script receives.
    pub fn of_content(content: &str) -> Self {
        Self::from(&check_lua_syntax(content))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScriptStatus::Valid => "valid",
            ScriptStatus::Error => "error",
        }
    }
}

impl From<&CheckResult> for ScriptStatus {
    fn from(result: &CheckResult) -> Self {
        if result.is_valid() {
            ScriptStatus::Valid
        } else {
            ScriptStatus::Error
        }
    }
}

impl fmt::Display for ScriptStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}
