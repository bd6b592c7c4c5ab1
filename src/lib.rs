//! # growsoft-lua
//!
//! Validity checking and editor tooling for Growsoft Lua automation scripts.
//!
//! ## Features
//!
//! | Feature | Crate | Description |
//! |---------|-------|-------------|
//! | `checker` | [`growsoft-lua-checker`] | Delimiter balance, function/`end` pairing, style warnings |
//! | `wasm`    | [`growsoft-lua-checker`] | Browser bindings for the checker |
//!
//! `default = ["checker"]`. The `lua-check` CLI and the `growsoft-lua-lsp`
//! language server live in their own workspace crates.
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! growsoft-lua = "0.1"
//! ```
//!
//! ```rust
//! use growsoft_lua::{check_lua_syntax, ScriptStatus};
//!
//! let result = check_lua_syntax("function greet(name)\n  print(name)\nend");
//! assert!(result.is_valid());
//! assert_eq!(ScriptStatus::from(&result), ScriptStatus::Valid);
//! ```

#[cfg(feature = "checker")]
pub use growsoft_lua_checker as checker;

#[cfg(feature = "checker")]
pub use growsoft_lua_checker::{
    check_lua_syntax, respond, CheckError, CheckRequest, CheckResponse, CheckResult,
    ErrorReporter, ScriptStatus, Warning, WarningKind,
};
