//! # growsoft-lua-checker
//!
//! A best-effort validity checker for Growsoft Lua automation scripts.
//!
//! The checker is a cheap gate run whenever a script is saved or checked from
//! the editor. It does not parse or run Lua. It makes one pass over the text
//! and reports:
//!
//! - **one fatal error**, the first of: empty script, unbalanced `[]`,
//!   unbalanced `()`, unbalanced `{}`, named `function` definitions not pairing
//!   with `end` keywords
//! - **style warnings** per line: `===`/`!==`, `++`/`--`, and semicolons
//!
//! Warnings never make a script invalid.
//!
//! ## Quick Start
//!
//! ```rust
//! use growsoft_lua_checker::{check_lua_syntax, ScriptStatus};
//!
//! let source = r#"
//! local count = 0;
//!
//! function onJoin(player)
//!   count = count + 1
//!   print(player.name .. " joined")
//! end
//! "#;
//!
//! let result = check_lua_syntax(source);
//! assert!(result.is_valid());
//! assert_eq!(
//!     result.warning_messages(),
//!     vec!["Line 2: Semicolons are optional in Lua"]
//! );
//! assert_eq!(ScriptStatus::from(&result), ScriptStatus::Valid);
//! ```
//!
//! ## Known Limits
//!
//! The checks are lexical heuristics and are kept that way on purpose:
//!
//! | Check | Imprecision |
//! |-------|-------------|
//! | Delimiters | counted inside strings and comments; nesting order ignored |
//! | `function`/`end` | `end` of `if`/`for`/`while` blocks counts; `function(...)` does not |
//! | `++`/`--` | every `--` comment line triggers it |
//!
//! ## Module Overview
//!
//! - [`checker`] - [`check_lua_syntax`] and [`CheckResult`]
//! - [`balance`] - running delimiter balances
//! - [`keywords`] - `function`/`end` counting
//! - [`lint`] - per-line style warnings
//! - [`error`] - [`CheckError`] and the ariadne [`ErrorReporter`]
//! - [`response`] - JSON request/response shapes and [`ScriptStatus`]
//!
//! ## Feature Flags
//!
//! - `wasm` - Enable WebAssembly bindings for browser use

pub mod balance;
pub mod checker;
pub mod error;
pub mod keywords;
pub mod lint;
pub mod response;
mod text;

#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export commonly used types
pub use checker::{check_lua_syntax, CheckResult};
pub use error::{CheckError, ErrorReporter, Imbalance};
pub use lint::{Warning, WarningKind};
pub use response::{respond, CheckRequest, CheckResponse, ScriptStatus};
