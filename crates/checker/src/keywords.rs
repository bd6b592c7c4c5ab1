//! Whole-text keyword pairing between named function definitions and `end`.
//!
//! This is a coarse count, not block matching. Every `end` counts, including
//! the ones closing `if`, `for`, `while`, and `do` blocks, and anonymous
//! `function(...)` expressions are not counted as definitions.

use crate::error::CheckError;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// `function` followed by whitespace and an identifier. No boundary is
    /// required before `function`.
    static ref FUNCTION_DEF: Regex =
        Regex::new(r"function\s+[0-9A-Za-z_]+").expect("function pattern is valid");

    /// `end` as a whole ASCII word.
    static ref END_KEYWORD: Regex =
        Regex::new(r"(?-u:\b)end(?-u:\b)").expect("end pattern is valid");
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeywordCounts {
    pub functions: usize,
    pub ends: usize,
}

impl KeywordCounts {
    /// Count non-overlapping matches across the whole script.
    pub fn count(content: &str) -> Self {
        Self {
            functions: FUNCTION_DEF.find_iter(content).count(),
            ends: END_KEYWORD.find_iter(content).count(),
        }
    }

    pub fn check(&self) -> Result<(), CheckError> {
        if self.functions == self.ends {
            Ok(())
        } else {
            Err(CheckError::MismatchedBlocks {
                functions: self.functions,
                ends: self.ends,
            })
        }
    }
}
