//! Running delimiter balances.

use crate::error::{CheckError, Imbalance};

/// Signed open-minus-close counts for each delimiter kind, accumulated across
/// a whole script. Nesting order is not tracked: `[)(]` is balanced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DelimiterBalance {
    pub brackets: i64,
    pub parens: i64,
    pub braces: i64,
}

impl DelimiterBalance {
    /// Add one line's delimiters to the totals.
    pub fn scan_line(&mut self, line: &str) {
        for byte in line.bytes() {
            match byte {
                b'[' => self.brackets += 1,
                b']' => self.brackets -= 1,
                b'(' => self.parens += 1,
                b')' => self.parens -= 1,
                b'{' => self.braces += 1,
                b'}' => self.braces -= 1,
                _ => {}
            }
        }
    }

    /// Judge the totals. Brackets are checked first, then parentheses, then
    /// braces; the first non-zero balance is the error.
    pub fn check(&self) -> Result<(), CheckError> {
        if let Some(imbalance) = Imbalance::from_balance(self.brackets) {
            return Err(CheckError::UnbalancedBrackets(imbalance));
        }
        if let Some(imbalance) = Imbalance::from_balance(self.parens) {
            return Err(CheckError::UnbalancedParens(imbalance));
        }
        if let Some(imbalance) = Imbalance::from_balance(self.braces) {
            return Err(CheckError::UnbalancedBraces(imbalance));
        }
        Ok(())
    }
}
