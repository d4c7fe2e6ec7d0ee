//! Comparison and arithmetic operator tables.
//!
//! Each operator has a canonical ASCII token (`>=`), a display symbol (`≥`)
//! and, for comparisons, an abstract selector key (`gte`) used when building
//! document-database queries.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{KeyValueError, KeyValueResult};

/// Abstract query operator identifiers for comparison selectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectorKey {
    Lt,
    Gt,
    Lte,
    Gte,
    Ne,
    Eq,
}

impl SelectorKey {
    /// Returns the selector name (`lt`, `gte`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            SelectorKey::Lt => "lt",
            SelectorKey::Gt => "gt",
            SelectorKey::Lte => "lte",
            SelectorKey::Gte => "gte",
            SelectorKey::Ne => "ne",
            SelectorKey::Eq => "eq",
        }
    }
}

impl fmt::Display for SelectorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompOperator {
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = "<=")]
    Lte,
    #[serde(rename = ">=")]
    Gte,
    #[serde(rename = "!=")]
    Ne,
    #[serde(rename = "=")]
    Eq,
}

/// Canonical comparison tokens followed by the symbols that differ from them.
pub const COMP_OPS_AND_SYMBOLS: [&str; 9] = ["<", ">", "<=", ">=", "!=", "=", "≤", "≥", "≠"];

impl CompOperator {
    /// All comparison operators in canonical order.
    pub const ALL: [CompOperator; 6] = [
        CompOperator::Lt,
        CompOperator::Gt,
        CompOperator::Lte,
        CompOperator::Gte,
        CompOperator::Ne,
        CompOperator::Eq,
    ];

    /// Returns the canonical ASCII token.
    pub fn token(self) -> &'static str {
        match self {
            CompOperator::Lt => "<",
            CompOperator::Gt => ">",
            CompOperator::Lte => "<=",
            CompOperator::Gte => ">=",
            CompOperator::Ne => "!=",
            CompOperator::Eq => "=",
        }
    }

    /// Returns the display symbol.
    pub fn symbol(self) -> &'static str {
        match self {
            CompOperator::Lte => "≤",
            CompOperator::Gte => "≥",
            CompOperator::Ne => "≠",
            other => other.token(),
        }
    }

    /// Returns the abstract selector key.
    pub fn selector(self) -> SelectorKey {
        match self {
            CompOperator::Lt => SelectorKey::Lt,
            CompOperator::Gt => SelectorKey::Gt,
            CompOperator::Lte => SelectorKey::Lte,
            CompOperator::Gte => SelectorKey::Gte,
            CompOperator::Ne => SelectorKey::Ne,
            CompOperator::Eq => SelectorKey::Eq,
        }
    }

    /// Looks up an operator by canonical token only.
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.token() == token)
    }

    /// Looks up an operator by canonical token or display symbol.
    pub fn resolve(token_or_symbol: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|op| op.token() == token_or_symbol || op.symbol() == token_or_symbol)
    }
}

impl FromStr for CompOperator {
    type Err = KeyValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_token(s).ok_or_else(|| KeyValueError::invalid_operator(s))
    }
}

impl fmt::Display for CompOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Returns the display symbol for a comparison token.
///
/// Anything that is not a canonical token is returned unchanged, so applying
/// this to an already-symbolic token is a no-op.
pub fn comp_symbol_of(token: &str) -> &str {
    match CompOperator::from_token(token) {
        Some(op) => op.symbol(),
        None => token,
    }
}

/// Returns the selector key for a canonical comparison token.
///
/// # Errors
///
/// Returns `KeyValueError::InvalidOperator` for symbols and unknown tokens;
/// callers must normalize symbols first.
pub fn comp_selector_of(token: &str) -> KeyValueResult<SelectorKey> {
    token.parse::<CompOperator>().map(CompOperator::selector)
}

/// An arithmetic operator used by number modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MathOperator {
    #[serde(rename = "=")]
    Assign,
    #[serde(rename = "*")]
    Multiply,
    #[serde(rename = "/")]
    Divide,
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Subtract,
}

/// Canonical arithmetic tokens followed by the symbols that differ from them.
pub const MATH_OPS_AND_SYMBOLS: [&str; 6] = ["=", "*", "/", "+", "-", "÷"];

impl MathOperator {
    /// All arithmetic operators in canonical order.
    pub const ALL: [MathOperator; 5] = [
        MathOperator::Assign,
        MathOperator::Multiply,
        MathOperator::Divide,
        MathOperator::Add,
        MathOperator::Subtract,
    ];

    /// Returns the canonical ASCII token.
    pub fn token(self) -> &'static str {
        match self {
            MathOperator::Assign => "=",
            MathOperator::Multiply => "*",
            MathOperator::Divide => "/",
            MathOperator::Add => "+",
            MathOperator::Subtract => "-",
        }
    }

    /// Returns the display symbol.
    pub fn symbol(self) -> &'static str {
        match self {
            MathOperator::Divide => "÷",
            other => other.token(),
        }
    }

    /// Looks up an operator by canonical token only.
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.token() == token)
    }

    /// Looks up an operator by canonical token or display symbol.
    pub fn resolve(token_or_symbol: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|op| op.token() == token_or_symbol || op.symbol() == token_or_symbol)
    }
}

impl FromStr for MathOperator {
    type Err = KeyValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_token(s).ok_or_else(|| KeyValueError::invalid_operator(s))
    }
}

impl fmt::Display for MathOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Returns the display symbol for an arithmetic token, or the input unchanged.
pub fn math_symbol_of(token: &str) -> &str {
    match MathOperator::from_token(token) {
        Some(op) => op.symbol(),
        None => token,
    }
}
