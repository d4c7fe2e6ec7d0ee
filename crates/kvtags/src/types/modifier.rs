//! Arithmetic modifiers such as `+5` or `÷ 3` applied to a base number.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::display::{Display, Suggestion};
use crate::error::{KeyValueError, KeyValueResult};
use crate::operators::MathOperator;

use super::comparison::operator_suggestions;
use super::number::{NumberConfig, PLACEHOLDER_NUMBER};
use super::ValueType;

static MODIFIER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([=*/+-])?(-?[0-9]*\.?[0-9]+)")
        .unwrap_or_else(|_| unreachable!("modifier regex is valid"))
});

/// How the result of a modifier is rounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundMode {
    /// Keep the exact result.
    #[default]
    Not,
    /// Round toward positive infinity.
    Up,
    /// Round toward negative infinity.
    Down,
    /// Round to the nearest integer, halves toward positive infinity.
    Math,
}

impl RoundMode {
    fn round(self, number: f64) -> f64 {
        match self {
            RoundMode::Not => number,
            RoundMode::Up => number.ceil(),
            RoundMode::Down => number.floor(),
            RoundMode::Math => {
                if number.fract() == -0.5 {
                    number.ceil()
                } else {
                    number.round()
                }
            }
        }
    }
}

impl FromStr for RoundMode {
    type Err = KeyValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "not" => Ok(RoundMode::Not),
            "up" => Ok(RoundMode::Up),
            "down" => Ok(RoundMode::Down),
            "math" => Ok(RoundMode::Math),
            other => Err(KeyValueError::invalid_round_mode(other)),
        }
    }
}

impl fmt::Display for RoundMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RoundMode::Not => "not",
            RoundMode::Up => "up",
            RoundMode::Down => "down",
            RoundMode::Math => "math",
        };
        f.write_str(name)
    }
}

/// An arithmetic operation with a fixed operand.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModifierValue {
    pub operator: MathOperator,
    pub number: f64,
}

impl ModifierValue {
    pub fn new(operator: MathOperator, number: f64) -> Self {
        Self { operator, number }
    }

    /// Applies the operation to `base` and rounds the result.
    pub fn apply(&self, base: f64, round: RoundMode) -> f64 {
        let result = match self.operator {
            MathOperator::Assign => self.number,
            MathOperator::Multiply => base * self.number,
            MathOperator::Divide => base / self.number,
            MathOperator::Add => base + self.number,
            MathOperator::Subtract => base - self.number,
        };
        round.round(result)
    }
}

/// Parses arithmetic modifiers. Input without an operator assigns the number.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NumberModifierType {
    config: NumberConfig,
}

impl NumberModifierType {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a modifier type with custom delimiters and formatting.
    pub fn with_config(config: NumberConfig) -> KeyValueResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &NumberConfig {
        &self.config
    }

    /// Applies a modifier to `base` and rounds the result.
    pub fn apply(value: &ModifierValue, base: f64, round: RoundMode) -> f64 {
        value.apply(base, round)
    }
}

impl ValueType for NumberModifierType {
    type Value = ModifierValue;

    fn suggestions(&self, prefix: &str) -> Vec<Suggestion> {
        let parsed = self
            .parse_str(prefix)
            .map(|value| (value.operator, value.number));
        operator_suggestions(prefix, parsed, PLACEHOLDER_NUMBER, |operator, number| {
            let value = ModifierValue::new(operator, *number);
            Suggestion::new(self.display(&value), self.edit_text(&value))
        })
    }

    fn parse_str(&self, raw: &str) -> Option<ModifierValue> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        let normalized = self.config.delimiters.normalize(trimmed).replacen('÷', "/", 1);

        let caps = MODIFIER_RE.captures(&normalized)?;
        let operator = match caps.get(1) {
            Some(m) => MathOperator::from_token(m.as_str())?,
            None => MathOperator::Assign,
        };
        let number = caps
            .get(2)?
            .as_str()
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())?;
        Some(ModifierValue::new(operator, number))
    }

    fn check_value(&self, value: &serde_json::Value) -> Option<ModifierValue> {
        serde_json::from_value::<ModifierValue>(value.clone())
            .ok()
            .filter(|v| v.number.is_finite())
    }

    fn display(&self, value: &ModifierValue) -> Display {
        Display::text(format!(
            "{} {}",
            value.operator.symbol(),
            self.config.format_number(value.number)
        ))
    }

    fn edit_text(&self, value: &ModifierValue) -> String {
        format!(
            "{} {}",
            value.operator.symbol(),
            self.config.delimiters.render(value.number)
        )
    }
}
