//! Number comparisons such as `>= 1,000` or `≠ 3.5`.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::display::{Display, Suggestion};
use crate::error::KeyValueResult;
use crate::operators::CompOperator;
use crate::query::ComparisonSelector;

use super::comparison::{normalize_comparison, operator_suggestions};
use super::numeric::{NumberDelimiters, NumberFormat};
use super::ValueType;

static NUMBER_COMPARISON_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(<=|<|>=|>|!=|=)?(-?[0-9]*\.?[0-9]+)")
        .unwrap_or_else(|_| unreachable!("number comparison regex is valid"))
});

/// Number shown in operator suggestions when the input has none.
pub(crate) const PLACEHOLDER_NUMBER: f64 = 42.0;

/// A comparison against a number.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumberValue {
    pub operator: CompOperator,
    pub number: f64,
}

impl NumberValue {
    pub fn new(operator: CompOperator, number: f64) -> Self {
        Self { operator, number }
    }
}

/// Parsing and display settings shared by number-based types.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberConfig {
    /// Delimiters accepted in typed input.
    #[serde(default)]
    pub delimiters: NumberDelimiters,
    /// Display formatting; numbers are shown as typed when unset.
    #[serde(default)]
    pub format: Option<NumberFormat>,
}

impl NumberConfig {
    /// Checks the delimiters.
    pub fn validate(&self) -> KeyValueResult<()> {
        self.delimiters.validate()
    }

    pub(crate) fn format_number(&self, number: f64) -> String {
        match &self.format {
            Some(format) => format.format(number),
            None => number.to_string(),
        }
    }
}

/// Parses number comparisons. Input without an operator compares with `=`,
/// and empty input means `> 0`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NumberType {
    config: NumberConfig,
}

impl NumberType {
    /// Creates a number type with `.` as decimal and `,` as group delimiter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a number type with custom delimiters and formatting.
    pub fn with_config(config: NumberConfig) -> KeyValueResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &NumberConfig {
        &self.config
    }

    /// Builds the comparison selector for a value.
    pub fn selector_for(value: &NumberValue) -> ComparisonSelector<f64> {
        Self::selector_with(value, |number| number)
    }

    /// Builds the comparison selector, passing the operand through `transform`.
    pub fn selector_with(
        value: &NumberValue,
        transform: impl FnOnce(f64) -> f64,
    ) -> ComparisonSelector<f64> {
        ComparisonSelector::new(value.operator, transform(value.number))
    }
}

impl ValueType for NumberType {
    type Value = NumberValue;

    fn suggestions(&self, prefix: &str) -> Vec<Suggestion> {
        let parsed = self
            .parse_str(prefix)
            .map(|value| (value.operator, value.number));
        operator_suggestions(prefix, parsed, PLACEHOLDER_NUMBER, |operator, number| {
            let value = NumberValue::new(operator, *number);
            Suggestion::new(self.display(&value), self.edit_text(&value))
        })
    }

    fn parse_str(&self, raw: &str) -> Option<NumberValue> {
        let trimmed = raw.trim();
        let input = if trimmed.is_empty() { ">0" } else { trimmed };
        let normalized = normalize_comparison(&self.config.delimiters.normalize(input));

        let caps = NUMBER_COMPARISON_RE.captures(&normalized)?;
        let operator = match caps.get(1) {
            Some(m) => CompOperator::from_token(m.as_str())?,
            None => CompOperator::Eq,
        };
        let number = caps
            .get(2)?
            .as_str()
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())?;
        Some(NumberValue::new(operator, number))
    }

    fn check_value(&self, value: &serde_json::Value) -> Option<NumberValue> {
        serde_json::from_value::<NumberValue>(value.clone())
            .ok()
            .filter(|v| v.number.is_finite())
    }

    fn display(&self, value: &NumberValue) -> Display {
        Display::text(format!(
            "{} {}",
            value.operator.symbol(),
            self.config.format_number(value.number)
        ))
    }

    fn edit_text(&self, value: &NumberValue) -> String {
        format!(
            "{} {}",
            value.operator.symbol(),
            self.config.delimiters.render(value.number)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(raw: &str) -> Option<NumberValue> {
        NumberType::new().parse_str(raw)
    }

    #[test]
    fn test_parse_with_operator() {
        assert_eq!(parse(">= 5"), Some(NumberValue::new(CompOperator::Gte, 5.0)));
        assert_eq!(parse("<-2.5"), Some(NumberValue::new(CompOperator::Lt, -2.5)));
        assert_eq!(parse("!=.5"), Some(NumberValue::new(CompOperator::Ne, 0.5)));
    }

    #[test]
    fn test_parse_symbols_and_alternates() {
        assert_eq!(parse("≥ 5"), Some(NumberValue::new(CompOperator::Gte, 5.0)));
        assert_eq!(parse("≤5"), Some(NumberValue::new(CompOperator::Lte, 5.0)));
        assert_eq!(parse("<>5"), Some(NumberValue::new(CompOperator::Ne, 5.0)));
        assert_eq!(parse("≠5"), Some(NumberValue::new(CompOperator::Ne, 5.0)));
        assert_eq!(parse("==5"), Some(NumberValue::new(CompOperator::Eq, 5.0)));
    }

    #[test]
    fn test_parse_without_operator_defaults_to_eq() {
        assert_eq!(parse("5"), parse("=5"));
    }

    #[test]
    fn test_parse_empty_means_greater_than_zero() {
        assert_eq!(parse("   "), Some(NumberValue::new(CompOperator::Gt, 0.0)));
    }

    #[test]
    fn test_parse_group_delimiters() {
        assert_eq!(parse("1,234,567"), Some(NumberValue::new(CompOperator::Eq, 1234567.0)));
    }

    #[test]
    fn test_parse_custom_delimiters() {
        let config = NumberConfig {
            delimiters: NumberDelimiters::new(",", "."),
            format: None,
        };
        let number = NumberType::with_config(config).unwrap();
        assert_eq!(
            number.parse_str("> 1.234,5"),
            Some(NumberValue::new(CompOperator::Gt, 1234.5))
        );
    }

    #[test]
    fn test_parse_rejects_non_numbers() {
        assert_eq!(parse("abc"), None);
        assert_eq!(parse(">"), None);
        assert_eq!(parse("~5"), None);
    }

    #[test]
    fn test_parse_rejects_overflowing_numbers() {
        let huge = "9".repeat(400);
        assert_eq!(parse(&huge), None);
        assert_eq!(parse(&format!(">= {huge}")), None);
        assert!(parse(&"9".repeat(300)).is_some());
    }

    #[test]
    fn test_display_and_edit_text() {
        let number = NumberType::new();
        let value = NumberValue::new(CompOperator::Eq, 42.0);
        assert_eq!(number.display(&value), Display::text("= 42"));
        assert_eq!(number.edit_text(&value), "= 42");

        let value = NumberValue::new(CompOperator::Gte, 1.5);
        assert_eq!(number.edit_text(&value), "≥ 1.5");
    }

    #[test]
    fn test_display_uses_format_but_edit_text_round_trips() {
        let config = NumberConfig {
            delimiters: NumberDelimiters::new(",", "."),
            format: Some(NumberFormat {
                decimal: ",".to_string(),
                groups: Some(".".to_string()),
                min_fraction_digits: 2,
                max_fraction_digits: Some(2),
            }),
        };
        let number = NumberType::with_config(config).unwrap();
        let value = NumberValue::new(CompOperator::Lt, 1234.5);
        assert_eq!(number.display(&value), Display::text("< 1.234,50"));
        assert_eq!(number.edit_text(&value), "< 1234,5");
        assert_eq!(number.parse_str(&number.edit_text(&value)), Some(value));
    }

    #[test]
    fn test_check_value() {
        let number = NumberType::new();
        assert_eq!(
            number.check_value(&json!({ "operator": "<=", "number": 3 })),
            Some(NumberValue::new(CompOperator::Lte, 3.0))
        );
        assert_eq!(number.check_value(&json!({ "operator": "≤", "number": 3 })), None);
        assert_eq!(number.check_value(&json!({ "operator": "<=", "number": "3" })), None);
        assert_eq!(number.check_value(&json!(3)), None);
    }

    #[test]
    fn test_suggestions_for_empty_prefix() {
        let suggestions = NumberType::new().suggestions("");
        let values: Vec<_> = suggestions.iter().map(|s| s.value.as_str()).collect();
        assert_eq!(values, ["< 42", "> 42", "≤ 42", "≥ 42", "≠ 42", "= 42"]);
    }

    #[test]
    fn test_suggestions_filter_operators_by_prefix() {
        let suggestions = NumberType::new().suggestions("<");
        let values: Vec<_> = suggestions.iter().map(|s| s.value.as_str()).collect();
        assert_eq!(values, ["< 42", "≤ 42"]);
    }

    #[test]
    fn test_suggestions_keep_typed_number() {
        let suggestions = NumberType::new().suggestions("7");
        assert_eq!(suggestions.len(), 6);
        assert!(suggestions.iter().all(|s| s.value.ends_with(" 7")));
    }

    #[test]
    fn test_no_suggestions_after_explicit_operator() {
        assert!(NumberType::new().suggestions(">= 7").is_empty());
        assert!(NumberType::new().suggestions("=7").is_empty());
    }

    #[test]
    fn test_selector_for() {
        let value = NumberValue::new(CompOperator::Gte, 10.0);
        let selector = NumberType::selector_with(&value, |n| n * 100.0);
        assert_eq!(selector, ComparisonSelector::new(CompOperator::Gte, 1000.0));
        assert_eq!(
            NumberType::selector_for(&value),
            ComparisonSelector::new(CompOperator::Gte, 10.0)
        );
    }
}
