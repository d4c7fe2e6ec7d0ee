//! Date comparisons such as `< 2024-05-01` or `≥ 03-15`.

use std::fmt::Write as _;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Datelike, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::display::{Display, Suggestion};
use crate::error::{KeyValueError, KeyValueResult};
use crate::operators::CompOperator;
use crate::query::ComparisonSelector;

use super::comparison::{normalize_comparison, operator_suggestions, split_comparison};
use super::ValueType;

/// Specifiers that carry a year. Formats without any of them take the
/// current year when parsing.
const YEAR_SPECIFIERS: [&str; 11] = [
    "%Y", "%y", "%C", "%G", "%g", "%F", "%D", "%x", "%+", "%s", "%c",
];

/// A comparison against a calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateValue {
    pub operator: CompOperator,
    pub date: NaiveDate,
}

impl DateValue {
    pub fn new(operator: CompOperator, date: NaiveDate) -> Self {
        Self { operator, date }
    }
}

/// Date formats as chrono strftime strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateConfig {
    /// Format used for display.
    #[serde(default = "default_display_format")]
    pub display_format: String,
    /// Formats tried in order when parsing. The first strict match wins.
    #[serde(default = "default_parse_formats")]
    pub parse_formats: Vec<String>,
}

fn default_display_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_parse_formats() -> Vec<String> {
    vec![
        "%Y-%m-%d".to_string(),
        "%y-%m-%d".to_string(),
        "%m-%d".to_string(),
    ]
}

impl Default for DateConfig {
    fn default() -> Self {
        Self {
            display_format: default_display_format(),
            parse_formats: default_parse_formats(),
        }
    }
}

impl DateConfig {
    /// Checks that every format is a valid strftime string that can render
    /// a calendar date.
    pub fn validate(&self) -> KeyValueResult<()> {
        if self.parse_formats.is_empty() {
            return Err(KeyValueError::invalid_config("date", "no parse formats given"));
        }
        for format in std::iter::once(&self.display_format).chain(&self.parse_formats) {
            validate_format(format)?;
        }
        Ok(())
    }
}

fn validate_format(format: &str) -> KeyValueResult<()> {
    if format.trim().is_empty() {
        return Err(KeyValueError::invalid_config("date", "empty date format"));
    }
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(KeyValueError::invalid_config(
            "date",
            format!("'{format}' is not a valid date format"),
        ));
    }
    let Some(sample) = NaiveDate::from_ymd_opt(2000, 1, 1) else {
        return Ok(());
    };
    let mut rendered = String::new();
    if write!(rendered, "{}", sample.format(format)).is_err() {
        return Err(KeyValueError::invalid_config(
            "date",
            format!("'{format}' needs more than a calendar date"),
        ));
    }
    Ok(())
}

fn has_year(format: &str) -> bool {
    YEAR_SPECIFIERS.iter().any(|spec| format.contains(spec))
}

fn format_date(date: NaiveDate, format: &str) -> String {
    let mut rendered = String::new();
    match write!(rendered, "{}", date.format(format)) {
        Ok(()) => rendered,
        Err(_) => date.to_string(),
    }
}

/// Parses whitespace-free `text` with `format`, accepting the result only if
/// formatting the date again reproduces the text.
fn parse_strict(text: &str, format: &str, today: NaiveDate) -> Option<NaiveDate> {
    let date = if has_year(format) {
        NaiveDate::parse_from_str(text, format).ok()?
    } else {
        let dated = format!("{}-{}", today.year(), text);
        NaiveDate::parse_from_str(&dated, &format!("%Y-{format}")).ok()?
    };
    (strip_whitespace(&format_date(date, format)) == text).then_some(date)
}

fn strip_whitespace(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parses date comparisons. Input without an operator compares with `=`,
/// and empty input means `= today`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateType {
    config: DateConfig,
    edit_format: String,
}

impl Default for DateType {
    fn default() -> Self {
        Self::from_valid_config(DateConfig::default())
    }
}

impl DateType {
    /// Creates a date type with ISO display and the default parse formats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a date type with custom formats.
    pub fn with_config(config: DateConfig) -> KeyValueResult<Self> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: DateConfig) -> Self {
        let parse_formats = &config.parse_formats;
        let edit_format = std::iter::once(&config.display_format)
            .chain(parse_formats)
            .find(|format| parse_formats.contains(format) && has_year(format))
            .or_else(|| parse_formats.first())
            .cloned()
            .unwrap_or_else(default_display_format);
        Self {
            config,
            edit_format,
        }
    }

    pub fn config(&self) -> &DateConfig {
        &self.config
    }

    /// Parses relative to the given current date.
    pub fn parse_at(&self, raw: &str, today: NaiveDate) -> Option<DateValue> {
        let compact = strip_whitespace(raw);
        if compact.is_empty() {
            return Some(DateValue::new(CompOperator::Eq, today));
        }
        let normalized = normalize_comparison(&compact);
        let (operator, text) = split_comparison(&normalized);
        if text.is_empty() {
            return None;
        }
        let date = self
            .config
            .parse_formats
            .iter()
            .find_map(|format| parse_strict(text, format, today))?;
        Some(DateValue::new(operator.unwrap_or(CompOperator::Eq), date))
    }

    /// Operator suggestions relative to the given current date.
    pub fn suggestions_at(&self, prefix: &str, today: NaiveDate) -> Vec<Suggestion> {
        let parsed = self
            .parse_at(prefix, today)
            .map(|value| (value.operator, value.date));
        operator_suggestions(prefix, parsed, today, |operator, date| {
            let value = DateValue::new(operator, *date);
            Suggestion::new(self.display(&value), self.edit_text(&value))
        })
    }

    /// Builds the comparison selector for a value.
    pub fn selector_for(value: &DateValue) -> ComparisonSelector<NaiveDate> {
        ComparisonSelector::new(value.operator, value.date)
    }
}

fn parse_date_string(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d").ok().or_else(|| {
        DateTime::parse_from_rfc3339(text)
            .ok()
            .map(|timestamp| timestamp.with_timezone(&Utc).date_naive())
    })
}

impl ValueType for DateType {
    type Value = DateValue;

    fn suggestions(&self, prefix: &str) -> Vec<Suggestion> {
        self.suggestions_at(prefix, today())
    }

    fn parse_str(&self, raw: &str) -> Option<DateValue> {
        self.parse_at(raw, today())
    }

    fn check_value(&self, value: &serde_json::Value) -> Option<DateValue> {
        let operator = CompOperator::from_token(value.get("operator")?.as_str()?)?;
        let date = parse_date_string(value.get("date")?.as_str()?)?;
        Some(DateValue::new(operator, date))
    }

    fn display(&self, value: &DateValue) -> Display {
        Display::text(format!(
            "{} {}",
            value.operator.symbol(),
            format_date(value.date, &self.config.display_format)
        ))
    }

    fn edit_text(&self, value: &DateValue) -> String {
        format!(
            "{} {}",
            value.operator.symbol(),
            format_date(value.date, &self.edit_format)
        )
    }
}
