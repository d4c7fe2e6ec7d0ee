//! Number delimiters, input normalization and display formatting.

use serde::{Deserialize, Serialize};

use crate::error::{KeyValueError, KeyValueResult};

/// Characters used as decimal point and thousands separator in user input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberDelimiters {
    /// Decimal delimiter, replaced by `.` while parsing.
    #[serde(default = "default_decimal")]
    pub decimal: String,
    /// Group delimiter, removed while parsing.
    #[serde(default = "default_groups")]
    pub groups: String,
}

fn default_decimal() -> String {
    ".".to_string()
}

fn default_groups() -> String {
    ",".to_string()
}

impl Default for NumberDelimiters {
    fn default() -> Self {
        Self {
            decimal: default_decimal(),
            groups: default_groups(),
        }
    }
}

impl NumberDelimiters {
    /// Creates delimiters from a decimal and a group separator.
    pub fn new(decimal: impl Into<String>, groups: impl Into<String>) -> Self {
        Self {
            decimal: decimal.into(),
            groups: groups.into(),
        }
    }

    /// Checks that both delimiters are set and distinct.
    pub fn validate(&self) -> KeyValueResult<()> {
        if self.decimal.is_empty() {
            return Err(KeyValueError::invalid_config(
                "number",
                "decimal delimiter is empty",
            ));
        }
        if self.groups.is_empty() {
            return Err(KeyValueError::invalid_config("number", "group delimiter is empty"));
        }
        if self.decimal == self.groups {
            return Err(KeyValueError::invalid_config(
                "number",
                "decimal and group delimiters must differ",
            ));
        }
        Ok(())
    }

    /// Strips whitespace and group delimiters and converts the first
    /// decimal delimiter to `.`.
    pub(crate) fn normalize(&self, raw: &str) -> String {
        let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
        let ungrouped = compact.replace(&self.groups, "");
        ungrouped.replacen(&self.decimal, ".", 1)
    }

    /// Renders a number the way it is typed, using the decimal delimiter and
    /// no grouping, so that `normalize` reads it back unchanged.
    pub(crate) fn render(&self, number: f64) -> String {
        let plain = number.to_string();
        if self.decimal == "." {
            plain
        } else {
            plain.replace('.', &self.decimal)
        }
    }
}

/// Display-only number formatting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberFormat {
    /// Decimal separator in displayed numbers.
    #[serde(default = "default_decimal")]
    pub decimal: String,
    /// Thousands separator; no grouping when unset.
    #[serde(default)]
    pub groups: Option<String>,
    /// Minimum number of fraction digits.
    #[serde(default)]
    pub min_fraction_digits: usize,
    /// Maximum number of fraction digits; the number is rounded to fit.
    #[serde(default)]
    pub max_fraction_digits: Option<usize>,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self {
            decimal: default_decimal(),
            groups: None,
            min_fraction_digits: 0,
            max_fraction_digits: None,
        }
    }
}

impl NumberFormat {
    /// Formats a number for display.
    pub fn format(&self, number: f64) -> String {
        let plain = match self.max_fraction_digits {
            Some(digits) => format!("{:.*}", digits, number),
            None => number.to_string(),
        };
        let (sign, unsigned) = match plain.strip_prefix('-') {
            Some(rest) => ("-", rest),
            None => ("", plain.as_str()),
        };
        let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, ""));

        let mut fraction = frac_part.trim_end_matches('0').to_string();
        while fraction.len() < self.min_fraction_digits {
            fraction.push('0');
        }

        let mut output = String::from(sign);
        output.push_str(&group_digits(int_part, self.groups.as_deref()));
        if !fraction.is_empty() {
            output.push_str(&self.decimal);
            output.push_str(&fraction);
        }
        output
    }
}

fn group_digits(digits: &str, separator: Option<&str>) -> String {
    let Some(separator) = separator else {
        return digits.to_string();
    };
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push_str(separator);
        }
        grouped.push(c);
    }
    grouped
}
