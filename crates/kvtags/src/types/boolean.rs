//! Boolean values parsed from a closed yes/no vocabulary.

use crate::display::{Display, Suggestion};

use super::ValueType;

/// Words that parse as `true`. The first one is used as edit text.
pub const TRUE_VALUES: [&str; 6] = ["ja", "yes", "wahr", "true", "1", "✓"];

/// Words that parse as `false`. The first one is used as edit text.
pub const FALSE_VALUES: [&str; 6] = ["nein", "no", "falsch", "false", "0", "✗"];

/// A two-sided word list shared by boolean-like types.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Vocabulary {
    pub positive: &'static [&'static str],
    pub negative: &'static [&'static str],
}

impl Vocabulary {
    /// Parses a word case-insensitively. Empty input counts as positive.
    pub fn parse(&self, raw: &str) -> Option<bool> {
        let value = raw.trim().to_lowercase();
        if value.is_empty() || self.positive.contains(&value.as_str()) {
            Some(true)
        } else if self.negative.contains(&value.as_str()) {
            Some(false)
        } else {
            None
        }
    }

    /// Returns the canonical word for a side.
    pub fn canonical(&self, side: bool) -> &'static str {
        let words = if side { self.positive } else { self.negative };
        words.first().copied().unwrap_or_default()
    }

    /// Offers both sides, keeping those with a word containing `prefix`.
    pub fn suggestions(&self, prefix: &str, display: impl Fn(bool) -> Display) -> Vec<Suggestion> {
        let substring = prefix.to_lowercase();
        [true, false]
            .into_iter()
            .filter_map(|side| {
                let words = if side { self.positive } else { self.negative };
                let matched = words.iter().find(|word| word.contains(&substring))?;
                Some(Suggestion::new(display(side), self.canonical(side)).with_match(*matched))
            })
            .collect()
    }
}

const BOOLEAN_VOCABULARY: Vocabulary = Vocabulary {
    positive: &TRUE_VALUES,
    negative: &FALSE_VALUES,
};

/// Parses yes/no style input into `bool`, rendered as `✓` or `✗`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BooleanType;

impl BooleanType {
    /// Creates a boolean type.
    pub fn new() -> Self {
        Self
    }
}

impl ValueType for BooleanType {
    type Value = bool;

    fn suggestions(&self, prefix: &str) -> Vec<Suggestion> {
        BOOLEAN_VOCABULARY.suggestions(prefix, |value| self.display(&value))
    }

    fn parse_str(&self, raw: &str) -> Option<bool> {
        BOOLEAN_VOCABULARY.parse(raw)
    }

    fn check_value(&self, value: &serde_json::Value) -> Option<bool> {
        value.as_bool()
    }

    fn display(&self, value: &bool) -> Display {
        if *value {
            Display::text("✓")
        } else {
            Display::text("✗")
        }
    }

    fn edit_text(&self, value: &bool) -> String {
        BOOLEAN_VOCABULARY.canonical(*value).to_string()
    }
}
