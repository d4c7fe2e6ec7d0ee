//! Sort directions parsed from an ascending/descending vocabulary.

use serde::{Deserialize, Serialize};

use crate::display::{Display, Suggestion};
use crate::query::SortSpecifier;

use super::boolean::Vocabulary;
use super::ValueType;

/// Words that parse as ascending. The first one is used as edit text.
pub const ASCENDING_VALUES: [&str; 7] = ["aufsteigend", "auf", "asc", "ascending", "up", "1", "+"];

/// Words that parse as descending. The first one is used as edit text.
pub const DESCENDING_VALUES: [&str; 7] =
    ["absteigend", "ab", "desc", "descending", "down", "-1", "-"];

const SORT_VOCABULARY: Vocabulary = Vocabulary {
    positive: &ASCENDING_VALUES,
    negative: &DESCENDING_VALUES,
};

/// Direction of a sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    /// Returns true for ascending order.
    pub fn is_ascending(self) -> bool {
        self == SortDirection::Ascending
    }

    fn from_ascending(ascending: bool) -> Self {
        if ascending {
            SortDirection::Ascending
        } else {
            SortDirection::Descending
        }
    }
}

/// Parses sort directions, rendered as `▲` or `▼`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortType;

impl SortType {
    /// Creates a sort type.
    pub fn new() -> Self {
        Self
    }

    /// Maps a direction to the query sort specifier.
    pub fn specifier_for(direction: SortDirection) -> SortSpecifier {
        match direction {
            SortDirection::Ascending => SortSpecifier::Asc,
            SortDirection::Descending => SortSpecifier::Desc,
        }
    }
}

impl ValueType for SortType {
    type Value = SortDirection;

    fn suggestions(&self, prefix: &str) -> Vec<Suggestion> {
        SORT_VOCABULARY.suggestions(prefix, |ascending| {
            self.display(&SortDirection::from_ascending(ascending))
        })
    }

    fn parse_str(&self, raw: &str) -> Option<SortDirection> {
        SORT_VOCABULARY.parse(raw).map(SortDirection::from_ascending)
    }

    fn check_value(&self, value: &serde_json::Value) -> Option<SortDirection> {
        match value {
            serde_json::Value::Bool(ascending) => Some(SortDirection::from_ascending(*ascending)),
            serde_json::Value::String(s) => match s.as_str() {
                "asc" | "ascending" => Some(SortDirection::Ascending),
                "desc" | "descending" => Some(SortDirection::Descending),
                _ => None,
            },
            _ => None,
        }
    }

    fn display(&self, value: &SortDirection) -> Display {
        match value {
            SortDirection::Ascending => Display::text("▲"),
            SortDirection::Descending => Display::text("▼"),
        }
    }

    fn edit_text(&self, value: &SortDirection) -> String {
        SORT_VOCABULARY.canonical(value.is_ascending()).to_string()
    }
}
