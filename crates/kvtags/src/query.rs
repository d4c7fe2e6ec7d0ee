//! Query fragments describing how a value selects documents.
//!
//! Fragments are plain data. They name an abstract operator and an operand
//! and leave translation into a concrete database dialect to the caller.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::operators::{CompOperator, SelectorKey};
use crate::types::{DateType, KeyValue, NumberType, RegexType, SortType};

/// A comparison such as `{"key": "gte", "operand": 5}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonSelector<T> {
    pub key: SelectorKey,
    pub operand: T,
}

impl<T> ComparisonSelector<T> {
    pub fn new(operator: CompOperator, operand: T) -> Self {
        Self {
            key: operator.selector(),
            operand,
        }
    }

    /// Transforms the operand, keeping the selector key.
    pub fn map<U>(self, transform: impl FnOnce(T) -> U) -> ComparisonSelector<U> {
        ComparisonSelector {
            key: self.key,
            operand: transform(self.operand),
        }
    }
}

/// Sort order of a sort fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortSpecifier {
    Asc,
    Desc,
}

/// A pattern search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegexSelector {
    pub pattern: String,
    pub flags: String,
}

/// The query projection of a value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QueryFragment {
    Number(ComparisonSelector<f64>),
    Date(ComparisonSelector<NaiveDate>),
    Sort { order: SortSpecifier },
    Regex(RegexSelector),
    Equals { value: serde_json::Value },
}

impl QueryFragment {
    /// Projects a value into a fragment. Number modifiers have no
    /// projection.
    pub fn for_value(value: &KeyValue) -> Option<Self> {
        let fragment = match value {
            KeyValue::Boolean(flag) => QueryFragment::Equals {
                value: serde_json::Value::Bool(*flag),
            },
            KeyValue::Sort(direction) => QueryFragment::Sort {
                order: SortType::specifier_for(*direction),
            },
            KeyValue::Number(number) => QueryFragment::Number(NumberType::selector_for(number)),
            KeyValue::Date(date) => QueryFragment::Date(DateType::selector_for(date)),
            KeyValue::NumberModifier(_) => return None,
            KeyValue::Regex(regex) => QueryFragment::Regex(RegexType::selector_for(regex)),
            KeyValue::Tag(tag) => QueryFragment::Equals {
                value: serde_json::Value::String(tag.value.clone()),
            },
        };
        Some(fragment)
    }
}
