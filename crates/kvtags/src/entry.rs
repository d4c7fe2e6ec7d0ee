//! Entries bind a key-value type to an optional parsed value.

use std::sync::Arc;

use crate::construction::ConstructionData;
use crate::display::{Display, Suggestion};
use crate::query::QueryFragment;
use crate::suggest::SuggestionContext;
use crate::types::{KeyValue, KeyValueType};

/// Whether an entry holds a value yet.
#[derive(Debug, Clone, PartialEq)]
pub enum EntryState {
    /// The key is known but no value has been set.
    Partial,
    /// The entry holds a parsed value.
    Complete(KeyValue),
}

/// A key-value entry.
///
/// An entry starts out partial and becomes complete through a successful
/// [`Entry::set`]. A failed `set` keeps the previous state.
#[derive(Debug, Clone)]
pub struct Entry {
    key_type: Arc<KeyValueType>,
    state: EntryState,
    is_default: bool,
}

impl Entry {
    pub(crate) fn partial(key_type: Arc<KeyValueType>) -> Self {
        Self {
            key_type,
            state: EntryState::Partial,
            is_default: false,
        }
    }

    pub fn key_type(&self) -> &Arc<KeyValueType> {
        &self.key_type
    }

    /// The type id.
    pub fn id(&self) -> &str {
        self.key_type.id()
    }

    /// The type label.
    pub fn label(&self) -> &str {
        self.key_type.label()
    }

    pub fn state(&self) -> &EntryState {
        &self.state
    }

    pub fn value(&self) -> Option<&KeyValue> {
        match &self.state {
            EntryState::Partial => None,
            EntryState::Complete(value) => Some(value),
        }
    }

    pub fn is_partial(&self) -> bool {
        matches!(self.state, EntryState::Partial)
    }

    /// True for entries supplied as defaults rather than typed by the user.
    pub fn is_default(&self) -> bool {
        self.is_default
    }

    /// Marks the entry as a default entry.
    pub fn into_default(mut self) -> Self {
        self.is_default = true;
        self
    }

    /// Parses user input with this entry's type without storing it.
    pub fn parse(&self, raw: &str) -> Option<KeyValue> {
        self.key_type.parse_str(raw)
    }

    /// Parses user input and stores the value. Returns false and keeps the
    /// previous state if the input does not parse.
    pub fn set(&mut self, raw: &str) -> bool {
        let parsed = self.parse(raw);
        self.store(parsed)
    }

    /// Stores structured data. JSON strings are parsed as user input, other
    /// values are validated by the type.
    pub fn set_value(&mut self, value: &serde_json::Value) -> bool {
        let checked = match value {
            serde_json::Value::String(raw) => self.key_type.parse_str(raw),
            other => self.key_type.check_value(other),
        };
        self.store(checked)
    }

    fn store(&mut self, value: Option<KeyValue>) -> bool {
        match value {
            Some(value) => {
                self.state = EntryState::Complete(value);
                true
            }
            None => false,
        }
    }

    /// Drops the value, making the entry partial again.
    pub(crate) fn clear(&mut self) {
        self.state = EntryState::Partial;
    }

    pub fn display(&self) -> Option<Display> {
        self.key_type.display(self.value()?)
    }

    pub fn edit_text(&self) -> Option<String> {
        self.key_type.edit_text(self.value()?)
    }

    /// The `{key, value}` pair that recreates this entry, if it is complete.
    pub fn construction_data(&self) -> Option<ConstructionData> {
        Some(ConstructionData::new(self.id(), self.edit_text()?))
    }

    /// The query fragment selecting this entry's value, if it has one.
    pub fn query(&self) -> Option<QueryFragment> {
        self.value().and_then(QueryFragment::for_value)
    }

    /// True if both entries share a type instance and hold equal values.
    pub fn equals(&self, other: &Entry) -> bool {
        self.key_type.is_equal(self, other)
    }

    /// Completions for a partially typed value of this entry.
    pub fn suggestions(&self, prefix: &str, context: &SuggestionContext<'_>) -> Vec<Suggestion> {
        self.key_type.suggestions(prefix, context)
    }
}
