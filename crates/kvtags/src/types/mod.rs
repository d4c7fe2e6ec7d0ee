//! Key-value type definitions.
//!
//! Each type parses one kind of value from user input, validates values
//! coming from structured data, renders values for display and editing, and
//! produces autocomplete suggestions.
//!
//! # Kinds
//!
//! - [`BooleanType`]: `ja`, `yes`, `true`, `1`, `✓` / `nein`, `no`, `0`, `✗`
//! - [`SortType`]: `asc`, `up`, `+` / `desc`, `down`, `-`
//! - [`NumberType`]: comparisons such as `>= 1,000` or `≠ 3.5`
//! - [`DateType`]: comparisons such as `< 2024-05-01` or `≥ 03-15`
//! - [`NumberModifierType`]: arithmetic such as `+5` or `÷ 3`
//! - [`RegexType`]: literal text, `"quoted phrases"` or `/pattern/flags`
//! - [`TagType`]: tags from a configured vocabulary
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use kvtags_rs::types::{KeyValueType, NumberType};
//!
//! let price = Arc::new(KeyValueType::new("price", "Price", NumberType::new()));
//! let entry = price.try_create_full_entry(">= 10").unwrap();
//! assert_eq!(entry.edit_text().as_deref(), Some("≥ 10"));
//! ```

mod boolean;
mod comparison;
mod date;
mod modifier;
mod number;
mod numeric;
mod regex;
mod sort;
mod tag;

use std::sync::Arc;

use serde::Serialize;

use crate::display::{Display, Suggestion};
use crate::entry::Entry;
use crate::suggest::SuggestionContext;

pub use self::regex::{RegexType, RegexValue};
pub use boolean::{BooleanType, FALSE_VALUES, TRUE_VALUES};
pub use date::{DateConfig, DateType, DateValue};
pub use modifier::{ModifierValue, NumberModifierType, RoundMode};
pub use number::{NumberConfig, NumberType, NumberValue};
pub use numeric::{NumberDelimiters, NumberFormat};
pub use sort::{SortDirection, SortType, ASCENDING_VALUES, DESCENDING_VALUES};
pub use tag::{Tag, TagConfig, TagType};

/// The typed contract every kind of value implements.
pub trait ValueType {
    /// The parsed value.
    type Value: Clone + PartialEq;

    /// Completions for a partially typed value.
    fn suggestions(&self, prefix: &str) -> Vec<Suggestion>;

    /// Parses user input, ignoring surrounding whitespace.
    fn parse_str(&self, raw: &str) -> Option<Self::Value>;

    /// Validates structured data.
    fn check_value(&self, value: &serde_json::Value) -> Option<Self::Value>;

    /// Renders a value for display.
    fn display(&self, value: &Self::Value) -> Display;

    /// Renders a value as text that `parse_str` reads back as an equal value.
    fn edit_text(&self, value: &Self::Value) -> String;

    /// Compares two values.
    fn value_eq(&self, a: &Self::Value, b: &Self::Value) -> bool {
        a == b
    }
}

/// The closed set of value kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeKind {
    Boolean(BooleanType),
    Sort(SortType),
    Number(NumberType),
    Date(DateType),
    NumberModifier(NumberModifierType),
    Regex(RegexType),
    Tag(TagType),
}

impl TypeKind {
    /// Returns the kind name used in configuration files.
    pub fn name(&self) -> &'static str {
        match self {
            TypeKind::Boolean(_) => "boolean",
            TypeKind::Sort(_) => "sort",
            TypeKind::Number(_) => "number",
            TypeKind::Date(_) => "date",
            TypeKind::NumberModifier(_) => "number_modifier",
            TypeKind::Regex(_) => "regex",
            TypeKind::Tag(_) => "tag",
        }
    }
}

impl From<BooleanType> for TypeKind {
    fn from(kind: BooleanType) -> Self {
        TypeKind::Boolean(kind)
    }
}

impl From<SortType> for TypeKind {
    fn from(kind: SortType) -> Self {
        TypeKind::Sort(kind)
    }
}

impl From<NumberType> for TypeKind {
    fn from(kind: NumberType) -> Self {
        TypeKind::Number(kind)
    }
}

impl From<DateType> for TypeKind {
    fn from(kind: DateType) -> Self {
        TypeKind::Date(kind)
    }
}

impl From<NumberModifierType> for TypeKind {
    fn from(kind: NumberModifierType) -> Self {
        TypeKind::NumberModifier(kind)
    }
}

impl From<RegexType> for TypeKind {
    fn from(kind: RegexType) -> Self {
        TypeKind::Regex(kind)
    }
}

impl From<TagType> for TypeKind {
    fn from(kind: TagType) -> Self {
        TypeKind::Tag(kind)
    }
}

/// A parsed value of any kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum KeyValue {
    Boolean(bool),
    Sort(SortDirection),
    Number(NumberValue),
    Date(DateValue),
    NumberModifier(ModifierValue),
    Regex(RegexValue),
    Tag(Tag),
}

/// A named key-value type.
///
/// Types are immutable after construction and shared between entries
/// through `Arc`. Entry equality requires both entries to reference the
/// same type instance.
#[derive(Debug)]
pub struct KeyValueType {
    id: String,
    label: String,
    aliases: Vec<String>,
    kind: TypeKind,
}

impl KeyValueType {
    /// Creates a type. The id and label are registered as aliases.
    pub fn new(id: impl Into<String>, label: impl Into<String>, kind: impl Into<TypeKind>) -> Self {
        let id = id.into();
        let label = label.into();
        let aliases = vec![id.to_lowercase(), label.to_lowercase()];
        Self {
            id,
            label,
            aliases,
            kind: kind.into(),
        }
    }

    /// Registers additional aliases.
    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.aliases
            .extend(aliases.into_iter().map(|alias| alias.as_ref().to_lowercase()));
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Lowercase aliases, starting with the id and the label.
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn kind(&self) -> &TypeKind {
        &self.kind
    }

    /// Returns true if both references point to the same instance.
    pub fn is_same(&self, other: &KeyValueType) -> bool {
        std::ptr::eq(self, other)
    }

    /// Returns the first alias containing `substring`, ignoring case.
    pub fn find_alias(&self, substring: &str) -> Option<&str> {
        let lowered = substring.to_lowercase();
        self.aliases
            .iter()
            .find(|alias| alias.contains(&lowered))
            .map(String::as_str)
    }

    /// Returns true if `key` equals one of the aliases, ignoring case.
    pub fn has_alias(&self, key: &str) -> bool {
        let lowered = key.to_lowercase();
        self.aliases.iter().any(|alias| *alias == lowered)
    }

    // ===== Entry creation =====

    /// Creates an entry without a value.
    pub fn create_partial_entry(self: &Arc<Self>) -> Entry {
        Entry::partial(Arc::clone(self))
    }

    /// Creates a partial entry if `key` is one of the aliases.
    pub fn try_create_partial_entry(self: &Arc<Self>, key: &str) -> Option<Entry> {
        self.has_alias(key).then(|| self.create_partial_entry())
    }

    /// Creates an entry from user input. Fails if the input does not parse.
    pub fn try_create_full_entry(self: &Arc<Self>, raw: &str) -> Option<Entry> {
        let mut entry = self.create_partial_entry();
        entry.set(raw).then_some(entry)
    }

    /// Creates an entry from structured data. Strings are parsed, anything
    /// else is validated.
    pub fn try_create_full_entry_from(
        self: &Arc<Self>,
        value: &serde_json::Value,
    ) -> Option<Entry> {
        let mut entry = self.create_partial_entry();
        entry.set_value(value).then_some(entry)
    }

    // ===== Type contract =====

    /// Completions for a partially typed value.
    ///
    /// Tag types leave out tags already held by entries of this type when
    /// the context disallows duplicates.
    pub fn suggestions(&self, prefix: &str, context: &SuggestionContext<'_>) -> Vec<Suggestion> {
        match &self.kind {
            TypeKind::Boolean(kind) => kind.suggestions(prefix),
            TypeKind::Sort(kind) => kind.suggestions(prefix),
            TypeKind::Number(kind) => kind.suggestions(prefix),
            TypeKind::Date(kind) => kind.suggestions(prefix),
            TypeKind::NumberModifier(kind) => kind.suggestions(prefix),
            TypeKind::Regex(kind) => kind.suggestions(prefix),
            TypeKind::Tag(kind) if context.allow_duplicates => kind.suggestions(prefix),
            TypeKind::Tag(kind) => {
                let taken: Vec<&Tag> = context
                    .entries
                    .iter()
                    .chain(context.default_entries)
                    .filter(|entry| entry.key_type().is_same(self))
                    .filter_map(|entry| match entry.value() {
                        Some(KeyValue::Tag(tag)) => Some(tag),
                        _ => None,
                    })
                    .collect();
                kind.suggestions_excluding(prefix, &taken)
            }
        }
    }

    /// Parses user input.
    pub fn parse_str(&self, raw: &str) -> Option<KeyValue> {
        match &self.kind {
            TypeKind::Boolean(kind) => kind.parse_str(raw).map(KeyValue::Boolean),
            TypeKind::Sort(kind) => kind.parse_str(raw).map(KeyValue::Sort),
            TypeKind::Number(kind) => kind.parse_str(raw).map(KeyValue::Number),
            TypeKind::Date(kind) => kind.parse_str(raw).map(KeyValue::Date),
            TypeKind::NumberModifier(kind) => kind.parse_str(raw).map(KeyValue::NumberModifier),
            TypeKind::Regex(kind) => kind.parse_str(raw).map(KeyValue::Regex),
            TypeKind::Tag(kind) => kind.parse_str(raw).map(KeyValue::Tag),
        }
    }

    /// Validates structured data.
    pub fn check_value(&self, value: &serde_json::Value) -> Option<KeyValue> {
        match &self.kind {
            TypeKind::Boolean(kind) => kind.check_value(value).map(KeyValue::Boolean),
            TypeKind::Sort(kind) => kind.check_value(value).map(KeyValue::Sort),
            TypeKind::Number(kind) => kind.check_value(value).map(KeyValue::Number),
            TypeKind::Date(kind) => kind.check_value(value).map(KeyValue::Date),
            TypeKind::NumberModifier(kind) => kind.check_value(value).map(KeyValue::NumberModifier),
            TypeKind::Regex(kind) => kind.check_value(value).map(KeyValue::Regex),
            TypeKind::Tag(kind) => kind.check_value(value).map(KeyValue::Tag),
        }
    }

    /// Renders a value. Returns `None` for values of another kind.
    pub fn display(&self, value: &KeyValue) -> Option<Display> {
        let display = match (&self.kind, value) {
            (TypeKind::Boolean(kind), KeyValue::Boolean(v)) => kind.display(v),
            (TypeKind::Sort(kind), KeyValue::Sort(v)) => kind.display(v),
            (TypeKind::Number(kind), KeyValue::Number(v)) => kind.display(v),
            (TypeKind::Date(kind), KeyValue::Date(v)) => kind.display(v),
            (TypeKind::NumberModifier(kind), KeyValue::NumberModifier(v)) => kind.display(v),
            (TypeKind::Regex(kind), KeyValue::Regex(v)) => kind.display(v),
            (TypeKind::Tag(kind), KeyValue::Tag(v)) => kind.display(v),
            _ => return None,
        };
        Some(display)
    }

    /// Renders a value as editable text. Returns `None` for values of another kind.
    pub fn edit_text(&self, value: &KeyValue) -> Option<String> {
        let text = match (&self.kind, value) {
            (TypeKind::Boolean(kind), KeyValue::Boolean(v)) => kind.edit_text(v),
            (TypeKind::Sort(kind), KeyValue::Sort(v)) => kind.edit_text(v),
            (TypeKind::Number(kind), KeyValue::Number(v)) => kind.edit_text(v),
            (TypeKind::Date(kind), KeyValue::Date(v)) => kind.edit_text(v),
            (TypeKind::NumberModifier(kind), KeyValue::NumberModifier(v)) => kind.edit_text(v),
            (TypeKind::Regex(kind), KeyValue::Regex(v)) => kind.edit_text(v),
            (TypeKind::Tag(kind), KeyValue::Tag(v)) => kind.edit_text(v),
            _ => return None,
        };
        Some(text)
    }

    /// Compares two values of this type.
    pub fn values_equal(&self, a: &KeyValue, b: &KeyValue) -> bool {
        match (&self.kind, a, b) {
            (TypeKind::Boolean(kind), KeyValue::Boolean(a), KeyValue::Boolean(b)) => {
                kind.value_eq(a, b)
            }
            (TypeKind::Sort(kind), KeyValue::Sort(a), KeyValue::Sort(b)) => kind.value_eq(a, b),
            (TypeKind::Number(kind), KeyValue::Number(a), KeyValue::Number(b)) => {
                kind.value_eq(a, b)
            }
            (TypeKind::Date(kind), KeyValue::Date(a), KeyValue::Date(b)) => kind.value_eq(a, b),
            (
                TypeKind::NumberModifier(kind),
                KeyValue::NumberModifier(a),
                KeyValue::NumberModifier(b),
            ) => kind.value_eq(a, b),
            (TypeKind::Regex(kind), KeyValue::Regex(a), KeyValue::Regex(b)) => kind.value_eq(a, b),
            (TypeKind::Tag(kind), KeyValue::Tag(a), KeyValue::Tag(b)) => kind.value_eq(a, b),
            _ => false,
        }
    }

    /// Entries are equal when they share this type instance and their
    /// values are equal. Two partial entries of the same type are equal.
    pub fn is_equal(&self, a: &Entry, b: &Entry) -> bool {
        if !a.key_type().is_same(b.key_type()) {
            return false;
        }
        match (a.value(), b.value()) {
            (None, None) => true,
            (Some(a), Some(b)) => self.values_equal(a, b),
            _ => false,
        }
    }
}
