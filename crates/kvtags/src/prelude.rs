//! Prelude module for convenient imports.
//!
//! ```
//! use kvtags_rs::prelude::*;
//! ```

// Types
pub use crate::types::{
    BooleanType, DateConfig, DateType, KeyValue, KeyValueType, NumberConfig, NumberModifierType,
    NumberType, RegexType, RoundMode, SortType, Tag, TagConfig, TagType, TypeKind, ValueType,
};

// Entries
pub use crate::construction::{create_entries_from_types, ConstructionData};
pub use crate::entry::{Entry, EntryState};

// Suggestions
pub use crate::display::{Display, Suggestion, SuggestionList};
pub use crate::suggest::SuggestionContext;

// Sessions and configuration
pub use crate::config::{build_types, KindSpec, TypeSpec};
pub use crate::input::{InputMode, KeyValueInput};

// Queries
pub use crate::query::QueryFragment;

// Errors
pub use crate::error::{KeyValueError, KeyValueResult};
