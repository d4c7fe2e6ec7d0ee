//! Headless key-value input session.
//!
//! A session turns typed text into entries. In multiple mode the user names
//! a type first and then its value, as in `price: >= 10`; in single mode
//! every value belongs to the one configured type.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use kvtags_rs::input::KeyValueInput;
//! use kvtags_rs::types::{BooleanType, KeyValueType, NumberType};
//!
//! let types = vec![
//!     Arc::new(KeyValueType::new("done", "Done", BooleanType::new())),
//!     Arc::new(KeyValueType::new("price", "Price", NumberType::new())),
//! ];
//! let mut input = KeyValueInput::multiple(types);
//! let leftover = input.feed("price: >= 10 done: nein");
//! assert!(leftover.is_empty());
//! assert_eq!(input.entries().len(), 2);
//! ```

mod session;

use std::sync::Arc;

use crate::types::KeyValueType;

pub use session::KeyValueInput;

/// Which types a session accepts.
#[derive(Debug, Clone)]
pub enum InputMode {
    /// Every value belongs to this type. A partial entry always exists.
    Single(Arc<KeyValueType>),
    /// Values are prefixed with the name of one of the types.
    Multiple {
        types: Vec<Arc<KeyValueType>>,
        /// Index into `types` of the type used for values typed without a key.
        fallback_type: Option<usize>,
    },
}

impl InputMode {
    /// The accepted types.
    pub fn types(&self) -> &[Arc<KeyValueType>] {
        match self {
            InputMode::Single(key_type) => std::slice::from_ref(key_type),
            InputMode::Multiple { types, .. } => types,
        }
    }

    /// The type used for values typed without a key.
    pub fn fallback_type(&self) -> Option<&Arc<KeyValueType>> {
        match self {
            InputMode::Single(_) => None,
            InputMode::Multiple {
                types,
                fallback_type,
            } => fallback_type.and_then(|index| types.get(index)),
        }
    }

    pub fn is_single(&self) -> bool {
        matches!(self, InputMode::Single(_))
    }
}
