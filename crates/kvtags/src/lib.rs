//! Typed key-value tag parsing.
//!
//! Free-text input such as `price: >= 10 due: < 2024-05-01 "big sale"` is
//! parsed token by token into typed entries. Every entry can be rendered for
//! display and editing and projected into a query fragment.
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use kvtags_rs::prelude::*;
//!
//! let price = Arc::new(KeyValueType::new("price", "Price", NumberType::new()));
//! let mut entry = price.create_partial_entry();
//!
//! assert!(entry.set("≥ 1,000"));
//! assert_eq!(entry.edit_text().as_deref(), Some("≥ 1000"));
//! assert!(entry.query().is_some());
//! ```

pub mod config;
pub mod construction;
pub mod display;
pub mod entry;
pub mod error;
pub mod input;
pub mod operators;
pub mod prelude;
pub mod query;
pub mod suggest;
pub mod text;
pub mod types;
