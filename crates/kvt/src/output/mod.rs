//! Output formatting utilities for the kvt CLI.
//!
//! This module provides functions for formatting data as tables or JSON.
//! It is organized into submodules:
//!
//! - [`entries`] - Parsed entries and query fragments (parse, query)
//! - [`suggestions`] - Suggestion lists and configured types (suggest, types)
//! - [`helpers`] - Common formatting utilities (truncation, highlights, dates)

mod entries;
pub mod helpers;
mod suggestions;

// Entries
pub use entries::{
    format_entries_json, format_entries_table, format_queries_json, format_queries_table,
};

// Suggestions
pub use suggestions::{
    format_suggestions_json, format_suggestions_table, format_types_json, format_types_table,
};
