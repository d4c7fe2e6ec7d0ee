//! Integration tests for the documented parsing scenarios.
//!
//! These tests drive the public API only: types, entries, suggestions,
//! construction helpers and query fragments.

use std::sync::Arc;

use kvtags_rs::construction::{create_entries_from_types, ConstructionData};
use kvtags_rs::display::Display;
use kvtags_rs::operators::{comp_selector_of, comp_symbol_of, COMP_OPS_AND_SYMBOLS};
use kvtags_rs::query::QueryFragment;
use kvtags_rs::suggest::SuggestionContext;
use kvtags_rs::types::{
    BooleanType, DateType, KeyValue, KeyValueType, ModifierValue, NumberModifierType, NumberType,
    RegexType, RoundMode, TagType, ValueType,
};
use kvtags_rs::error::KeyValueError;
use serde_json::json;

// ============================================================================
// Operators
// ============================================================================

#[test]
fn test_symbol_lookup_is_idempotent() {
    for token in COMP_OPS_AND_SYMBOLS {
        assert_eq!(comp_symbol_of(comp_symbol_of(token)), comp_symbol_of(token));
    }
}

#[test]
fn test_selector_lookup_rejects_symbols() {
    assert!(comp_selector_of(">=").is_ok());
    assert!(matches!(
        comp_selector_of("≥"),
        Err(KeyValueError::InvalidOperator { .. })
    ));
}

// ============================================================================
// Parsing
// ============================================================================

#[test]
fn test_number_entry_from_plain_number() {
    let price = Arc::new(KeyValueType::new("price", "Price", NumberType::new()));
    let entry = price.try_create_full_entry("42").unwrap();
    assert_eq!(entry.edit_text().as_deref(), Some("= 42"));

    let implicit = price.try_create_full_entry("5").unwrap();
    let explicit = price.try_create_full_entry("=5").unwrap();
    assert!(implicit.equals(&explicit));
}

#[test]
fn test_boolean_inputs() {
    let boolean = BooleanType::new();
    assert_eq!(boolean.parse_str("JA"), Some(true));
    assert_eq!(boolean.parse_str("nein"), Some(false));
    assert_eq!(boolean.parse_str(""), Some(true));
    assert_eq!(boolean.parse_str("maybe"), None);
}

#[test]
fn test_impossible_date_does_not_create_entry() {
    let due = Arc::new(KeyValueType::new("due", "Due", DateType::new()));
    assert!(due.try_create_full_entry("2024-13-40").is_none());
}

#[test]
fn test_regex_literal_versus_pattern() {
    let regex = RegexType::new();

    let literal = regex.parse_str("a.b").unwrap();
    assert_eq!((literal.regex.as_str(), literal.options.as_str()), ("a\\.b", "i"));

    let pattern = regex.parse_str("/a.b/i").unwrap();
    assert_eq!((pattern.regex.as_str(), pattern.options.as_str()), ("a.b", "i"));
    assert_eq!(
        regex.display(&pattern),
        Display::html("<code>/</code>a.b<code>/i</code>")
    );
}

// ============================================================================
// Number modifiers
// ============================================================================

#[test]
fn test_modifier_apply() {
    let modifier = NumberModifierType::new();

    let add = modifier.parse_str("+5").unwrap();
    assert_eq!(NumberModifierType::apply(&add, 10.0, RoundMode::Not), 15.0);

    let divide = modifier.parse_str("/3").unwrap();
    assert_eq!(NumberModifierType::apply(&divide, 10.0, RoundMode::Up), 4.0);
    assert_eq!(divide, ModifierValue::new(kvtags_rs::operators::MathOperator::Divide, 3.0));
}

// ============================================================================
// Suggestions
// ============================================================================

#[test]
fn test_tag_duplicates_are_suppressed() {
    let tags = Arc::new(KeyValueType::new(
        "tag",
        "Tag",
        TagType::from_values(["a", "b"], false),
    ));
    let entries = vec![tags.try_create_full_entry("a").unwrap()];
    let context = SuggestionContext {
        entries: &entries,
        default_entries: &[],
        allow_duplicates: false,
    };
    let suggestions = tags.suggestions("", &context);
    let values: Vec<_> = suggestions.iter().map(|s| s.value.as_str()).collect();
    assert_eq!(values, ["b"]);
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_construction_drops_unknown_keys() {
    let types = vec![
        Arc::new(KeyValueType::new("x", "X", BooleanType::new())),
        Arc::new(KeyValueType::new("y", "Y", NumberType::new())),
    ];
    let pairs = [
        ConstructionData::new("x", "ja"),
        ConstructionData::new("z", "1"),
    ];
    let entries = create_entries_from_types(&pairs, &types);
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].id(), "x");
    assert_eq!(entries[0].value(), Some(&KeyValue::Boolean(true)));
}

// ============================================================================
// Queries
// ============================================================================

#[test]
fn test_entries_project_to_query_fragments() {
    let price = Arc::new(KeyValueType::new("price", "Price", NumberType::new()));
    let entry = price.try_create_full_entry("≥ 10").unwrap();
    assert_eq!(
        serde_json::to_value(entry.query().unwrap()).unwrap(),
        json!({ "type": "number", "key": "gte", "operand": 10.0 })
    );

    let adjust = Arc::new(KeyValueType::new("adjust", "Adjust", NumberModifierType::new()));
    let entry = adjust.try_create_full_entry("+1").unwrap();
    assert_eq!(entry.query(), None::<QueryFragment>);
}
