//! Building entries in bulk from stored `{key, value}` pairs.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::entry::Entry;
use crate::types::KeyValueType;

/// A `{key, value}` pair that recreates an entry.
///
/// `value` is either user input as a string or structured data that the
/// type validates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstructionData {
    pub key: String,
    pub value: serde_json::Value,
}

impl ConstructionData {
    pub fn new(key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Creates an entry for every pair whose key is the id of one of `types`
/// and whose value is accepted by that type.
///
/// Pairs with unknown keys or invalid values are skipped. Only the first
/// type with a matching id is tried.
pub fn create_entries_from_types(
    pairs: &[ConstructionData],
    types: &[Arc<KeyValueType>],
) -> Vec<Entry> {
    pairs
        .iter()
        .filter_map(|pair| {
            let Some(key_type) = types.iter().find(|t| t.id() == pair.key) else {
                debug!(key = %pair.key, "Dropping entry with unknown key");
                return None;
            };
            let entry = key_type.try_create_full_entry_from(&pair.value);
            if entry.is_none() {
                debug!(key = %pair.key, value = %pair.value, "Dropping entry with invalid value");
            }
            entry
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BooleanType, NumberType, RegexType};
    use serde_json::json;

    fn types() -> Vec<Arc<KeyValueType>> {
        vec![
            Arc::new(KeyValueType::new("num", "Number", NumberType::new())),
            Arc::new(KeyValueType::new("flag", "Flag", BooleanType::new())),
            Arc::new(KeyValueType::new("num", "Other number", RegexType::new())),
        ]
    }

    #[test]
    fn test_unmatched_and_invalid_pairs_are_dropped() {
        let pairs = vec![
            ConstructionData::new("num", "> 3"),
            ConstructionData::new("unknown", "x"),
            ConstructionData::new("flag", "maybe"),
            ConstructionData::new("flag", json!(false)),
        ];
        let entries = create_entries_from_types(&pairs, &types());
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].id(), "num");
        assert_eq!(entries[0].edit_text().as_deref(), Some("> 3"));
        assert_eq!(entries[1].edit_text().as_deref(), Some("nein"));
    }

    #[test]
    fn test_only_first_matching_type_is_tried() {
        let pairs = vec![ConstructionData::new("num", "abc")];
        assert!(create_entries_from_types(&pairs, &types()).is_empty());
    }

    #[test]
    fn test_construction_data_round_trip() {
        let types = types();
        let entry = types[0].try_create_full_entry("<= 7").unwrap();
        let data = entry.construction_data().unwrap();
        let rebuilt = create_entries_from_types(&[data], &types);
        assert_eq!(rebuilt.len(), 1);
        assert!(rebuilt[0].equals(&entry));
    }

    #[test]
    fn test_construction_data_deserializes() {
        let pairs: Vec<ConstructionData> = serde_json::from_value(json!([
            { "key": "flag", "value": "ja" },
            { "key": "num", "value": { "operator": "<", "number": 2 } },
        ]))
        .unwrap();
        let entries = create_entries_from_types(&pairs, &types());
        assert_eq!(entries.len(), 2);
    }
}
