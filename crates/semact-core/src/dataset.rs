//! Datasets — named collections of flat, schema-less records.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};

/// A single flat record: field name → JSON value. Field order is
/// preserved, so "the first field" of a record is meaningful. Nested
/// values are carried along but treated as opaque.
pub type Record = serde_json::Map<String, Value>;

/// An in-memory dataset: collection name → ordered records.
///
/// The exchange shape is a plain JSON object keyed by collection name,
/// each value an array of flat objects: what an application gets by
/// exporting every table to an array. No other metadata is carried.
///
/// Collections iterate in name order, so anything derived from a full
/// dataset walk is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dataset {
    collections: BTreeMap<String, Vec<Record>>,
}

impl Dataset {
    /// Create an empty dataset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a collection.
    pub fn insert(&mut self, name: impl Into<String>, records: Vec<Record>) {
        self.collections.insert(name.into(), records);
    }

    /// Records of a collection, if it exists.
    pub fn get(&self, name: &str) -> Option<&[Record]> {
        self.collections.get(name).map(Vec::as_slice)
    }

    /// Mutable records of a collection, if it exists.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Vec<Record>> {
        self.collections.get_mut(name)
    }

    /// Whether a collection with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.collections.contains_key(name)
    }

    /// Iterate collections in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<Record>)> {
        self.collections.iter()
    }

    /// Collection names in order.
    pub fn names(&self) -> impl Iterator<Item = &String> {
        self.collections.keys()
    }

    /// Number of collections.
    pub fn len(&self) -> usize {
        self.collections.len()
    }

    /// Whether the dataset has no collections.
    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }

    /// Total number of records across all collections.
    pub fn record_count(&self) -> usize {
        self.collections.values().map(Vec::len).sum()
    }
}

/// Union of field names across the first `sample` records, in first-seen
/// order. Records are schema-less, so this is the closest thing to a
/// column list a collection has.
pub fn field_names(records: &[Record], sample: usize) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut names = Vec::new();
    for record in records.iter().take(sample) {
        for key in record.keys() {
            if seen.insert(key.as_str()) {
                names.push(key.clone());
            }
        }
    }
    names
}

/// Render a scalar the way filters compare and index texts are built:
/// strings as-is, numbers and booleans via their decimal/literal form,
/// null as "null". Nested values fall back to compact JSON.
pub fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        value.as_object().expect("record literal").clone()
    }

    #[test]
    fn dataset_deserializes_from_plain_json_object() {
        let data: Dataset = serde_json::from_value(json!({
            "holders": [{"id": 1, "name": "Ana"}],
            "accounts": [{"id": 10, "holders_id": 1}],
        }))
        .unwrap();

        assert_eq!(data.len(), 2);
        assert_eq!(data.get("holders").unwrap().len(), 1);
        assert!(data.get("missing").is_none());
    }

    #[test]
    fn field_names_unions_in_first_seen_order() {
        let records = vec![
            record(json!({"id": 1, "name": "Ana"})),
            record(json!({"id": 2, "email": "b@x.io"})),
        ];
        assert_eq!(field_names(&records, 20), vec!["id", "name", "email"]);
    }

    #[test]
    fn field_names_respects_sample_limit() {
        let records = vec![
            record(json!({"id": 1})),
            record(json!({"extra": true})),
        ];
        assert_eq!(field_names(&records, 1), vec!["id"]);
    }

    #[test]
    fn scalar_text_renders_each_kind() {
        assert_eq!(scalar_text(&json!("HDFC")), "HDFC");
        assert_eq!(scalar_text(&json!(42)), "42");
        assert_eq!(scalar_text(&json!(2.5)), "2.5");
        assert_eq!(scalar_text(&json!(true)), "true");
        assert_eq!(scalar_text(&Value::Null), "null");
    }
}
