//! Value index — every short scalar in the dataset, embedded.
//!
//! Entries carry a stable record key rather than an array position, so a
//! match can still be resolved to the same logical record after the
//! collection has shifted underneath the index.

use crate::fk::singularize;
use semact_core::{scalar_text, Record};
use serde_json::Value;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Strings at or above this length are skipped.
pub const MAX_STRING_LEN: usize = 120;
/// Numbers whose decimal rendering exceeds this are skipped.
pub const MAX_NUMBER_LEN: usize = 12;

/// An embedded scalar field value.
#[derive(Debug, Clone)]
pub struct ValueEntry {
    pub collection: String,
    /// Stable record key (see [`record_key`]).
    pub record_key: String,
    pub field: String,
    /// The original value text the embedding was built from.
    pub text: String,
    pub embedding: Vec<f32>,
}

/// Index text for a value, if it is worth indexing. Strings must be
/// non-empty and short; numbers must render compactly. Everything else
/// (booleans, nulls, nested values, long text, long numerals) is skipped:
/// such values make poor short match targets and dilute the index.
pub fn indexable_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() && s.len() < MAX_STRING_LEN => Some(s.clone()),
        Value::Number(n) => {
            let text = n.to_string();
            (text.len() <= MAX_NUMBER_LEN).then_some(text)
        }
        _ => None,
    }
}

/// The identifier field of a record in `collection`: `id`,
/// `{collection}_id`, `{singular}_id`, or `_id`, first found.
pub fn identifier_field<'a>(collection: &str, record: &'a Record) -> Option<(&'a str, &'a Value)> {
    let singular = singularize(collection);
    let candidates = [
        "id".to_string(),
        format!("{collection}_id"),
        format!("{singular}_id"),
        "_id".to_string(),
    ];
    for name in &candidates {
        if let Some((key, value)) = record.get_key_value(name.as_str()) {
            return Some((key.as_str(), value));
        }
    }
    None
}

/// Stable key for a record: its identifier value when one exists, else a
/// structural hash of the whole record. Array positions are deliberately
/// not part of the key; they desync as soon as the collection mutates.
pub fn record_key(collection: &str, record: &Record) -> String {
    if let Some((_, value)) = identifier_field(collection, record) {
        return format!("id:{}", scalar_text(value));
    }
    let mut hasher = DefaultHasher::new();
    serde_json::to_string(record)
        .unwrap_or_default()
        .hash(&mut hasher);
    format!("h:{:016x}", hasher.finish())
}

/// (record key, field, text) triples for one collection's indexable
/// values, in record order.
pub fn scan_records(collection: &str, records: &[Record]) -> Vec<(String, String, String)> {
    let mut triples = Vec::new();
    for record in records {
        let key = record_key(collection, record);
        for (field, value) in record {
            if let Some(text) = indexable_text(value) {
                triples.push((key.clone(), field.clone(), text));
            }
        }
    }
    triples
}
