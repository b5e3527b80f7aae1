//! The engine's similarity indices, built in one pass over a dataset
//! snapshot and swapped in whole.
//!
//! A build constructs the complete replacement off to the side; the engine
//! assigns it in one move, so a reader never observes a half-built index.

use crate::examples::{example_seeds, ExampleEntry};
use crate::values::{record_key, scan_records, ValueEntry};
use crate::EngineResult;
use semact_core::Dataset;
use semact_embeddings::Embedder;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// Both indices plus the key→position map used to resolve value matches
/// back to live records.
#[derive(Debug, Default)]
pub struct SemanticIndex {
    pub examples: Vec<ExampleEntry>,
    pub values: Vec<ValueEntry>,
    /// collection → record key → position at build time. Positions are a
    /// hint, re-validated on lookup; the key is the identity.
    positions: HashMap<String, HashMap<String, usize>>,
}

impl SemanticIndex {
    /// An index with nothing in it; proposals against it come back empty.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build both indices from a dataset snapshot.
    ///
    /// Collections are processed sequentially; each collection's example
    /// phrases and its value texts are embedded in one batch call apiece.
    pub async fn build(dataset: &Dataset, embedder: &dyn Embedder) -> EngineResult<Self> {
        let mut index = Self::empty();

        for (name, records) in dataset.iter() {
            let seeds = example_seeds(name, records);
            let texts: Vec<String> = seeds.iter().map(|s| s.text.clone()).collect();
            let vectors = embedder.embed_batch(&texts).await?;
            for (seed, embedding) in seeds.into_iter().zip(vectors) {
                index.examples.push(ExampleEntry {
                    collection: name.clone(),
                    intent: seed.intent,
                    text: seed.text,
                    meta: seed.meta,
                    embedding,
                });
            }

            let triples = scan_records(name, records);
            let texts: Vec<String> = triples.iter().map(|(_, _, text)| text.clone()).collect();
            let vectors = embedder.embed_batch(&texts).await?;
            for ((key, field, text), embedding) in triples.into_iter().zip(vectors) {
                index.values.push(ValueEntry {
                    collection: name.clone(),
                    record_key: key,
                    field,
                    text,
                    embedding,
                });
            }

            let mut by_key = HashMap::new();
            for (position, record) in records.iter().enumerate() {
                by_key.entry(record_key(name, record)).or_insert(position);
            }
            index.positions.insert(name.clone(), by_key);

            debug!(
                collection = %name,
                examples = index.examples.iter().filter(|e| &e.collection == name).count(),
                values = index.values.iter().filter(|v| &v.collection == name).count(),
                "indexed collection"
            );
        }

        Ok(index)
    }

    /// Resolve a record key back to the live record.
    ///
    /// The remembered position is only trusted if the record there still
    /// has the same key; otherwise the collection is scanned. Returns
    /// `None` when the record is gone: a stale match resolves to nothing
    /// rather than to the wrong record.
    pub fn resolve_record<'a>(
        &self,
        dataset: &'a Dataset,
        collection: &str,
        key: &str,
    ) -> Option<&'a semact_core::Record> {
        let records = dataset.get(collection)?;
        if let Some(&position) = self.positions.get(collection).and_then(|m| m.get(key)) {
            if let Some(record) = records.get(position) {
                if record_key(collection, record) == key {
                    return Some(record);
                }
            }
        }
        records.iter().find(|r| record_key(collection, r) == key)
    }

    /// Whether the index has anything to score against.
    pub fn is_empty(&self) -> bool {
        self.examples.is_empty() && self.values.is_empty()
    }

    /// Per-collection cardinalities.
    pub fn stats(&self) -> IndexStats {
        let mut collections: BTreeMap<String, CollectionStats> = BTreeMap::new();
        for entry in &self.examples {
            collections.entry(entry.collection.clone()).or_default().examples += 1;
        }
        for entry in &self.values {
            collections.entry(entry.collection.clone()).or_default().values += 1;
        }
        IndexStats {
            examples: self.examples.len(),
            values: self.values.len(),
            collections,
        }
    }
}

/// Index cardinalities, overall and per collection.
#[derive(Debug, Clone, Serialize)]
pub struct IndexStats {
    pub examples: usize,
    pub values: usize,
    pub collections: BTreeMap<String, CollectionStats>,
}

/// One collection's share of the index.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct CollectionStats {
    pub examples: usize,
    pub values: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use semact_core::Record;
    use semact_embeddings::HashEmbedder;
    use serde_json::json;

    fn dataset() -> Dataset {
        serde_json::from_value(json!({
            "holders": [
                {"id": 1, "name": "Swapnil"},
                {"id": 2, "name": "Ana"},
            ],
            "accounts": [
                {"id": 10, "holders_id": 1, "bank": "HDFC"},
            ],
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn build_counts_examples_and_values() {
        let data = dataset();
        let embedder = HashEmbedder::new(64);
        let index = SemanticIndex::build(&data, &embedder).await.unwrap();

        // 5 templates + 1 per record for each collection.
        assert_eq!(
            index.examples.len(),
            (5 + 1) + (5 + 2),
            "accounts: 5+1, holders: 5+2"
        );
        // accounts: 10, 1, "HDFC"; holders: 1, "Swapnil", 2, "Ana".
        assert_eq!(index.values.len(), 7);

        let stats = index.stats();
        assert_eq!(stats.collections["holders"].values, 4);
        assert_eq!(stats.collections["accounts"].values, 3);
    }

    #[tokio::test]
    async fn resolve_record_finds_by_stable_key() {
        let data = dataset();
        let embedder = HashEmbedder::new(64);
        let index = SemanticIndex::build(&data, &embedder).await.unwrap();

        let record = index.resolve_record(&data, "holders", "id:2").unwrap();
        assert_eq!(record.get("name"), Some(&json!("Ana")));
    }

    #[tokio::test]
    async fn resolve_record_survives_unretrained_mutation() {
        let mut data = dataset();
        let embedder = HashEmbedder::new(64);
        let index = SemanticIndex::build(&data, &embedder).await.unwrap();

        // Remove the first holder without retraining: positions shift.
        data.get_mut("holders").unwrap().remove(0);

        let record = index.resolve_record(&data, "holders", "id:2").unwrap();
        assert_eq!(record.get("name"), Some(&json!("Ana")));
        assert!(index.resolve_record(&data, "holders", "id:1").is_none());
    }

    #[tokio::test]
    async fn empty_index_is_empty() {
        let index = SemanticIndex::empty();
        assert!(index.is_empty());
        let embedder = HashEmbedder::new(16);
        let built = SemanticIndex::build(&Dataset::new(), &embedder).await.unwrap();
        assert!(built.is_empty());
    }

    #[tokio::test]
    async fn records_without_ids_get_hash_keys() {
        let mut data = Dataset::new();
        let record: Record = json!({"note": "hello"}).as_object().unwrap().clone();
        data.insert("notes", vec![record]);

        let embedder = HashEmbedder::new(32);
        let index = SemanticIndex::build(&data, &embedder).await.unwrap();
        let entry = index.values.iter().find(|v| v.field == "note").unwrap();
        assert!(entry.record_key.starts_with("h:"));
        assert!(index
            .resolve_record(&data, "notes", &entry.record_key)
            .is_some());
    }
}
