//! Example index — synthetic phrases for intent classification.
//!
//! Each collection contributes a handful of template phrases per CRUD
//! intent plus up to ten read phrases anchored at real records. Their
//! embeddings are what an incoming query is scored against to decide
//! what kind of operation it asks for, and where.

use semact_core::{field_names, scalar_text, Intent, Record};

/// How many records the field-name union samples.
pub const FIELD_SAMPLE: usize = 20;
/// How many records contribute a record-derived read phrase.
pub const RECORD_EXAMPLES: usize = 10;

/// Record-derived anchor carried on a generated example: the field and
/// value the phrase was built from. Not consumed by the proposer today;
/// kept so matched examples can be explained later.
#[derive(Debug, Clone, PartialEq)]
pub struct ExampleMeta {
    pub field: String,
    pub value: String,
}

/// A phrase generated for one (collection, intent) pair, before embedding.
#[derive(Debug, Clone)]
pub struct ExampleSeed {
    pub intent: Intent,
    pub text: String,
    pub meta: Option<ExampleMeta>,
}

/// An embedded example phrase, tagged with its originating collection.
#[derive(Debug, Clone)]
pub struct ExampleEntry {
    pub collection: String,
    pub intent: Intent,
    pub text: String,
    pub meta: Option<ExampleMeta>,
    pub embedding: Vec<f32>,
}

fn seed(intent: Intent, text: String) -> ExampleSeed {
    ExampleSeed {
        intent,
        text,
        meta: None,
    }
}

/// Generate the synthetic phrases for one collection: five intent
/// templates over the collection's leading fields, then one "show X for
/// field value" read phrase per sampled record.
pub fn example_seeds(collection: &str, records: &[Record]) -> Vec<ExampleSeed> {
    let fields = field_names(records, FIELD_SAMPLE);
    let first = fields.first().cloned().unwrap_or_else(|| "id".to_string());
    let second = fields.get(1).cloned().unwrap_or_else(|| first.clone());

    let mut seeds = vec![
        seed(Intent::Read, format!("Show me all {collection}")),
        seed(
            Intent::Read,
            format!("List {collection} where {first} equals 1"),
        ),
        seed(
            Intent::Create,
            format!("Add a new {collection} with {first} 'test'"),
        ),
        seed(
            Intent::Update,
            format!("Update {collection} where {first} is 1 and set {second} to 'X'"),
        ),
        seed(
            Intent::Delete,
            format!("Delete {collection} with {first} = 1"),
        ),
    ];

    for record in records.iter().take(RECORD_EXAMPLES) {
        let Some((field, value)) = record.iter().next() else {
            continue;
        };
        let value = scalar_text(value);
        seeds.push(ExampleSeed {
            intent: Intent::Read,
            text: format!("Show {collection} for {field} {value}"),
            meta: Some(ExampleMeta {
                field: field.clone(),
                value,
            }),
        });
    }

    seeds
}
