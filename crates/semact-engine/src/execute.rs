//! Applying a chosen candidate to the live dataset.
//!
//! Executions are synchronous and immediately visible through the same
//! dataset; there is no rollback across multiple executions. Usage errors
//! (unknown collection, missing filter) are raised before anything
//! mutates.

use crate::{EngineError, EngineResult};
use semact_core::{scalar_text, ActionCandidate, Dataset, Intent, Record};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

/// What an execution produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// Matched (or all) records, cloned out of the dataset; for update,
    /// the post-merge state.
    Records(Vec<Record>),
    /// The newly created record.
    Created(Record),
    /// How many records a delete removed.
    Deleted(usize),
}

/// Apply a candidate to the dataset.
///
/// Filters are equality conjunctions compared on stringified scalars:
/// values are often numbers in storage and strings in filters, and the
/// loose comparison makes both sides meet.
pub fn execute(dataset: &mut Dataset, candidate: &ActionCandidate) -> EngineResult<Outcome> {
    if !dataset.contains(&candidate.collection) {
        return Err(EngineError::UnknownCollection(candidate.collection.clone()));
    }

    let outcome = match candidate.intent {
        Intent::Read => read(dataset, candidate)?,
        Intent::Create => create(dataset, candidate)?,
        Intent::Update => update(dataset, candidate)?,
        Intent::Delete => delete(dataset, candidate)?,
    };
    debug!(
        intent = candidate.intent.as_str(),
        collection = %candidate.collection,
        "executed action"
    );
    Ok(outcome)
}

fn matches(record: &Record, filter: &BTreeMap<String, Value>) -> bool {
    filter.iter().all(|(field, expected)| {
        record
            .get(field)
            .is_some_and(|actual| scalar_text(actual) == scalar_text(expected))
    })
}

fn required_filter<'a>(
    candidate: &'a ActionCandidate,
) -> EngineResult<&'a BTreeMap<String, Value>> {
    candidate
        .filter
        .as_ref()
        .filter(|f| !f.is_empty())
        .ok_or_else(|| EngineError::MissingFilter {
            intent: candidate.intent,
            collection: candidate.collection.clone(),
        })
}

fn unknown(candidate: &ActionCandidate) -> EngineError {
    EngineError::UnknownCollection(candidate.collection.clone())
}

fn read(dataset: &Dataset, candidate: &ActionCandidate) -> EngineResult<Outcome> {
    let records = dataset
        .get(&candidate.collection)
        .ok_or_else(|| unknown(candidate))?;
    Ok(match candidate.filter.as_ref().filter(|f| !f.is_empty()) {
        None => Outcome::Records(records.to_vec()),
        Some(filter) => Outcome::Records(
            records
                .iter()
                .filter(|r| matches(r, filter))
                .cloned()
                .collect(),
        ),
    })
}

fn create(dataset: &mut Dataset, candidate: &ActionCandidate) -> EngineResult<Outcome> {
    let records = dataset
        .get_mut(&candidate.collection)
        .ok_or_else(|| unknown(candidate))?;

    let mut record = candidate.patch.clone().unwrap_or_default();
    let id_bearing = records.is_empty() || records.iter().any(|r| r.contains_key("id"));
    if id_bearing && !record.contains_key("id") {
        let next = records
            .iter()
            .filter_map(|r| r.get("id").and_then(Value::as_i64))
            .max()
            .map_or(1, |max| max + 1);
        record.insert("id".to_string(), Value::from(next));
    }

    records.push(record.clone());
    Ok(Outcome::Created(record))
}

fn update(dataset: &mut Dataset, candidate: &ActionCandidate) -> EngineResult<Outcome> {
    let filter = required_filter(candidate)?;
    let records = dataset
        .get_mut(&candidate.collection)
        .ok_or_else(|| unknown(candidate))?;

    let mut touched = Vec::new();
    for record in records.iter_mut().filter(|r| matches(r, filter)) {
        if let Some(patch) = &candidate.patch {
            for (field, value) in patch {
                record.insert(field.clone(), value.clone());
            }
        }
        touched.push(record.clone());
    }
    Ok(Outcome::Records(touched))
}

fn delete(dataset: &mut Dataset, candidate: &ActionCandidate) -> EngineResult<Outcome> {
    let filter = required_filter(candidate)?;
    let records = dataset
        .get_mut(&candidate.collection)
        .ok_or_else(|| unknown(candidate))?;

    let before = records.len();
    records.retain(|r| !matches(r, filter));
    Ok(Outcome::Deleted(before - records.len()))
}
