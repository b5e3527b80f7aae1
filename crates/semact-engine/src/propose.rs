//! The action proposer — blends intent and value signals into candidates.
//!
//! Intent scoring answers *what kind of operation on which collection*;
//! value scoring answers *which record*. Foreign-key resolution bridges
//! the two when the literal mentioned in the query belongs to a different
//! collection than the one being acted on: in "show accounts for Swapnil",
//! "Swapnil" lives in `holders` while the action targets `accounts`.

use crate::engine::EngineConfig;
use crate::examples::{ExampleEntry, FIELD_SAMPLE};
use crate::fk::ForeignKeyMatcher;
use crate::index::SemanticIndex;
use crate::rank::dedupe_and_rank;
use crate::values::{identifier_field, ValueEntry};
use semact_core::{field_names, scalar_text, ActionCandidate, Dataset, Provenance};
use semact_embeddings::cosine_similarity;
use tracing::trace;

struct IntentMatch<'a> {
    entry: &'a ExampleEntry,
    score: f32,
}

struct ValueMatch<'a> {
    entry: &'a ValueEntry,
    /// Cosine score plus the exact-mention bonus.
    adjusted: f32,
}

/// Rank candidate actions for an embedded query.
pub(crate) fn propose(
    index: &SemanticIndex,
    dataset: &Dataset,
    fk: &dyn ForeignKeyMatcher,
    config: &EngineConfig,
    query: &str,
    query_vec: &[f32],
    top_k: usize,
) -> Vec<ActionCandidate> {
    let intents = top_intent_matches(index, query_vec, top_k);
    let values = top_value_matches(index, query_vec, query, config);
    trace!(
        intents = intents.len(),
        values = values.len(),
        "scored query against indices"
    );

    let mut candidates = Vec::new();
    for intent in &intents {
        let collection = &intent.entry.collection;

        // Base candidate: covers "show me all X" style queries.
        candidates.push(ActionCandidate::new(
            intent.entry.intent,
            collection.clone(),
            intent.score,
        ));

        let (same, cross): (Vec<&ValueMatch>, Vec<&ValueMatch>) = values
            .iter()
            .partition(|m| &m.entry.collection == collection);

        for value in same.into_iter().take(config.max_direct_filters) {
            candidates.push(direct_candidate(intent, value, config));
        }

        candidates.extend(fk_candidates(index, dataset, fk, config, intent, &cross));
    }

    dedupe_and_rank(candidates)
}

/// Top `top_k` example entries by cosine similarity, across all
/// collections and intents.
fn top_intent_matches<'a>(
    index: &'a SemanticIndex,
    query_vec: &[f32],
    top_k: usize,
) -> Vec<IntentMatch<'a>> {
    let mut matches: Vec<IntentMatch> = index
        .examples
        .iter()
        .map(|entry| IntentMatch {
            entry,
            score: cosine_similarity(query_vec, &entry.embedding),
        })
        .collect();
    matches.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    matches.truncate(top_k);
    matches
}

/// Top value entries by cosine similarity, re-ordered after the
/// exact-mention bonus so literal mentions dominate embedding noise.
fn top_value_matches<'a>(
    index: &'a SemanticIndex,
    query_vec: &[f32],
    query: &str,
    config: &EngineConfig,
) -> Vec<ValueMatch<'a>> {
    let query_lower = query.to_lowercase();
    let mut scored: Vec<(f32, &ValueEntry)> = index
        .values
        .iter()
        .map(|entry| (cosine_similarity(query_vec, &entry.embedding), entry))
        .collect();
    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
    scored.truncate(config.top_values);

    let mut matches: Vec<ValueMatch> = scored
        .into_iter()
        .map(|(score, entry)| {
            let mentioned = query_lower.contains(&entry.text.to_lowercase());
            ValueMatch {
                entry,
                adjusted: if mentioned {
                    score + config.exact_bonus
                } else {
                    score
                },
            }
        })
        .collect();
    matches.sort_by(|a, b| {
        b.adjusted
            .partial_cmp(&a.adjusted)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    matches
}

/// Weighted blend of an intent score and a value score.
fn blend(config: &EngineConfig, intent: f32, value: f32) -> f32 {
    intent * config.intent_blend + value * (1.0 - config.intent_blend)
}

/// A filter on the acted-on collection itself: the matched value's field
/// equals its text.
fn direct_candidate(
    intent: &IntentMatch,
    value: &ValueMatch,
    config: &EngineConfig,
) -> ActionCandidate {
    let entry = value.entry;
    let summary = format!(
        "{} {} where {} = '{}'",
        intent.entry.intent.verb(),
        intent.entry.collection,
        entry.field,
        entry.text
    );
    ActionCandidate::new(
        intent.entry.intent,
        intent.entry.collection.clone(),
        blend(config, intent.score, value.adjusted),
    )
    .with_filter(entry.field.clone(), serde_json::Value::String(entry.text.clone()))
    .with_provenance(Provenance {
        collection: entry.collection.clone(),
        field: entry.field.clone(),
        value: entry.text.clone(),
    })
    .with_summary(summary)
}

/// Cross-collection candidates: a value matched in another collection is
/// resolved to that record's identifier, which is then paired against the
/// acted-on collection's most plausible foreign-key fields.
fn fk_candidates(
    index: &SemanticIndex,
    dataset: &Dataset,
    fk: &dyn ForeignKeyMatcher,
    config: &EngineConfig,
    intent: &IntentMatch,
    cross: &[&ValueMatch],
) -> Vec<ActionCandidate> {
    let collection = &intent.entry.collection;
    let Some(records) = dataset.get(collection) else {
        return Vec::new();
    };
    let fields = field_names(records, FIELD_SAMPLE);

    let mut candidates = Vec::new();
    for value in cross.iter().take(config.max_cross_matches) {
        let entry = value.entry;

        // Best-guess FK fields for this source collection, strongest first.
        let mut fk_fields: Vec<(&String, f32)> = fields
            .iter()
            .map(|field| (field, fk.confidence(field, &entry.collection)))
            .filter(|(_, confidence)| *confidence > 0.0)
            .collect();
        fk_fields.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        if fk_fields.is_empty() {
            continue;
        }

        let Some(record) = index.resolve_record(dataset, &entry.collection, &entry.record_key)
        else {
            continue;
        };
        let Some((_, id_value)) = identifier_field(&entry.collection, record) else {
            continue;
        };

        for (field, _) in fk_fields.into_iter().take(config.max_fk_fields) {
            let summary = format!(
                "{} {} where {} = {} (via {}.{} = '{}')",
                intent.entry.intent.verb(),
                collection,
                field,
                scalar_text(id_value),
                entry.collection,
                entry.field,
                entry.text
            );
            candidates.push(
                ActionCandidate::new(
                    intent.entry.intent,
                    collection.clone(),
                    blend(config, intent.score, value.adjusted),
                )
                .with_filter(field.clone(), id_value.clone())
                .with_provenance(Provenance {
                    collection: entry.collection.clone(),
                    field: entry.field.clone(),
                    value: entry.text.clone(),
                })
                .with_summary(summary),
            );
        }
    }
    candidates
}
