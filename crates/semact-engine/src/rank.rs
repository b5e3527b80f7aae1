//! Candidate deduplication and ordering.

use semact_core::ActionCandidate;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

/// Collapse candidates that propose the same (intent, collection, filter),
/// keeping the higher score, then sort by score descending.
///
/// Ties sort by dedup key, so the output order is a pure function of the
/// input set.
pub fn dedupe_and_rank(candidates: Vec<ActionCandidate>) -> Vec<ActionCandidate> {
    let mut best: BTreeMap<String, ActionCandidate> = BTreeMap::new();
    for candidate in candidates {
        match best.entry(candidate.dedup_key()) {
            Entry::Vacant(slot) => {
                slot.insert(candidate);
            }
            Entry::Occupied(mut slot) => {
                if candidate.score > slot.get().score {
                    slot.insert(candidate);
                }
            }
        }
    }

    let mut ranked: Vec<ActionCandidate> = best.into_values().collect();
    ranked.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked
}
