//! Engine lifecycle tests: load, execute, retrain, and what each step
//! makes visible.

use semact_core::{ActionCandidate, Dataset, Intent, Record};
use semact_embeddings::HashEmbedder;
use semact_engine::{ActionEngine, EngineConfig, Outcome, DEFAULT_TOP_K};
use serde_json::json;
use std::sync::Arc;

fn dataset() -> Dataset {
    serde_json::from_value(json!({
        "holders": [
            {"id": 1, "name": "Swapnil", "active": true},
            {"id": 2, "name": "Ana", "note": null},
        ],
        "accounts": [
            {"id": 10, "holders_id": 1, "bank": "HDFC", "memo": "m".repeat(150)},
        ],
    }))
    .unwrap()
}

fn patch(value: serde_json::Value) -> Record {
    value.as_object().expect("patch literal").clone()
}

#[tokio::test]
async fn load_schema_indexes_exactly_the_indexable_scalars() {
    let mut engine = ActionEngine::new(Arc::new(HashEmbedder::new(64)));
    engine.load_schema(dataset()).await.unwrap();

    let stats = engine.index_stats();
    // holders: id 1, "Swapnil", id 2, "Ana" (booleans and nulls skipped);
    // accounts: id 10, holders_id 1, "HDFC" (long memo skipped).
    assert_eq!(stats.collections["holders"].values, 4);
    assert_eq!(stats.collections["accounts"].values, 3);
    assert_eq!(stats.values, 7);
    // 5 templates per collection + 1 record phrase per record.
    assert_eq!(stats.examples, (5 + 2) + (5 + 1));
}

#[tokio::test]
async fn executed_mutations_are_visible_after_retrain() {
    let mut engine = ActionEngine::new(Arc::new(HashEmbedder::default()));
    engine.load_schema(dataset()).await.unwrap();

    let create = ActionCandidate::new(Intent::Create, "holders", 1.0)
        .with_patch(patch(json!({"name": "Zubin"})));
    let Outcome::Created(record) = engine.execute_action(&create).unwrap() else {
        panic!("expected created record");
    };
    assert_eq!(record.get("id"), Some(&json!(3)));

    // The index is a snapshot: the new value only becomes searchable
    // after a retrain.
    let before = engine.index_stats().values;
    engine.retrain().await.unwrap();
    let after = engine.index_stats().values;
    assert_eq!(after, before + 2, "new id and name are now indexed");

    let candidates = engine
        .propose_actions("Show holders for Zubin", DEFAULT_TOP_K)
        .await
        .unwrap();
    assert!(candidates.iter().any(|c| c
        .resolved_from
        .as_ref()
        .is_some_and(|p| p.value == "Zubin")));
}

#[tokio::test]
async fn execute_reports_usage_errors_without_mutating() {
    let mut engine = ActionEngine::new(Arc::new(HashEmbedder::default()));
    engine.load_schema(dataset()).await.unwrap();

    let unfiltered_delete = ActionCandidate::new(Intent::Delete, "holders", 1.0);
    assert!(engine.execute_action(&unfiltered_delete).is_err());
    assert_eq!(engine.schema().get("holders").unwrap().len(), 2);

    let unknown = ActionCandidate::new(Intent::Read, "ghosts", 1.0);
    assert!(engine.execute_action(&unknown).is_err());
}

#[tokio::test]
async fn schema_accessor_exposes_the_live_dataset() {
    let mut engine = ActionEngine::new(Arc::new(HashEmbedder::default()));
    engine.load_schema(dataset()).await.unwrap();

    let delete = ActionCandidate::new(Intent::Delete, "holders", 1.0)
        .with_filter("name", json!("Ana"));
    assert_eq!(engine.execute_action(&delete).unwrap(), Outcome::Deleted(1));
    assert_eq!(engine.schema().get("holders").unwrap().len(), 1);
}

#[tokio::test]
async fn config_knobs_change_candidate_fanout() {
    let tight = EngineConfig {
        max_direct_filters: 0,
        max_cross_matches: 0,
        ..EngineConfig::default()
    };
    let mut engine =
        ActionEngine::new(Arc::new(HashEmbedder::default())).with_config(tight);
    engine.load_schema(dataset()).await.unwrap();

    let candidates = engine
        .propose_actions("Show accounts for Swapnil", DEFAULT_TOP_K)
        .await
        .unwrap();
    // With filters disabled only base candidates remain.
    assert!(!candidates.is_empty());
    assert!(candidates.iter().all(|c| c.filter.is_none()));
}
