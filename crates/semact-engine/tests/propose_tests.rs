//! Proposal-path tests: intent + value blending, foreign-key bridging,
//! deduplication, determinism.

use semact_core::{Dataset, Intent};
use semact_embeddings::HashEmbedder;
use semact_engine::{ActionEngine, DEFAULT_TOP_K};
use serde_json::json;
use std::sync::Arc;

fn finance_dataset() -> Dataset {
    serde_json::from_value(json!({
        "holders": [
            {"id": 1, "name": "Swapnil"},
        ],
        "accounts": [
            {"id": 10, "holders_id": 1, "bank": "HDFC"},
        ],
    }))
    .unwrap()
}

async fn engine_with(dataset: Dataset) -> ActionEngine {
    let mut engine = ActionEngine::new(Arc::new(HashEmbedder::default()));
    engine.load_schema(dataset).await.unwrap();
    engine
}

#[tokio::test]
async fn cross_collection_mention_resolves_through_foreign_key() {
    let engine = engine_with(finance_dataset()).await;
    let candidates = engine
        .propose_actions("Show accounts for Swapnil", DEFAULT_TOP_K)
        .await
        .unwrap();

    let bridged = candidates
        .iter()
        .find(|c| {
            c.intent == Intent::Read
                && c.collection == "accounts"
                && c.filter.as_ref().is_some_and(|f| f.get("holders_id") == Some(&json!(1)))
        })
        .expect("expected a read-accounts candidate filtered on holders_id");

    let provenance = bridged.resolved_from.as_ref().unwrap();
    assert_eq!(provenance.collection, "holders");
    assert_eq!(provenance.field, "name");
    assert_eq!(provenance.value, "Swapnil");
    assert!(bridged.score > 0.0);
}

#[tokio::test]
async fn literal_mention_in_own_collection_becomes_direct_filter() {
    let engine = engine_with(finance_dataset()).await;
    let candidates = engine
        .propose_actions("List accounts where bank is HDFC", DEFAULT_TOP_K)
        .await
        .unwrap();

    let direct = candidates
        .iter()
        .find(|c| {
            c.collection == "accounts"
                && c.filter.as_ref().is_some_and(|f| f.get("bank") == Some(&json!("HDFC")))
        })
        .expect("expected an accounts candidate filtered on bank");
    assert_eq!(direct.resolved_from.as_ref().unwrap().value, "HDFC");
}

#[tokio::test]
async fn every_intent_match_yields_an_unfiltered_base_candidate() {
    let engine = engine_with(finance_dataset()).await;
    let candidates = engine
        .propose_actions("Show me all accounts", DEFAULT_TOP_K)
        .await
        .unwrap();

    assert!(candidates
        .iter()
        .any(|c| c.intent == Intent::Read && c.collection == "accounts" && c.filter.is_none()));
}

#[tokio::test]
async fn identical_queries_rank_identically() {
    let engine = engine_with(finance_dataset()).await;
    let first = engine
        .propose_actions("Show accounts for Swapnil", DEFAULT_TOP_K)
        .await
        .unwrap();
    let second = engine
        .propose_actions("Show accounts for Swapnil", DEFAULT_TOP_K)
        .await
        .unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn no_duplicate_proposals_survive_ranking() {
    let engine = engine_with(finance_dataset()).await;
    let candidates = engine
        .propose_actions("Show accounts for Swapnil", DEFAULT_TOP_K)
        .await
        .unwrap();

    let mut keys: Vec<String> = candidates.iter().map(|c| c.dedup_key()).collect();
    keys.sort();
    keys.dedup();
    assert_eq!(keys.len(), candidates.len(), "every surviving key is unique");

    let scores: Vec<f32> = candidates.iter().map(|c| c.score).collect();
    let mut sorted = scores.clone();
    sorted.sort_by(|a, b| b.partial_cmp(a).unwrap());
    assert_eq!(scores, sorted, "candidates come back sorted by score");
}

#[tokio::test]
async fn empty_dataset_yields_empty_candidates_not_an_error() {
    let engine = engine_with(Dataset::new()).await;
    let candidates = engine
        .propose_actions("Show me everything", DEFAULT_TOP_K)
        .await
        .unwrap();
    assert!(candidates.is_empty());
}

#[tokio::test]
async fn top_k_bounds_the_intent_fanout() {
    let engine = engine_with(finance_dataset()).await;
    let narrow = engine
        .propose_actions("Show me all accounts", 1)
        .await
        .unwrap();
    // One intent match: one base candidate plus its filtered variants,
    // all on the same collection and intent.
    assert!(!narrow.is_empty());
    assert!(narrow.iter().all(|c| c.collection == narrow[0].collection
        && c.intent == narrow[0].intent));
}
