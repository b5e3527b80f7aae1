//! # Semact Engine
//!
//! Free-text queries in, ranked CRUD action candidates out.
//!
//! The engine keeps two similarity indices over a [`Dataset`]:
//!
//! - an **example index**: synthetic phrases per (collection, intent),
//!   answering *what kind of operation, on which collection*;
//! - a **value index**: every short scalar in the dataset, answering
//!   *which record the query mentions*.
//!
//! A proposer blends both signals into deduplicated, ranked
//! [`ActionCandidate`]s, including cross-collection candidates where a
//! mentioned value lives in one collection but the action targets another,
//! bridged by inferred foreign keys. An executor applies a chosen
//! candidate to the live dataset.
//!
//! Indices are snapshots: after executing a mutating candidate, call
//! [`ActionEngine::retrain`] before the next query.
//!
//! ```rust,ignore
//! use semact_engine::{ActionEngine, DEFAULT_TOP_K};
//! use semact_embeddings::HashEmbedder;
//! use std::sync::Arc;
//!
//! let mut engine = ActionEngine::new(Arc::new(HashEmbedder::default()));
//! engine.load_schema(dataset).await?;
//! let candidates = engine.propose_actions("Show accounts for Swapnil", DEFAULT_TOP_K).await?;
//! let outcome = engine.execute_action(&candidates[0])?;
//! engine.retrain().await?;
//! ```

pub mod engine;
pub mod examples;
pub mod execute;
pub mod fk;
pub mod index;
pub mod propose;
pub mod rank;
pub mod values;

pub use engine::{ActionEngine, EngineConfig, DEFAULT_TOP_K};
pub use examples::{ExampleEntry, ExampleMeta};
pub use execute::{execute, Outcome};
pub use fk::{ForeignKeyMatcher, HeuristicFkMatcher};
pub use index::{CollectionStats, IndexStats, SemanticIndex};
pub use rank::dedupe_and_rank;
pub use values::ValueEntry;

use semact_core::Intent;
use semact_embeddings::EmbeddingError;
use thiserror::Error;

/// Errors that can occur during engine operations.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The candidate names a collection the dataset does not have.
    #[error("Unknown collection: {0}")]
    UnknownCollection(String),

    /// Update and delete refuse to run unfiltered.
    #[error("{intent} on '{collection}' requires a filter")]
    MissingFilter { intent: Intent, collection: String },

    /// The embedding backend failed (configuration error; not retried).
    #[error("Embedding error: {0}")]
    Embedding(#[from] EmbeddingError),
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
