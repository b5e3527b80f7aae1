//! # Semact
//!
//! Natural-language CRUD actions over in-memory record collections.
//!
//! Semact takes free-text queries over a dataset of named collections of
//! flat records and produces a ranked list of candidate CRUD actions,
//! each with a confidence score and a human-readable summary. Intents are
//! classified by semantic similarity against synthetic example phrases;
//! the records a query refers to are resolved by semantic and exact
//! matching against every short scalar in the dataset, including inferred
//! cross-collection foreign keys. A separate executor applies a chosen
//! candidate to the in-memory store.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use semact::prelude::*;
//! use std::sync::Arc;
//!
//! let dataset: Dataset = serde_json::from_str(r#"{
//!     "holders":  [{"id": 1, "name": "Swapnil"}],
//!     "accounts": [{"id": 10, "holders_id": 1, "bank": "HDFC"}]
//! }"#)?;
//!
//! let mut engine = ActionEngine::new(Arc::new(HashEmbedder::default()));
//! engine.load_schema(dataset).await?;
//!
//! let candidates = engine
//!     .propose_actions("Show accounts for Swapnil", DEFAULT_TOP_K)
//!     .await?;
//! for c in &candidates {
//!     println!("{:.3}  {}", c.score, c.summary);
//! }
//!
//! let outcome = engine.execute_action(&candidates[0])?;
//! engine.retrain().await?; // indices are snapshots
//! ```
//!
//! ## Architecture
//!
//! Semact is organized into several crates:
//!
//! - [`semact_core`] - Dataset, records, intents, action candidates
//! - [`semact_embeddings`] - The `Embedder` capability and its backends
//! - [`semact_engine`] - Indices, proposer, ranking, executor
//!
//! ## Key Concepts
//!
//! | Index | Built from | Answers |
//! |-------|------------|---------|
//! | Example index | Synthetic phrases per (collection, intent) | what operation, where |
//! | Value index | Every short scalar in every record | which record |
//!
//! Foreign-key resolution bridges the two: when the literal mentioned in
//! a query belongs to one collection but the action targets another, the
//! matched record's identifier is paired against the target collection's
//! most plausible reference fields.

// Re-export all subcrates
pub use semact_core as core;
pub use semact_embeddings as embeddings;
pub use semact_engine as engine;

/// Prelude module for convenient imports.
///
/// ```rust
/// use semact::prelude::*;
/// ```
pub mod prelude {
    // Data model
    pub use semact_core::{
        field_names, scalar_text, ActionCandidate, Dataset, Intent, Provenance, Record,
    };

    // Embeddings
    pub use semact_embeddings::{
        cosine_similarity, Embedder, EmbeddingError, EmbeddingResult, HashEmbedder,
    };

    #[cfg(feature = "api")]
    pub use semact_embeddings::{ApiConfig, ApiEmbedder};

    // Engine
    pub use semact_engine::{
        ActionEngine, EngineConfig, EngineError, EngineResult, ForeignKeyMatcher,
        HeuristicFkMatcher, IndexStats, Outcome, SemanticIndex, DEFAULT_TOP_K,
    };
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
