//! The engine facade: one dataset, two indices, injected capabilities.

use crate::execute::{execute, Outcome};
use crate::fk::{ForeignKeyMatcher, HeuristicFkMatcher};
use crate::index::{IndexStats, SemanticIndex};
use crate::propose::propose;
use crate::EngineResult;
use semact_core::{ActionCandidate, Dataset};
use semact_embeddings::Embedder;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::debug;

/// Default number of intent matches a proposal considers.
pub const DEFAULT_TOP_K: usize = 6;

/// Tunable scoring and fan-out knobs. The defaults reproduce the
/// behavior the engine was calibrated against; none of them are tuned
/// beyond "works well on small personal datasets".
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// How many value matches are scored per query.
    pub top_values: usize,
    /// Direct-filter candidates per intent match.
    pub max_direct_filters: usize,
    /// Cross-collection value matches considered per intent match.
    pub max_cross_matches: usize,
    /// Foreign-key fields tried per cross-collection match.
    pub max_fk_fields: usize,
    /// Score bonus when the value text appears verbatim in the query.
    pub exact_bonus: f32,
    /// Weight of the intent score when blending with a value score
    /// (the remainder goes to the value score).
    pub intent_blend: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            top_values: 12,
            max_direct_filters: 3,
            max_cross_matches: 4,
            max_fk_fields: 2,
            exact_bonus: 0.25,
            intent_blend: 0.5,
        }
    }
}

/// Natural-language action engine over an in-memory dataset.
///
/// Owns the dataset and its similarity indices. The embedding backend and
/// the foreign-key strategy are injected; the engine knows nothing about
/// model loading or hardware.
///
/// One engine serves one dataset and one user session. For multi-tenant
/// use, scope one engine per tenant rather than sharing.
pub struct ActionEngine {
    embedder: Arc<dyn Embedder>,
    fk: Box<dyn ForeignKeyMatcher>,
    config: EngineConfig,
    dataset: Dataset,
    index: SemanticIndex,
    ready: OnceCell<()>,
}

impl ActionEngine {
    /// Create an engine with the default heuristics and an empty dataset.
    pub fn new(embedder: Arc<dyn Embedder>) -> Self {
        Self {
            embedder,
            fk: Box::new(HeuristicFkMatcher),
            config: EngineConfig::default(),
            dataset: Dataset::new(),
            index: SemanticIndex::empty(),
            ready: OnceCell::new(),
        }
    }

    /// Override the scoring configuration.
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the foreign-key strategy.
    pub fn with_fk_matcher(mut self, fk: Box<dyn ForeignKeyMatcher>) -> Self {
        self.fk = fk;
        self
    }

    /// Replace the dataset wholesale and rebuild both indices.
    pub async fn load_schema(&mut self, dataset: Dataset) -> EngineResult<()> {
        self.dataset = dataset;
        self.retrain().await
    }

    /// Rebuild both indices from the current dataset snapshot.
    ///
    /// The replacement index is constructed completely before it takes
    /// the old one's place, so there is never a half-built index to
    /// observe. Call this after executing a mutating action if later
    /// queries must see the fresh values.
    pub async fn retrain(&mut self) -> EngineResult<()> {
        self.ensure_ready().await?;
        let index = SemanticIndex::build(&self.dataset, self.embedder.as_ref()).await?;
        debug!(
            examples = index.examples.len(),
            values = index.values.len(),
            "index rebuilt"
        );
        self.index = index;
        Ok(())
    }

    /// Rank candidate actions for a free-text query.
    ///
    /// Read-only: with an unchanged index, the same query returns the
    /// same ordered list. A query that matches nothing returns an empty
    /// list, which is a normal outcome, not an error.
    pub async fn propose_actions(
        &self,
        query: &str,
        top_k: usize,
    ) -> EngineResult<Vec<ActionCandidate>> {
        self.ensure_ready().await?;
        let query_vec = self.embedder.embed(query).await?;
        Ok(propose(
            &self.index,
            &self.dataset,
            self.fk.as_ref(),
            &self.config,
            query,
            &query_vec,
            top_k,
        ))
    }

    /// Apply a candidate to the live dataset.
    ///
    /// The indices are snapshots and are *not* invalidated by this call;
    /// retrain before the next query that must see the mutation.
    pub fn execute_action(&mut self, candidate: &ActionCandidate) -> EngineResult<Outcome> {
        execute(&mut self.dataset, candidate)
    }

    /// The live dataset, for persistence hand-off.
    pub fn schema(&self) -> &Dataset {
        &self.dataset
    }

    /// Cardinalities of the current index.
    pub fn index_stats(&self) -> IndexStats {
        self.index.stats()
    }

    /// Memoized one-time readiness of the embedding backend. A failure
    /// here is a configuration error and surfaces from whichever
    /// operation needed the backend first.
    async fn ensure_ready(&self) -> EngineResult<()> {
        self.ready
            .get_or_try_init(|| async { self.embedder.load().await })
            .await?;
        Ok(())
    }
}
