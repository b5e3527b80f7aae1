//! Core embedder capability and error types.

use async_trait::async_trait;
use thiserror::Error;

/// Embedding error types.
#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("Backend not ready: {0}")]
    NotReady(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },
}

/// Result type for embedding operations.
pub type EmbeddingResult<T> = Result<T, EmbeddingError>;

/// Converts batches of strings into fixed-length numeric vectors.
///
/// Implementations must be order-preserving: the nth output vector embeds
/// the nth input string, and every vector has [`dimension`](Embedder::dimension)
/// components. The engine depends only on this contract; backend selection
/// and acceleration are implementation concerns.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// One-time readiness step (model load, connection warm-up).
    ///
    /// Callers memoize this and treat a failure as a configuration error.
    /// Backends with nothing to prepare keep the default no-op.
    async fn load(&self) -> EmbeddingResult<()> {
        Ok(())
    }

    /// Embed a batch of texts in one call.
    async fn embed_batch(&self, texts: &[String]) -> EmbeddingResult<Vec<Vec<f32>>>;

    /// Embed a single text.
    async fn embed(&self, text: &str) -> EmbeddingResult<Vec<f32>> {
        let texts = [text.to_string()];
        let mut vectors = self.embed_batch(&texts).await?;
        vectors
            .pop()
            .ok_or_else(|| EmbeddingError::Api("empty batch result".to_string()))
    }

    /// Get the embedding dimension.
    fn dimension(&self) -> usize;

    /// Get the model name/identifier.
    fn model_name(&self) -> &str;
}
