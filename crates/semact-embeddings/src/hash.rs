//! Deterministic hash-based embedder (no model, no I/O).
//!
//! Tokens and adjacent token pairs are feature-hashed into a fixed-length
//! signed vector. Not as semantically rich as a neural model, but
//! deterministic, dependency-free, and effective for the short field
//! values and template phrases this engine matches against.

use crate::{normalize_l2, Embedder, EmbeddingResult};
use async_trait::async_trait;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Feature-hashing embedder.
///
/// Each token contributes to a few signed buckets; token pairs add a
/// little phrase sensitivity. Identical texts always produce identical
/// vectors, which keeps index builds and proposal ranking reproducible.
pub struct HashEmbedder {
    dimension: usize,
    hashes_per_feature: usize,
}

impl HashEmbedder {
    /// Create an embedder with the given dimension.
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            hashes_per_feature: 3,
        }
    }

    /// Lowercase, split on non-alphanumeric, drop empty pieces. Single
    /// characters stay: bare numerals like "1" are common field values.
    fn tokenize(text: &str) -> Vec<String> {
        text.to_lowercase()
            .split(|c: char| !c.is_alphanumeric())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    fn bucket(&self, feature: &str, seed: u64) -> usize {
        let mut hasher = DefaultHasher::new();
        seed.hash(&mut hasher);
        feature.hash(&mut hasher);
        (hasher.finish() as usize) % self.dimension
    }

    fn sign(&self, feature: &str, seed: u64) -> f32 {
        let mut hasher = DefaultHasher::new();
        (seed ^ 0x5ead).hash(&mut hasher);
        feature.hash(&mut hasher);
        if hasher.finish() & 1 == 0 {
            1.0
        } else {
            -1.0
        }
    }

    fn embed_one(&self, text: &str) -> Vec<f32> {
        let tokens = Self::tokenize(text);
        let mut vector = vec![0.0f32; self.dimension];
        if tokens.is_empty() {
            return vector;
        }

        let mut features: Vec<String> = tokens.clone();
        for pair in tokens.windows(2) {
            features.push(format!("{} {}", pair[0], pair[1]));
        }

        for feature in &features {
            for seed in 0..self.hashes_per_feature as u64 {
                let idx = self.bucket(feature, seed);
                vector[idx] += self.sign(feature, seed);
            }
        }

        let scale = 1.0 / ((features.len() * self.hashes_per_feature) as f32).sqrt();
        for v in &mut vector {
            *v *= scale;
        }
        normalize_l2(&mut vector);
        vector
    }
}

impl Default for HashEmbedder {
    fn default() -> Self {
        Self::new(256)
    }
}

#[async_trait]
impl Embedder for HashEmbedder {
    async fn embed_batch(&self, texts: &[String]) -> EmbeddingResult<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.embed_one(t)).collect())
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn model_name(&self) -> &str {
        "feature-hash"
    }
}
