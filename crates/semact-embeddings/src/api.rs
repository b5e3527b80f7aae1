//! API-based embeddings over an OpenAI-compatible `/v1/embeddings`
//! endpoint.
//!
//! Requires the `api` feature.

use crate::{Embedder, EmbeddingError, EmbeddingResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Configuration for API-based embeddings.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Endpoint URL.
    pub endpoint: String,
    /// Bearer token (optional for local servers).
    pub api_key: Option<String>,
    /// Model name.
    pub model: String,
    /// Embedding dimension the endpoint returns.
    pub dimensions: usize,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl ApiConfig {
    /// Create config for OpenAI embeddings.
    pub fn openai(api_key: &str) -> Self {
        Self {
            endpoint: "https://api.openai.com/v1/embeddings".to_string(),
            api_key: Some(api_key.to_string()),
            model: "text-embedding-3-small".to_string(),
            dimensions: 1536,
            timeout_secs: 30,
        }
    }

    /// Create config for any OpenAI-compatible endpoint (local inference
    /// servers included).
    pub fn compatible(endpoint: &str, model: &str, dimensions: usize) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            api_key: None,
            model: model.to_string(),
            dimensions,
            timeout_secs: 30,
        }
    }

    /// Set the model.
    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    /// Set the API key.
    pub fn with_api_key(mut self, api_key: &str) -> Self {
        self.api_key = Some(api_key.to_string());
        self
    }

    /// Set the timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

#[derive(Debug, Serialize)]
struct EmbeddingsRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Debug, Deserialize)]
struct EmbeddingsResponse {
    data: Vec<EmbeddingRow>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingRow {
    embedding: Vec<f32>,
}

/// Embedder backed by an OpenAI-compatible HTTP endpoint.
///
/// # Example
///
/// ```rust,ignore
/// use semact_embeddings::{ApiConfig, ApiEmbedder, Embedder};
///
/// let embedder = ApiEmbedder::new(ApiConfig::openai("sk-..."))?;
/// let vectors = embedder.embed_batch(&texts).await?;
/// ```
pub struct ApiEmbedder {
    config: ApiConfig,
    client: reqwest::Client,
}

impl ApiEmbedder {
    /// Create a new API embedder with the given config.
    pub fn new(config: ApiConfig) -> EmbeddingResult<Self> {
        if config.endpoint.is_empty() {
            return Err(EmbeddingError::InvalidInput("empty endpoint".to_string()));
        }
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| EmbeddingError::Api(e.to_string()))?;

        Ok(Self { config, client })
    }
}

#[async_trait]
impl Embedder for ApiEmbedder {
    async fn embed_batch(&self, texts: &[String]) -> EmbeddingResult<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(vec![]);
        }

        let request = EmbeddingsRequest {
            model: &self.config.model,
            input: texts,
        };

        let mut builder = self.client.post(&self.config.endpoint).json(&request);
        if let Some(key) = &self.config.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| EmbeddingError::Api(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(EmbeddingError::Api(format!(
                "embeddings endpoint returned {status}: {body}"
            )));
        }

        let parsed: EmbeddingsResponse = response
            .json()
            .await
            .map_err(|e| EmbeddingError::Api(e.to_string()))?;

        if parsed.data.len() != texts.len() {
            return Err(EmbeddingError::DimensionMismatch {
                expected: texts.len(),
                got: parsed.data.len(),
            });
        }

        Ok(parsed.data.into_iter().map(|row| row.embedding).collect())
    }

    fn dimension(&self) -> usize {
        self.config.dimensions
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}
