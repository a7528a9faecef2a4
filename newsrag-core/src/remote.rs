//! Remote embedding provider over an HTTP embeddings API.
//!
//! [`RemoteEmbedder`] calls a sentence-transformers style embeddings
//! endpoint (an OpenAI-compatible `{"model", "input": [...]}` request body)
//! and L2-normalizes the returned vectors client-side, so the unit-length
//! contract of [`EmbeddingProvider`] holds regardless of what the backend
//! returns.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::embedding::{l2_normalize, EmbeddingProvider};
use crate::error::{RagError, Result};

/// The default embedding model name.
const DEFAULT_MODEL: &str = "all-MiniLM-L6-v2";

/// The default dimensionality for `all-MiniLM-L6-v2`.
const DEFAULT_DIMENSIONS: usize = 384;

/// An [`EmbeddingProvider`] backed by a remote embeddings API.
///
/// # Configuration
///
/// - `base_url` – full URL of the embeddings endpoint.
/// - `model` – defaults to `all-MiniLM-L6-v2`.
/// - `dimensions` – defaults to 384; must match the model's output.
/// - `api_key` – optional bearer token.
pub struct RemoteEmbedder {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
    dimensions: usize,
}

impl RemoteEmbedder {
    /// Create a new provider targeting the given embeddings endpoint.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into();
        if base_url.is_empty() {
            return Err(RagError::Embedding {
                provider: "Remote".into(),
                message: "embeddings endpoint URL must not be empty".into(),
            });
        }
        Ok(Self {
            client: reqwest::Client::new(),
            base_url,
            api_key: None,
            model: DEFAULT_MODEL.into(),
            dimensions: DEFAULT_DIMENSIONS,
        })
    }

    /// Create a provider from `NEWSRAG_EMBED_URL` (required) and
    /// `NEWSRAG_EMBED_API_KEY` (optional).
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("NEWSRAG_EMBED_URL").map_err(|_| RagError::Embedding {
            provider: "Remote".into(),
            message: "NEWSRAG_EMBED_URL environment variable not set".into(),
        })?;
        let mut provider = Self::new(base_url)?;
        if let Ok(key) = std::env::var("NEWSRAG_EMBED_API_KEY") {
            provider.api_key = Some(key);
        }
        Ok(provider)
    }

    /// Set the bearer token sent with each request.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the model name requested from the backend.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the expected output dimensionality.
    pub fn with_dimensions(mut self, dims: usize) -> Self {
        self.dimensions = dims;
        self
    }
}

// ── API request/response types ─────────────────────────────────────

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: Vec<&'a str>,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

// ── EmbeddingProvider implementation ───────────────────────────────

#[async_trait]
impl EmbeddingProvider for RemoteEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        debug!(provider = "Remote", text_len = text.len(), "embedding single text");

        let results = self.embed_batch(&[text]).await?;
        results.into_iter().next().ok_or_else(|| RagError::Embedding {
            provider: "Remote".into(),
            message: "API returned empty response".into(),
        })
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        debug!(
            provider = "Remote",
            batch_size = texts.len(),
            model = %self.model,
            "embedding batch"
        );

        let request_body = EmbeddingRequest { model: &self.model, input: texts.to_vec() };

        let mut request = self.client.post(&self.base_url).json(&request_body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(|e| {
            error!(provider = "Remote", error = %e, "request failed");
            RagError::Embedding {
                provider: "Remote".into(),
                message: format!("request failed: {e}"),
            }
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);

            error!(provider = "Remote", %status, "API error");
            return Err(RagError::Embedding {
                provider: "Remote".into(),
                message: format!("API returned {status}: {detail}"),
            });
        }

        let embedding_response: EmbeddingResponse = response.json().await.map_err(|e| {
            error!(provider = "Remote", error = %e, "failed to parse response");
            RagError::Embedding {
                provider: "Remote".into(),
                message: format!("failed to parse response: {e}"),
            }
        })?;

        Ok(embedding_response
            .data
            .into_iter()
            .map(|d| {
                let mut embedding = d.embedding;
                l2_normalize(&mut embedding);
                embedding
            })
            .collect())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}
