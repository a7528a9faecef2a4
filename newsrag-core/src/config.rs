//! Configuration for the ingestion and query pipelines.

use serde::{Deserialize, Serialize};

use crate::error::{RagError, Result};

/// Default collection name for ingested news articles.
pub const DEFAULT_COLLECTION: &str = "news_articles";

/// Default minimum paragraph length (in characters) for the chunk-merge pass.
pub const DEFAULT_MIN_PARAGRAPH_LEN: usize = 200;

/// Configuration parameters shared by the ingestion pipeline and query service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RagConfig {
    /// Target collection for ingested chunks and the default for queries.
    pub collection: String,
    /// Paragraphs shorter than this many characters are merged with their
    /// neighbors during chunking.
    pub min_paragraph_len: usize,
    /// Number of neighbors returned when a query does not specify `n_results`.
    pub default_top_k: usize,
    /// Upper bound applied to a caller-supplied `n_results`.
    pub max_top_k: usize,
    /// Maximum number of feed items processed per ingestion run.
    pub max_articles: usize,
}

impl Default for RagConfig {
    fn default() -> Self {
        Self {
            collection: DEFAULT_COLLECTION.to_string(),
            min_paragraph_len: DEFAULT_MIN_PARAGRAPH_LEN,
            default_top_k: 5,
            max_top_k: 50,
            max_articles: 50,
        }
    }
}

impl RagConfig {
    /// Create a new builder for constructing a [`RagConfig`].
    pub fn builder() -> RagConfigBuilder {
        RagConfigBuilder::default()
    }
}

/// Builder for constructing a validated [`RagConfig`].
#[derive(Debug, Clone, Default)]
pub struct RagConfigBuilder {
    config: RagConfig,
}

impl RagConfigBuilder {
    /// Set the target collection name.
    pub fn collection(mut self, name: impl Into<String>) -> Self {
        self.config.collection = name.into();
        self
    }

    /// Set the minimum paragraph length for the chunk-merge pass.
    pub fn min_paragraph_len(mut self, len: usize) -> Self {
        self.config.min_paragraph_len = len;
        self
    }

    /// Set the default number of neighbors returned per query.
    pub fn default_top_k(mut self, k: usize) -> Self {
        self.config.default_top_k = k;
        self
    }

    /// Set the upper bound on caller-supplied `n_results`.
    pub fn max_top_k(mut self, k: usize) -> Self {
        self.config.max_top_k = k;
        self
    }

    /// Set the per-run cap on ingested feed items.
    pub fn max_articles(mut self, n: usize) -> Self {
        self.config.max_articles = n;
        self
    }

    /// Build the [`RagConfig`], validating that parameters are consistent.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Config`] if:
    /// - `collection` is empty
    /// - `min_paragraph_len == 0`
    /// - `default_top_k == 0`
    /// - `max_top_k < default_top_k`
    pub fn build(self) -> Result<RagConfig> {
        if self.config.collection.is_empty() {
            return Err(RagError::Config("collection name must not be empty".to_string()));
        }
        if self.config.min_paragraph_len == 0 {
            return Err(RagError::Config(
                "min_paragraph_len must be greater than zero".to_string(),
            ));
        }
        if self.config.default_top_k == 0 {
            return Err(RagError::Config("default_top_k must be greater than zero".to_string()));
        }
        if self.config.max_top_k < self.config.default_top_k {
            return Err(RagError::Config(format!(
                "max_top_k ({}) must not be less than default_top_k ({})",
                self.config.max_top_k, self.config.default_top_k
            )));
        }
        Ok(self.config)
    }
}
