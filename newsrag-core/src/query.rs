//! Query service: embed → nearest-neighbor search → ranked results.

use std::sync::Arc;

use tracing::{debug, info};

use crate::config::RagConfig;
use crate::document::RankedResult;
use crate::embedding::EmbeddingProvider;
use crate::error::{RagError, Result};
use crate::vectorstore::VectorStore;

/// Answers similarity queries over the persisted store.
///
/// Stateless between calls: each query is a pure request/response transform
/// over the store's current contents. No re-ranking, thresholding, or
/// deduplication of near-identical chunks is applied.
pub struct QueryService {
    config: RagConfig,
    embedder: Arc<dyn EmbeddingProvider>,
    store: Arc<dyn VectorStore>,
}

impl QueryService {
    /// Create a query service over the given embedder and store.
    pub fn new(
        config: RagConfig,
        embedder: Arc<dyn EmbeddingProvider>,
        store: Arc<dyn VectorStore>,
    ) -> Self {
        Self { config, embedder, store }
    }

    /// Answer a similarity query with dense 1-based ranks in ascending
    /// distance order.
    ///
    /// `collection` defaults to the configured collection and is never
    /// created as a side effect. `top_k` defaults to
    /// `config.default_top_k` and is capped at `config.max_top_k`.
    ///
    /// # Errors
    ///
    /// - [`RagError::Validation`] for empty query text or `top_k == 0`
    /// - [`RagError::CollectionNotFound`] for an unknown collection
    /// - [`RagError::NoResults`] when the query matches zero neighbors
    pub async fn query(
        &self,
        text: &str,
        collection: Option<&str>,
        top_k: Option<usize>,
    ) -> Result<Vec<RankedResult>> {
        if text.trim().is_empty() {
            return Err(RagError::Validation("No query provided".to_string()));
        }

        let collection = collection.unwrap_or(&self.config.collection);
        let top_k = top_k.unwrap_or(self.config.default_top_k);
        if top_k == 0 {
            return Err(RagError::Validation(
                "n_results must be greater than zero".to_string(),
            ));
        }
        let top_k = top_k.min(self.config.max_top_k);

        // Resolve the collection before embedding; the read path never
        // creates one as a side effect.
        let known = self.store.list_collections().await?;
        if !known.iter().any(|c| c.name == collection) {
            return Err(RagError::CollectionNotFound {
                name: collection.to_string(),
                message: "collection does not exist".to_string(),
            });
        }

        debug!(collection, top_k, "embedding query text");
        let query_embedding = self.embedder.embed(text).await?;

        let neighbors = self.store.query(collection, &query_embedding, top_k).await?;
        if neighbors.is_empty() {
            return Err(RagError::NoResults);
        }

        info!(collection, results = neighbors.len(), "query completed");
        Ok(neighbors
            .into_iter()
            .enumerate()
            .map(|(idx, neighbor)| RankedResult {
                rank: idx as u32 + 1,
                text: neighbor.document,
                metadata: neighbor.metadata,
            })
            .collect())
    }
}
