//! Batch ingestion: fetch → extract → chunk → embed → store.
//!
//! [`IngestionPipeline`] processes a capped batch of feed items with
//! per-article failure isolation: a fetch, extraction, embedding, or store
//! failure skips that article and the batch continues. No deduplication is
//! performed against previously ingested URLs; re-running on the same feed
//! produces duplicate chunks with fresh UUIDs.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::chunking::chunk_content;
use crate::config::RagConfig;
use crate::embedding::EmbeddingProvider;
use crate::error::{RagError, Result};
use crate::feed::FeedItem;
use crate::fetch::ArticleFetcher;
use crate::vectorstore::VectorStore;

/// The recorded result of processing one feed item.
#[derive(Debug, Clone, PartialEq)]
pub enum ArticleOutcome {
    /// The article's chunks were embedded and stored.
    Ingested {
        /// The article URL.
        url: String,
        /// Number of chunks written.
        chunks: usize,
    },
    /// The article was skipped; the batch continued.
    Skipped {
        /// The article URL.
        url: String,
        /// Why the article was skipped.
        reason: String,
    },
}

/// Per-article outcomes for one ingestion run.
#[derive(Debug, Default)]
pub struct IngestReport {
    /// One outcome per processed feed item, in feed order.
    pub outcomes: Vec<ArticleOutcome>,
}

impl IngestReport {
    /// Number of articles ingested successfully.
    pub fn ingested(&self) -> usize {
        self.outcomes.iter().filter(|o| matches!(o, ArticleOutcome::Ingested { .. })).count()
    }

    /// Number of articles skipped.
    pub fn skipped(&self) -> usize {
        self.outcomes.iter().filter(|o| matches!(o, ArticleOutcome::Skipped { .. })).count()
    }

    /// Total chunks written across all ingested articles.
    pub fn total_chunks(&self) -> usize {
        self.outcomes
            .iter()
            .map(|o| match o {
                ArticleOutcome::Ingested { chunks, .. } => *chunks,
                ArticleOutcome::Skipped { .. } => 0,
            })
            .sum()
    }
}

/// The batch ingestion orchestrator.
///
/// Construct one via [`IngestionPipeline::builder()`]; all collaborators are
/// injected and held for the pipeline's lifetime.
pub struct IngestionPipeline {
    config: RagConfig,
    fetcher: Arc<dyn ArticleFetcher>,
    embedder: Arc<dyn EmbeddingProvider>,
    store: Arc<dyn VectorStore>,
}

impl std::fmt::Debug for IngestionPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IngestionPipeline")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl IngestionPipeline {
    /// Create a new [`IngestionPipelineBuilder`].
    pub fn builder() -> IngestionPipelineBuilder {
        IngestionPipelineBuilder::default()
    }

    /// Process up to `config.max_articles` feed items into the target
    /// collection, creating it if absent.
    ///
    /// Per-article failures are recorded in the report and never abort the
    /// batch.
    ///
    /// # Errors
    ///
    /// Returns an error only if the target collection cannot be created —
    /// without it no article can be stored.
    pub async fn run(&self, feed: &[FeedItem]) -> Result<IngestReport> {
        let capped = &feed[..feed.len().min(self.config.max_articles)];
        info!(
            collection = %self.config.collection,
            articles = capped.len(),
            "starting ingestion run"
        );

        self.store.get_or_create_collection(&self.config.collection).await?;

        let mut report = IngestReport::default();
        for item in capped {
            match self.ingest_article(item).await {
                Ok(chunks) => {
                    info!(url = %item.url, chunks, "ingested article");
                    report.outcomes.push(ArticleOutcome::Ingested {
                        url: item.url.clone(),
                        chunks,
                    });
                }
                Err(e) => {
                    warn!(url = %item.url, error = %e, "skipping article");
                    report.outcomes.push(ArticleOutcome::Skipped {
                        url: item.url.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        info!(
            ingested = report.ingested(),
            skipped = report.skipped(),
            chunks = report.total_chunks(),
            "ingestion run finished"
        );
        Ok(report)
    }

    /// Ingest one article: returns the number of chunks written.
    async fn ingest_article(&self, item: &FeedItem) -> Result<usize> {
        let text = self.fetcher.fetch_text(&item.url).await?;

        let chunks = chunk_content(&text, self.config.min_paragraph_len);
        if chunks.is_empty() {
            return Err(RagError::Extract { url: item.url.clone() });
        }

        let texts: Vec<&str> = chunks.iter().map(String::as_str).collect();
        let embeddings = self.embedder.embed_batch(&texts).await?;

        let ids: Vec<Uuid> = chunks.iter().map(|_| Uuid::new_v4()).collect();
        let metadatas: Vec<HashMap<String, String>> = chunks
            .iter()
            .map(|chunk| {
                // metadata["text"] duplicates the document text at write time.
                HashMap::from([
                    ("url".to_string(), item.url.clone()),
                    ("text".to_string(), chunk.clone()),
                ])
            })
            .collect();

        // One add per article; chunks are never batched across articles.
        self.store
            .add(&self.config.collection, &ids, &embeddings, &chunks, &metadatas)
            .await?;

        Ok(chunks.len())
    }
}

/// Builder for constructing an [`IngestionPipeline`].
#[derive(Default)]
pub struct IngestionPipelineBuilder {
    config: Option<RagConfig>,
    fetcher: Option<Arc<dyn ArticleFetcher>>,
    embedder: Option<Arc<dyn EmbeddingProvider>>,
    store: Option<Arc<dyn VectorStore>>,
}

impl IngestionPipelineBuilder {
    /// Set the pipeline configuration.
    pub fn config(mut self, config: RagConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the article fetcher.
    pub fn fetcher(mut self, fetcher: Arc<dyn ArticleFetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    /// Set the embedding provider.
    pub fn embedder(mut self, embedder: Arc<dyn EmbeddingProvider>) -> Self {
        self.embedder = Some(embedder);
        self
    }

    /// Set the vector store backend.
    pub fn store(mut self, store: Arc<dyn VectorStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Build the [`IngestionPipeline`], validating that all fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Config`] if any required field is missing.
    pub fn build(self) -> Result<IngestionPipeline> {
        let config =
            self.config.ok_or_else(|| RagError::Config("config is required".to_string()))?;
        let fetcher =
            self.fetcher.ok_or_else(|| RagError::Config("fetcher is required".to_string()))?;
        let embedder =
            self.embedder.ok_or_else(|| RagError::Config("embedder is required".to_string()))?;
        let store =
            self.store.ok_or_else(|| RagError::Config("store is required".to_string()))?;

        Ok(IngestionPipeline { config, fetcher, embedder, store })
    }
}
