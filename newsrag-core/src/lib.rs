//! # newsrag-core
//!
//! Ingestion-and-retrieval pipeline for a news-article RAG backend:
//! articles are fetched, split into paragraph chunks, embedded into
//! normalized dense vectors, persisted in a named collection, and served
//! back through nearest-neighbor queries.
//!
//! - **[`chunking`]** — paragraph splitting with a small-paragraph merge pass
//! - **[`embedding`]** — [`EmbeddingProvider`] trait; [`remote`] holds the
//!   HTTP-backed provider
//! - **[`vectorstore`]** — [`VectorStore`] trait; [`memory`] and
//!   [`persistent`] hold the backends
//! - **[`pipeline`]** — batch ingestion with per-article failure isolation
//! - **[`query`]** — query validation, embedding, and rank assembly
//! - **[`feed`]** / **[`fetch`]** — news feed listing and article
//!   fetching/extraction

pub mod chunking;
pub mod config;
pub mod document;
pub mod embedding;
pub mod error;
pub mod feed;
pub mod fetch;
pub mod memory;
pub mod persistent;
pub mod pipeline;
pub mod query;
pub mod remote;
pub mod vectorstore;

pub use chunking::chunk_content;
pub use config::{RagConfig, DEFAULT_COLLECTION, DEFAULT_MIN_PARAGRAPH_LEN};
pub use document::{ChunkRecord, CollectionInfo, Neighbor, RankedResult};
pub use embedding::EmbeddingProvider;
pub use error::{RagError, Result};
pub use feed::{FeedItem, NewsApiClient};
pub use fetch::{ArticleFetcher, HttpArticleFetcher};
pub use memory::InMemoryVectorStore;
pub use persistent::PersistentVectorStore;
pub use pipeline::{ArticleOutcome, IngestReport, IngestionPipeline};
pub use query::QueryService;
pub use remote::RemoteEmbedder;
pub use vectorstore::VectorStore;
