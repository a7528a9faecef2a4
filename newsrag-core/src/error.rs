//! Error types for the `newsrag-core` crate.

use thiserror::Error;

/// Errors that can occur in ingestion and retrieval operations.
#[derive(Debug, Error)]
pub enum RagError {
    /// The caller supplied invalid input (missing query text, zero `n_results`, ...).
    #[error("{0}")]
    Validation(String),

    /// A collection was looked up by name and does not exist.
    ///
    /// The read path never creates collections as a side effect; only
    /// `get_or_create_collection` on the write path does.
    #[error("Collection '{name}' not found: {message}")]
    CollectionNotFound {
        /// The collection name that was requested.
        name: String,
        /// A description of the lookup failure.
        message: String,
    },

    /// A query completed successfully but matched zero neighbors.
    ///
    /// Distinct from an internal failure: the HTTP layer maps this to a
    /// 404 with a "no relevant results" message, not a 500.
    #[error("No relevant results found")]
    NoResults,

    /// An embedding's dimension does not match the collection's established dimension.
    #[error("embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// The dimension established when the collection was first populated.
        expected: usize,
        /// The dimension of the offending vector.
        actual: usize,
    },

    /// An error occurred during embedding generation.
    #[error("Embedding error ({provider}): {message}")]
    Embedding {
        /// The embedding provider that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// An error occurred in the vector store backend.
    #[error("Vector store error ({backend}): {message}")]
    Store {
        /// The vector store backend that produced the error.
        backend: String,
        /// A description of the failure.
        message: String,
    },

    /// Fetching an article's content failed.
    ///
    /// During batch ingestion this is logged and the article skipped; it
    /// never aborts the batch.
    #[error("fetch failed for {url}: {message}")]
    Fetch {
        /// The article URL that could not be fetched.
        url: String,
        /// A description of the failure.
        message: String,
    },

    /// An article was fetched but yielded no usable text.
    #[error("no usable text extracted from {url}")]
    Extract {
        /// The article URL whose content could not be extracted.
        url: String,
    },

    /// A configuration validation error.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A convenience result type for ingestion and retrieval operations.
pub type Result<T> = std::result::Result<T, RagError>;
