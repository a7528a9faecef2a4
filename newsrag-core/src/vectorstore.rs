//! Vector store trait: a durable nearest-neighbor index over named collections.

use std::collections::HashMap;

use async_trait::async_trait;
use uuid::Uuid;

use crate::document::{CollectionInfo, Neighbor};
use crate::error::{RagError, Result};

/// A storage backend for embedded chunks with similarity search.
///
/// Implementations manage named collections of records and support
/// appending aligned batches and querying by vector similarity. Write and
/// read paths have asymmetric creation policy: `get_or_create_collection`
/// creates, while `add` and `query` fail with
/// [`RagError::CollectionNotFound`] for unknown names.
///
/// All records within one collection share the embedding dimension
/// established by the first `add`; later mismatches fail with
/// [`RagError::DimensionMismatch`].
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// List all collections. Returns an empty `Vec` (not an error) when the
    /// store holds no collections.
    async fn list_collections(&self) -> Result<Vec<CollectionInfo>>;

    /// Create a named collection if absent, persisting it empty. Idempotent.
    async fn get_or_create_collection(&self, name: &str) -> Result<()>;

    /// Append a batch of records to a collection.
    ///
    /// The four sequences must be equal length and index-aligned:
    /// `ids[i]` corresponds to `embeddings[i]`, `documents[i]`, and
    /// `metadatas[i]`.
    async fn add(
        &self,
        collection: &str,
        ids: &[Uuid],
        embeddings: &[Vec<f32>],
        documents: &[String],
        metadatas: &[HashMap<String, String>],
    ) -> Result<()>;

    /// Return up to `top_k` stored records nearest to `embedding`, ordered
    /// by ascending distance (most similar first).
    ///
    /// Returns fewer than `top_k` if the collection holds fewer records and
    /// an empty `Vec` if it is empty.
    async fn query(
        &self,
        collection: &str,
        embedding: &[f32],
        top_k: usize,
    ) -> Result<Vec<Neighbor>>;
}

/// Validate that an `add` batch's four sequences are index-aligned.
pub(crate) fn check_batch_alignment(
    ids: &[Uuid],
    embeddings: &[Vec<f32>],
    documents: &[String],
    metadatas: &[HashMap<String, String>],
) -> Result<()> {
    let len = ids.len();
    if embeddings.len() != len || documents.len() != len || metadatas.len() != len {
        return Err(RagError::Validation(format!(
            "add batch sequences must be equal length: ids={}, embeddings={}, documents={}, metadatas={}",
            len,
            embeddings.len(),
            documents.len(),
            metadatas.len()
        )));
    }
    Ok(())
}

/// Validate a vector's dimension against a collection's established dimension.
pub(crate) fn check_dimension(established: Option<usize>, actual: usize) -> Result<()> {
    match established {
        Some(expected) if expected != actual => {
            Err(RagError::DimensionMismatch { expected, actual })
        }
        _ => Ok(()),
    }
}

/// Compute cosine distance between two vectors (`1 - cosine similarity`).
///
/// Embeddings are unit length by the [`EmbeddingProvider`] contract, but the
/// norms are computed here rather than assumed. A zero-magnitude vector has
/// distance 1.0 to everything.
///
/// [`EmbeddingProvider`]: crate::embedding::EmbeddingProvider
pub(crate) fn cosine_distance(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 1.0;
    }
    1.0 - dot / (norm_a * norm_b)
}
