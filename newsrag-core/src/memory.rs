//! In-memory vector store using cosine distance.
//!
//! [`InMemoryVectorStore`] keeps collections in a `HashMap` behind a
//! `tokio::sync::RwLock`. Nothing is persisted; it exists for tests and
//! development against the same [`VectorStore`] contract as the durable
//! backend.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::document::{ChunkRecord, CollectionInfo, Neighbor};
use crate::error::{RagError, Result};
use crate::vectorstore::{check_batch_alignment, check_dimension, cosine_distance, VectorStore};

#[derive(Debug, Default)]
struct CollectionData {
    metadata: HashMap<String, String>,
    dimension: Option<usize>,
    records: Vec<ChunkRecord>,
}

/// An in-memory [`VectorStore`] backed by a `HashMap`.
#[derive(Debug, Default)]
pub struct InMemoryVectorStore {
    collections: RwLock<HashMap<String, CollectionData>>,
}

impl InMemoryVectorStore {
    /// Create a new empty in-memory vector store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VectorStore for InMemoryVectorStore {
    async fn list_collections(&self) -> Result<Vec<CollectionInfo>> {
        let collections = self.collections.read().await;
        let mut infos: Vec<CollectionInfo> = collections
            .iter()
            .map(|(name, data)| CollectionInfo {
                name: name.clone(),
                metadata: data.metadata.clone(),
            })
            .collect();
        infos.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(infos)
    }

    async fn get_or_create_collection(&self, name: &str) -> Result<()> {
        let mut collections = self.collections.write().await;
        collections.entry(name.to_string()).or_default();
        Ok(())
    }

    async fn add(
        &self,
        collection: &str,
        ids: &[Uuid],
        embeddings: &[Vec<f32>],
        documents: &[String],
        metadatas: &[HashMap<String, String>],
    ) -> Result<()> {
        check_batch_alignment(ids, embeddings, documents, metadatas)?;

        let mut collections = self.collections.write().await;
        let data = collections.get_mut(collection).ok_or_else(|| {
            RagError::CollectionNotFound {
                name: collection.to_string(),
                message: "collection does not exist".to_string(),
            }
        })?;

        // Validate the whole batch before committing anything.
        let mut dimension = data.dimension;
        for embedding in embeddings {
            check_dimension(dimension, embedding.len())?;
            dimension.get_or_insert(embedding.len());
        }
        data.dimension = dimension;

        for i in 0..ids.len() {
            data.records.push(ChunkRecord {
                id: ids[i],
                text: documents[i].clone(),
                embedding: embeddings[i].clone(),
                metadata: metadatas[i].clone(),
            });
        }
        Ok(())
    }

    async fn query(
        &self,
        collection: &str,
        embedding: &[f32],
        top_k: usize,
    ) -> Result<Vec<Neighbor>> {
        let collections = self.collections.read().await;
        let data = collections.get(collection).ok_or_else(|| {
            RagError::CollectionNotFound {
                name: collection.to_string(),
                message: "collection does not exist".to_string(),
            }
        })?;

        check_dimension(data.dimension, embedding.len())?;

        let mut neighbors: Vec<Neighbor> = data
            .records
            .iter()
            .map(|record| Neighbor {
                id: record.id,
                document: record.text.clone(),
                metadata: record.metadata.clone(),
                distance: cosine_distance(&record.embedding, embedding),
            })
            .collect();

        neighbors.sort_by(|a, b| {
            a.distance.partial_cmp(&b.distance).unwrap_or(std::cmp::Ordering::Equal)
        });
        neighbors.truncate(top_k);
        Ok(neighbors)
    }
}
