//! Durable vector store rooted at a fixed on-disk path.
//!
//! [`PersistentVectorStore`] keeps one JSON file per collection under its
//! root directory. The full store is loaded into memory at [`open`] time and
//! each mutation rewrites the owning collection's file (write to a temp file,
//! then rename), so collections survive process restarts. Concurrent readers
//! and a writer are serialized through a `tokio::sync::RwLock`; no further
//! locking is imposed on callers.
//!
//! [`open`]: PersistentVectorStore::open

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::document::{ChunkRecord, CollectionInfo, Neighbor};
use crate::error::{RagError, Result};
use crate::vectorstore::{check_batch_alignment, check_dimension, cosine_distance, VectorStore};

const BACKEND: &str = "Persistent";

#[derive(Debug, Default, Serialize, Deserialize)]
struct CollectionData {
    metadata: HashMap<String, String>,
    dimension: Option<usize>,
    records: Vec<ChunkRecord>,
}

/// A durable [`VectorStore`] persisting each collection as a JSON file.
#[derive(Debug)]
pub struct PersistentVectorStore {
    root: PathBuf,
    collections: RwLock<HashMap<String, CollectionData>>,
}

fn store_error(message: impl std::fmt::Display) -> RagError {
    RagError::Store { backend: BACKEND.to_string(), message: message.to_string() }
}

/// Collection names become file names, so path separators are rejected.
fn check_collection_name(name: &str) -> Result<()> {
    if name.is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
        return Err(RagError::Validation(format!("invalid collection name: {name:?}")));
    }
    Ok(())
}

impl PersistentVectorStore {
    /// Open a store rooted at `root`, creating the directory if absent and
    /// loading every `*.json` collection file found there.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        tokio::fs::create_dir_all(&root).await.map_err(store_error)?;

        let mut collections = HashMap::new();
        let mut entries = tokio::fs::read_dir(&root).await.map_err(store_error)?;
        while let Some(entry) = entries.next_entry().await.map_err(store_error)? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let bytes = tokio::fs::read(&path).await.map_err(store_error)?;
            let data: CollectionData = serde_json::from_slice(&bytes)
                .map_err(|e| store_error(format!("corrupt collection file {path:?}: {e}")))?;
            debug!(collection = name, records = data.records.len(), "loaded collection");
            collections.insert(name.to_string(), data);
        }

        Ok(Self { root, collections: RwLock::new(collections) })
    }

    /// Serialize one collection to its file. Writes a temp file first and
    /// renames it into place so a crash never leaves a half-written file.
    async fn persist(&self, name: &str, data: &CollectionData) -> Result<()> {
        let path = self.root.join(format!("{name}.json"));
        let tmp = self.root.join(format!("{name}.json.tmp"));
        let bytes = serde_json::to_vec(data).map_err(store_error)?;
        tokio::fs::write(&tmp, &bytes).await.map_err(store_error)?;
        tokio::fs::rename(&tmp, &path).await.map_err(store_error)?;
        Ok(())
    }
}

#[async_trait]
impl VectorStore for PersistentVectorStore {
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
        check_collection_name(name)?;
        let mut collections = self.collections.write().await;
        if collections.contains_key(name) {
            return Ok(());
        }
        let data = CollectionData::default();
        self.persist(name, &data).await?;
        collections.insert(name.to_string(), data);
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

        // Flush the durable write before releasing the lock.
        let snapshot = &collections[collection];
        self.persist(collection, snapshot).await
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
