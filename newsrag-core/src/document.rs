//! Data types for persisted chunks, collections, and query results.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A persisted chunk of article text with its vector embedding.
///
/// Records are created once during ingestion and never mutated. The
/// `metadata` map carries `url` and `text` keys; `metadata["text"]`
/// duplicates `text` at write time for retrieval convenience.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChunkRecord {
    /// Unique identifier for this chunk instance.
    pub id: Uuid,
    /// The chunk's text content.
    pub text: String,
    /// The embedding vector for `text`. Fixed dimension per collection.
    pub embedding: Vec<f32>,
    /// Key-value metadata (`url` of the source article, duplicated `text`).
    pub metadata: HashMap<String, String>,
}

/// A named collection's identity as reported by `list_collections`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CollectionInfo {
    /// The collection name.
    pub name: String,
    /// Collection-level metadata. Empty for collections created by this crate.
    pub metadata: HashMap<String, String>,
}

/// A stored chunk returned from a nearest-neighbor query.
#[derive(Debug, Clone, PartialEq)]
pub struct Neighbor {
    /// The stored chunk's identifier.
    pub id: Uuid,
    /// The stored chunk's text.
    pub document: String,
    /// The stored chunk's metadata.
    pub metadata: HashMap<String, String>,
    /// Cosine distance to the query vector (lower is more similar).
    pub distance: f32,
}

/// One item of a ranked query answer.
///
/// `rank` is 1-based and dense, matching the store's ascending-distance
/// ordering. No re-ranking or thresholding is applied.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RankedResult {
    /// 1-based dense rank (1 = most similar).
    pub rank: u32,
    /// The retrieved chunk's text.
    pub text: String,
    /// The retrieved chunk's metadata.
    pub metadata: HashMap<String, String>,
}
