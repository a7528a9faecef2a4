//! Shared test doubles: deterministic embedder and canned-content fetcher.
#![allow(dead_code)]

use std::collections::HashMap;

use async_trait::async_trait;
use newsrag_core::{ArticleFetcher, EmbeddingProvider, RagError, Result};

/// Deterministic hash-based embedding provider.
///
/// Hashes the text bytes and derives a normalized vector whose direction
/// depends on the content, so equal texts embed equally and similarity
/// search behaves consistently across runs.
pub struct MockEmbedder {
    pub dimensions: usize,
}

impl MockEmbedder {
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions }
    }
}

#[async_trait]
impl EmbeddingProvider for MockEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let hash = text.bytes().fold(0u64, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u64));
        let mut embedding = vec![0.0f32; self.dimensions];
        for (i, v) in embedding.iter_mut().enumerate() {
            *v = ((hash.wrapping_add(i as u64)) as f32).sin();
        }
        let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            embedding.iter_mut().for_each(|x| *x /= norm);
        }
        Ok(embedding)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

/// Fetcher serving canned article text by URL; unknown URLs fail.
#[derive(Default)]
pub struct MockFetcher {
    articles: HashMap<String, String>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_article(mut self, url: &str, text: &str) -> Self {
        self.articles.insert(url.to_string(), text.to_string());
        self
    }
}

#[async_trait]
impl ArticleFetcher for MockFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String> {
        self.articles.get(url).cloned().ok_or_else(|| RagError::Fetch {
            url: url.to_string(),
            message: "connection refused".to_string(),
        })
    }
}
