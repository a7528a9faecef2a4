//! Query service tests: validation, ranking contract, defaults, and the
//! no-results condition.

mod common;

use std::collections::HashMap;
use std::sync::Arc;

use common::MockEmbedder;
use newsrag_core::{
    EmbeddingProvider, InMemoryVectorStore, QueryService, RagConfig, RagError, VectorStore,
};
use uuid::Uuid;

const DIM: usize = 32;

async fn seeded_service(texts: &[&str]) -> (QueryService, Arc<InMemoryVectorStore>) {
    let store = Arc::new(InMemoryVectorStore::new());
    store.get_or_create_collection("news_articles").await.unwrap();

    let embedder = Arc::new(MockEmbedder::new(DIM));
    if !texts.is_empty() {
        let embeddings = embedder.embed_batch(texts).await.unwrap();
        let ids: Vec<Uuid> = texts.iter().map(|_| Uuid::new_v4()).collect();
        let documents: Vec<String> = texts.iter().map(|t| t.to_string()).collect();
        let metadatas: Vec<HashMap<String, String>> = documents
            .iter()
            .map(|d| {
                HashMap::from([
                    ("url".to_string(), "https://news.test/a".to_string()),
                    ("text".to_string(), d.clone()),
                ])
            })
            .collect();
        store.add("news_articles", &ids, &embeddings, &documents, &metadatas).await.unwrap();
    }

    let service = QueryService::new(RagConfig::default(), embedder, store.clone());
    (service, store)
}

#[tokio::test]
async fn ranks_are_dense_and_one_based() {
    let (service, _) = seeded_service(&["alpha story", "beta story", "gamma story"]).await;
    let results = service.query("alpha story", None, Some(3)).await.unwrap();

    assert_eq!(results.len(), 3);
    for (idx, result) in results.iter().enumerate() {
        assert_eq!(result.rank, idx as u32 + 1);
    }
    // The exact text match embeds identically, so it ranks first.
    assert_eq!(results[0].text, "alpha story");
}

#[tokio::test]
async fn repeated_queries_are_idempotent() {
    let (service, _) = seeded_service(&["one", "two", "three", "four"]).await;
    let first = service.query("two", None, Some(4)).await.unwrap();
    let second = service.query("two", None, Some(4)).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn empty_query_text_is_rejected() {
    let (service, _) = seeded_service(&["story"]).await;
    for text in ["", "   ", "\n"] {
        let err = service.query(text, None, None).await.unwrap_err();
        assert!(matches!(&err, RagError::Validation(msg) if msg == "No query provided"));
    }
}

#[tokio::test]
async fn zero_n_results_is_rejected() {
    let (service, _) = seeded_service(&["story"]).await;
    let err = service.query("story", None, Some(0)).await.unwrap_err();
    assert!(matches!(err, RagError::Validation(_)));
}

#[tokio::test]
async fn empty_collection_yields_no_results_condition() {
    let (service, _) = seeded_service(&[]).await;
    let err = service.query("anything", None, None).await.unwrap_err();
    assert!(matches!(err, RagError::NoResults));
}

#[tokio::test]
async fn unknown_collection_is_not_created_by_queries() {
    let (service, store) = seeded_service(&["story"]).await;
    let err = service.query("anything", Some("nope"), Some(5)).await.unwrap_err();
    assert!(matches!(err, RagError::CollectionNotFound { ref name, .. } if name == "nope"));

    let names: Vec<String> =
        store.list_collections().await.unwrap().into_iter().map(|c| c.name).collect();
    assert_eq!(names, vec!["news_articles".to_string()]);
}

#[tokio::test]
async fn missing_top_k_uses_default() {
    let texts: Vec<String> = (0..8).map(|i| format!("story number {i}")).collect();
    let refs: Vec<&str> = texts.iter().map(String::as_str).collect();
    let (service, _) = seeded_service(&refs).await;

    // default_top_k is 5
    let results = service.query("story number 0", None, None).await.unwrap();
    assert_eq!(results.len(), 5);
}

#[tokio::test]
async fn oversized_top_k_is_clamped() {
    let texts: Vec<String> = (0..4).map(|i| format!("story {i}")).collect();
    let refs: Vec<&str> = texts.iter().map(String::as_str).collect();
    let store = Arc::new(InMemoryVectorStore::new());
    store.get_or_create_collection("news_articles").await.unwrap();

    let embedder = Arc::new(MockEmbedder::new(DIM));
    let embeddings = embedder.embed_batch(&refs).await.unwrap();
    let ids: Vec<Uuid> = refs.iter().map(|_| Uuid::new_v4()).collect();
    let documents: Vec<String> = texts.clone();
    let metadatas: Vec<HashMap<String, String>> =
        documents.iter().map(|_| HashMap::new()).collect();
    store.add("news_articles", &ids, &embeddings, &documents, &metadatas).await.unwrap();

    let config = RagConfig::builder().default_top_k(2).max_top_k(3).build().unwrap();
    let service = QueryService::new(config, embedder, store);

    // Requested 1000, capped at 3.
    let results = service.query("story 0", None, Some(1000)).await.unwrap();
    assert_eq!(results.len(), 3);
}
