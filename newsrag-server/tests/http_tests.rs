//! HTTP contract tests: status codes and body shapes for both routes.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use newsrag_core::{
    EmbeddingProvider, InMemoryVectorStore, QueryService, RagConfig, Result, VectorStore,
};
use newsrag_server::{router, AppState};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

/// Deterministic hash-based embedder, identical texts embed identically.
struct MockEmbedder {
    dimensions: usize,
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

async fn app_with_documents(texts: &[&str]) -> axum::Router {
    let store = Arc::new(InMemoryVectorStore::new());
    let embedder = Arc::new(MockEmbedder { dimensions: 32 });

    if !texts.is_empty() {
        store.get_or_create_collection("news_articles").await.unwrap();
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

    let query = Arc::new(QueryService::new(RagConfig::default(), embedder, store.clone()));
    let store: Arc<dyn VectorStore> = store;
    router(AppState { query, store })
}

async fn post_query(app: axum::Router, body: Value) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::post("/query")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn query_returns_ranked_results() {
    let app = app_with_documents(&["alpha story", "beta story", "gamma story"]).await;
    let (status, body) =
        post_query(app, json!({ "query": "alpha story", "n_results": 2 })).await;

    assert_eq!(status, StatusCode::OK);
    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["rank"], 1);
    assert_eq!(results[1]["rank"], 2);
    assert_eq!(results[0]["text"], "alpha story");
    assert_eq!(results[0]["metadata"]["url"], "https://news.test/a");
}

#[tokio::test]
async fn missing_query_is_a_400() {
    let app = app_with_documents(&["story"]).await;
    let (status, body) = post_query(app, json!({ "n_results": 5 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No query provided");
}

#[tokio::test]
async fn empty_query_is_a_400() {
    let app = app_with_documents(&["story"]).await;
    let (status, body) = post_query(app, json!({ "query": "   " })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No query provided");
}

#[tokio::test]
async fn unknown_collection_is_a_404_with_error_body() {
    let app = app_with_documents(&["story"]).await;
    let (status, body) =
        post_query(app, json!({ "query": "anything", "collection": "nope" })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let message = body["error"].as_str().unwrap();
    assert!(message.starts_with("Collection 'nope' not found:"), "got: {message}");
}

#[tokio::test]
async fn zero_matches_is_a_404_with_message_body() {
    // The collection exists but holds no records.
    let store = Arc::new(InMemoryVectorStore::new());
    store.get_or_create_collection("news_articles").await.unwrap();
    let embedder = Arc::new(MockEmbedder { dimensions: 32 });
    let query = Arc::new(QueryService::new(RagConfig::default(), embedder, store.clone()));
    let store: Arc<dyn VectorStore> = store;
    let app = router(AppState { query, store });

    let (status, body) = post_query(app, json!({ "query": "anything" })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "No relevant results found");
}

#[tokio::test]
async fn list_collections_reports_names() {
    let app = app_with_documents(&["story"]).await;
    let response =
        app.oneshot(Request::get("/list-collections").body(Body::empty()).unwrap()).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    let collections = body["collections"].as_array().unwrap();
    assert_eq!(collections.len(), 1);
    assert_eq!(collections[0]["name"], "news_articles");
}

#[tokio::test]
async fn empty_store_listing_is_a_404() {
    let app = app_with_documents(&[]).await;
    let response =
        app.oneshot(Request::get("/list-collections").body(Body::empty()).unwrap()).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["message"], "No collections found.");
}
