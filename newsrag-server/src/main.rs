//! NewsRAG query server binary.
//!
//! Environment:
//! - `NEWSRAG_STORE_PATH` — vector store root directory (default `./news_index`)
//! - `NEWSRAG_EMBED_URL` — embeddings API endpoint (required)
//! - `NEWSRAG_EMBED_API_KEY` — optional bearer token for the embeddings API
//! - `NEWSRAG_BIND` — bind address (default `127.0.0.1:8080`)
//! - `RUST_LOG` — tracing filter (default `info`)

use std::sync::Arc;

use newsrag_server::{router, AppState};
use newsrag_core::{
    PersistentVectorStore, QueryService, RagConfig, RemoteEmbedder, VectorStore,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let store_path =
        std::env::var("NEWSRAG_STORE_PATH").unwrap_or_else(|_| "./news_index".to_string());
    let store: Arc<dyn VectorStore> =
        Arc::new(PersistentVectorStore::open(&store_path).await?);
    info!(store_path, "opened vector store");

    let embedder = Arc::new(RemoteEmbedder::from_env()?);
    let query = Arc::new(QueryService::new(RagConfig::default(), embedder, store.clone()));

    let bind = std::env::var("NEWSRAG_BIND").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
    let listener = tokio::net::TcpListener::bind(&bind).await?;
    info!(%bind, "listening");

    axum::serve(listener, router(AppState { query, store })).await?;
    Ok(())
}
