//! NewsRAG batch ingestion binary.
//!
//! Fetches the current headlines feed, then runs the ingestion pipeline:
//! fetch article → extract text → chunk → embed → store. Designed to be
//! re-run periodically; per-article failures are logged and skipped.
//!
//! Environment:
//! - `NEWSAPI_KEY` — NewsAPI key (required)
//! - `NEWSRAG_STORE_PATH` — vector store root directory (default `./news_index`)
//! - `NEWSRAG_EMBED_URL` — embeddings API endpoint (required)
//! - `NEWSRAG_EMBED_API_KEY` — optional bearer token for the embeddings API
//! - `RUST_LOG` — tracing filter (default `info`)

use std::sync::Arc;

use newsrag_core::{
    ArticleOutcome, HttpArticleFetcher, IngestionPipeline, NewsApiClient,
    PersistentVectorStore, RagConfig, RemoteEmbedder, VectorStore,
};
use tracing::{info, warn};
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

    let feed = NewsApiClient::from_env()?.top_headlines().await?;
    info!(articles = feed.len(), "fetched headlines feed");

    let pipeline = IngestionPipeline::builder()
        .config(RagConfig::default())
        .fetcher(Arc::new(HttpArticleFetcher::new()))
        .embedder(Arc::new(RemoteEmbedder::from_env()?))
        .store(store)
        .build()?;

    let report = pipeline.run(&feed).await?;
    for outcome in &report.outcomes {
        match outcome {
            ArticleOutcome::Ingested { url, chunks } => info!(url, chunks, "embedded"),
            ArticleOutcome::Skipped { url, reason } => warn!(url, reason, "skipped"),
        }
    }
    info!(
        ingested = report.ingested(),
        skipped = report.skipped(),
        chunks = report.total_chunks(),
        "embeddings generation done"
    );
    Ok(())
}
