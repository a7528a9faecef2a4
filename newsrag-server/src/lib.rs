//! HTTP query API for the NewsRAG backend.
//!
//! Two routes over the shared vector store:
//!
//! - `GET /list-collections` — collection names and metadata
//! - `POST /query` — similarity query returning ranked chunks
//!
//! The handlers are thin: validation, defaulting, and ranking live in
//! [`QueryService`]; this layer only maps [`RagError`] variants onto HTTP
//! statuses and JSON bodies.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_http::trace::TraceLayer;
use tracing::error;

use newsrag_core::{CollectionInfo, QueryService, RagError, RankedResult, VectorStore};

/// Shared handler state: the query service and the store it reads from.
#[derive(Clone)]
pub struct AppState {
    /// Query execution (embed → search → rank).
    pub query: Arc<QueryService>,
    /// Store handle for collection listing.
    pub store: Arc<dyn VectorStore>,
}

/// Build the API router over the given state.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/list-collections", get(list_collections))
        .route("/query", post(query))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// [`RagError`] wrapper mapping the error taxonomy onto HTTP responses.
///
/// `Validation` → 400, `CollectionNotFound`/`NoResults` → 404 (with the
/// two distinct body shapes the API promises), everything else → 500 with
/// the raw failure description.
struct ApiError(RagError);

impl From<RagError> for ApiError {
    fn from(err: RagError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self.0 {
            RagError::Validation(message) => {
                (StatusCode::BAD_REQUEST, json!({ "error": message }))
            }
            RagError::CollectionNotFound { .. } => {
                (StatusCode::NOT_FOUND, json!({ "error": self.0.to_string() }))
            }
            RagError::NoResults => {
                (StatusCode::NOT_FOUND, json!({ "message": "No relevant results found" }))
            }
            other => {
                error!(error = %other, "internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": other.to_string() }))
            }
        };
        (status, Json(body)).into_response()
    }
}

#[derive(Serialize)]
struct ListCollectionsResponse {
    collections: Vec<CollectionInfo>,
}

async fn list_collections(State(state): State<AppState>) -> Result<Response, ApiError> {
    let collections = state.store.list_collections().await?;
    if collections.is_empty() {
        let body = json!({ "message": "No collections found." });
        return Ok((StatusCode::NOT_FOUND, Json(body)).into_response());
    }
    Ok(Json(ListCollectionsResponse { collections }).into_response())
}

#[derive(Debug, Deserialize)]
struct QueryRequest {
    query: Option<String>,
    n_results: Option<usize>,
    collection: Option<String>,
}

#[derive(Serialize)]
struct QueryResponse {
    results: Vec<RankedResult>,
}

async fn query(
    State(state): State<AppState>,
    Json(request): Json<QueryRequest>,
) -> Result<Json<QueryResponse>, ApiError> {
    let text = request.query.unwrap_or_default();
    let results = state
        .query
        .query(&text, request.collection.as_deref(), request.n_results)
        .await?;
    Ok(Json(QueryResponse { results }))
}
