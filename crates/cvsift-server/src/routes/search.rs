//! Semantic search route over the session document index.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;

use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/search", post(semantic_search))
}

fn default_limit() -> usize {
    5
}

#[derive(Debug, Deserialize)]
struct SearchRequest {
    query: String,
    #[serde(default = "default_limit")]
    limit: usize,
}

/// POST /api/search — rank processed resumes against a free-text query.
async fn semantic_search(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SearchRequest>,
) -> impl IntoResponse {
    if request.query.trim().is_empty() || !state.index.is_available() || state.index.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({
                "error": "No query provided or no resumes stored",
            })),
        );
    }

    let results = state.index.search(&request.query, request.limit);
    (
        StatusCode::OK,
        Json(serde_json::json!({ "results": results })),
    )
}
