//! Processing routes — run a batch over the uploads, cancel, clear.

use std::sync::atomic::Ordering;
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use tracing::info;

use crate::processing;
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/process", post(process_resumes))
        .route("/process/cancel", post(cancel_processing))
        .route("/clear", post(clear_session))
}

/// POST /api/process — parse every uploaded file and return records plus
/// batch statistics.
async fn process_resumes(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let (records, stats) = processing::process_uploads(&state).await;

    if records.is_empty() && stats.failed_files.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({
                "success": false,
                "message": "No files to process",
            })),
        );
    }

    let json_file = processing::save_results_json(&state, &records);

    let message = format!("Successfully processed {} resumes", records.len());
    *state.records.write() = records.clone();
    *state.stats.write() = Some(stats.clone());

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "success": true,
            "message": message,
            "data": records,
            "stats": stats,
            "json_file": json_file,
        })),
    )
}

/// POST /api/process/cancel — stop launching new per-document work.
async fn cancel_processing(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    state.cancel_requested.store(true, Ordering::SeqCst);
    info!("Batch cancellation requested");
    Json(serde_json::json!({ "success": true }))
}

/// POST /api/clear — clear uploads, results, stored records, and the
/// similarity index.
async fn clear_session(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    for dir in [
        &state.config.data_paths.uploads,
        &state.config.data_paths.results,
    ] {
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.filter_map(|e| e.ok()) {
                if entry.path().is_file() {
                    if let Err(e) = std::fs::remove_file(entry.path()) {
                        return (
                            StatusCode::INTERNAL_SERVER_ERROR,
                            Json(serde_json::json!({
                                "success": false,
                                "message": format!("Clear error: {}", e),
                            })),
                        );
                    }
                }
            }
        }
    }

    state.records.write().clear();
    *state.stats.write() = None;
    state.index.clear();

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "success": true,
            "message": "All files cleared successfully",
        })),
    )
}
