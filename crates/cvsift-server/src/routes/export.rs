//! Export routes — CSV export and result file download.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;

use cvsift_core::ParsedRecord;

use crate::export;
use crate::routes::files::sanitize_filename;
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/export", post(export_csv))
        .route("/download/{filename}", get(download_file))
}

#[derive(Debug, Deserialize)]
struct ExportRequest {
    /// Records to export; defaults to the last processing run.
    #[serde(default)]
    data: Option<Vec<ParsedRecord>>,
}

/// POST /api/export — write records to a timestamped CSV file and return
/// its name for download.
async fn export_csv(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ExportRequest>,
) -> impl IntoResponse {
    let records = request
        .data
        .unwrap_or_else(|| state.records.read().clone());

    if records.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({
                "success": false,
                "message": "No data to export",
            })),
        );
    }

    let filename = format!(
        "parsed_resumes_{}.csv",
        chrono::Utc::now().format("%Y%m%d_%H%M%S")
    );
    let path = state.config.data_paths.results.join(&filename);

    match export::export_csv(&records, &path) {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "success": true,
                "message": "CSV file created successfully",
                "filename": filename,
            })),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({
                "success": false,
                "message": format!("Export error: {}", e),
            })),
        ),
    }
}

/// GET /api/download/:filename — download a file from the results
/// directory.
async fn download_file(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> impl IntoResponse {
    let safe_filename = sanitize_filename(&filename);
    let dir = &state.config.data_paths.results;
    let file_path = dir.join(&safe_filename);

    if !file_path.exists() {
        return (
            StatusCode::NOT_FOUND,
            [
                (header::CONTENT_TYPE, "application/json".to_string()),
                (header::CONTENT_DISPOSITION, "inline".to_string()),
            ],
            br#"{"error":"File not found"}"#.to_vec(),
        );
    }

    // Security: ensure path is within the results directory
    if let (Ok(canonical), Ok(dir_canonical)) = (file_path.canonicalize(), dir.canonicalize()) {
        if !canonical.starts_with(&dir_canonical) {
            return (
                StatusCode::FORBIDDEN,
                [
                    (header::CONTENT_TYPE, "application/json".to_string()),
                    (header::CONTENT_DISPOSITION, "inline".to_string()),
                ],
                br#"{"error":"Path traversal not allowed"}"#.to_vec(),
            );
        }
    }

    match std::fs::read(&file_path) {
        Ok(bytes) => {
            let content_type = match file_path.extension().and_then(|e| e.to_str()) {
                Some("json") => "application/json",
                Some("csv") => "text/csv",
                _ => "application/octet-stream",
            };
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, content_type.to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{}\"", safe_filename),
                    ),
                ],
                bytes,
            )
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            [
                (header::CONTENT_TYPE, "application/json".to_string()),
                (header::CONTENT_DISPOSITION, "inline".to_string()),
            ],
            format!(r#"{{"error":"{}"}}"#, e).into_bytes(),
        ),
    }
}
