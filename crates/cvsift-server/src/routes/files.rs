//! File management routes — upload, list, delete.

use std::sync::Arc;

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{delete, get, post};
use axum::{Json, Router};

use cvsift_parse::allowed_file;

use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/files", get(list_files))
        .route("/files/upload", post(upload_files))
        .route("/files/{filename}", delete(delete_file))
}

/// GET /api/files — list uploaded files.
async fn list_files(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let mut files = Vec::new();

    if let Ok(entries) = std::fs::read_dir(&state.config.data_paths.uploads) {
        for entry in entries.filter_map(|e| e.ok()) {
            if let Ok(meta) = entry.metadata() {
                if meta.is_file() {
                    files.push(serde_json::json!({
                        "filename": entry.file_name().to_string_lossy(),
                        "size": meta.len(),
                        "modified": meta.modified()
                            .ok()
                            .map(|m| chrono::DateTime::<chrono::Utc>::from(m).to_rfc3339())
                            .unwrap_or_default(),
                    }));
                }
            }
        }
    }

    // Newest first
    files.sort_by(|a, b| {
        let a_time = a.get("modified").and_then(|v| v.as_str()).unwrap_or("");
        let b_time = b.get("modified").and_then(|v| v.as_str()).unwrap_or("");
        b_time.cmp(a_time)
    });

    Json(serde_json::json!({
        "files": files,
        "total": files.len(),
    }))
}

/// POST /api/files/upload — upload resume files (multipart).
async fn upload_files(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let mut uploaded = Vec::new();
    let mut errors = Vec::new();

    while let Ok(Some(field)) = multipart.next_field().await {
        let filename = match field.file_name() {
            Some(name) => name.to_string(),
            None => continue,
        };

        let safe_filename = sanitize_filename(&filename);
        if !allowed_file(&safe_filename) {
            errors.push(serde_json::json!({
                "filename": safe_filename,
                "error": "Only PDF, DOCX, and TXT files are allowed",
            }));
            continue;
        }

        match field.bytes().await {
            Ok(bytes) => {
                if bytes.len() > state.config.max_upload_bytes {
                    errors.push(serde_json::json!({
                        "filename": safe_filename,
                        "error": "File too large",
                    }));
                    continue;
                }

                let upload_path = state.config.data_paths.uploads.join(&safe_filename);
                // Timestamp-rename duplicates rather than overwriting
                let final_path = if upload_path.exists() {
                    let stem = std::path::Path::new(&safe_filename)
                        .file_stem()
                        .and_then(|s| s.to_str())
                        .unwrap_or("file");
                    let ext = std::path::Path::new(&safe_filename)
                        .extension()
                        .and_then(|e| e.to_str())
                        .unwrap_or("");
                    let ts = chrono::Utc::now().format("%Y%m%d%H%M%S");
                    let new_name = if ext.is_empty() {
                        format!("{}_{}", stem, ts)
                    } else {
                        format!("{}_{}.{}", stem, ts, ext)
                    };
                    state.config.data_paths.uploads.join(new_name)
                } else {
                    upload_path
                };

                match std::fs::write(&final_path, &bytes) {
                    Ok(()) => {
                        uploaded.push(serde_json::json!({
                            "filename": final_path
                                .file_name()
                                .and_then(|n| n.to_str())
                                .unwrap_or(""),
                            "size": bytes.len(),
                        }));
                    }
                    Err(e) => {
                        errors.push(serde_json::json!({
                            "filename": safe_filename,
                            "error": format!("Write failed: {}", e),
                        }));
                    }
                }
            }
            Err(e) => {
                errors.push(serde_json::json!({
                    "filename": safe_filename,
                    "error": format!("Read failed: {}", e),
                }));
            }
        }
    }

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "uploaded": uploaded.len(),
            "errors": errors.len(),
            "files": uploaded,
            "errorDetails": errors,
        })),
    )
}

/// DELETE /api/files/:filename — delete an uploaded file.
async fn delete_file(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> impl IntoResponse {
    let safe_filename = sanitize_filename(&filename);
    let dir = &state.config.data_paths.uploads;
    let file_path = dir.join(&safe_filename);

    if !file_path.exists() {
        return (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": "File not found" })),
        );
    }

    // Security: ensure path is within the uploads directory
    if let (Ok(canonical), Ok(dir_canonical)) = (file_path.canonicalize(), dir.canonicalize()) {
        if !canonical.starts_with(&dir_canonical) {
            return (
                StatusCode::FORBIDDEN,
                Json(serde_json::json!({ "error": "Path traversal not allowed" })),
            );
        }
    }

    match std::fs::remove_file(&file_path) {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({ "deleted": true, "filename": safe_filename })),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "error": e.to_string() })),
        ),
    }
}

/// Sanitize a filename to prevent path traversal.
pub(crate) fn sanitize_filename(name: &str) -> String {
    let name = name.replace('/', "").replace('\\', "").replace("..", "");

    std::path::Path::new(&name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unnamed")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("resume.pdf"), "resume.pdf");
        assert_eq!(sanitize_filename("../../etc/passwd"), "etcpasswd");
        assert_eq!(sanitize_filename("a/b\\c.txt"), "abc.txt");
    }
}
