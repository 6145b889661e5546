//! Batch processing over uploaded files.
//!
//! Documents are independent, so the batch fans out over a CPU-bounded
//! worker pool; statistics are folded in a single reduce step after the
//! workers finish, and input order is restored in the output. Each
//! document gets a timeout, after which it is recorded as failed and the
//! batch moves on. Cancellation stops launching new work; documents
//! already in flight run to completion so partial results stay usable.

use std::path::{Path, PathBuf};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{info, warn};

use cvsift_core::{BatchStatistics, ParsedRecord};
use cvsift_parse::{allowed_file, extract_text};

use crate::state::AppState;

/// Parse every supported file in the uploads directory.
pub async fn process_uploads(state: &Arc<AppState>) -> (Vec<ParsedRecord>, BatchStatistics) {
    state.cancel_requested.store(false, Ordering::SeqCst);

    let files = upload_files(&state.config.data_paths.uploads);
    let timeout = Duration::from_secs(state.config.document_timeout_secs);
    let parallelism = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    let semaphore = Arc::new(Semaphore::new(parallelism));

    info!(
        "Processing {} uploaded files ({} workers)",
        files.len(),
        parallelism
    );

    let mut join_set: JoinSet<(usize, String, Result<ParsedRecord, String>)> = JoinSet::new();

    for (idx, path) in files.into_iter().enumerate() {
        if state.cancel_requested.load(Ordering::SeqCst) {
            info!("Cancellation requested, not launching remaining documents");
            break;
        }
        let Ok(permit) = semaphore.clone().acquire_owned().await else {
            break;
        };

        let state = state.clone();
        join_set.spawn(async move {
            let _permit = permit;
            let file_name = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("unknown")
                .to_string();

            let worker_state = state.clone();
            let worker_name = file_name.clone();
            let outcome = tokio::time::timeout(
                timeout,
                tokio::task::spawn_blocking(move || {
                    parse_document(&worker_state, &path, &worker_name)
                }),
            )
            .await;

            let result = match outcome {
                Ok(Ok(result)) => result,
                Ok(Err(join_err)) => Err(format!("worker failed: {join_err}")),
                Err(_) => Err("processing timed out".to_string()),
            };
            (idx, file_name, result)
        });
    }

    let mut outcomes = Vec::new();
    while let Some(joined) = join_set.join_next().await {
        match joined {
            Ok(outcome) => outcomes.push(outcome),
            Err(e) => warn!("Worker task did not complete: {}", e),
        }
    }
    // Restore input order
    outcomes.sort_by_key(|(idx, _, _)| *idx);

    let mut records = Vec::new();
    let mut stats = BatchStatistics::default();
    for (_, file_name, result) in outcomes {
        match result {
            Ok(record) => {
                stats.record(&record);
                records.push(record);
            }
            Err(error) => {
                warn!("Failed to process {}: {}", file_name, error);
                stats.record_failure(&file_name, error);
            }
        }
    }

    info!(
        "Batch complete: {} parsed, {} failed",
        stats.total_processed,
        stats.failed_files.len()
    );
    (records, stats)
}

/// Extract text and assemble one document. Adds the text to the session
/// index for later similarity search.
fn parse_document(
    state: &AppState,
    path: &Path,
    file_name: &str,
) -> Result<ParsedRecord, String> {
    let text = extract_text(path).map_err(|e| e.to_string())?;
    let text = match text {
        Some(t) if !t.trim().is_empty() => t,
        _ => return Err("no text extracted".to_string()),
    };

    let record = state
        .assembler
        .assemble(file_name, &text)
        .map_err(|e| e.to_string())?;
    state.index.add(file_name, &text);
    Ok(record)
}

/// Supported files in the uploads directory, sorted by name for a stable
/// batch order.
fn upload_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)
        .map(|entries| {
            entries
                .filter_map(|e| e.ok())
                .map(|e| e.path())
                .filter(|p| {
                    p.is_file()
                        && p.file_name()
                            .and_then(|n| n.to_str())
                            .map(allowed_file)
                            .unwrap_or(false)
                })
                .collect()
        })
        .unwrap_or_default();
    files.sort();
    files
}

/// Write the batch result as a timestamped JSON file in the results
/// directory; returns the filename.
pub fn save_results_json(state: &AppState, records: &[ParsedRecord]) -> Option<String> {
    let filename = format!("parsed_resumes_{}.json", Utc::now().format("%Y%m%d_%H%M%S"));
    let path = state.config.data_paths.results.join(&filename);

    match serde_json::to_string_pretty(records) {
        Ok(json) => match std::fs::write(&path, json) {
            Ok(()) => Some(filename),
            Err(e) => {
                warn!("Failed to write results file: {}", e);
                None
            }
        },
        Err(e) => {
            warn!("Failed to serialize results: {}", e);
            None
        }
    }
}
