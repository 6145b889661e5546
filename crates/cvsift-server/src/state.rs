//! Shared application state.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use parking_lot::RwLock;

use cvsift_core::{BatchStatistics, CvsiftConfig, ParsedRecord};
use cvsift_infer::{DocumentIndex, EmbedderBackend};
use cvsift_parse::Assembler;

/// Shared application state accessible from all route handlers.
pub struct AppState {
    pub config: CvsiftConfig,
    pub embedder: Arc<dyn EmbedderBackend>,
    pub assembler: Assembler,
    /// Session-scoped similarity index over processed resume texts.
    pub index: DocumentIndex,
    /// Records from the most recent processing run.
    pub records: RwLock<Vec<ParsedRecord>>,
    /// Statistics from the most recent processing run.
    pub stats: RwLock<Option<BatchStatistics>>,
    /// Set to stop launching new per-document work mid-batch.
    pub cancel_requested: AtomicBool,
}

impl AppState {
    pub fn new(config: CvsiftConfig, embedder: Arc<dyn EmbedderBackend>) -> Self {
        let assembler = Assembler::new(embedder.clone());
        let index = DocumentIndex::new(embedder.clone());

        Self {
            config,
            embedder,
            assembler,
            index,
            records: RwLock::new(Vec::new()),
            stats: RwLock::new(None),
            cancel_requested: AtomicBool::new(false),
        }
    }
}
