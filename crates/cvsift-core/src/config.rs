//! Configuration and data directory management.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Paths to all CVSift data directories.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataPaths {
    /// Root data directory (e.g., `data/`).
    pub root: PathBuf,
    /// Uploaded resume files awaiting processing (`data/uploads/`).
    pub uploads: PathBuf,
    /// Exported result files, JSON and CSV (`data/results/`).
    pub results: PathBuf,
    /// Embedding model files (`data/models/`).
    pub models: PathBuf,
}

impl DataPaths {
    /// Create data paths from a root directory. Creates directories if needed.
    pub fn new(root: impl AsRef<Path>) -> std::io::Result<Self> {
        let root = root.as_ref().to_path_buf();
        let paths = Self {
            uploads: root.join("uploads"),
            results: root.join("results"),
            models: root.join("models"),
            root,
        };
        paths.ensure_dirs()?;
        Ok(paths)
    }

    /// Create all required directories.
    fn ensure_dirs(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.uploads)?;
        std::fs::create_dir_all(&self.results)?;
        std::fs::create_dir_all(&self.models)?;
        Ok(())
    }
}

/// Top-level CVSift configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CvsiftConfig {
    /// HTTP server port.
    pub port: u16,
    /// Data directory paths.
    pub data_paths: DataPaths,
    /// Embedding dimension (384 for all-MiniLM-L6-v2).
    pub embedding_dim: usize,
    /// Maximum accepted upload size in bytes.
    pub max_upload_bytes: usize,
    /// Per-document processing timeout in seconds.
    pub document_timeout_secs: u64,
}

impl CvsiftConfig {
    /// Create configuration from environment and defaults.
    pub fn from_env(data_dir: impl AsRef<Path>) -> std::io::Result<Self> {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3010);

        let data_paths = DataPaths::new(data_dir)?;

        Ok(Self {
            port,
            data_paths,
            embedding_dim: 384,
            max_upload_bytes: 16 * 1024 * 1024,
            document_timeout_secs: 30,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_paths_created() {
        let dir = std::env::temp_dir().join(format!("cvsift-test-{}", std::process::id()));
        let paths = DataPaths::new(&dir).unwrap();
        assert!(paths.uploads.is_dir());
        assert!(paths.results.is_dir());
        assert!(paths.models.is_dir());
        std::fs::remove_dir_all(&dir).ok();
    }
}
