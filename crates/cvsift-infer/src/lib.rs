//! CVSift Infer — optional semantic-similarity capability.
//!
//! Provides the `EmbedderBackend` trait for generating embeddings.
//! When the `onnx` feature is enabled and model files are present,
//! `OnnxEmbedder` loads all-MiniLM-L6-v2 for 384-dim embeddings.
//! Without it, `NoopEmbedder` is used: the semantic enhancer and the
//! document index report "unavailable" and extraction runs on regex
//! heuristics alone.

pub mod cache;
pub mod embedder;
pub mod enhance;
pub mod index;
pub mod onnx_embedder;

pub use cache::QueryCache;
pub use embedder::{cosine_similarity, EmbedderBackend, EmbeddingResult, NoopEmbedder};
pub use enhance::SemanticEnhancer;
pub use index::{DocumentIndex, SearchHit};

#[cfg(feature = "onnx")]
pub use onnx_embedder::OnnxEmbedder;

use std::path::Path;
use std::sync::Arc;

/// Create the best available embedder for the given model directory.
///
/// Tries ONNX first (if feature enabled and model files present),
/// falls back to NoopEmbedder.
pub fn create_embedder(model_dir: &Path) -> Arc<dyn EmbedderBackend> {
    #[cfg(feature = "onnx")]
    {
        match OnnxEmbedder::load(model_dir) {
            Ok(embedder) => {
                tracing::info!("Using ONNX embedder (dim={})", embedder.dimension());
                return Arc::new(embedder);
            }
            Err(e) => {
                tracing::warn!(
                    "ONNX embedder unavailable: {}. Running heuristics-only.",
                    e
                );
            }
        }
    }

    #[cfg(not(feature = "onnx"))]
    {
        let _ = model_dir;
        tracing::info!("ONNX feature disabled. Running heuristics-only.");
    }

    Arc::new(NoopEmbedder::new(384))
}
