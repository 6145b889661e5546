//! In-memory session index for ad-hoc similarity search across parsed
//! documents.
//!
//! Owned by the caller with an explicit lifecycle: created at session
//! start, populated during processing, cleared on request. Documents are
//! only retained when the embedding backend is available, since search is
//! purely similarity-based.

use std::sync::Arc;

use ndarray::Array1;
use parking_lot::RwLock;
use serde::Serialize;

use crate::embedder::{cosine_similarity, EmbedderBackend};

/// Minimum similarity for a search hit.
const SEARCH_THRESHOLD: f32 = 0.1;

/// Snippet length returned with each hit, in characters.
const SNIPPET_CHARS: usize = 200;

struct IndexedDocument {
    id: String,
    text: String,
    embedding: Array1<f32>,
}

/// One search result.
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
    pub id: String,
    pub similarity: f32,
    pub snippet: String,
}

/// Session-scoped document store with similarity search.
pub struct DocumentIndex {
    embedder: Arc<dyn EmbedderBackend>,
    documents: RwLock<Vec<IndexedDocument>>,
}

impl DocumentIndex {
    pub fn new(embedder: Arc<dyn EmbedderBackend>) -> Self {
        Self {
            embedder,
            documents: RwLock::new(Vec::new()),
        }
    }

    /// Whether search is possible at all.
    pub fn is_available(&self) -> bool {
        self.embedder.is_available()
    }

    /// Embed and retain a document. Returns false when the backend is
    /// unavailable (the document is not stored).
    pub fn add(&self, id: impl Into<String>, text: &str) -> bool {
        let Some(result) = self.embedder.embed(text) else {
            return false;
        };
        self.documents.write().push(IndexedDocument {
            id: id.into(),
            text: text.to_string(),
            embedding: result.embedding,
        });
        true
    }

    /// Rank stored documents against a free-text query.
    pub fn search(&self, query: &str, limit: usize) -> Vec<SearchHit> {
        let Some(query_embedding) = self.embedder.embed(query) else {
            return Vec::new();
        };

        let documents = self.documents.read();
        let mut hits: Vec<SearchHit> = documents
            .iter()
            .filter_map(|doc| {
                let sim = cosine_similarity(&query_embedding.embedding, &doc.embedding);
                (sim > SEARCH_THRESHOLD).then(|| SearchHit {
                    id: doc.id.clone(),
                    similarity: sim,
                    snippet: snippet(&doc.text),
                })
            })
            .collect();

        hits.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        hits.truncate(limit);
        hits
    }

    /// Number of stored documents.
    pub fn len(&self) -> usize {
        self.documents.read().len()
    }

    /// Whether the index holds no documents.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop all stored documents.
    pub fn clear(&self) {
        self.documents.write().clear();
    }
}

fn snippet(text: &str) -> String {
    match text.char_indices().nth(SNIPPET_CHARS) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedder::{EmbeddingResult, NoopEmbedder};

    /// Embeds text as [count of "rust", count of "python", 1].
    struct LangEmbedder;

    impl EmbedderBackend for LangEmbedder {
        fn embed(&self, text: &str) -> Option<EmbeddingResult> {
            let lower = text.to_lowercase();
            Some(EmbeddingResult {
                embedding: Array1::from_vec(vec![
                    lower.matches("rust").count() as f32,
                    lower.matches("python").count() as f32,
                    1.0,
                ]),
                cached: false,
            })
        }

        fn dimension(&self) -> usize {
            3
        }

        fn is_available(&self) -> bool {
            true
        }
    }

    #[test]
    fn test_add_and_search() {
        let index = DocumentIndex::new(Arc::new(LangEmbedder));
        assert!(index.add("a.pdf", "Rust Rust Rust systems engineer"));
        assert!(index.add("b.pdf", "Python Python Python data scientist"));
        assert_eq!(index.len(), 2);

        let hits = index.search("rust rust rust", 5);
        assert!(!hits.is_empty());
        assert_eq!(hits[0].id, "a.pdf");
    }

    #[test]
    fn test_unavailable_backend_stores_nothing() {
        let index = DocumentIndex::new(Arc::new(NoopEmbedder::new(384)));
        assert!(!index.is_available());
        assert!(!index.add("a.pdf", "text"));
        assert!(index.is_empty());
        assert!(index.search("query", 5).is_empty());
    }

    #[test]
    fn test_clear() {
        let index = DocumentIndex::new(Arc::new(LangEmbedder));
        index.add("a.pdf", "Rust");
        index.clear();
        assert!(index.is_empty());
    }

    #[test]
    fn test_search_respects_limit() {
        let index = DocumentIndex::new(Arc::new(LangEmbedder));
        for i in 0..10 {
            index.add(format!("doc{}.pdf", i), "Rust developer");
        }
        let hits = index.search("rust", 5);
        assert_eq!(hits.len(), 5);
    }
}
