//! Similarity-based extraction fallback.
//!
//! When a regex cascade finds nothing for a field, the enhancer ranks the
//! document's sentences against a fixed natural-language description of
//! that field and returns the best-matching snippet. Degrades to None
//! whenever the embedding backend is absent or fails internally.

use std::sync::Arc;

use once_cell::sync::Lazy;
use tracing::debug;

use crate::embedder::{cosine_similarity, EmbedderBackend};

/// Minimum cosine similarity for a sentence to count as relevant.
const SIMILARITY_THRESHOLD: f32 = 0.3;

/// Number of top-ranked sentences to keep.
const TOP_SENTENCES: usize = 3;

/// Maximum length of the returned snippet, in characters.
const MAX_SNIPPET_CHARS: usize = 200;

/// Field name → query description. Process-wide constant, never mutated.
static FIELD_QUERIES: Lazy<Vec<(&'static str, &'static str)>> = Lazy::new(|| {
    vec![
        ("name", "person name full name individual"),
        ("email", "email address contact information"),
        ("phone", "phone number telephone contact"),
        ("location", "address location city state country"),
        (
            "education",
            "education degree university college bachelor master phd",
        ),
        (
            "skills",
            "skills technical abilities competencies programming languages",
        ),
        (
            "experience",
            "experience years worked professional background",
        ),
    ]
});

fn query_for(field: &str) -> Option<&'static str> {
    FIELD_QUERIES
        .iter()
        .find(|(name, _)| *name == field)
        .map(|(_, query)| *query)
}

/// Ranks document sentences against fixed per-field queries.
pub struct SemanticEnhancer {
    embedder: Arc<dyn EmbedderBackend>,
}

impl SemanticEnhancer {
    pub fn new(embedder: Arc<dyn EmbedderBackend>) -> Self {
        Self { embedder }
    }

    /// Whether the underlying embedding backend is loaded.
    pub fn is_available(&self) -> bool {
        self.embedder.is_available()
    }

    /// Best-guess snippet for `field`, or None.
    ///
    /// Never panics past this boundary: unknown fields, an absent backend,
    /// and embedding failures all degrade to None.
    pub fn enhance(&self, text: &str, field: &str) -> Option<String> {
        if !self.embedder.is_available() {
            return None;
        }
        let query = match query_for(field) {
            Some(q) => q,
            None => {
                debug!("No enhancement query for field '{}'", field);
                return None;
            }
        };

        let sentences: Vec<&str> = text
            .split('.')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();
        if sentences.is_empty() {
            return None;
        }

        let query_embedding = self.embedder.embed(query)?.embedding;
        let sentence_embeddings = self.embedder.embed_batch(&sentences);

        // Rank sentences above the threshold, highest similarity first.
        let mut ranked: Vec<(f32, &str)> = sentences
            .iter()
            .zip(sentence_embeddings.iter())
            .filter_map(|(&sent, emb)| {
                let emb = emb.as_ref()?;
                let sim = cosine_similarity(&query_embedding, &emb.embedding);
                (sim > SIMILARITY_THRESHOLD).then_some((sim, sent))
            })
            .collect();
        ranked.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        ranked.truncate(TOP_SENTENCES);

        if ranked.is_empty() {
            return None;
        }

        let joined = ranked
            .iter()
            .map(|(_, sent)| *sent)
            .collect::<Vec<_>>()
            .join(" ");
        Some(truncate_chars(&joined, MAX_SNIPPET_CHARS))
    }
}

/// Truncate to at most `max` characters on a char boundary.
fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedder::{EmbeddingResult, NoopEmbedder};
    use ndarray::Array1;

    /// Deterministic test backend: dimension 0 counts "degree"-family
    /// words, dimension 1 is a constant bias.
    struct KeywordEmbedder;

    impl EmbedderBackend for KeywordEmbedder {
        fn embed(&self, text: &str) -> Option<EmbeddingResult> {
            let lower = text.to_lowercase();
            let hits = ["education", "degree", "university", "bachelor", "master", "phd"]
                .iter()
                .filter(|kw| lower.contains(**kw))
                .count() as f32;
            Some(EmbeddingResult {
                embedding: Array1::from_vec(vec![hits, 1.0]),
                cached: false,
            })
        }

        fn dimension(&self) -> usize {
            2
        }

        fn is_available(&self) -> bool {
            true
        }
    }

    #[test]
    fn test_enhance_unavailable_backend() {
        let enhancer = SemanticEnhancer::new(Arc::new(NoopEmbedder::new(384)));
        assert!(!enhancer.is_available());
        assert!(enhancer.enhance("Some resume text.", "education").is_none());
    }

    #[test]
    fn test_enhance_unknown_field() {
        let enhancer = SemanticEnhancer::new(Arc::new(KeywordEmbedder));
        assert!(enhancer.enhance("Some text.", "favorite_color").is_none());
    }

    #[test]
    fn test_enhance_picks_relevant_sentence() {
        let enhancer = SemanticEnhancer::new(Arc::new(KeywordEmbedder));
        let text = "I enjoy hiking on weekends. \
                    Bachelor degree from Stanford University. \
                    My cat is named Whiskers.";
        let result = enhancer.enhance(text, "education").unwrap();
        assert!(result.contains("Stanford"));
    }

    #[test]
    fn test_enhance_truncates_to_200_chars() {
        let enhancer = SemanticEnhancer::new(Arc::new(KeywordEmbedder));
        let long = format!(
            "Bachelor degree university education {}.",
            "filler ".repeat(80)
        );
        let result = enhancer.enhance(&long, "education").unwrap();
        assert!(result.chars().count() <= 200);
    }
}
