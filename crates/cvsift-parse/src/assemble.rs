//! Record assembly: runs every field extractor over one document and
//! applies the semantic fallback and validation passes.

use std::sync::Arc;

use chrono::{Datelike, Utc};
use tracing::debug;

use cvsift_core::{Error, ParsedRecord, Result};
use cvsift_infer::{EmbedderBackend, SemanticEnhancer};

use crate::extract::{education, email, experience, location, name, phone, skills};
use crate::normalize::normalize;
use crate::validate::validate;

/// Assembles one `ParsedRecord` per document.
///
/// A missing field is a normal outcome, not an error; the only error path
/// is a document with no usable text at all.
pub struct Assembler {
    enhancer: SemanticEnhancer,
}

impl Assembler {
    pub fn new(embedder: Arc<dyn EmbedderBackend>) -> Self {
        Self {
            enhancer: SemanticEnhancer::new(embedder),
        }
    }

    /// Parse a document's text into a validated record.
    pub fn assemble(&self, file_name: &str, text: &str) -> Result<ParsedRecord> {
        if text.trim().is_empty() {
            return Err(Error::TextUnavailable(file_name.to_string()));
        }

        let text = normalize(text);
        let mut record = ParsedRecord::new(file_name);

        record.name = name::extract_name(&text);
        record.email = email::extract_email(&text);
        record.phone = phone::extract_phone(&text);
        record.location = location::extract_location(&text);
        record.education = education::extract_education(&text);
        record.skills = skills::extract_skills(&text);
        record.experience_years =
            experience::extract_experience_years(&text, Utc::now().year());

        // Semantic fallback for name, location, and education only
        if record.name.is_none() {
            record.name = self.enhance(&text, "name", file_name);
        }
        if record.location.is_none() {
            record.location = self.enhance(&text, "location", file_name);
        }
        if record.education.is_empty() {
            if let Some(snippet) = self.enhance(&text, "education", file_name) {
                record.education = vec![snippet];
            }
        }

        Ok(validate(record))
    }

    fn enhance(&self, text: &str, field: &str, file_name: &str) -> Option<String> {
        let result = self.enhancer.enhance(text, field);
        if result.is_some() {
            debug!("Semantic fallback resolved '{}' for {}", field, file_name);
        }
        result
    }
}
