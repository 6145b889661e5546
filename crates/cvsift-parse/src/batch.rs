//! Batch processing: applies the assembler across many documents and
//! accumulates per-field statistics.

use tracing::{info, warn};

use cvsift_core::{BatchStatistics, ParsedRecord};

use crate::assemble::Assembler;

/// Runs a set of documents through the assembler, independently: one
/// document's failure never aborts the batch, and input order is
/// preserved in the output.
pub struct BatchRunner<'a> {
    assembler: &'a Assembler,
}

impl<'a> BatchRunner<'a> {
    pub fn new(assembler: &'a Assembler) -> Self {
        Self { assembler }
    }

    /// Process `(document_id, text)` pairs into records plus statistics.
    pub fn run(&self, documents: &[(String, String)]) -> (Vec<ParsedRecord>, BatchStatistics) {
        let mut records = Vec::with_capacity(documents.len());
        let mut stats = BatchStatistics::default();

        for (id, text) in documents {
            if text.trim().is_empty() {
                warn!("No text for {}, recording failure", id);
                stats.record_failure(id, "no text extracted");
                continue;
            }

            match self.assembler.assemble(id, text) {
                Ok(record) => {
                    stats.record(&record);
                    records.push(record);
                }
                Err(e) => {
                    warn!("Failed to parse {}: {}", id, e);
                    stats.record_failure(id, e.to_string());
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
}

#[cfg(test)]
mod tests {
    use super::*;
    use cvsift_infer::NoopEmbedder;
    use std::sync::Arc;

    fn docs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(id, text)| (id.to_string(), text.to_string()))
            .collect()
    }

    #[test]
    fn test_failed_document_does_not_abort_batch() {
        let assembler = Assembler::new(Arc::new(NoopEmbedder::new(384)));
        let runner = BatchRunner::new(&assembler);

        let documents = docs(&[
            ("one.txt", "Jane Smith\njane.smith@gmail.com"),
            ("two.txt", "   "),
            ("three.txt", "Bob Jones\nbob.jones@fastmail.org"),
        ]);
        let (records, stats) = runner.run(&documents);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].file_name, "one.txt");
        assert_eq!(records[1].file_name, "three.txt");
        assert_eq!(stats.failed_files.len(), 1);
        assert_eq!(stats.failed_files[0].file_name, "two.txt");
    }

    #[test]
    fn test_statistics_counts() {
        let assembler = Assembler::new(Arc::new(NoopEmbedder::new(384)));
        let runner = BatchRunner::new(&assembler);

        let documents = docs(&[
            ("a.txt", "Jane Smith\njane.smith@gmail.com\n5 years of experience"),
            ("b.txt", "no structured fields at all"),
        ]);
        let (records, stats) = runner.run(&documents);

        assert_eq!(records.len(), 2);
        assert_eq!(stats.total_processed, 2);
        assert_eq!(stats.with_name, 1);
        assert_eq!(stats.with_email, 1);
        assert_eq!(stats.with_experience, 1);
        assert_eq!(stats.with_phone, 0);
    }

    #[test]
    fn test_empty_batch() {
        let assembler = Assembler::new(Arc::new(NoopEmbedder::new(384)));
        let runner = BatchRunner::new(&assembler);

        let (records, stats) = runner.run(&[]);
        assert!(records.is_empty());
        assert_eq!(stats.total_processed, 0);
        assert!(stats.failed_files.is_empty());
    }
}
