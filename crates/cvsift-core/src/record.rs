//! Candidate record model and batch statistics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Structured candidate information extracted from one resume document.
///
/// Every optional field is either `None` or a non-empty, length-bounded
/// value that passed validation; no field holds an empty string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedRecord {
    pub file_name: String,
    pub name: Option<String>,
    pub email: Option<String>,
    /// Digits plus an optional leading `+`, 10..=15 digits after validation.
    pub phone: Option<String>,
    pub location: Option<String>,
    /// Ordered, case-insensitively deduplicated, at most 3 entries.
    pub education: Vec<String>,
    /// Canonical title-cased, case-insensitively deduplicated, sorted.
    pub skills: Vec<String>,
    /// Non-negative, at most 50.
    pub experience_years: Option<f64>,
    pub processed_at: DateTime<Utc>,
}

impl ParsedRecord {
    /// Create an empty record for a document; extraction fills it in.
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            name: None,
            email: None,
            phone: None,
            location: None,
            education: Vec::new(),
            skills: Vec::new(),
            experience_years: None,
            processed_at: Utc::now(),
        }
    }

    /// Comma-joined skills for spreadsheet-form export.
    pub fn skills_joined(&self) -> String {
        self.skills.join(", ")
    }

    /// Comma-joined education entries for spreadsheet-form export.
    pub fn education_joined(&self) -> String {
        self.education.join(", ")
    }
}

/// A document that failed to process, with the reason.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailedFile {
    pub file_name: String,
    pub error: String,
}

/// Per-run extraction statistics. Created at batch start, mutated only by
/// the batch runner, read-only after the run completes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchStatistics {
    pub total_processed: usize,
    pub with_name: usize,
    pub with_email: usize,
    pub with_phone: usize,
    pub with_location: usize,
    pub with_education: usize,
    pub with_skills: usize,
    pub with_experience: usize,
    pub failed_files: Vec<FailedFile>,
}

impl BatchStatistics {
    /// Count a successfully parsed record.
    pub fn record(&mut self, record: &ParsedRecord) {
        self.total_processed += 1;
        if record.name.is_some() {
            self.with_name += 1;
        }
        if record.email.is_some() {
            self.with_email += 1;
        }
        if record.phone.is_some() {
            self.with_phone += 1;
        }
        if record.location.is_some() {
            self.with_location += 1;
        }
        if !record.education.is_empty() {
            self.with_education += 1;
        }
        if !record.skills.is_empty() {
            self.with_skills += 1;
        }
        if record.experience_years.is_some() {
            self.with_experience += 1;
        }
    }

    /// Count a document that could not be processed.
    pub fn record_failure(&mut self, file_name: impl Into<String>, error: impl Into<String>) {
        self.failed_files.push(FailedFile {
            file_name: file_name.into(),
            error: error.into(),
        });
    }

    /// Fold another statistics block into this one (parallel reduction).
    pub fn merge(&mut self, other: BatchStatistics) {
        self.total_processed += other.total_processed;
        self.with_name += other.with_name;
        self.with_email += other.with_email;
        self.with_phone += other.with_phone;
        self.with_location += other.with_location;
        self.with_education += other.with_education;
        self.with_skills += other.with_skills;
        self.with_experience += other.with_experience;
        self.failed_files.extend(other.failed_files);
    }
}
