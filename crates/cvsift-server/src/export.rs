//! Result export: CSV spreadsheet form and skill frequency analysis.
//!
//! Both export forms derive deterministically from the same records:
//! list fields are comma-joined in CSV and stay native arrays in JSON.

use std::collections::HashMap;
use std::path::Path;

use cvsift_core::{Error, ParsedRecord, Result};

/// CSV column order, matching the spreadsheet layout consumers expect.
const CSV_HEADERS: [&str; 9] = [
    "File Name",
    "Name",
    "Email",
    "Phone",
    "Location",
    "Education",
    "Skills",
    "Experience (Years)",
    "Processed At",
];

/// Write records to a CSV file.
pub fn export_csv(records: &[ParsedRecord], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| Error::Export(e.to_string()))?;

    writer
        .write_record(CSV_HEADERS)
        .map_err(|e| Error::Export(e.to_string()))?;

    for record in records {
        writer
            .write_record([
                record.file_name.as_str(),
                record.name.as_deref().unwrap_or(""),
                record.email.as_deref().unwrap_or(""),
                record.phone.as_deref().unwrap_or(""),
                record.location.as_deref().unwrap_or(""),
                &record.education_joined(),
                &record.skills_joined(),
                &record
                    .experience_years
                    .map(|y| y.to_string())
                    .unwrap_or_default(),
                &record.processed_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            ])
            .map_err(|e| Error::Export(e.to_string()))?;
    }

    writer.flush().map_err(|e| Error::Export(e.to_string()))?;
    Ok(())
}

/// Count skills across records, case-insensitively, most frequent first.
/// Returns at most `limit` entries in the canonical casing first seen.
pub fn skill_frequencies(records: &[ParsedRecord], limit: usize) -> Vec<(String, usize)> {
    let mut counts: HashMap<String, (String, usize)> = HashMap::new();
    for record in records {
        for skill in &record.skills {
            let entry = counts
                .entry(skill.to_lowercase())
                .or_insert_with(|| (skill.clone(), 0));
            entry.1 += 1;
        }
    }

    let mut frequencies: Vec<(String, usize)> = counts.into_values().collect();
    frequencies.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    frequencies.truncate(limit);
    frequencies
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, skills: &[&str]) -> ParsedRecord {
        let mut r = ParsedRecord::new(format!("{name}.pdf"));
        r.name = Some(name.to_string());
        r.skills = skills.iter().map(|s| s.to_string()).collect();
        r
    }

    #[test]
    fn test_export_csv_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        let mut rec = record("Jane Smith", &["Java", "Python"]);
        rec.email = Some("jane@gmail.com".into());
        rec.experience_years = Some(5.0);

        export_csv(&[rec], &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert!(lines.next().unwrap().starts_with("File Name,Name,Email"));
        let row = lines.next().unwrap();
        assert!(row.contains("Jane Smith"));
        assert!(row.contains("jane@gmail.com"));
        // List field is comma-joined, hence quoted by the writer
        assert!(row.contains("\"Java, Python\""));
        assert!(row.contains('5'));
    }

    #[test]
    fn test_export_csv_empty_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        export_csv(&[ParsedRecord::new("blank.pdf")], &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2);
    }

    #[test]
    fn test_skill_frequencies() {
        let records = vec![
            record("A", &["Python", "Java"]),
            record("B", &["python", "Docker"]),
            record("C", &["Python"]),
        ];
        let freq = skill_frequencies(&records, 50);

        assert_eq!(freq[0].0, "Python");
        assert_eq!(freq[0].1, 3);
        let java = freq.iter().find(|(s, _)| s == "Java").unwrap();
        assert_eq!(java.1, 1);
    }

    #[test]
    fn test_skill_frequencies_limit() {
        let records = vec![record("A", &["Python", "Java", "Docker", "Git"])];
        assert_eq!(skill_frequencies(&records, 2).len(), 2);
    }
}
