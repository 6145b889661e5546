//! Post-extraction validation and cleanup.
//!
//! Each rule is applied independently and the pass is idempotent:
//! validating an already-validated record changes nothing. Rejected
//! values are cleared to None, never propagated as errors.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

use cvsift_core::ParsedRecord;

/// Stricter anchored re-check than the extraction patterns.
static STRICT_EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").unwrap());

/// Accepted digit count for a cleaned phone number, inclusive.
const PHONE_DIGITS: std::ops::RangeInclusive<usize> = 10..=15;

/// Experience bounds, inclusive.
const MAX_EXPERIENCE_YEARS: f64 = 50.0;

/// Free-text fields longer than this are considered extraction noise.
const MAX_FIELD_CHARS: usize = 200;

/// Education entries at or below this length carry no information.
const MIN_EDUCATION_CHARS: usize = 3;

/// Validate and canonicalize a raw record.
pub fn validate(mut record: ParsedRecord) -> ParsedRecord {
    record.name = record.name.and_then(|v| clean_text_field(&v));
    record.location = record.location.and_then(|v| clean_text_field(&v));

    record.email = record.email.and_then(|email| {
        let email = email.trim().to_string();
        STRICT_EMAIL.is_match(&email).then_some(email)
    });

    record.phone = record.phone.and_then(|phone| clean_phone(&phone));

    record.experience_years = record
        .experience_years
        .filter(|y| y.is_finite() && (0.0..=MAX_EXPERIENCE_YEARS).contains(y));

    record.skills = dedupe_entries(record.skills, 0);
    record.education = dedupe_entries(record.education, MIN_EDUCATION_CHARS);

    record
}

/// Trim; clear empty or implausibly long values.
fn clean_text_field(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty() && trimmed.chars().count() <= MAX_FIELD_CHARS)
        .then(|| trimmed.to_string())
}

/// Strip a raw phone match to digits plus at most one leading `+`; reject
/// numbers with a digit count outside the accepted range.
fn clean_phone(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let mut cleaned = String::with_capacity(trimmed.len());
    for (i, c) in trimmed.chars().enumerate() {
        if c.is_ascii_digit() || (c == '+' && i == 0) {
            cleaned.push(c);
        }
    }

    let digits = cleaned.chars().filter(char::is_ascii_digit).count();
    PHONE_DIGITS.contains(&digits).then_some(cleaned)
}

/// Trim entries, drop those at or below `min_chars`, and deduplicate
/// case-insensitively, keeping first occurrences in order.
fn dedupe_entries(entries: Vec<String>, min_chars: usize) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    entries
        .into_iter()
        .filter_map(|entry| {
            let trimmed = entry.trim().to_string();
            if trimmed.chars().count() <= min_chars || trimmed.is_empty() {
                return None;
            }
            seen.insert(trimmed.to_lowercase()).then_some(trimmed)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_record() -> ParsedRecord {
        let mut record = ParsedRecord::new("resume.pdf");
        record.name = Some("  Jane Smith ".into());
        record.email = Some("jane.smith@gmail.com".into());
        record.phone = Some("+1 (555) 123-4567".into());
        record.location = Some("Boston, MA".into());
        record.education = vec!["MIT University (2015)".into(), "mit university (2015)".into()];
        record.skills = vec!["Python".into(), "python".into(), " Java ".into()];
        record.experience_years = Some(5.0);
        record
    }

    #[test]
    fn test_phone_cleaned_to_digits() {
        let record = validate(raw_record());
        assert_eq!(record.phone.as_deref(), Some("+15551234567"));
    }

    #[test]
    fn test_phone_too_short_cleared() {
        let mut record = raw_record();
        record.phone = Some("555-1234".into());
        assert!(validate(record).phone.is_none());
    }

    #[test]
    fn test_phone_digit_bounds() {
        let mut record = raw_record();
        record.phone = Some("+1234567890123456789".into());
        assert!(validate(record).phone.is_none());
    }

    #[test]
    fn test_malformed_email_cleared() {
        let mut record = raw_record();
        record.email = Some("not-an-email".into());
        assert!(validate(record).email.is_none());
    }

    #[test]
    fn test_experience_out_of_range_cleared() {
        let mut record = raw_record();
        record.experience_years = Some(70.0);
        assert!(validate(record).experience_years.is_none());

        let mut record = raw_record();
        record.experience_years = Some(-1.0);
        assert!(validate(record).experience_years.is_none());
    }

    #[test]
    fn test_skills_deduped_case_insensitively() {
        let record = validate(raw_record());
        assert_eq!(record.skills, vec!["Python".to_string(), "Java".to_string()]);
    }

    #[test]
    fn test_short_education_entries_dropped() {
        let mut record = raw_record();
        record.education = vec!["MBA".into(), "Master of Business Administration".into()];
        let record = validate(record);
        assert_eq!(record.education.len(), 1);
        assert!(record.education[0].contains("Business"));
    }

    #[test]
    fn test_idempotent() {
        let once = validate(raw_record());
        let twice = validate(once.clone());
        assert_eq!(once.name, twice.name);
        assert_eq!(once.email, twice.email);
        assert_eq!(once.phone, twice.phone);
        assert_eq!(once.location, twice.location);
        assert_eq!(once.education, twice.education);
        assert_eq!(once.skills, twice.skills);
        assert_eq!(once.experience_years, twice.experience_years);
    }

    #[test]
    fn test_name_trimmed() {
        let record = validate(raw_record());
        assert_eq!(record.name.as_deref(), Some("Jane Smith"));
    }

    #[test]
    fn test_overlong_name_cleared() {
        let mut record = raw_record();
        record.name = Some("x".repeat(300));
        assert!(validate(record).name.is_none());
    }
}
