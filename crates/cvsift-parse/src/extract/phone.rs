//! Phone number extraction.
//!
//! An ordered list of regional and format-specific patterns; candidates
//! surviving a minimum digit count are ranked by the length of the raw
//! match, longer separators implying a more complete number.

use once_cell::sync::Lazy;
use regex::Regex;

/// Contextual words stripped before matching so labels don't split numbers.
static CONTACT_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:phone|tel|mobile|cell|contact|number)[\s:]*").unwrap());

static PHONE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        // International formats
        r"\+\d{1,4}[\s.-]?\(?\d{1,4}\)?[\s.-]?\d{1,4}[\s.-]?\d{1,9}",
        // US formats with country code
        r"\+1[\s.-]?\(?\d{3}\)?[\s.-]?\d{3}[\s.-]?\d{4}",
        // Standard US formats
        r"\(?\d{3}\)?[\s.-]?\d{3}[\s.-]?\d{4}",
        // International without +
        r"\b\d{1,4}[\s.-]?\d{3,4}[\s.-]?\d{3,4}[\s.-]?\d{3,4}\b",
        // 10-digit numbers
        r"\b\d{10}\b",
        // Various separators
        r"\b\d{3}[\s.-]\d{3}[\s.-]\d{4}\b",
        // With parentheses
        r"\(\d{3}\)[\s.-]?\d{3}[\s.-]?\d{4}",
        // Indian format
        r"\+91[\s-]?\d{10}|\b[6-9]\d{9}\b",
        // Other grouped international formats
        r"\b\d{2,4}[\s-]\d{2,4}[\s-]\d{2,4}[\s-]\d{2,4}\b",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Minimum digits for a raw match to stay a candidate; the validator
/// applies the stricter 10..=15 gate after cleanup.
const MIN_DIGITS: usize = 7;

/// Extract the most complete raw phone match, or None.
pub fn extract_phone(text: &str) -> Option<String> {
    let cleaned_text = CONTACT_LABEL.replace_all(text, "");

    let mut found: Vec<String> = Vec::new();
    for re in PHONE_PATTERNS.iter() {
        for m in re.find_iter(&cleaned_text) {
            let digits = m.as_str().chars().filter(char::is_ascii_digit).count();
            if digits >= MIN_DIGITS {
                found.push(m.as_str().trim().to_string());
            }
        }
    }

    // Prefer the longest original match; stable sort keeps pattern order
    // among equals.
    found.sort_by(|a, b| b.len().cmp(&a.len()));
    found.into_iter().next()
}
