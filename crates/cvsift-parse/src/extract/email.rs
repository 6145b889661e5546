//! Email extraction.

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").unwrap(),
        Regex::new(r"\b[A-Za-z0-9][A-Za-z0-9._%+-]*@[A-Za-z0-9][A-Za-z0-9.-]*\.[A-Za-z]{2,}\b")
            .unwrap(),
    ]
});

/// Addresses containing these substrings are treated as placeholders.
const PLACEHOLDER_MARKERS: &[&str] = &["example", "test", "dummy", "sample"];

/// Extract the first plausible email address, or None.
///
/// All matches are collected in pattern order; placeholder addresses are
/// discarded and the first survivor wins.
pub fn extract_email(text: &str) -> Option<String> {
    let mut candidates: Vec<&str> = Vec::new();
    for re in EMAIL_PATTERNS.iter() {
        for m in re.find_iter(text) {
            candidates.push(m.as_str());
        }
    }

    candidates
        .into_iter()
        .find(|email| {
            let lower = email.to_lowercase();
            let domain_has_dot = email
                .split_once('@')
                .map(|(_, domain)| domain.contains('.'))
                .unwrap_or(false);
            domain_has_dot && !PLACEHOLDER_MARKERS.iter().any(|marker| lower.contains(marker))
        })
        .map(str::to_string)
}
