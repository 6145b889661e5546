//! Education extraction.
//!
//! Unlike the other fields this cascade merges its strategies rather than
//! taking the first success: section capture, degree vocabulary, and
//! year/institution pairs are unioned, deduplicated case-insensitively,
//! and ranked longest-first.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

use super::is_section_header;

static DEGREE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)\b(?:Bachelor|Master)(?:\s+of\s+(?:Science|Arts|Engineering|Technology|Business|Commerce|Computer Science|Information Technology))?(?:\s+(?:in|of)\s+[^,\n.]+)?",
        r"(?i)\b(?:PhD|Ph\.D|Doctorate|Doctoral)(?:\s+in\s+[^,\n.]+)?",
        r"(?i)\b(?:MBA|MCA|BCA|B\.Tech|M\.Tech|B\.Sc|M\.Sc|B\.A|M\.A|B\.Com|M\.Com)\b(?:\s+(?:in|of)\s+[^,\n.]+)?",
        r"(?i)\b(?:University|Institute|College|School)\s+of\s+[^,\n.]+",
        r"\b[A-Z][A-Za-z]+(?:\s+[A-Z][A-Za-z]+)*\s+(?:University|Institute|College)\b",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// `(year, institution)` and `(institution, year)` shapes. The first
/// capture group is the year in the first two, the institution in the last.
static YEAR_FIRST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(\d{4})[\s,]+([A-Z][A-Za-z]+(?:\s+[A-Z][A-Za-z]+)*\s+(?:University|Institute|College|School))",
    )
    .unwrap()
});

static INSTITUTION_FIRST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"([A-Z][A-Za-z]+(?:\s+[A-Z][A-Za-z]+)*\s+(?:University|Institute|College|School))[\s,]+(\d{4})",
    )
    .unwrap()
});

static GRADUATED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(?:graduated|graduation|completed|earned|received|obtained)[\s,]*(?:in|from)?[\s,]*(\d{4})[\s,]*(?:from|at)?[\s,]+([A-Z][^,\n.]+)",
    )
    .unwrap()
});

/// Headers that open an education section.
const EDUCATION_HEADERS: &[&str] = &[
    "education",
    "academic background",
    "educational background",
    "qualifications",
];

const MAX_ENTRIES: usize = 3;
const MAX_ENTRY_CHARS: usize = 200;

/// Extract education entries: deduplicated, longest first, at most three.
pub fn extract_education(text: &str) -> Vec<String> {
    let mut entries: Vec<String> = Vec::new();

    if let Some(section) = capture_section(text) {
        entries.push(section);
    }

    for re in DEGREE_PATTERNS.iter() {
        for m in re.find_iter(text) {
            entries.push(m.as_str().trim().to_string());
        }
    }

    for cap in YEAR_FIRST.captures_iter(text) {
        entries.push(format!("{} ({})", &cap[2], &cap[1]));
    }
    for cap in INSTITUTION_FIRST.captures_iter(text) {
        entries.push(format!("{} ({})", &cap[1], &cap[2]));
    }
    for cap in GRADUATED.captures_iter(text) {
        entries.push(format!("{} ({})", cap[2].trim(), &cap[1]));
    }

    // Union: case-insensitive dedup, then most complete entries first
    let mut seen: HashSet<String> = HashSet::new();
    let mut unique: Vec<String> = Vec::new();
    for entry in entries {
        let entry = entry.trim().to_string();
        if entry.is_empty() {
            continue;
        }
        if seen.insert(entry.to_lowercase()) {
            unique.push(entry);
        }
    }
    unique.sort_by(|a, b| b.len().cmp(&a.len()));
    unique.truncate(MAX_ENTRIES);
    unique
}

/// Capture the body of an "Education" section: everything from the header
/// to the next blank line, section header, or end of document.
fn capture_section(text: &str) -> Option<String> {
    let mut captured: Vec<&str> = Vec::new();
    let mut in_section = false;

    for line in text.lines() {
        let trimmed = line.trim();
        if in_section {
            if trimmed.is_empty() || is_section_header(trimmed) {
                break;
            }
            captured.push(trimmed);
        } else if let Some(rest) = education_header(trimmed) {
            in_section = true;
            if !rest.is_empty() {
                captured.push(rest);
            }
        }
    }

    if captured.is_empty() {
        None
    } else {
        let joined = captured.join("; ");
        Some(truncate_chars(&joined, MAX_ENTRY_CHARS))
    }
}

/// If the line opens an education section, return any inline content
/// following the header label.
fn education_header(line: &str) -> Option<&str> {
    for header in EDUCATION_HEADERS {
        if line.len() >= header.len() && line.is_char_boundary(header.len()) {
            let (head, rest) = line.split_at(header.len());
            if head.eq_ignore_ascii_case(header) {
                let rest = rest.trim_start();
                if rest.is_empty() || rest.starts_with(':') {
                    return Some(rest.trim_start_matches(':').trim());
                }
            }
        }
    }
    None
}

fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degree_with_field() {
        let entries = extract_education(
            "Bachelor of Science in Computer Science, MIT University, 2015",
        );
        assert!(entries.iter().any(|e| e.contains("Bachelor")));
        assert!(entries.iter().any(|e| e.contains("MIT University")));
    }

    #[test]
    fn test_institution_year_pair() {
        let entries = extract_education("Stanford University, 2018");
        assert!(entries.iter().any(|e| e == "Stanford University (2018)"));
    }

    #[test]
    fn test_section_capture() {
        let text = "EDUCATION\nB.Sc in Physics, Oxford\nGPA 3.9\n\nEXPERIENCE\nAcme Corp";
        let entries = extract_education(text);
        assert!(entries.iter().any(|e| e.contains("Physics") && e.contains("GPA")));
        assert!(!entries.iter().any(|e| e.contains("Acme")));
    }

    #[test]
    fn test_case_insensitive_dedup() {
        let text = "MBA in Finance\nmba in finance";
        let entries = extract_education(text);
        let finance: Vec<_> = entries
            .iter()
            .filter(|e| e.to_lowercase().contains("finance"))
            .collect();
        assert_eq!(finance.len(), 1);
    }

    #[test]
    fn test_top_three_longest() {
        let text = "Bachelor of Science in Electrical Engineering\n\
                    Master of Science in Computer Engineering Systems\n\
                    PhD in Distributed Computing Research\n\
                    MBA in General Management Practice";
        let entries = extract_education(text);
        assert_eq!(entries.len(), 3);
        // Longest entry first
        assert!(entries[0].len() >= entries[1].len());
        assert!(entries[1].len() >= entries[2].len());
    }

    #[test]
    fn test_no_education() {
        assert!(extract_education("Skilled in Python and Java.").is_empty());
    }
}
