//! Candidate name extraction.
//!
//! Three ordered strategies, first success wins: a scan of the top lines
//! with a likelihood predicate, explicit "Name:" labels, then any short
//! capitalized-word sequence near the top of the document.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Words that disqualify a token from being part of a name.
static NON_NAME_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "resume", "cv", "curriculum", "vitae", "profile", "summary", "objective",
        "contact", "information", "details", "about", "me", "personal", "data",
        "phone", "email", "address", "location", "city", "state", "country",
        "education", "experience", "skills", "projects", "achievements", "awards",
        "references", "hobbies", "interests", "languages", "certifications",
        "professional", "career", "work", "employment", "job", "position",
        "title", "role", "responsibility", "duties", "qualification", "degree",
        "name", "full", "candidate", "applicant",
    ]
    .into_iter()
    .collect()
});

static NAME_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z'-]+$").unwrap());

static PUNCT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s'-]").unwrap());

static LABELED_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:Name|Full Name|Candidate|Applicant)[\s:]+([A-Z][a-z]+(?:\s+[A-Z][a-z]+)*)")
        .unwrap()
});

static BARE_NAME_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^([A-Z][a-z]+\s+[A-Z][a-z]+(?:\s+[A-Z][a-z]+)?)\s*$").unwrap());

static CAPITALIZED_SEQUENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Z][a-z]+(?:\s+[A-Z][a-z]+){1,3}\b").unwrap());

/// How many leading non-blank lines the first-strategy scan covers.
const TOP_LINE_SCAN: usize = 8;

/// Whether a cleaned line plausibly holds a person's name: 1-5 tokens,
/// letters/apostrophe/hyphen only, 2-20 chars each, none in the stop set,
/// and at least half in title case.
fn is_likely_name(text: &str) -> bool {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() || words.len() > 5 {
        return false;
    }

    for word in &words {
        if !NAME_TOKEN.is_match(word) {
            return false;
        }
        if word.len() < 2 || word.len() > 20 {
            return false;
        }
        if NON_NAME_WORDS.contains(word.to_lowercase().as_str()) {
            return false;
        }
    }

    let title_cased = words
        .iter()
        .filter(|w| {
            let mut chars = w.chars();
            chars.next().map(|c| c.is_uppercase()).unwrap_or(false)
                && chars.all(|c| !c.is_uppercase())
        })
        .count();
    title_cased * 2 >= words.len()
}

/// Extract the candidate's name, or None. Output is the raw matched text.
pub fn extract_name(text: &str) -> Option<String> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    // Strategy 1: scan the top of the document line by line
    for line in lines.iter().take(TOP_LINE_SCAN) {
        let lower = line.to_lowercase();
        if ["resume", "cv", "curriculum vitae"]
            .iter()
            .any(|kw| lower.contains(kw))
        {
            continue;
        }

        let cleaned = PUNCT.replace_all(line, " ");
        let cleaned = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
        if is_likely_name(&cleaned) {
            return Some(cleaned);
        }
    }

    // Strategy 2: explicit labels, then bare first/last-name lines
    for re in [&*LABELED_NAME, &*BARE_NAME_LINE] {
        for cap in re.captures_iter(text) {
            if let Some(m) = cap.get(1) {
                if is_likely_name(m.as_str()) {
                    return Some(m.as_str().to_string());
                }
            }
        }
    }

    // Strategy 3: any short capitalized sequence near the top
    let head = lines
        .iter()
        .take(10)
        .copied()
        .collect::<Vec<_>>()
        .join("\n");
    for m in CAPITALIZED_SEQUENCE.find_iter(&head) {
        let candidate = m.as_str();
        if candidate.split_whitespace().count() >= 2 && is_likely_name(candidate) {
            return Some(candidate.to_string());
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_on_first_line() {
        let text = "Jane Smith\njane.smith@gmail.com\n+1 (555) 123-4567";
        assert_eq!(extract_name(text).as_deref(), Some("Jane Smith"));
    }

    #[test]
    fn test_skips_resume_header_line() {
        let text = "Resume of a Software Engineer\nJohn O'Brien\njohn@corp.io";
        assert_eq!(extract_name(text).as_deref(), Some("John O'Brien"));
    }

    #[test]
    fn test_labeled_name() {
        let text = "CURRICULUM VITAE\nContact: 555-0100\nName: Maria Garcia\nSkills: Python";
        assert_eq!(extract_name(text).as_deref(), Some("Maria Garcia"));
    }

    #[test]
    fn test_stop_words_rejected() {
        assert!(!is_likely_name("Professional Summary"));
        assert!(!is_likely_name("Contact Information"));
        assert!(!is_likely_name("Work Experience"));
    }

    #[test]
    fn test_likely_name_shapes() {
        assert!(is_likely_name("Jane Smith"));
        assert!(is_likely_name("Jean-Paul Sartre"));
        assert!(!is_likely_name("jane smith"));
        assert!(!is_likely_name("A B C D E F"));
        assert!(!is_likely_name("J Smith"));
    }

    #[test]
    fn test_no_name_found() {
        let text = "skills: python, java\n5 years of experience";
        assert!(extract_name(text).is_none());
    }

    #[test]
    fn test_hyphenated_and_apostrophe_names() {
        let text = "Anne-Marie O'Connor\nanne@example.org";
        assert_eq!(extract_name(text).as_deref(), Some("Anne-Marie O'Connor"));
    }
}
