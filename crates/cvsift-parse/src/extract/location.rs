//! Location extraction.
//!
//! Labeled fields first, then city/state shapes, then a fixed gazetteer of
//! well-known place names scanned in context. The longest candidate wins,
//! length standing in for completeness.

use once_cell::sync::Lazy;
use regex::Regex;

static LOCATION_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        // Explicit location labels
        r"(?i)(?:Location|Address|Based in|Located in|City|Residence|Lives in)[\s:]+([^\n\r|•]+)",
        // City, ST (optionally with ZIP)
        r"\b([A-Z][a-z]+(?:\s+[A-Z][a-z]+)*,\s*[A-Z]{2}(?:\s+\d{5})?)\b",
        // City, State, Country
        r"\b([A-Z][a-z]+(?:\s+[A-Z][a-z]+)*,\s*[A-Z][a-z]+,\s*[A-Z][a-z]+)\b",
        // City ST ZIP
        r"\b([A-Z][a-z]+(?:\s+[A-Z][a-z]+)*,?\s*[A-Z]{2}\s+\d{5}(?:-\d{4})?)\b",
        // Street address followed by city/state
        r"\b\d+\s+[A-Z][a-z]+(?:\s+[A-Z][a-z]+)*(?:\s+(?:Street|St|Avenue|Ave|Road|Rd|Drive|Dr|Lane|Ln|Boulevard|Blvd))?[,\s]+([A-Z][a-z]+(?:\s+[A-Z][a-z]+)*,?\s*[A-Z]{2,})",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Well-known cities and states scanned for verbatim occurrence.
static GAZETTEER: &[&str] = &[
    "New York", "Los Angeles", "Chicago", "Houston", "Phoenix", "Philadelphia",
    "San Antonio", "San Diego", "Dallas", "San Jose", "Austin", "Jacksonville",
    "Fort Worth", "Columbus", "Charlotte", "San Francisco", "Indianapolis",
    "Seattle", "Denver", "Washington", "Boston", "Nashville", "Baltimore",
    "London", "Paris", "Berlin", "Tokyo", "Sydney", "Toronto", "Mumbai",
    "Delhi", "Bangalore", "Chennai", "Hyderabad", "Pune", "Kolkata",
    "California", "Texas", "Florida", "Pennsylvania", "Illinois",
];

/// Context span captured after a gazetteer hit.
static GAZETTEER_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    GAZETTEER
        .iter()
        .map(|place| {
            Regex::new(&format!(r"(?i)\b{}\b[^.\n]{{0,50}}", regex::escape(place))).unwrap()
        })
        .collect()
});

/// Accepted candidate length, exclusive bounds.
const MIN_LEN: usize = 3;
const MAX_LEN: usize = 100;

/// Extract the most complete location string, or None.
pub fn extract_location(text: &str) -> Option<String> {
    let mut candidates: Vec<String> = Vec::new();

    for re in LOCATION_PATTERNS.iter() {
        for cap in re.captures_iter(text) {
            if let Some(m) = cap.get(1) {
                let location = m.as_str().trim_matches([' ', ',', '.']);
                if location.len() > MIN_LEN && location.len() < MAX_LEN {
                    candidates.push(location.to_string());
                }
            }
        }
    }

    for re in GAZETTEER_PATTERNS.iter() {
        if let Some(m) = re.find(text) {
            let location = m.as_str().trim_matches([' ', ',', '.']);
            if location.len() > MIN_LEN && location.len() < MAX_LEN {
                candidates.push(location.to_string());
            }
        }
    }

    candidates.sort_by(|a, b| b.len().cmp(&a.len()));
    candidates.into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labeled_location() {
        let text = "Location: Portland, Oregon\nEmail: p@x.io";
        assert_eq!(extract_location(text).as_deref(), Some("Portland, Oregon"));
    }

    #[test]
    fn test_city_state_shape() {
        let text = "Senior Engineer\nSpringfield, IL 62704";
        let loc = extract_location(text).unwrap();
        assert!(loc.contains("Springfield"));
        assert!(loc.contains("IL"));
    }

    #[test]
    fn test_gazetteer_hit() {
        let text = "Currently working remotely from San Francisco with a distributed team";
        let loc = extract_location(text).unwrap();
        assert!(loc.contains("San Francisco"));
    }

    #[test]
    fn test_longest_candidate_wins() {
        let text = "Based in: Austin\nAddress: 100 Main Street, Austin, TX 78701";
        let loc = extract_location(text).unwrap();
        assert!(loc.len() > "Austin".len());
    }

    #[test]
    fn test_no_location() {
        assert!(extract_location("python java sql").is_none());
    }

    #[test]
    fn test_bounds_respected() {
        // A labeled value that is too short is rejected
        assert!(extract_location("Location: NY").is_none());
    }
}
