//! Years-of-experience extraction.
//!
//! The primary strategy matches explicit "<N> years of experience"
//! statements in several word orders and takes the maximum value found.
//! Only when that yields nothing are employment date ranges summed.

use once_cell::sync::Lazy;
use regex::Regex;

static EXPERIENCE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)(\d+(?:\.\d+)?)\s*(?:years?|yrs?)\s*(?:of\s*)?(?:experience|exp)",
        r"(?i)(?:experience|exp)\s*(?:of\s*)?(\d+(?:\.\d+)?)\s*(?:years?|yrs?)",
        r"(?i)(\d+(?:\.\d+)?)\+\s*(?:years?|yrs?)",
        r"(?i)over\s*(\d+(?:\.\d+)?)\s*(?:years?|yrs?)",
        r"(?i)more\s*than\s*(\d+(?:\.\d+)?)\s*(?:years?|yrs?)",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// `2015-2019`, `2019 – present` employment range shapes.
static RANGE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b((?:19|20)\d{2})\s*(?:-|–|—|to)\s*((?:19|20)\d{2}|present|current)\b")
        .unwrap()
});

/// Plausible bounds for a career length, inclusive.
const MAX_YEARS: f64 = 50.0;

/// Extract years of experience, or None. `current_year` anchors
/// "present"/"current" in employment ranges.
pub fn extract_experience_years(text: &str, current_year: i32) -> Option<f64> {
    // Primary: explicit statements, maximum across all matches
    let mut best: Option<f64> = None;
    for re in EXPERIENCE_PATTERNS.iter() {
        for cap in re.captures_iter(text) {
            if let Ok(years) = cap[1].parse::<f64>() {
                if (0.0..=MAX_YEARS).contains(&years) {
                    best = Some(best.map_or(years, |b: f64| b.max(years)));
                }
            }
        }
    }
    if best.is_some() {
        return best;
    }

    // Fallback: sum employment date ranges
    let mut total = 0.0;
    let mut matched = false;
    for cap in RANGE_PATTERN.captures_iter(text) {
        let start: i32 = match cap[1].parse() {
            Ok(y) => y,
            Err(_) => continue,
        };
        let end: i32 = match cap[2].to_lowercase().as_str() {
            "present" | "current" => current_year,
            year => match year.parse() {
                Ok(y) => y,
                Err(_) => continue,
            },
        };
        if end >= start {
            total += f64::from(end - start);
            matched = true;
        }
    }

    (matched && (0.0..=MAX_YEARS).contains(&total)).then_some(total)
}
