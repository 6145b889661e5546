//! Text normalization before pattern matching.
//!
//! Collapses whitespace runs and strips control characters while keeping
//! line structure intact — name extraction is line-oriented, and section
//! detection relies on blank lines.

/// Normalize document text: unify line endings, strip control characters,
/// collapse horizontal whitespace runs within each line.
pub fn normalize(text: &str) -> String {
    let unified = text.replace("\r\n", "\n").replace('\r', "\n");
    let mut out = String::with_capacity(unified.len());

    for line in unified.split('\n') {
        let cleaned: String = line
            .chars()
            .filter(|c| !c.is_control() || *c == '\t')
            .collect();
        let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
        out.push_str(&collapsed);
        out.push('\n');
    }

    // Drop the trailing newline added by the loop
    out.pop();
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_spaces_and_tabs() {
        assert_eq!(normalize("a  \t b"), "a b");
    }

    #[test]
    fn test_preserves_blank_lines() {
        assert_eq!(normalize("a\n\nb"), "a\n\nb");
    }

    #[test]
    fn test_unifies_line_endings() {
        assert_eq!(normalize("a\r\nb\rc"), "a\nb\nc");
    }

    #[test]
    fn test_strips_control_characters() {
        assert_eq!(normalize("a\u{0}b\u{7}c"), "abc");
    }
}
