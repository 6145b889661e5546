//! Skills extraction.
//!
//! Three merged sources: word-boundary matches against a static
//! categorized vocabulary, the body of a "Skills" section split on list
//! delimiters, and bullet lines re-matched against the vocabulary. The
//! result is a case-insensitively deduplicated set in canonical casing,
//! sorted for deterministic serialization.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

use super::is_section_header;

// Languages
const LANGUAGES: &[&str] = &[
    "Python", "Java", "JavaScript", "TypeScript", "C++", "C#", "PHP", "Ruby",
    "Go", "Rust", "Swift", "Kotlin", "Scala", "R", "MATLAB", "SQL", "HTML",
    "CSS", "Perl", "Objective-C",
];

// Frameworks and libraries
const FRAMEWORKS: &[&str] = &[
    "React", "Angular", "Vue", "Node.js", "Django", "Flask", "FastAPI",
    "Spring", "Rails", "Laravel", "Bootstrap", "jQuery", "Express",
    ".NET", "Next.js",
];

// Databases
const DATABASES: &[&str] = &[
    "MongoDB", "MySQL", "PostgreSQL", "SQLite", "Redis", "Elasticsearch",
    "Cassandra", "DynamoDB", "Oracle",
];

// Cloud and DevOps
const CLOUD_DEVOPS: &[&str] = &[
    "Docker", "Kubernetes", "AWS", "Azure", "GCP", "Jenkins", "Terraform",
    "Ansible", "CircleCI", "Linux", "Windows", "MacOS",
];

// Tools
const TOOLS: &[&str] = &[
    "Git", "GitHub", "GitLab", "Jira", "Confluence", "Postman", "Maven",
    "Gradle", "Webpack",
];

// Data science and ML
const DATA_ML: &[&str] = &[
    "Machine Learning", "Artificial Intelligence", "Data Science",
    "Deep Learning", "Neural Networks", "TensorFlow", "PyTorch",
    "Scikit-learn", "Pandas", "NumPy", "Matplotlib", "Seaborn", "Tableau",
    "Power BI", "NLP", "Computer Vision",
];

// Design and office
const DESIGN_OFFICE: &[&str] = &[
    "Excel", "Word", "PowerPoint", "Photoshop", "Illustrator", "InDesign",
    "Figma", "Sketch",
];

// Concepts and soft skills
const CONCEPTS: &[&str] = &[
    "REST", "GraphQL", "Microservices", "Agile", "Scrum", "CI/CD", "TDD",
    "OOP", "Leadership", "Communication", "Problem Solving", "Teamwork",
    "Project Management",
];

/// Canonical term → word-boundary-safe matcher, compiled once.
static VOCABULARY: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    [
        LANGUAGES,
        FRAMEWORKS,
        DATABASES,
        CLOUD_DEVOPS,
        TOOLS,
        DATA_ML,
        DESIGN_OFFICE,
        CONCEPTS,
    ]
    .into_iter()
    .flatten()
    .map(|&term| (term, term_regex(term)))
    .collect()
});

/// Lowercased vocabulary lookup used to canonicalize free-text entries.
static CANONICAL: Lazy<BTreeMap<String, &'static str>> = Lazy::new(|| {
    VOCABULARY
        .iter()
        .map(|(term, _)| (term.to_lowercase(), *term))
        .collect()
});

static SKILLS_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:Skills?|Technical Skills?|Core Competencies|Technologies?)\b\s*:?\s*(.*)$")
        .unwrap()
});

static LIST_DELIMITERS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[,;•\-\n]").unwrap());

/// Word boundaries only make sense next to word characters; terms like
/// `C++` or `.NET` start or end on punctuation.
fn term_regex(term: &str) -> Regex {
    let escaped = regex::escape(term);
    let leading = if term.starts_with(|c: char| c.is_alphanumeric()) {
        r"\b"
    } else {
        ""
    };
    let trailing = if term.ends_with(|c: char| c.is_alphanumeric()) {
        r"\b"
    } else {
        ""
    };
    Regex::new(&format!("(?i){}{}{}", leading, escaped, trailing)).unwrap()
}

/// Maximum length of a free-text skill entry.
const MAX_SKILL_CHARS: usize = 50;

/// Extract skills as a sorted, case-insensitively deduplicated set in
/// canonical casing.
pub fn extract_skills(text: &str) -> Vec<String> {
    // BTreeMap keyed on lowercase gives dedup + deterministic order in one
    let mut skills: BTreeMap<String, String> = BTreeMap::new();
    let mut insert = |skill: &str| {
        let skill = skill.trim();
        if skill.is_empty() || skill.chars().count() >= MAX_SKILL_CHARS {
            return;
        }
        let canonical = canonicalize(skill);
        skills.entry(skill.to_lowercase()).or_insert(canonical);
    };

    // Strategy 1: vocabulary scan over the whole document
    for (term, re) in VOCABULARY.iter() {
        if re.is_match(text) {
            insert(term);
        }
    }

    // Strategy 2: skills section body split on list delimiters
    if let Some(section) = capture_skills_section(text) {
        for item in LIST_DELIMITERS.split(&section) {
            insert(item);
        }
    }

    // Strategy 3: bullet lines re-matched against the vocabulary
    for line in text.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with(['•', '▪', '-', '*']) {
            for (term, re) in VOCABULARY.iter() {
                if re.is_match(trimmed) {
                    insert(term);
                }
            }
        }
    }

    skills.into_values().collect()
}

/// Capture the body of a skills section: inline content after the header
/// plus following lines until a blank line or the next section header.
fn capture_skills_section(text: &str) -> Option<String> {
    let mut captured: Vec<String> = Vec::new();
    let mut in_section = false;

    for line in text.lines() {
        let trimmed = line.trim();
        if in_section {
            if trimmed.is_empty() || is_section_header(trimmed) {
                break;
            }
            captured.push(trimmed.to_string());
        } else if let Some(cap) = SKILLS_HEADER.captures(trimmed) {
            in_section = true;
            let rest = cap[1].trim();
            if !rest.is_empty() {
                captured.push(rest.to_string());
            }
        }
    }

    if captured.is_empty() {
        None
    } else {
        Some(captured.join("\n"))
    }
}

/// Vocabulary casing when known, otherwise keep acronyms and title-case
/// everything else.
fn canonicalize(skill: &str) -> String {
    if let Some(&canonical) = CANONICAL.get(&skill.to_lowercase()) {
        return canonical.to_string();
    }
    if skill.chars().all(|c| !c.is_lowercase()) {
        return skill.to_string();
    }
    skill
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocabulary_scan() {
        let skills = extract_skills("5 years of experience in Python, Java and Docker");
        assert!(skills.contains(&"Python".to_string()));
        assert!(skills.contains(&"Java".to_string()));
        assert!(skills.contains(&"Docker".to_string()));
    }

    #[test]
    fn test_case_canonicalized() {
        let skills = extract_skills("worked with python and POSTGRESQL daily");
        assert!(skills.contains(&"Python".to_string()));
        assert!(skills.contains(&"PostgreSQL".to_string()));
    }

    #[test]
    fn test_skills_section_split() {
        let text = "Skills: Kafka Streams; data modeling, python\n\nExperience\nAcme";
        let skills = extract_skills(text);
        assert!(skills.contains(&"Kafka Streams".to_string()));
        assert!(skills.contains(&"Data Modeling".to_string()));
        assert!(skills.contains(&"Python".to_string()));
    }

    #[test]
    fn test_bullet_lines() {
        let text = "Highlights\n• Shipped services in Go\n• Managed Kubernetes clusters";
        let skills = extract_skills(text);
        assert!(skills.contains(&"Go".to_string()));
        assert!(skills.contains(&"Kubernetes".to_string()));
    }

    #[test]
    fn test_no_case_insensitive_duplicates() {
        let text = "Skills: python\nAlso expert in Python and PYTHON";
        let skills = extract_skills(text);
        let python_count = skills
            .iter()
            .filter(|s| s.eq_ignore_ascii_case("python"))
            .count();
        assert_eq!(python_count, 1);
    }

    #[test]
    fn test_cpp_and_csharp_boundaries() {
        let skills = extract_skills("Fluent in C++ and C# development");
        assert!(skills.contains(&"C++".to_string()));
        assert!(skills.contains(&"C#".to_string()));
    }

    #[test]
    fn test_long_entries_dropped() {
        let text = format!("Skills: {}", "a very long description ".repeat(5));
        let skills = extract_skills(&text);
        assert!(skills.iter().all(|s| s.chars().count() < 50));
    }

    #[test]
    fn test_sorted_output() {
        let skills = extract_skills("Rust and Python and Java");
        let mut sorted = skills.clone();
        sorted.sort_by_key(|s| s.to_lowercase());
        assert_eq!(skills, sorted);
    }
}
