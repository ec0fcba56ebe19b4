//! Skills analysis — deterministic keyword scan over resume text.
//!
//! The vocabulary is closed and hard-coded; matching is case-insensitive and
//! whole-word ("PYTHONIC" never matches "python"). Matches come back
//! deduplicated, title-cased, and sorted, so the output is stable regardless
//! of input ordering or repetition.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::extract::summary;

/// The closed skill vocabulary. Lowercase; multi-word phrases allowed.
const SKILL_VOCABULARY: &[&str] = &[
    "python",
    "java",
    "javascript",
    "typescript",
    "rust",
    "go",
    "sql",
    "html",
    "css",
    "react",
    "node",
    "django",
    "flask",
    "aws",
    "azure",
    "docker",
    "kubernetes",
    "git",
    "linux",
    "machine learning",
    "data analysis",
    "agile",
    "scrum",
    "leadership",
    "communication",
    "teamwork",
    "problem solving",
    "project management",
];

/// Returned when no vocabulary term matches.
pub const NO_SKILLS_PLACEHOLDER: &str = "No recognized skills found";

/// Constant advice returned with every skills-mode response.
pub const RECOMMENDATIONS: [&str; 3] = [
    "Quantify your achievements with concrete numbers where possible.",
    "Tailor your skills section to the job description you are applying for.",
    "Keep your resume concise; one to two pages is ideal.",
];

/// One alternation over the whole vocabulary, longest terms first so the
/// leftmost-first engine prefers "javascript" over "java" at the same offset.
static SKILL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    let mut terms: Vec<&str> = SKILL_VOCABULARY.to_vec();
    terms.sort_by_key(|t| std::cmp::Reverse(t.len()));
    let alternation = terms
        .iter()
        .map(|t| regex::escape(t))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)\b({alternation})\b")).expect("skill vocabulary regex")
});

/// Result of a skills-mode analysis.
#[derive(Debug, Clone, serde::Serialize)]
pub struct SkillAnalysis {
    pub skills: Vec<String>,
    pub recommendations: Vec<String>,
    pub summary: String,
}

/// Runs the vocabulary scan over `text` and shapes the skills-mode response.
pub fn analyze(text: &str) -> SkillAnalysis {
    let mut matched: BTreeSet<String> = BTreeSet::new();
    for m in SKILL_PATTERN.find_iter(text) {
        matched.insert(title_case(m.as_str()));
    }

    let skills = if matched.is_empty() {
        vec![NO_SKILLS_PLACEHOLDER.to_string()]
    } else {
        // BTreeSet iteration is already sorted alphabetically.
        matched.into_iter().collect()
    };

    SkillAnalysis {
        skills,
        recommendations: RECOMMENDATIONS.iter().map(|r| r.to_string()).collect(),
        summary: summary(text),
    }
}

/// Title-cases each whitespace-separated word: "machine learning" →
/// "Machine Learning", "SQL" → "Sql".
fn title_case(term: &str) -> String {
    term.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
