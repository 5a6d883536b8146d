//! Problem type classifier
//!
//! Purely syntactic heuristics over the problem text. Each rule is evaluated
//! independently and contributes at most one candidate; the result is ranked
//! by confidence and never empty.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::skills::SkillId;

static EQUALITY_WITH_X: Lazy<Regex> = Lazy::new(|| Regex::new(r"=.*x|x.*=").expect("valid regex"));
static SQUARED_X: Lazy<Regex> = Lazy::new(|| Regex::new(r"x\^2|x²").expect("valid regex"));
static FRACTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+/\d+").expect("valid regex"));
static FRACTION_SUM: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+/\d+\+\d+/\d+").expect("valid regex"));

/// Confidence used when no heuristic fires
pub const FALLBACK_CONFIDENCE: f64 = 0.3;

/// A scored problem type
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub skill: SkillId,
    pub confidence: f64,
}

impl Candidate {
    fn new(skill: SkillId, confidence: f64) -> Self {
        Self { skill, confidence }
    }
}

/// Rank candidate problem types for the text, highest confidence first
pub fn classify(problem_text: &str) -> Vec<Candidate> {
    let text: String = problem_text
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase();
    let squared = SQUARED_X.is_match(&text);

    let mut candidates = Vec::new();

    if EQUALITY_WITH_X.is_match(&text) && !squared {
        candidates.push(Candidate::new(SkillId::LinearEq, 0.8));
    }

    if squared || text.contains("discriminant") {
        candidates.push(Candidate::new(SkillId::QuadraticEq, 0.9));
    }

    if FRACTION.find_iter(&text).count() == 2 && FRACTION_SUM.is_match(&text) {
        candidates.push(Candidate::new(SkillId::FracAdd, 0.85));
    }

    if text.contains(':') && text.contains('=') {
        candidates.push(Candidate::new(SkillId::Proportion, 0.7));
    }

    if candidates.is_empty() {
        candidates.push(Candidate::new(SkillId::LinearEq, FALLBACK_CONFIDENCE));
    }

    // stable: equal confidences keep rule order
    candidates.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    candidates
}
