use crate::models::{LifestyleAnswers, LIFESTYLE_QUESTIONS, MAX_ANSWER, MIN_ANSWER};
use std::collections::BTreeSet;

/// Largest possible distance between two answers on the 1-5 scale
const MAX_ANSWER_DISTANCE: f64 = (MAX_ANSWER - MIN_ANSWER) as f64;

/// Similarity (0-100) of two single lifestyle answers
///
/// Identical answers score 100, opposite ends of the scale score 0, linear in
/// between. A missing answer on either side scores 0.
#[inline]
pub fn answer_similarity(a: Option<u8>, b: Option<u8>) -> f64 {
    match (a, b) {
        (Some(a), Some(b)) => {
            let distance = a.abs_diff(b) as f64;
            (MAX_ANSWER_DISTANCE - distance) / MAX_ANSWER_DISTANCE * 100.0
        }
        _ => 0.0,
    }
}

/// Average per-question similarity (0-100) over the declared questions
pub fn lifestyle_similarity(subject: &LifestyleAnswers, candidate: &LifestyleAnswers) -> f64 {
    let total: f64 = (0..LIFESTYLE_QUESTIONS)
        .map(|i| answer_similarity(subject.get(i), candidate.get(i)))
        .sum();

    total / LIFESTYLE_QUESTIONS as f64
}

/// Share (0-100) of the subject's tags also held by the candidate
///
/// Counted from the subject's side, so the result is directional. Returns the
/// shared tags alongside, in the subject's order. An empty subject set scores 0.
pub fn overlap_similarity(
    subject: &BTreeSet<String>,
    candidate: &BTreeSet<String>,
) -> (f64, Vec<String>) {
    if subject.is_empty() {
        return (0.0, Vec::new());
    }

    let shared: Vec<String> = subject
        .iter()
        .filter(|tag| candidate.contains(*tag))
        .cloned()
        .collect();

    let similarity = shared.len() as f64 / subject.len() as f64 * 100.0;
    (similarity, shared)
}

/// Similarity (0-100) of two transplant types
///
/// Same type scores 100, different types still score 50, and a missing type
/// on either side scores 0.
#[inline]
pub fn transplant_similarity(subject: Option<&str>, candidate: Option<&str>) -> f64 {
    match (subject, candidate) {
        (Some(s), Some(c)) if s == c => 100.0,
        (Some(_), Some(_)) => 50.0,
        _ => 0.0,
    }
}
