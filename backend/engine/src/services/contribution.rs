use crate::models::feedback::ContributionResult;

/// Marginal contribution of each question relative to an all-zero baseline.
/// The final score is additive over independent questions, so each index
/// contributes exactly its own score; uniform vectors (all zero, all one)
/// pass through unchanged.
pub fn analyze(scores: &[f64], labels: &[String]) -> ContributionResult {
    let per_question = scores.to_vec();

    let weak_areas = labels
        .iter()
        .zip(scores)
        .filter(|(_, score)| **score == 0.0)
        .map(|(label, _)| label.clone())
        .collect();

    ContributionResult {
        per_question,
        weak_areas,
    }
}
