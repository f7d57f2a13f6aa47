use serde::{Deserialize, Serialize};

/// Per-question attribution of the final score, aligned with question-set
/// order. Derived on each feedback render, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContributionResult {
    pub per_question: Vec<f64>,
    /// Question labels scored 0.0, surfaced as improvement targets.
    pub weak_areas: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackSummary {
    pub final_score: f64,
    pub max_score: f64,
    pub contribution: ContributionResult,
}

impl FeedbackSummary {
    /// No weak areas: the shell shows a celebration instead of the list.
    pub fn all_correct(&self) -> bool {
        self.contribution.weak_areas.is_empty()
    }
}
