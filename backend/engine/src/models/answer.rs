use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One scored answer. Created on the first non-empty transcript for a
/// question slot and never overwritten afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub question_index: usize,
    /// The question text as shown to the learner.
    pub label: String,
    /// 1.0 for a matching answer, 0.0 otherwise.
    pub score: f64,
    pub transcript: String,
    pub answered_at: DateTime<Utc>,
}
