use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod answer;
pub mod feedback;
pub mod question;

use answer::AnswerRecord;
use feedback::FeedbackSummary;
use question::QuestionSet;

/// Number of comprehension questions asked per session.
pub const QUESTION_COUNT: usize = 5;

/// Assessment stages in session order. Transitions only ever move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Prompt,
    Retell,
    Questions,
    Feedback,
}

/// Full state of one learner's assessment pass. Owned by the engine; no
/// concurrent mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub id: Uuid,
    pub stage: Stage,
    /// Seed for the question-set draw, fixed at session creation so the
    /// selection is deterministic for the session's lifetime.
    pub rng_seed: u64,
    pub question_set: Option<QuestionSet>,
    pub retelling_text: Option<String>,
    pub answered: Vec<bool>,
    pub records: Vec<AnswerRecord>,
    pub started_at: DateTime<Utc>,
}

impl SessionState {
    pub fn new(rng_seed: u64) -> Self {
        Self {
            id: Uuid::new_v4(),
            stage: Stage::Prompt,
            rng_seed,
            question_set: None,
            retelling_text: None,
            answered: vec![false; QUESTION_COUNT],
            records: Vec::new(),
            started_at: Utc::now(),
        }
    }

    pub fn all_answered(&self) -> bool {
        self.answered.iter().all(|answered| *answered)
    }

    pub fn final_score(&self) -> f64 {
        self.records.iter().map(|record| record.score).sum()
    }

    /// Scores rearranged into question-set order. Records accumulate in
    /// answer-arrival order; feedback output aligns with the frozen set.
    pub fn ordered_scores(&self) -> Vec<f64> {
        let mut scores = vec![0.0; self.answered.len()];
        for record in &self.records {
            if let Some(slot) = scores.get_mut(record.question_index) {
                *slot = record.score;
            }
        }
        scores
    }

    pub fn transcript_for(&self, index: usize) -> Option<&str> {
        self.records
            .iter()
            .find(|record| record.question_index == index)
            .map(|record| record.transcript.as_str())
    }
}

/// External input delivered by the rendering/input collaborator. Audio is
/// transcribed at the service boundary; the engine only ever sees text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionEvent {
    /// Learner confirmed they have read the passage.
    Ready,
    /// Transcribed retelling text.
    Retelling { text: String },
    /// Learner asked to move from retelling to the questions.
    Proceed,
    /// Transcribed answer for one question slot.
    Answer { index: usize, text: String },
    /// Re-render request; never mutates state.
    View,
}

/// What the external UI layer should display after an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderInstruction {
    Passage {
        passage: String,
    },
    Retelling {
        transcript: Option<String>,
    },
    Questions {
        questions: Vec<String>,
        answered: Vec<bool>,
        transcripts: Vec<Option<String>>,
    },
    Feedback {
        summary: FeedbackSummary,
    },
}
