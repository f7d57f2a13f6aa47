use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::error::AssessmentError;

/// One bank entry: a comprehension question and the reference answer it is
/// scored against. Question strings are unique within a bank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionAnswerPair {
    pub question: String,
    pub reference_answer: String,
}

/// The full static bank a session draws from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionBank {
    pairs: Vec<QuestionAnswerPair>,
}

/// The questions frozen for one session, in presentation order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionSet(Vec<QuestionAnswerPair>);

impl QuestionBank {
    pub fn new(pairs: Vec<QuestionAnswerPair>) -> Self {
        Self { pairs }
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Shuffle-then-take-first-`count` draw, deterministic for a given seed.
    /// The engine calls this at most once per session and freezes the result;
    /// re-selecting mid-session would score answers against a different
    /// question than the one displayed.
    pub fn select_set(&self, count: usize, seed: u64) -> Result<QuestionSet, AssessmentError> {
        if self.pairs.len() < count {
            return Err(AssessmentError::BankTooSmall {
                required: count,
                found: self.pairs.len(),
            });
        }

        let mut pairs = self.pairs.clone();
        let mut rng = StdRng::seed_from_u64(seed);
        pairs.shuffle(&mut rng);
        pairs.truncate(count);

        Ok(QuestionSet(pairs))
    }
}

impl QuestionSet {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&QuestionAnswerPair> {
        self.0.get(index)
    }

    pub fn labels(&self) -> Vec<String> {
        self.0.iter().map(|pair| pair.question.clone()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &QuestionAnswerPair> {
        self.0.iter()
    }
}
