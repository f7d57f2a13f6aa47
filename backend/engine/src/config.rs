use serde::Deserialize;
use std::collections::HashSet;
use std::env;
use validator::Validate;

use crate::error::AssessmentError;
use crate::models::question::{QuestionAnswerPair, QuestionBank};
use crate::models::QUESTION_COUNT;

/// Static assessment content: the passage the learner reads aloud plus the
/// question/reference-answer bank it is quizzed on. Loaded once at startup
/// and treated as read-only afterwards.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AssessmentConfig {
    #[validate(length(min = 1, message = "Reading passage must not be empty"))]
    pub passage: String,

    pub questions: Vec<QuestionAnswerPair>,
}

impl AssessmentConfig {
    pub fn load() -> Result<Self, AssessmentError> {
        dotenvy::dotenv().ok();

        // Determine environment (defaults to dev)
        let env = env::var("APP_ENV").unwrap_or_else(|_| "dev".to_string());

        // Build configuration from config/*.toml + ENV overrides
        let settings = config::Config::builder()
            .add_source(
                config::File::with_name(&format!("config/{}", env)).required(false), // Allow missing config file, fallback to built-in content
            )
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let passage = settings
            .get_string("passage")
            .unwrap_or_else(|_| DEFAULT_PASSAGE.to_string());

        let questions = settings
            .get::<Vec<QuestionAnswerPair>>("questions")
            .unwrap_or_else(|_| default_question_bank());

        let config = AssessmentConfig { passage, questions };
        config.ensure_valid()?;

        Ok(config)
    }

    /// The passage and bank shipped with the engine, used when no config file
    /// or environment override is present.
    pub fn builtin() -> Self {
        AssessmentConfig {
            passage: DEFAULT_PASSAGE.to_string(),
            questions: default_question_bank(),
        }
    }

    /// Fatal configuration checks. No session is created past a failure here.
    pub fn ensure_valid(&self) -> Result<(), AssessmentError> {
        self.validate()?;

        if self.questions.len() < QUESTION_COUNT {
            return Err(AssessmentError::BankTooSmall {
                required: QUESTION_COUNT,
                found: self.questions.len(),
            });
        }

        let mut seen = HashSet::new();
        for pair in &self.questions {
            if !seen.insert(pair.question.as_str()) {
                return Err(AssessmentError::DuplicateQuestion(pair.question.clone()));
            }
        }

        Ok(())
    }

    pub fn bank(&self) -> QuestionBank {
        QuestionBank::new(self.questions.clone())
    }
}

const DEFAULT_PASSAGE: &str = "A child broke a vase while playing indoors. At first, they hid the truth out of fear. Later, they told their mother, who forgave them and praised their honesty.";

fn default_question_bank() -> Vec<QuestionAnswerPair> {
    [
        (
            "What is the main idea of the story?",
            "The main idea is that honesty is always the best policy.",
        ),
        (
            "Why did the character feel guilty?",
            "Because they lied about breaking the vase.",
        ),
        (
            "What lesson did the story teach?",
            "The story teaches that telling the truth builds trust.",
        ),
        (
            "What did the mother do after learning the truth?",
            "She forgave the child and appreciated their honesty.",
        ),
        (
            "How would you react if you were in the character's shoes?",
            "I would also tell the truth even if it's hard.",
        ),
    ]
    .into_iter()
    .map(|(question, reference_answer)| QuestionAnswerPair {
        question: question.to_string(),
        reference_answer: reference_answer.to_string(),
    })
    .collect()
}
