use std::sync::Arc;

use chrono::Utc;

use crate::config::AssessmentConfig;
use crate::error::AssessmentError;
use crate::metrics::record_answer_scored;
use crate::models::answer::AnswerRecord;
use crate::models::feedback::FeedbackSummary;
use crate::models::{RenderInstruction, SessionEvent, SessionState, Stage, QUESTION_COUNT};

use super::{contribution, matcher};

/// Drives one session through Prompt → Retell → Questions → Feedback.
///
/// Purely reactive: stage-mismatched, repeated and empty inputs are absorbed
/// without touching state, so the external shell may re-deliver the same
/// event on every re-render.
pub struct AssessmentEngine {
    config: Arc<AssessmentConfig>,
}

impl AssessmentEngine {
    pub fn new(config: Arc<AssessmentConfig>) -> Self {
        Self { config }
    }

    /// Applies one external event to the session and returns what the shell
    /// should display. The only failure mode is a configuration error when
    /// freezing the question set; every other input is handled or ignored.
    pub fn handle_event(
        &self,
        state: &mut SessionState,
        event: &SessionEvent,
    ) -> Result<RenderInstruction, AssessmentError> {
        match (state.stage, event) {
            (Stage::Prompt, SessionEvent::Ready) => {
                state.stage = Stage::Retell;
                tracing::info!("Session {} ready, moving to retelling", state.id);
            }
            (Stage::Retell, SessionEvent::Retelling { text }) => {
                if text.trim().is_empty() {
                    tracing::debug!("Ignoring empty retelling for session {}", state.id);
                } else {
                    // Replacement, not accumulation: a re-recorded retelling wins.
                    state.retelling_text = Some(text.clone());
                    tracing::info!("Retelling captured for session {}", state.id);
                }
            }
            (Stage::Retell, SessionEvent::Proceed) => {
                state.stage = Stage::Questions;
                self.freeze_question_set(state)?;
                tracing::info!("Session {} moved to questions", state.id);
            }
            (Stage::Questions, SessionEvent::Answer { index, text }) => {
                self.record_answer(state, *index, text);

                if state.all_answered() {
                    // No explicit signal for this transition; filling the last
                    // slot advances within the same interaction.
                    state.stage = Stage::Feedback;
                    tracing::info!(
                        "Session {} answered all questions, final score {}",
                        state.id,
                        state.final_score()
                    );
                }
            }
            (_, SessionEvent::View) => {}
            (stage, event) => {
                tracing::debug!(
                    "Ignoring {:?} in stage {:?} for session {}",
                    event,
                    stage,
                    state.id
                );
            }
        }

        Ok(self.render(state))
    }

    /// Projects the current state into a display instruction. Pure; feedback
    /// re-renders recompute the summary from stored records without invoking
    /// the matcher again.
    pub fn render(&self, state: &SessionState) -> RenderInstruction {
        match state.stage {
            Stage::Prompt => RenderInstruction::Passage {
                passage: self.config.passage.clone(),
            },
            Stage::Retell => RenderInstruction::Retelling {
                transcript: state.retelling_text.clone(),
            },
            Stage::Questions => {
                let questions = state
                    .question_set
                    .as_ref()
                    .map(|set| set.labels())
                    .unwrap_or_default();
                let transcripts = (0..state.answered.len())
                    .map(|index| state.transcript_for(index).map(str::to_string))
                    .collect();

                RenderInstruction::Questions {
                    questions,
                    answered: state.answered.clone(),
                    transcripts,
                }
            }
            Stage::Feedback => RenderInstruction::Feedback {
                summary: self.feedback(state),
            },
        }
    }

    fn freeze_question_set(&self, state: &mut SessionState) -> Result<(), AssessmentError> {
        if state.question_set.is_some() {
            return Ok(());
        }

        let set = self
            .config
            .bank()
            .select_set(QUESTION_COUNT, state.rng_seed)?;
        tracing::debug!(
            "Question set frozen for session {}: {:?}",
            state.id,
            set.labels()
        );
        state.question_set = Some(set);

        Ok(())
    }

    fn record_answer(&self, state: &mut SessionState, index: usize, text: &str) {
        if index >= state.answered.len() {
            tracing::debug!(
                "Ignoring answer for out-of-range slot {} in session {}",
                index,
                state.id
            );
            return;
        }
        if state.answered[index] {
            tracing::debug!(
                "Slot {} already answered in session {}, ignoring resubmission",
                index,
                state.id
            );
            return;
        }
        if text.trim().is_empty() {
            tracing::debug!(
                "Ignoring empty answer for slot {} in session {}",
                index,
                state.id
            );
            return;
        }

        let Some(pair) = state
            .question_set
            .as_ref()
            .and_then(|set| set.get(index))
            .cloned()
        else {
            return;
        };

        let correct = matcher::matches(text, &pair.reference_answer);
        let score = if correct { 1.0 } else { 0.0 };

        state.records.push(AnswerRecord {
            question_index: index,
            label: pair.question,
            score,
            transcript: text.to_string(),
            answered_at: Utc::now(),
        });
        state.answered[index] = true;

        record_answer_scored(correct);
        tracing::info!(
            "Answer scored: session={}, slot={}, correct={}",
            state.id,
            index,
            correct
        );
    }

    fn feedback(&self, state: &SessionState) -> FeedbackSummary {
        let labels = state
            .question_set
            .as_ref()
            .map(|set| set.labels())
            .unwrap_or_default();
        let scores = state.ordered_scores();

        FeedbackSummary {
            final_score: state.final_score(),
            max_score: state.answered.len() as f64,
            contribution: contribution::analyze(&scores, &labels),
        }
    }
}
