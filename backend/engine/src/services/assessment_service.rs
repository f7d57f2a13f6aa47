use std::sync::Arc;

use uuid::Uuid;

use crate::config::AssessmentConfig;
use crate::error::AssessmentError;
use crate::metrics::record_transcription;
use crate::models::{RenderInstruction, SessionEvent, SessionState};

use super::engine::AssessmentEngine;
use super::session_service::SessionService;
use super::transcription::Transcriber;

/// Entry point the rendering/input collaborator talks to. Owns the engine,
/// the session registry and the transcription collaborator; one call applies
/// exactly one event to one session.
pub struct AssessmentService {
    engine: AssessmentEngine,
    sessions: SessionService,
    transcriber: Arc<dyn Transcriber>,
}

impl AssessmentService {
    pub fn new(
        config: AssessmentConfig,
        transcriber: Arc<dyn Transcriber>,
    ) -> Result<Self, AssessmentError> {
        // Content problems are fatal before any session exists.
        config.ensure_valid()?;

        Ok(Self {
            engine: AssessmentEngine::new(Arc::new(config)),
            sessions: SessionService::new(),
            transcriber,
        })
    }

    /// Builds the service from `config/{APP_ENV}.toml` + environment
    /// overrides, falling back to the built-in passage and bank.
    pub fn from_env(transcriber: Arc<dyn Transcriber>) -> Result<Self, AssessmentError> {
        Self::new(AssessmentConfig::load()?, transcriber)
    }

    pub async fn start_session(&self) -> Result<(Uuid, RenderInstruction), AssessmentError> {
        let state = self.sessions.create_session().await;
        let view = self.engine.render(&state);
        Ok((state.id, view))
    }

    /// Applies one already-transcribed event to the session.
    pub async fn handle_event(
        &self,
        session_id: Uuid,
        event: SessionEvent,
    ) -> Result<RenderInstruction, AssessmentError> {
        self.sessions
            .with_session(session_id, |state| self.engine.handle_event(state, &event))
            .await?
    }

    pub async fn signal_ready(&self, session_id: Uuid) -> Result<RenderInstruction, AssessmentError> {
        self.handle_event(session_id, SessionEvent::Ready).await
    }

    pub async fn submit_retelling(
        &self,
        session_id: Uuid,
        text: impl Into<String>,
    ) -> Result<RenderInstruction, AssessmentError> {
        self.handle_event(session_id, SessionEvent::Retelling { text: text.into() })
            .await
    }

    pub async fn proceed_to_questions(
        &self,
        session_id: Uuid,
    ) -> Result<RenderInstruction, AssessmentError> {
        self.handle_event(session_id, SessionEvent::Proceed).await
    }

    pub async fn submit_answer(
        &self,
        session_id: Uuid,
        index: usize,
        text: impl Into<String>,
    ) -> Result<RenderInstruction, AssessmentError> {
        self.handle_event(
            session_id,
            SessionEvent::Answer {
                index,
                text: text.into(),
            },
        )
        .await
    }

    /// Re-render of the current stage; never mutates state.
    pub async fn current_view(&self, session_id: Uuid) -> Result<RenderInstruction, AssessmentError> {
        self.handle_event(session_id, SessionEvent::View).await
    }

    /// Forwards a raw retelling recording through the transcription
    /// collaborator, then applies the resulting text.
    pub async fn submit_retelling_audio(
        &self,
        session_id: Uuid,
        audio: &[u8],
    ) -> Result<RenderInstruction, AssessmentError> {
        let text = self.transcribe(audio).await?;
        self.handle_event(session_id, SessionEvent::Retelling { text })
            .await
    }

    /// Forwards a raw answer recording through the transcription
    /// collaborator. On collaborator failure the slot stays unanswered and
    /// the caller retries on the next interaction.
    pub async fn submit_answer_audio(
        &self,
        session_id: Uuid,
        index: usize,
        audio: &[u8],
    ) -> Result<RenderInstruction, AssessmentError> {
        let text = self.transcribe(audio).await?;
        self.handle_event(session_id, SessionEvent::Answer { index, text })
            .await
    }

    pub async fn session_snapshot(
        &self,
        session_id: Uuid,
    ) -> Result<SessionState, AssessmentError> {
        self.sessions.get_session(session_id).await
    }

    pub async fn end_session(&self, session_id: Uuid) -> Result<(), AssessmentError> {
        self.sessions.end_session(session_id).await
    }

    pub async fn reset_session(
        &self,
        session_id: Uuid,
    ) -> Result<RenderInstruction, AssessmentError> {
        let state = self.sessions.reset_session(session_id).await?;
        Ok(self.engine.render(&state))
    }

    // Transcription happens before the session lock is taken; the engine only
    // ever sees text.
    async fn transcribe(&self, audio: &[u8]) -> Result<String, AssessmentError> {
        match self.transcriber.transcribe(audio).await {
            Ok(text) if !text.trim().is_empty() => {
                record_transcription("ok");
                Ok(text)
            }
            Ok(_) => {
                record_transcription("empty");
                tracing::warn!("Transcription produced no usable text, no answer captured");
                Err(AssessmentError::Transcription(anyhow::anyhow!(
                    "transcription produced no text"
                )))
            }
            Err(e) => {
                record_transcription("failed");
                tracing::warn!("Transcription collaborator failed: {}", e);
                Err(AssessmentError::Transcription(e))
            }
        }
    }
}
