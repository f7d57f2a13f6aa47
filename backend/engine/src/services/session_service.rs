use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use uuid::Uuid;

use crate::error::AssessmentError;
use crate::metrics::{SESSIONS_ACTIVE, SESSIONS_TOTAL};
use crate::models::SessionState;

/// In-memory session registry. Sessions live for the duration of one
/// assessment pass and are dropped on completion or reset; nothing persists
/// beyond that. Learner sessions are fully isolated from one another.
#[derive(Clone, Default)]
pub struct SessionService {
    sessions: Arc<Mutex<HashMap<Uuid, SessionState>>>,
}

impl SessionService {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create_session(&self) -> SessionState {
        let state = SessionState::new(rand::random::<u64>());

        let mut sessions = self.sessions.lock().await;
        sessions.insert(state.id, state.clone());

        SESSIONS_TOTAL.with_label_values(&["created"]).inc();
        SESSIONS_ACTIVE.inc();
        tracing::info!("Session created: {}", state.id);

        state
    }

    /// Snapshot of the stored state for display or inspection.
    pub async fn get_session(&self, session_id: Uuid) -> Result<SessionState, AssessmentError> {
        let sessions = self.sessions.lock().await;
        sessions
            .get(&session_id)
            .cloned()
            .ok_or(AssessmentError::SessionNotFound(session_id))
    }

    /// Applies `f` to the stored state under the registry lock: one event is
    /// processed to completion before the next is accepted.
    pub async fn with_session<T>(
        &self,
        session_id: Uuid,
        f: impl FnOnce(&mut SessionState) -> T,
    ) -> Result<T, AssessmentError> {
        let mut sessions = self.sessions.lock().await;
        let state = sessions
            .get_mut(&session_id)
            .ok_or(AssessmentError::SessionNotFound(session_id))?;

        Ok(f(state))
    }

    /// Drops the session and everything it accumulated.
    pub async fn end_session(&self, session_id: Uuid) -> Result<(), AssessmentError> {
        let mut sessions = self.sessions.lock().await;
        sessions
            .remove(&session_id)
            .ok_or(AssessmentError::SessionNotFound(session_id))?;

        SESSIONS_TOTAL.with_label_values(&["completed"]).inc();
        SESSIONS_ACTIVE.dec();
        tracing::info!("Session ended: {}", session_id);

        Ok(())
    }

    /// Replaces the session with a fresh one under the same id. The new state
    /// gets its own seed, so the next question-set draw is independent.
    pub async fn reset_session(&self, session_id: Uuid) -> Result<SessionState, AssessmentError> {
        let mut sessions = self.sessions.lock().await;
        let state = sessions
            .get_mut(&session_id)
            .ok_or(AssessmentError::SessionNotFound(session_id))?;

        let mut fresh = SessionState::new(rand::random::<u64>());
        fresh.id = session_id;
        *state = fresh.clone();

        SESSIONS_TOTAL.with_label_values(&["reset"]).inc();
        tracing::info!("Session reset: {}", session_id);

        Ok(fresh)
    }
}
