use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum AssessmentError {
    #[error("question bank requires at least {required} questions, found {found}")]
    BankTooSmall { required: usize, found: usize },

    #[error("duplicate question in bank: {0}")]
    DuplicateQuestion(String),

    #[error("invalid assessment content: {0}")]
    InvalidContent(#[from] validator::ValidationErrors),

    #[error("failed to read configuration: {0}")]
    ConfigSource(#[from] config::ConfigError),

    #[error("session not found: {0}")]
    SessionNotFound(Uuid),

    /// Transcription collaborator raised or returned no usable text. The
    /// answer slot stays unanswered; the caller retries on the next
    /// interaction.
    #[error("transcription failed: {0}")]
    Transcription(anyhow::Error),
}
