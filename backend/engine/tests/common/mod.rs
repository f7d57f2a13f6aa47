#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use comprehension_engine::services::Transcriber;
use comprehension_engine::{AssessmentConfig, AssessmentService, RenderInstruction, Stage};
use uuid::Uuid;

/// Transcriber that echoes the audio bytes back as UTF-8 text, so tests can
/// script "recordings" by passing the expected transcript as bytes.
pub struct EchoTranscriber;

#[async_trait]
impl Transcriber for EchoTranscriber {
    async fn transcribe(&self, audio: &[u8]) -> anyhow::Result<String> {
        Ok(String::from_utf8_lossy(audio).into_owned())
    }
}

/// Transcriber standing in for a broken ASR collaborator.
pub struct FailingTranscriber;

#[async_trait]
impl Transcriber for FailingTranscriber {
    async fn transcribe(&self, _audio: &[u8]) -> anyhow::Result<String> {
        anyhow::bail!("speech model unavailable")
    }
}

/// Transcriber that hears only silence.
pub struct SilentTranscriber;

#[async_trait]
impl Transcriber for SilentTranscriber {
    async fn transcribe(&self, _audio: &[u8]) -> anyhow::Result<String> {
        Ok("   ".to_string())
    }
}

pub fn create_test_service() -> AssessmentService {
    create_test_service_with(Arc::new(EchoTranscriber))
}

pub fn create_test_service_with(transcriber: Arc<dyn Transcriber>) -> AssessmentService {
    // Initialize tracing for tests
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();

    AssessmentService::new(AssessmentConfig::builtin(), transcriber)
        .expect("Failed to build test assessment service")
}

/// Walks a fresh session up to the questions stage and returns its id.
pub async fn advance_to_questions(service: &AssessmentService) -> Uuid {
    let (session_id, _) = service.start_session().await.unwrap();
    service.signal_ready(session_id).await.unwrap();
    service.proceed_to_questions(session_id).await.unwrap();

    let state = service.session_snapshot(session_id).await.unwrap();
    assert_eq!(state.stage, Stage::Questions);

    session_id
}

pub fn expect_questions(view: RenderInstruction) -> (Vec<String>, Vec<bool>) {
    match view {
        RenderInstruction::Questions {
            questions, answered, ..
        } => (questions, answered),
        other => panic!("expected questions screen, got {:?}", other),
    }
}
