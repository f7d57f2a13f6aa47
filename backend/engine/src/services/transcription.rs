use async_trait::async_trait;

/// Speech-to-text collaborator. Implemented outside the core; the engine
/// scores whatever text comes back as-is, mis-transcriptions included.
#[async_trait]
pub trait Transcriber: Send + Sync {
    async fn transcribe(&self, audio: &[u8]) -> anyhow::Result<String>;
}
