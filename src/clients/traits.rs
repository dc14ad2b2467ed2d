use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("client not configured: {0}")]
    NotConfigured(String),
    #[error("request failed: {0}")]
    Transport(String),
    #[error("{status} {message}")]
    Api { status: u16, message: String },
    #[error("malformed response: {0}")]
    Parse(String),
    #[error("model returned no text ({0})")]
    EmptyResponse(String),
}

/// A hosted model that answers one user message under a system instruction.
#[async_trait]
pub trait AnswerModel: Send + Sync {
    /// Provider label, e.g. "gemini".
    fn provider(&self) -> &str;

    fn model(&self) -> &str;

    async fn generate(
        &self,
        system_instruction: &str,
        user_message: &str,
    ) -> Result<String, LlmError>;
}
