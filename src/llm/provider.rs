use async_trait::async_trait;

use super::types::ChatRequest;
use super::LlmError;

#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// provider name (e.g. "gemini", "openai")
    fn name(&self) -> &str;

    /// model the provider sends requests to
    fn model(&self) -> &str;

    /// chat completion (non-streaming)
    async fn chat(&self, request: ChatRequest) -> Result<String, LlmError>;
}
