use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::core::config::{LlmConfig, LlmProviderKind};
use crate::llm::gemini::GeminiProvider;
use crate::llm::openai::OpenAiProvider;
use crate::llm::provider::LlmProvider;
use crate::llm::types::ChatRequest;
use crate::llm::LlmError;

/// The configured generative backend plus the request policy around it
/// (sampling defaults and an overall deadline).
#[derive(Clone)]
pub struct LlmService {
    provider: Arc<dyn LlmProvider>,
    timeout: Duration,
    temperature: Option<f64>,
    max_tokens: Option<u32>,
}

impl LlmService {
    pub fn new(provider: Arc<dyn LlmProvider>, timeout: Duration) -> Self {
        Self {
            provider,
            timeout,
            temperature: None,
            max_tokens: None,
        }
    }

    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        let provider: Arc<dyn LlmProvider> = match config.provider {
            LlmProviderKind::Gemini => Arc::new(GeminiProvider::new(
                config.base_url.clone(),
                config.model.clone(),
                config.api_key.clone(),
                config.timeout_secs,
            )?),
            LlmProviderKind::OpenAi => Arc::new(OpenAiProvider::new(
                config.base_url.clone(),
                config.model.clone(),
                config.api_key.clone(),
                config.timeout_secs,
            )?),
        };

        info!(
            provider = provider.name(),
            model = provider.model(),
            "LLM provider configured"
        );

        let mut service = Self::new(provider, Duration::from_secs(config.timeout_secs));
        service.temperature = config.temperature;
        service.max_tokens = config.max_tokens;
        Ok(service)
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub fn model(&self) -> &str {
        self.provider.model()
    }

    /// Sends one prompt and returns the answer text. Exceeding the deadline
    /// yields [`LlmError::Timeout`]; nothing is retried.
    pub async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let request =
            ChatRequest::from_prompt(prompt).with_sampling(self.temperature, self.max_tokens);

        match tokio::time::timeout(self.timeout, self.provider.chat(request)).await {
            Ok(result) => result,
            Err(_) => {
                warn!(
                    provider = self.provider.name(),
                    timeout_secs = self.timeout.as_secs(),
                    "LLM request timed out"
                );
                Err(LlmError::Timeout(self.timeout.as_secs()))
            }
        }
    }
}
