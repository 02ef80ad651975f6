use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use super::provider::LlmProvider;
use super::types::ChatRequest;
use super::LlmError;

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";

/// Chat completions against any OpenAI-compatible server (OpenAI, LM Studio,
/// Ollama, vLLM).
#[derive(Clone)]
pub struct OpenAiProvider {
    base_url: String,
    model: String,
    api_key: Option<String>,
    timeout_secs: u64,
    client: Client,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl OpenAiProvider {
    pub fn new(
        base_url: Option<String>,
        model: String,
        api_key: Option<String>,
        timeout_secs: u64,
    ) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| LlmError::Configuration(e.to_string()))?;

        let base_url = base_url.unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string());
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            timeout_secs,
            client,
        })
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn chat(&self, request: ChatRequest) -> Result<String, LlmError> {
        let url = format!("{}/v1/chat/completions", self.base_url);

        let mut body = json!({
            "model": self.model,
            "messages": request.messages,
            "stream": false,
        });

        if let Some(obj) = body.as_object_mut() {
            if let Some(t) = request.temperature {
                obj.insert("temperature".to_string(), json!(t));
            }
            if let Some(t) = request.max_tokens {
                obj.insert("max_tokens".to_string(), json!(t));
            }
        }

        let mut builder = self.client.post(&url).json(&body);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let res = builder
            .send()
            .await
            .map_err(|e| LlmError::from_transport(e, self.timeout_secs))?;

        if !res.status().is_success() {
            let status = res.status().as_u16();
            let text = res.text().await.unwrap_or_default();
            return Err(LlmError::Status { status, body: text });
        }

        let payload: ChatCompletionResponse = res
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

        payload
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| LlmError::InvalidResponse("response has no message content".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    #[tokio::test]
    async fn returns_first_choice_content() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .match_header("authorization", "Bearer sk-test")
            .match_body(Matcher::PartialJson(json!({
                "model": "gpt-4o-mini",
                "messages": [{ "role": "user", "content": "How much RAM?" }],
                "temperature": 0.1
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices": [{"message": {"role": "assistant", "content": "8GB"}}]}"#)
            .create_async()
            .await;

        let provider = OpenAiProvider::new(
            Some(server.url()),
            "gpt-4o-mini".to_string(),
            Some("sk-test".to_string()),
            5,
        )
        .expect("provider");
        let answer = provider
            .chat(ChatRequest::from_prompt("How much RAM?").with_sampling(Some(0.1), None))
            .await
            .expect("chat");

        assert_eq!(answer, "8GB");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn error_status_is_reported_with_body() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(429)
            .with_body("rate limited")
            .create_async()
            .await;

        let provider =
            OpenAiProvider::new(Some(server.url()), "local".to_string(), None, 5).expect("provider");
        let err = provider
            .chat(ChatRequest::from_prompt("hi"))
            .await
            .expect_err("429");
        assert!(matches!(err, LlmError::Status { status: 429, ref body } if body == "rate limited"));
    }

    #[tokio::test]
    async fn empty_choices_are_invalid() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices": []}"#)
            .create_async()
            .await;

        let provider =
            OpenAiProvider::new(Some(server.url()), "local".to_string(), None, 5).expect("provider");
        assert!(matches!(
            provider.chat(ChatRequest::from_prompt("hi")).await,
            Err(LlmError::InvalidResponse(_))
        ));
    }
}
