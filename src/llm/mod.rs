//! Generative model backends. The service only ever sends a single prompt
//! and reads back the answer text.

use thiserror::Error;

pub mod gemini;
pub mod openai;
pub mod provider;
pub mod service;
pub mod types;


pub use provider::LlmProvider;
pub use service::LlmService;
pub use types::{ChatMessage, ChatRequest};

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("LLM request timed out after {0}s")]
    Timeout(u64),
    #[error("LLM request failed: {0}")]
    Request(String),
    #[error("LLM provider returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("LLM provider returned an invalid response: {0}")]
    InvalidResponse(String),
    #[error("LLM provider misconfigured: {0}")]
    Configuration(String),
}

impl LlmError {
    pub(crate) fn from_transport(err: reqwest::Error, timeout_secs: u64) -> Self {
        if err.is_timeout() {
            LlmError::Timeout(timeout_secs)
        } else {
            LlmError::Request(err.to_string())
        }
    }
}
