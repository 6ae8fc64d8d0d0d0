use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use medchat_models::Message;

pub mod groq;

/// LLM client trait - unified interface for all chat-completion providers
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send one completion request for `messages` and wait for the answer.
    ///
    /// Transport, authentication and provider errors come back as `Err`; a
    /// well-formed answer without content comes back as `content: None`.
    async fn chat(&self, model: &str, messages: Vec<Message>) -> Result<LlmResponse>;
}

/// LLM response structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LlmResponse {
    pub content: Option<String>,
    pub usage: Option<TokenUsage>,
}

/// Token usage information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}
