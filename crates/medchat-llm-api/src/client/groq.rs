use anyhow::{Context, Result};
use async_trait::async_trait;

use medchat_logging::{log_request, log_response};
use medchat_models::{ChatRequest, ChatResponse, Message};

use crate::client::{LlmClient, LlmResponse, TokenUsage};

/// Client for Groq and other OpenAI-compatible chat-completion endpoints
pub struct GroqLlmClient {
    api_key: String,
    api_url: String,
    verbose: bool,
    client: reqwest::Client,
}

impl GroqLlmClient {
    pub fn new(api_key: String, api_url: String, verbose: bool) -> Self {
        Self {
            api_key,
            api_url,
            verbose,
            client: reqwest::Client::new(),
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }
}

#[async_trait]
impl LlmClient for GroqLlmClient {
    async fn chat(&self, model: &str, messages: Vec<Message>) -> Result<LlmResponse> {
        let request = ChatRequest::new(model, messages);

        log_request(&self.api_url, &request, &self.api_key, self.verbose);

        let response = self.client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .with_context(|| format!("Failed to reach {}", self.api_url))?;

        let status = response.status();
        let response_text = response.text().await
            .context("Failed to read completion response body")?;

        log_response(&status, &response_text, self.verbose);

        if !status.is_success() {
            return Err(anyhow::anyhow!("API request failed: {} - {}", status, response_text));
        }

        let chat_response: ChatResponse = serde_json::from_str(&response_text)
            .context("Failed to decode completion response")?;

        Ok(LlmResponse {
            content: chat_response.first_content().map(str::to_string),
            usage: chat_response.usage.map(|usage| TokenUsage {
                prompt_tokens: usage.prompt_tokens as u32,
                completion_tokens: usage.completion_tokens as u32,
                total_tokens: usage.total_tokens as u32,
            }),
        })
    }
}
