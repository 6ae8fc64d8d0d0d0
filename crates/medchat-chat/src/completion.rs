use std::sync::Arc;

use medchat_llm_api::LlmClient;
use medchat_models::Message;
use medchat_types::{ModelType, CONNECTION_ERROR_REPLY, EMPTY_REPLY};

/// Whether the provider actually answered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyStatus {
    Succeeded,
    Failed,
}

/// Text to show as the assistant turn, successful or not
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub content: String,
    pub status: ReplyStatus,
}

/// Turns a conversation into exactly one provider request and its answer
/// into reply text. Never returns an error.
pub struct CompletionClient {
    client: Arc<dyn LlmClient>,
    system_prompt: Option<String>,
}

impl CompletionClient {
    pub fn new(client: Arc<dyn LlmClient>) -> Self {
        Self {
            client,
            system_prompt: None,
        }
    }

    /// Prepend a system message to every request; it is not part of the session
    pub fn with_system_prompt(mut self, prompt: Option<String>) -> Self {
        self.system_prompt = prompt.filter(|p| !p.trim().is_empty());
        self
    }

    pub async fn complete(&self, model: ModelType, history: Vec<Message>) -> Reply {
        let mut messages = Vec::with_capacity(history.len() + 1);
        if let Some(prompt) = &self.system_prompt {
            messages.push(Message::system(prompt.clone()));
        }
        messages.extend(history);

        match self.client.chat(model.as_str(), messages).await {
            Ok(response) => {
                if let Some(usage) = &response.usage {
                    log::debug!(
                        "completion used {} tokens ({} prompt, {} completion)",
                        usage.total_tokens,
                        usage.prompt_tokens,
                        usage.completion_tokens
                    );
                }
                let content = response
                    .content
                    .filter(|c| !c.is_empty())
                    .unwrap_or_else(|| EMPTY_REPLY.to_string());
                Reply {
                    content,
                    status: ReplyStatus::Succeeded,
                }
            }
            Err(e) => {
                log::error!("completion request failed: {:#}", e);
                Reply {
                    content: CONNECTION_ERROR_REPLY.to_string(),
                    status: ReplyStatus::Failed,
                }
            }
        }
    }
}
