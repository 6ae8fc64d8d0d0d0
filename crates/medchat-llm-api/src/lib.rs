//! # medchat-llm-api
//!
//! Clients for OpenAI-compatible chat-completion providers (Groq by default).
//!
//! ## Example
//!
//! ```rust,no_run
//! use medchat_llm_api::{ClientFactory, BackendType};
//! use medchat_models::Message;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = ClientFactory::create(BackendType::Groq, None, None, false);
//!
//!     let messages = vec![Message::user("What is hypertension?")];
//!     let response = client.chat("llama-3.3-70b-versatile", messages).await?;
//!     println!("Response: {:?}", response.content);
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;


// Re-export commonly used types
pub use client::{
    LlmClient,
    LlmResponse,
    TokenUsage,
    groq::GroqLlmClient,
};

pub use config::{
    BackendType,
    ClientFactory,
    GROQ_API_URL,
    OPENAI_API_URL,
    normalize_api_url,
    get_default_url_for_backend,
};
