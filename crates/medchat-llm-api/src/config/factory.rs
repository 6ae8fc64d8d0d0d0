use std::env;
use std::sync::Arc;

use crate::client::{LlmClient, groq::GroqLlmClient};
use crate::config::{BackendType, get_default_url_for_backend, normalize_api_url};

/// Client factory for creating LLM clients
pub struct ClientFactory;

impl ClientFactory {
    /// Create an LLM client based on the specified backend type
    ///
    /// # Arguments
    /// * `backend` - The backend type to use (Groq, OpenAI)
    /// * `api_key` - API key; falls back to the backend's key variable
    /// * `api_url` - Optional custom API URL (uses default if None)
    /// * `verbose` - Print request/response dumps to the console
    pub fn create(
        backend: BackendType,
        api_key: Option<String>,
        api_url: Option<String>,
        verbose: bool,
    ) -> Arc<dyn LlmClient> {
        let url = Self::resolve_url(backend, api_url);
        let key = Self::resolve_api_key(backend, api_key);

        if key.is_empty() {
            log::warn!(
                "no API key configured for {} (set {})",
                backend.as_str(),
                backend.api_key_env()
            );
        }

        // Both backends speak the same OpenAI-compatible protocol
        Arc::new(GroqLlmClient::new(key, url, verbose))
    }

    /// Explicit URL (normalized) or the backend default
    pub fn resolve_url(backend: BackendType, api_url: Option<String>) -> String {
        api_url
            .map(|url| normalize_api_url(&url))
            .unwrap_or_else(|| get_default_url_for_backend(&backend))
    }

    /// Explicit key, then the backend's environment variable, then empty
    pub fn resolve_api_key(backend: BackendType, api_key: Option<String>) -> String {
        api_key
            .filter(|key| !key.is_empty())
            .or_else(|| env::var(backend.api_key_env()).ok())
            .unwrap_or_default()
    }
}
