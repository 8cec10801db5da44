//! Pluggable local AI backend abstraction
//!
//! All backends run locally (no cloud APIs) - Ollama, OpenAI-compatible servers, etc.
//!
//! # Architecture
//!
//! - `AIBackend` trait: text generation plus health/identity
//! - `AIClient` enum: concrete wrapper providing Clone + compile-time dispatch
//! - Backend implementations: `OllamaBackend`, `OpenAICompatibleBackend`, `MockBackend`
//!
//! Backends return structured errors; turning them into a user-facing reply is
//! the advisor's job.

mod mock;
mod ollama;
mod openai_compatible;

pub use mock::MockBackend;
pub use ollama::OllamaBackend;
pub use openai_compatible::OpenAICompatibleBackend;

use async_trait::async_trait;
use tracing::warn;

use crate::config::AiSettings;
use crate::error::Result;

/// Trait defining the interface for all AI backends
///
/// Backends should be Send + Sync to allow use across async tasks.
#[async_trait]
pub trait AIBackend: Send + Sync {
    /// Generate a completion for `prompt`, producing at most `max_tokens` tokens
    async fn generate(&self, prompt: &str, max_tokens: u32) -> Result<String>;

    /// Check if the backend is available
    async fn health_check(&self) -> bool;

    /// Get the model name (for logging)
    fn model(&self) -> &str;

    /// Get the host URL (for logging)
    fn host(&self) -> &str;
}

/// Concrete AI client enum
///
/// Provides Clone and compile-time dispatch without Box<dyn> overhead.
#[derive(Clone)]
pub enum AIClient {
    /// Ollama backend (HTTP API)
    Ollama(OllamaBackend),
    /// OpenAI-compatible backend (llama-server, vLLM, LocalAI, etc.)
    OpenAICompatible(OpenAICompatibleBackend),
    /// Mock backend for testing
    Mock(MockBackend),
}

impl AIClient {
    /// Create an AI client from resolved settings
    ///
    /// `backend` selects the implementation:
    /// - `ollama` (default)
    /// - `openai_compatible` (aliases: openai, vllm, localai, llamacpp)
    /// - `mock`
    pub fn from_settings(settings: &AiSettings) -> Self {
        match settings.backend.to_lowercase().as_str() {
            "ollama" => Self::ollama(&settings.host, &settings.model),
            "openai_compatible" | "openai" | "vllm" | "localai" | "llamacpp" => {
                let backend = match settings.api_key.as_deref() {
                    Some(key) => {
                        OpenAICompatibleBackend::with_api_key(&settings.host, &settings.model, key)
                    }
                    None => OpenAICompatibleBackend::new(&settings.host, &settings.model),
                };
                AIClient::OpenAICompatible(backend)
            }
            "mock" => Self::mock(),
            other => {
                warn!(backend = %other, "Unknown AI backend, falling back to ollama");
                Self::ollama(&settings.host, &settings.model)
            }
        }
    }

    /// Create an Ollama backend directly
    pub fn ollama(host: &str, model: &str) -> Self {
        AIClient::Ollama(OllamaBackend::new(host, model))
    }

    /// Create a mock backend for testing
    pub fn mock() -> Self {
        AIClient::Mock(MockBackend::new())
    }

    /// Short backend label for status output
    pub fn backend_name(&self) -> &'static str {
        match self {
            AIClient::Ollama(_) => "ollama",
            AIClient::OpenAICompatible(_) => "openai_compatible",
            AIClient::Mock(_) => "mock",
        }
    }
}

// Implement AIBackend for AIClient by delegating to the inner backend
#[async_trait]
impl AIBackend for AIClient {
    async fn generate(&self, prompt: &str, max_tokens: u32) -> Result<String> {
        match self {
            AIClient::Ollama(b) => b.generate(prompt, max_tokens).await,
            AIClient::OpenAICompatible(b) => b.generate(prompt, max_tokens).await,
            AIClient::Mock(b) => b.generate(prompt, max_tokens).await,
        }
    }

    async fn health_check(&self) -> bool {
        match self {
            AIClient::Ollama(b) => b.health_check().await,
            AIClient::OpenAICompatible(b) => b.health_check().await,
            AIClient::Mock(b) => b.health_check().await,
        }
    }

    fn model(&self) -> &str {
        match self {
            AIClient::Ollama(b) => b.model(),
            AIClient::OpenAICompatible(b) => b.model(),
            AIClient::Mock(b) => b.model(),
        }
    }

    fn host(&self) -> &str {
        match self {
            AIClient::Ollama(b) => b.host(),
            AIClient::OpenAICompatible(b) => b.host(),
            AIClient::Mock(b) => b.host(),
        }
    }
}
