//! Ollama backend implementation
//!
//! HTTP client for the Ollama `/api/generate` endpoint (non-streaming).

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;

use super::AIBackend;

/// Ollama backend
///
/// ```toml
/// [ai]
/// backend = "ollama"
/// host = "http://localhost:11434"
/// model = "orca-mini:3b"
/// ```
#[derive(Clone)]
pub struct OllamaBackend {
    http_client: Client,
    base_url: String,
    model: String,
}

impl OllamaBackend {
    /// Create a new Ollama backend
    pub fn new(base_url: &str, model: &str) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        }
    }
}

/// Request to Ollama API
#[derive(Debug, Serialize)]
struct OllamaRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: OllamaOptions,
}

#[derive(Debug, Serialize)]
struct OllamaOptions {
    /// Maximum tokens to generate
    num_predict: u32,
}

/// Response from Ollama API
#[derive(Debug, Deserialize)]
struct OllamaResponse {
    response: String,
}

#[async_trait]
impl AIBackend for OllamaBackend {
    async fn generate(&self, prompt: &str, max_tokens: u32) -> Result<String> {
        let request = OllamaRequest {
            model: &self.model,
            prompt,
            stream: false,
            options: OllamaOptions {
                num_predict: max_tokens,
            },
        };

        let response = self
            .http_client
            .post(format!("{}/api/generate", self.base_url))
            .json(&request)
            .send()
            .await?
            .error_for_status()?;

        let ollama_response: OllamaResponse = response.json().await?;
        debug!("Ollama response: {}", ollama_response.response);

        Ok(ollama_response.response)
    }

    async fn health_check(&self) -> bool {
        match self
            .http_client
            .get(format!("{}/api/tags", self.base_url))
            .send()
            .await
        {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn host(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::test_utils::MockOllamaServer;

    #[test]
    fn test_request_serialization() {
        let request = OllamaRequest {
            model: "orca-mini:3b",
            prompt: "hi",
            stream: false,
            options: OllamaOptions { num_predict: 150 },
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "orca-mini:3b");
        assert_eq!(json["stream"], false);
        assert_eq!(json["options"]["num_predict"], 150);
    }

    #[tokio::test]
    async fn test_generate_against_mock_server() {
        let server = MockOllamaServer::start().await;
        let backend = OllamaBackend::new(&server.url(), "orca-mini:3b");

        assert!(backend.health_check().await);
        let reply = backend
            .generate("User: how do I save?\nFinancial Assistant:", 20)
            .await
            .unwrap();
        assert!(reply.contains("Start by tracking"));
    }

    #[tokio::test]
    async fn test_server_error_is_http_error() {
        let server = MockOllamaServer::start().await;
        let backend = OllamaBackend::new(&server.url(), "orca-mini:3b");

        let err = backend
            .generate("User: FAIL_GENERATION\nFinancial Assistant:", 20)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Http(_)));
    }

    #[tokio::test]
    async fn test_unreachable_host() {
        let backend = OllamaBackend::new("http://127.0.0.1:1", "orca-mini:3b");
        assert!(!backend.health_check().await);
        assert!(backend.generate("hi", 5).await.is_err());
    }
}
