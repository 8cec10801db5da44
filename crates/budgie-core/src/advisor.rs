//! Chat advisor: the gateway between user questions and the local model
//!
//! Every generation runs inside a [`GenerationSession`], which holds the single
//! engine permit for its lifetime, so concurrent chats queue instead of
//! interleaving on the model. Each call is bounded by a timeout.
//!
//! [`Advisor::reply`] never fails: any error is logged with its kind and the
//! user sees [`APOLOGY`].

use std::time::Duration;

use tokio::sync::{Semaphore, SemaphorePermit};
use tracing::{debug, warn};

use crate::ai::{AIBackend, AIClient};
use crate::config::AiSettings;
use crate::error::{Error, Result};
use crate::models::UserType;
use crate::prompts::chat_prompt;

/// Reply shown whenever generation fails for any reason
pub const APOLOGY: &str = "Sorry, I couldn't generate a response. Please try again.";

/// Generation budget when the caller does not give one
pub const DEFAULT_MAX_TOKENS: u32 = 150;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

pub struct Advisor {
    client: AIClient,
    permit: Semaphore,
    timeout: Duration,
}

impl Advisor {
    pub fn new(client: AIClient) -> Self {
        Self {
            client,
            permit: Semaphore::new(1),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Bound each generation by `timeout`
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn from_settings(settings: &AiSettings) -> Self {
        Self::new(AIClient::from_settings(settings))
            .with_timeout(Duration::from_secs(settings.timeout_secs))
    }

    pub fn client(&self) -> &AIClient {
        &self.client
    }

    /// Acquire the engine, waiting for any in-flight generation to finish
    pub async fn session(&self) -> Result<GenerationSession<'_>> {
        let permit = self
            .permit
            .acquire()
            .await
            .map_err(|e| Error::Generation(format!("engine unavailable: {}", e)))?;
        Ok(GenerationSession {
            client: &self.client,
            timeout: self.timeout,
            _permit: permit,
        })
    }

    /// Generate a reply, surfacing the failure cause
    pub async fn try_reply(
        &self,
        message: &str,
        user_type: UserType,
        max_tokens: u32,
    ) -> Result<String> {
        let prompt = chat_prompt(user_type, message);
        let session = self.session().await?;
        session.generate(&prompt, max_tokens).await
    }

    /// Generate a reply; failures become [`APOLOGY`]
    pub async fn reply(&self, message: &str, user_type: UserType, max_tokens: u32) -> String {
        match self.try_reply(message, user_type, max_tokens).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(
                    kind = e.kind(),
                    error = %e,
                    backend = self.client.backend_name(),
                    model = self.client.model(),
                    "Chat generation failed"
                );
                APOLOGY.to_string()
            }
        }
    }
}

/// Exclusive use of the model for one or more generations
///
/// Dropping the session releases the engine.
pub struct GenerationSession<'a> {
    client: &'a AIClient,
    timeout: Duration,
    _permit: SemaphorePermit<'a>,
}

impl GenerationSession<'_> {
    /// Run one bounded generation; empty output counts as a failure
    pub async fn generate(&self, prompt: &str, max_tokens: u32) -> Result<String> {
        debug!(
            model = self.client.model(),
            max_tokens, "Generating chat reply"
        );

        let output = tokio::time::timeout(self.timeout, self.client.generate(prompt, max_tokens))
            .await
            .map_err(|_| Error::Timeout(self.timeout.as_secs()))??;

        let reply = output.trim();
        if reply.is_empty() {
            return Err(Error::EmptyResponse);
        }
        Ok(reply.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{MockBackend, OllamaBackend, OpenAICompatibleBackend};
    use crate::test_utils::{MockOllamaServer, EMPTY_MARKER, FAIL_MARKER, SLOW_MARKER};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_reply_with_mock() {
        let advisor = Advisor::new(AIClient::mock());
        let reply = advisor
            .reply("How should I invest?", UserType::Professional, 150)
            .await;
        assert!(reply.contains("index funds"));
    }

    #[tokio::test]
    async fn test_failure_becomes_apology() {
        let advisor = Advisor::new(AIClient::Mock(MockBackend::failing()));
        let reply = advisor.reply("hello", UserType::Student, 150).await;
        assert_eq!(reply, APOLOGY);

        let err = advisor
            .try_reply("hello", UserType::Student, 150)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "generation");
    }

    #[tokio::test]
    async fn test_empty_output_is_failure() {
        let advisor = Advisor::new(AIClient::Mock(MockBackend::with_reply("  \n ")));
        let err = advisor
            .try_reply("hello", UserType::Student, 150)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::EmptyResponse));
        assert_eq!(advisor.reply("hello", UserType::Student, 150).await, APOLOGY);
    }

    #[tokio::test]
    async fn test_output_is_trimmed() {
        let advisor = Advisor::new(AIClient::Mock(MockBackend::with_reply("  Save first.\n")));
        assert_eq!(
            advisor.reply("hello", UserType::Student, 150).await,
            "Save first."
        );
    }

    #[tokio::test]
    async fn test_ollama_over_http() {
        let server = MockOllamaServer::start().await;
        let advisor = Advisor::new(AIClient::Ollama(OllamaBackend::new(
            &server.url(),
            "orca-mini:3b",
        )));

        let reply = advisor.reply("Any tips?", UserType::Student, 50).await;
        assert_eq!(
            reply,
            "Start by tracking your expenses and set aside savings first."
        );

        let reply = advisor.reply(FAIL_MARKER, UserType::Student, 50).await;
        assert_eq!(reply, APOLOGY);

        let err = advisor
            .try_reply(EMPTY_MARKER, UserType::Student, 50)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::EmptyResponse));
    }

    #[tokio::test]
    async fn test_openai_compatible_over_http() {
        let server = MockOllamaServer::start().await;
        let advisor = Advisor::new(AIClient::OpenAICompatible(OpenAICompatibleBackend::new(
            &server.url(),
            "orca-mini-3b",
        )));

        let reply = advisor
            .reply("Should I invest?", UserType::Professional, 50)
            .await;
        assert!(reply.starts_with("Consider low-cost index funds"));

        let reply = advisor.reply(FAIL_MARKER, UserType::Professional, 50).await;
        assert_eq!(reply, APOLOGY);
    }

    #[tokio::test]
    async fn test_timeout_becomes_apology() {
        let server = MockOllamaServer::start().await;
        let advisor = Advisor::new(AIClient::ollama(&server.url(), "orca-mini:3b"))
            .with_timeout(Duration::from_millis(200));

        let err = advisor
            .try_reply(SLOW_MARKER, UserType::Student, 50)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Timeout(_)));
        assert_eq!(err.kind(), "timeout");
        assert_eq!(
            advisor.reply(SLOW_MARKER, UserType::Student, 50).await,
            APOLOGY
        );
    }

    #[tokio::test]
    async fn test_unreachable_backend_becomes_apology() {
        let advisor = Advisor::new(AIClient::ollama("http://127.0.0.1:1", "orca-mini:3b"));
        assert_eq!(advisor.reply("hi", UserType::Student, 10).await, APOLOGY);
    }

    #[tokio::test]
    async fn test_session_is_exclusive() {
        let advisor = Arc::new(Advisor::new(AIClient::mock()));
        let session = advisor.session().await.unwrap();

        let waiting = {
            let advisor = Arc::clone(&advisor);
            tokio::spawn(async move { advisor.reply("hello", UserType::Student, 10).await })
        };

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!waiting.is_finished());

        drop(session);
        let reply = waiting.await.unwrap();
        assert!(!reply.is_empty());
        assert_ne!(reply, APOLOGY);
    }
}
