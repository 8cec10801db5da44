//! Mock backend for testing
//!
//! Returns predictable replies without a running model server. A failing
//! mock simulates generation errors.

use async_trait::async_trait;

use crate::error::{Error, Result};

use super::AIBackend;

/// Mock AI backend for testing
#[derive(Clone, Default)]
pub struct MockBackend {
    /// Whether health_check should return true
    pub healthy: bool,
    /// Whether generate should fail
    pub fail: bool,
    /// Fixed reply (overrides the keyword-based canned replies)
    pub reply: Option<String>,
}

impl MockBackend {
    /// Create a new mock backend (healthy by default)
    pub fn new() -> Self {
        Self {
            healthy: true,
            ..Default::default()
        }
    }

    /// Create an unhealthy mock backend whose generations fail
    pub fn failing() -> Self {
        Self {
            healthy: false,
            fail: true,
            reply: None,
        }
    }

    /// Create a mock that always answers with `reply`
    pub fn with_reply(reply: &str) -> Self {
        Self {
            healthy: true,
            fail: false,
            reply: Some(reply.to_string()),
        }
    }
}

#[async_trait]
impl AIBackend for MockBackend {
    async fn generate(&self, prompt: &str, max_tokens: u32) -> Result<String> {
        if self.fail {
            return Err(Error::Generation("mock generation failure".to_string()));
        }
        if let Some(ref reply) = self.reply {
            return Ok(reply.clone());
        }

        // Only look at the user's part of the prompt, not the persona
        let question = prompt
            .rsplit("User: ")
            .next()
            .unwrap_or(prompt)
            .to_lowercase();
        let reply = if question.contains("invest") {
            "Start with low-cost index funds and invest a small amount every month."
        } else if question.contains("debt") || question.contains("loan") {
            "List your debts, pay minimums on all of them, and put extra money toward the highest interest rate first."
        } else {
            "Start by tracking every expense for a month, then set a simple budget you can stick to."
        };

        // Roughly respect the token budget (one word ~ one token)
        Ok(reply
            .split_whitespace()
            .take(max_tokens as usize)
            .collect::<Vec<_>>()
            .join(" "))
    }

    async fn health_check(&self) -> bool {
        self.healthy
    }

    fn model(&self) -> &str {
        "mock"
    }

    fn host(&self) -> &str {
        "mock://localhost"
    }
}
