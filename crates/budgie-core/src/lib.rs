//! Budgie Core Library
//!
//! Shared functionality for the Budgie personal finance assistant:
//! - In-memory user profile store
//! - Budget and spending analyzers producing text + chart panels
//! - Static tip catalog
//! - Chat advisor over pluggable local AI backends (Ollama, llama.cpp, etc.)
//! - Settings and model artifact bootstrap

pub mod advisor;
pub mod ai;
pub mod artifact;
pub mod budget;
pub mod config;
pub mod error;
pub mod models;
pub mod profiles;
pub mod prompts;
pub mod spending;
pub mod tips;

/// Test utilities including mock Ollama server
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use advisor::{Advisor, GenerationSession, APOLOGY, DEFAULT_MAX_TOKENS};
pub use ai::{AIBackend, AIClient, MockBackend, OllamaBackend, OpenAICompatibleBackend};
pub use artifact::{ensure_model_artifact, ArtifactStatus};
pub use budget::{BudgetCategory, BudgetReport, BudgetRow};
pub use config::{AiSettings, ArtifactSettings, ServerSettings, Settings};
pub use error::{Error, Result};
pub use models::{
    format_usd, Chart, ChartSeries, NewProfile, Panel, PieSlice, UserProfile, UserType,
};
pub use profiles::ProfileStore;
pub use prompts::PromptId;
pub use spending::{SpendingEntry, SpendingReport};
