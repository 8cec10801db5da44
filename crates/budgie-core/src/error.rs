//! Error types for Budgie

use thiserror::Error;

/// Shown when a budget or spending request names a user with no profile
pub const PROFILE_MISSING_MESSAGE: &str = "Please create a user profile first!";

/// Shown when a spending blob parses to zero rows
pub const NO_SPENDING_DATA_MESSAGE: &str = "No spending data provided.";

#[derive(Error, Debug)]
pub enum Error {
    #[error("Profile not found: {0}")]
    ProfileNotFound(String),

    #[error("Invalid spending data: {0}")]
    InvalidSpendingData(String),

    #[error("No spending data provided")]
    NoSpendingData,

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Generation error: {0}")]
    Generation(String),

    #[error("Model returned an empty response")]
    EmptyResponse,

    #[error("Generation timed out after {0}s")]
    Timeout(u64),

    #[error("Artifact error: {0}")]
    Artifact(String),
}

impl Error {
    /// Stable label for structured logs
    ///
    /// Distinguishes failure causes that collapse into a single user-facing
    /// message (e.g. the chat apology).
    pub fn kind(&self) -> &'static str {
        match self {
            Error::ProfileNotFound(_) => "profile_not_found",
            Error::InvalidSpendingData(_) => "invalid_spending_data",
            Error::NoSpendingData => "no_spending_data",
            Error::Csv(_) => "csv",
            Error::Io(_) => "io",
            Error::Http(e) if e.is_timeout() => "timeout",
            Error::Http(e) if e.is_connect() => "connect",
            Error::Http(e) if e.is_decode() => "malformed_response",
            Error::Http(_) => "http",
            Error::Json(_) => "malformed_response",
            Error::Config(_) => "config",
            Error::Generation(_) => "generation",
            Error::EmptyResponse => "empty_response",
            Error::Timeout(_) => "timeout",
            Error::Artifact(_) => "artifact",
        }
    }

    /// Human-readable text for the form
    pub fn user_message(&self) -> String {
        match self {
            Error::ProfileNotFound(_) => PROFILE_MISSING_MESSAGE.to_string(),
            Error::NoSpendingData => NO_SPENDING_DATA_MESSAGE.to_string(),
            Error::InvalidSpendingData(detail) => invalid_spending_message(detail),
            Error::Csv(e) => invalid_spending_message(&e.to_string()),
            other => other.to_string(),
        }
    }
}

fn invalid_spending_message(detail: &str) -> String {
    format!(
        "⚠️ Invalid spending data format. Use CSV like:\nFood,500\nClothes,200\nTransport,150\nError: {}",
        detail
    )
}

pub type Result<T> = std::result::Result<T, Error>;
