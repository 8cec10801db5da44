//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `analysis` - Budget summary and spending insights
//! - `artifact` - Model file download
//! - `chat` - One-shot questions to the assistant
//! - `serve` - Web server command
//! - `status` - Settings and AI backend status
//! - `tips` - Financial tips

pub mod analysis;
pub mod artifact;
pub mod chat;
pub mod serve;
pub mod status;
pub mod tips;

// Re-export command functions for main.rs
pub use analysis::*;
pub use artifact::*;
pub use chat::*;
pub use serve::*;
pub use status::*;
pub use tips::*;
