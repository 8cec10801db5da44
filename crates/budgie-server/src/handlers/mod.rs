//! HTTP request handlers organized by tab
//!
//! Each submodule contains handlers for a specific API area.

pub mod analysis;
pub mod chat;
pub mod health;
pub mod profiles;
pub mod tips;

// Re-export all handlers for use in router
pub use analysis::*;
pub use chat::*;
pub use health::*;
pub use profiles::*;
pub use tips::*;
