//! Role instructions for the chat advisor
//!
//! Each user type gets a fixed persona. The persona and the user's message are
//! joined into a single completion-style prompt.

use crate::models::UserType;

mod defaults {
    pub const STUDENT_ADVISOR: &str = "You are a friendly financial advisor speaking to a college student. \
         Use simple language, focus on budgeting basics, student loans, part-time income, and building good habits.";
    pub const PROFESSIONAL_ADVISOR: &str = "You are a professional financial advisor. Provide detailed advice on \
         investments, tax strategies, retirement planning, and wealth building.";
}

/// Known prompt IDs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromptId {
    /// Simplified-language budgeting advisor for students
    StudentAdvisor,
    /// Detailed investing/tax/retirement advisor for professionals
    ProfessionalAdvisor,
}

impl PromptId {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StudentAdvisor => "student_advisor",
            Self::ProfessionalAdvisor => "professional_advisor",
        }
    }

    pub fn all() -> &'static [PromptId] {
        &[Self::StudentAdvisor, Self::ProfessionalAdvisor]
    }

    pub fn for_user_type(user_type: UserType) -> Self {
        match user_type {
            UserType::Student => Self::StudentAdvisor,
            UserType::Professional => Self::ProfessionalAdvisor,
        }
    }

    pub fn content(&self) -> &'static str {
        match self {
            Self::StudentAdvisor => defaults::STUDENT_ADVISOR,
            Self::ProfessionalAdvisor => defaults::PROFESSIONAL_ADVISOR,
        }
    }
}

/// Build the full prompt sent to the model
pub fn chat_prompt(user_type: UserType, message: &str) -> String {
    format!(
        "{}\n\nUser: {}\nFinancial Assistant:",
        PromptId::for_user_type(user_type).content(),
        message
    )
}
