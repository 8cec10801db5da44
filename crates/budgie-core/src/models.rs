//! Domain models for Budgie

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Who the advice is aimed at
///
/// Drives the chat persona, the budget summary wording and the tip table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum UserType {
    #[default]
    #[serde(alias = "student")]
    Student,
    #[serde(alias = "professional")]
    Professional,
}

impl UserType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Student => "Student",
            Self::Professional => "Professional",
        }
    }

    pub fn all() -> &'static [UserType] {
        &[Self::Student, Self::Professional]
    }
}

impl std::str::FromStr for UserType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "student" => Ok(Self::Student),
            "professional" => Ok(Self::Professional),
            _ => Err(format!("Unknown user type: {}", s)),
        }
    }
}

impl std::fmt::Display for UserType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A user profile held in memory for the lifetime of the process
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub age: i32,
    pub user_type: UserType,
    /// Monthly income
    pub income: f64,
    pub monthly_expenses: f64,
    pub goals: String,
    pub created_at: DateTime<Utc>,
}

/// Input for creating (or replacing) a profile
///
/// Numeric fields are taken as given; zero and negative values pass through.
#[derive(Debug, Clone, Deserialize)]
pub struct NewProfile {
    pub name: String,
    #[serde(default = "default_age")]
    pub age: i32,
    #[serde(default)]
    pub user_type: UserType,
    pub income: f64,
    pub expenses: f64,
    #[serde(default)]
    pub goals: String,
}

fn default_age() -> i32 {
    25
}

/// One named series in a grouped bar chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub name: String,
    pub values: Vec<f64>,
}

/// One slice of a pie chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
}

/// Chart description handed to the form for rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Chart {
    GroupedBar {
        title: String,
        categories: Vec<String>,
        series: Vec<ChartSeries>,
    },
    Pie {
        title: String,
        slices: Vec<PieSlice>,
    },
}

/// Text plus optional chart: what an analysis tab displays
///
/// Failures become a panel carrying the user-visible error text and no chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Panel {
    pub text: String,
    pub chart: Option<Chart>,
}

impl Panel {
    pub fn text_only(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            chart: None,
        }
    }

    /// Render a report result, turning errors into their user message
    pub fn from_result<T: Into<Panel>>(result: Result<T>) -> Self {
        match result {
            Ok(report) => report.into(),
            Err(e) => Self::text_only(e.user_message()),
        }
    }
}

/// Format a dollar amount as `$1,234.56`; the sign follows the dollar sign (`$-500.00`)
pub fn format_usd(amount: f64) -> String {
    format!("${}", format_num::format_num!(",.2", amount))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_type_parse() {
        assert_eq!("Student".parse::<UserType>().unwrap(), UserType::Student);
        assert_eq!(
            "professional".parse::<UserType>().unwrap(),
            UserType::Professional
        );
        assert!("Retiree".parse::<UserType>().is_err());
    }

    #[test]
    fn test_user_type_serde_accepts_lowercase() {
        let parsed: UserType = serde_json::from_str("\"professional\"").unwrap();
        assert_eq!(parsed, UserType::Professional);
        assert_eq!(
            serde_json::to_string(&UserType::Student).unwrap(),
            "\"Student\""
        );
    }

    #[test]
    fn test_new_profile_defaults() {
        let profile: NewProfile =
            serde_json::from_str(r#"{"name": "alice", "income": 3000, "expenses": 2000}"#)
                .unwrap();
        assert_eq!(profile.age, 25);
        assert_eq!(profile.user_type, UserType::Student);
        assert!(profile.goals.is_empty());
    }

    #[test]
    fn test_format_usd() {
        assert_eq!(format_usd(50.0), "$50.00");
        assert_eq!(format_usd(0.0), "$0.00");
        assert_eq!(format_usd(-50.0), "$-50.00");
        assert_eq!(format_usd(-1234.5), "$-1,234.50");
    }

    #[test]
    fn test_chart_serializes_with_kind_tag() {
        let chart = Chart::Pie {
            title: "Spending".into(),
            slices: vec![PieSlice {
                label: "Food".into(),
                value: 500.0,
            }],
        };
        let json = serde_json::to_value(&chart).unwrap();
        assert_eq!(json["kind"], "pie");
        assert_eq!(json["slices"][0]["label"], "Food");
        assert_eq!(json["title"], "Spending");
    }

    #[test]
    fn test_panel_from_error() {
        let panel = Panel::from_result::<Panel>(Err(crate::Error::ProfileNotFound("x".into())));
        assert_eq!(panel.text, crate::error::PROFILE_MISSING_MESSAGE);
        assert!(panel.chart.is_none());
    }
}
