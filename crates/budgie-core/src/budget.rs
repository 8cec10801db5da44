//! Budget analyzer
//!
//! Compares a recommended split of monthly income against an illustrative
//! "current" split derived from the profile's expenses and disposable income.
//! The current split is a fixed heuristic, not tracked spending.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{format_usd, Chart, ChartSeries, Panel, UserProfile, UserType};
use crate::profiles::ProfileStore;

/// Fixed budget categories, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BudgetCategory {
    Housing,
    Food,
    Transportation,
    Entertainment,
    Savings,
    Other,
}

impl BudgetCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Housing => "Housing",
            Self::Food => "Food",
            Self::Transportation => "Transportation",
            Self::Entertainment => "Entertainment",
            Self::Savings => "Savings",
            Self::Other => "Other",
        }
    }

    pub fn all() -> &'static [BudgetCategory] {
        &[
            Self::Housing,
            Self::Food,
            Self::Transportation,
            Self::Entertainment,
            Self::Savings,
            Self::Other,
        ]
    }

    /// Recommended share of income, in whole percent (sums to 100)
    pub fn recommended_percent(&self) -> u32 {
        match self {
            Self::Housing => 30,
            Self::Food => 15,
            Self::Transportation => 15,
            Self::Entertainment => 10,
            Self::Savings => 20,
            Self::Other => 10,
        }
    }

    pub fn recommended_fraction(&self) -> f64 {
        f64::from(self.recommended_percent()) / 100.0
    }

    /// Illustrative current amount
    ///
    /// Savings is 80% of disposable income; everything else is a share of expenses.
    pub fn current_amount(&self, expenses: f64, disposable_income: f64) -> f64 {
        match self {
            Self::Housing => expenses * 0.4,
            Self::Food => expenses * 0.25,
            Self::Transportation => expenses * 0.2,
            Self::Entertainment => expenses * 0.1,
            Self::Savings => disposable_income * 0.8,
            Self::Other => expenses * 0.05,
        }
    }
}

impl std::fmt::Display for BudgetCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetRow {
    pub category: BudgetCategory,
    pub recommended_percent: u32,
    pub recommended_fraction: f64,
    pub recommended_amount: f64,
    pub current_amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetReport {
    pub name: String,
    pub user_type: UserType,
    pub income: f64,
    pub expenses: f64,
    /// Income minus expenses; may be negative
    pub disposable_income: f64,
    pub savings_rate: f64,
    /// Six months of expenses, professionals only
    pub emergency_fund_goal: Option<f64>,
    pub rows: Vec<BudgetRow>,
    pub summary: String,
    pub chart: Chart,
}

impl From<BudgetReport> for Panel {
    fn from(report: BudgetReport) -> Self {
        Panel {
            text: report.summary,
            chart: Some(report.chart),
        }
    }
}

/// Savings rate in percent; 0 unless income is positive
pub fn savings_rate(income: f64, expenses: f64) -> f64 {
    if income > 0.0 {
        (income - expenses) / income * 100.0
    } else {
        0.0
    }
}

pub fn budget_rows(income: f64, expenses: f64) -> Vec<BudgetRow> {
    let disposable_income = income - expenses;
    BudgetCategory::all()
        .iter()
        .map(|&category| BudgetRow {
            category,
            recommended_percent: category.recommended_percent(),
            recommended_fraction: category.recommended_fraction(),
            recommended_amount: income * category.recommended_fraction(),
            current_amount: category.current_amount(expenses, disposable_income),
        })
        .collect()
}

/// Look up `name` and build its budget report
pub fn summarize(store: &ProfileStore, name: &str) -> Result<BudgetReport> {
    let profile = store.require(name)?;
    Ok(build_report(&profile))
}

pub fn build_report(profile: &UserProfile) -> BudgetReport {
    let income = profile.income;
    let expenses = profile.monthly_expenses;
    let disposable_income = income - expenses;
    let rate = savings_rate(income, expenses);
    let rows = budget_rows(income, expenses);

    let figures = format!(
        "Monthly Income: {}\nMonthly Expenses: {}\nDisposable Income: {}\nSavings Rate: {:.1}%",
        format_usd(income),
        format_usd(expenses),
        format_usd(disposable_income),
        rate
    );

    let (summary, emergency_fund_goal) = match profile.user_type {
        UserType::Student => (
            format!(
                "🎓 Student Budget Summary for {}\n\n{}\n\n\
                 - Focus on a $500 emergency fund first\n\
                 - Use student discounts and free resources\n\
                 - Even small savings add up!",
                profile.name, figures
            ),
            None,
        ),
        UserType::Professional => {
            let goal = expenses * 6.0;
            (
                format!(
                    "💼 Professional Budget Summary for {}\n\n{}\n\n\
                     - Target savings rate: 20%+\n\
                     - Emergency fund goal: {}\n\
                     - Increase retirement contributions",
                    profile.name,
                    figures,
                    format_usd(goal)
                ),
                Some(goal),
            )
        }
    };

    let chart = Chart::GroupedBar {
        title: format!("Budget Analysis for {}", profile.name),
        categories: rows.iter().map(|r| r.category.to_string()).collect(),
        series: vec![
            ChartSeries {
                name: "Recommended Amount".to_string(),
                values: rows.iter().map(|r| r.recommended_amount).collect(),
            },
            ChartSeries {
                name: "Current Amount".to_string(),
                values: rows.iter().map(|r| r.current_amount).collect(),
            },
        ],
    };

    BudgetReport {
        name: profile.name.clone(),
        user_type: profile.user_type,
        income,
        expenses,
        disposable_income,
        savings_rate: rate,
        emergency_fund_goal,
        rows,
        summary,
        chart,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, PROFILE_MISSING_MESSAGE};
    use crate::models::NewProfile;

    fn store_with(name: &str, user_type: UserType, income: f64, expenses: f64) -> ProfileStore {
        let store = ProfileStore::new();
        store.create_or_replace(NewProfile {
            name: name.to_string(),
            age: 30,
            user_type,
            income,
            expenses,
            goals: String::new(),
        });
        store
    }

    #[test]
    fn test_recommended_percents_sum_to_100() {
        let total: u32 = BudgetCategory::all()
            .iter()
            .map(|c| c.recommended_percent())
            .sum();
        assert_eq!(total, 100);
    }

    #[test]
    fn test_recommended_amounts_sum_to_income() {
        for income in [1.0, 850.0, 3000.0, 12_345.67, 1_000_000.0] {
            let sum: f64 = budget_rows(income, 0.0)
                .iter()
                .map(|r| r.recommended_amount)
                .sum();
            assert!(
                (sum - income).abs() < 1e-9 * income,
                "income {} summed to {}",
                income,
                sum
            );
        }
    }

    #[test]
    fn test_savings_rate_zero_income() {
        assert_eq!(savings_rate(0.0, 0.0), 0.0);
        assert_eq!(savings_rate(0.0, 1500.0), 0.0);
        assert_eq!(savings_rate(-10.0, 5.0), 0.0);
    }

    #[test]
    fn test_savings_rate() {
        assert!((savings_rate(3000.0, 2000.0) - 33.333_333).abs() < 1e-4);
        assert!(savings_rate(1000.0, 1500.0) < 0.0);
    }

    #[test]
    fn test_current_amounts_heuristic() {
        let rows = budget_rows(3000.0, 2000.0);
        let current: Vec<f64> = rows.iter().map(|r| r.current_amount).collect();
        assert_eq!(current, vec![800.0, 500.0, 400.0, 200.0, 800.0, 100.0]);

        let recommended: Vec<f64> = rows.iter().map(|r| r.recommended_amount).collect();
        assert_eq!(recommended, vec![900.0, 450.0, 450.0, 300.0, 600.0, 300.0]);
    }

    #[test]
    fn test_unknown_name_is_error() {
        let store = ProfileStore::new();
        for name in ["", "alice", "Alice ", "🦜"] {
            let err = summarize(&store, name).unwrap_err();
            assert!(matches!(err, Error::ProfileNotFound(_)));

            let panel = Panel::from_result(summarize(&store, name));
            assert_eq!(panel.text, PROFILE_MISSING_MESSAGE);
            assert!(panel.chart.is_none());
        }
    }

    #[test]
    fn test_student_summary() {
        let store = store_with("alice", UserType::Student, 3000.0, 2000.0);
        let report = summarize(&store, "alice").unwrap();

        assert_eq!(report.disposable_income, 1000.0);
        assert!(report.emergency_fund_goal.is_none());
        assert_eq!(
            report.summary,
            "🎓 Student Budget Summary for alice\n\n\
             Monthly Income: $3,000.00\n\
             Monthly Expenses: $2,000.00\n\
             Disposable Income: $1,000.00\n\
             Savings Rate: 33.3%\n\n\
             - Focus on a $500 emergency fund first\n\
             - Use student discounts and free resources\n\
             - Even small savings add up!"
        );
    }

    #[test]
    fn test_professional_summary() {
        let store = store_with("carol", UserType::Professional, 8000.0, 5000.0);
        let report = summarize(&store, "carol").unwrap();

        assert_eq!(report.emergency_fund_goal, Some(30_000.0));
        assert!(report
            .summary
            .starts_with("💼 Professional Budget Summary for carol"));
        assert!(report.summary.contains("Savings Rate: 37.5%"));
        assert!(report.summary.contains("- Target savings rate: 20%+"));
        assert!(report.summary.contains("- Emergency fund goal: $30,000.00"));
        assert!(report.summary.ends_with("- Increase retirement contributions"));
    }

    #[test]
    fn test_negative_disposable_income_not_clamped() {
        let store = store_with("dave", UserType::Student, 1000.0, 1500.0);
        let report = summarize(&store, "dave").unwrap();
        assert_eq!(report.disposable_income, -500.0);
        assert_eq!(report.rows[4].current_amount, -400.0);
        assert!(report.summary.contains("Disposable Income: $-500.00"));
        assert!(report.summary.contains("Savings Rate: -50.0%"));
    }

    #[test]
    fn test_chart_shape() {
        let store = store_with("alice", UserType::Student, 3000.0, 2000.0);
        let panel: Panel = summarize(&store, "alice").unwrap().into();

        match panel.chart.unwrap() {
            Chart::GroupedBar {
                title,
                categories,
                series,
            } => {
                assert_eq!(title, "Budget Analysis for alice");
                assert_eq!(
                    categories,
                    vec![
                        "Housing",
                        "Food",
                        "Transportation",
                        "Entertainment",
                        "Savings",
                        "Other"
                    ]
                );
                assert_eq!(series.len(), 2);
                assert_eq!(series[0].name, "Recommended Amount");
                assert_eq!(series[1].name, "Current Amount");
                assert!(series.iter().all(|s| s.values.len() == 6));
            }
            other => panic!("expected grouped bar, got {:?}", other),
        }
    }
}
