//! Spending analyzer
//!
//! Parses a small `Category,Amount` text blob (no header) and reports the
//! total, the top category and a proportion-by-category pie chart.
//!
//! Parsing is partially tolerant: amounts that are not numbers count as 0,
//! but a row with extra fields rejects the whole blob.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::models::{format_usd, Chart, Panel, PieSlice};
use crate::profiles::ProfileStore;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpendingEntry {
    pub category: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpendingReport {
    pub name: String,
    pub entries: Vec<SpendingEntry>,
    pub total: f64,
    pub top_category: String,
    pub insights: String,
    pub chart: Chart,
}

impl From<SpendingReport> for Panel {
    fn from(report: SpendingReport) -> Self {
        Panel {
            text: report.insights,
            chart: Some(report.chart),
        }
    }
}

/// Look up `name`, parse `raw` and build the spending report
pub fn analyze(store: &ProfileStore, name: &str, raw: &str) -> Result<SpendingReport> {
    store.require(name)?;
    let entries = parse_spending(raw)?;
    build_report(name, entries)
}

/// Parse newline-separated `Category,Amount` rows
///
/// Blank lines are skipped and cells are trimmed. A leading `Category,Amount`
/// header row is tolerated and dropped.
pub fn parse_spending(raw: &str) -> Result<Vec<SpendingEntry>> {
    if raw.trim().is_empty() {
        return Err(Error::InvalidSpendingData(
            "No columns to parse from input".to_string(),
        ));
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(raw.as_bytes());

    let mut entries = Vec::new();
    let mut first_row = true;
    for (index, record) in reader.records().enumerate() {
        let record = record?;
        // Whitespace-only lines survive the reader as a single empty field
        if record.iter().all(str::is_empty) {
            continue;
        }
        if record.len() > 2 {
            let line = record.position().map(|p| p.line()).unwrap_or(index as u64 + 1);
            return Err(Error::InvalidSpendingData(format!(
                "Expected 2 fields in line {}, saw {}",
                line,
                record.len()
            )));
        }

        let category = record.get(0).unwrap_or_default();
        let amount = record.get(1).unwrap_or_default();
        let is_header = first_row && amount.eq_ignore_ascii_case("amount");
        first_row = false;
        if is_header {
            continue;
        }

        entries.push(SpendingEntry {
            category: category.to_string(),
            amount: coerce_amount(amount),
        });
    }

    Ok(entries)
}

/// Non-numeric, missing and non-finite amounts count as zero
fn coerce_amount(cell: &str) -> f64 {
    cell.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

pub fn build_report(name: &str, entries: Vec<SpendingEntry>) -> Result<SpendingReport> {
    let top_category = top_category(&entries)
        .ok_or(Error::NoSpendingData)?
        .to_string();
    let total: f64 = entries.iter().map(|e| e.amount).sum();

    let insights = format!(
        "📊 Spending Analysis\n\n\
         Total Spending: {}\n\
         Highest Category: {}\n\n\
         - Review your top spending areas\n\
         - Set category-wise limits\n\
         - Look for optimization opportunities",
        format_usd(total),
        top_category
    );

    let chart = Chart::Pie {
        title: format!("Spending Pattern Analysis for {}", name),
        slices: pie_slices(&entries),
    };

    Ok(SpendingReport {
        name: name.to_string(),
        entries,
        total,
        top_category,
        insights,
        chart,
    })
}

/// Category of the largest amount; ties go to the earliest row
pub fn top_category(entries: &[SpendingEntry]) -> Option<&str> {
    let mut iter = entries.iter();
    let mut best = iter.next()?;
    for entry in iter {
        if entry.amount > best.amount {
            best = entry;
        }
    }
    Some(&best.category)
}

/// Sum amounts per category, keeping first-seen order
fn pie_slices(entries: &[SpendingEntry]) -> Vec<PieSlice> {
    let mut slices: Vec<PieSlice> = Vec::new();
    for entry in entries {
        match slices.iter_mut().find(|s| s.label == entry.category) {
            Some(slice) => slice.value += entry.amount,
            None => slices.push(PieSlice {
                label: entry.category.clone(),
                value: entry.amount,
            }),
        }
    }
    slices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{NO_SPENDING_DATA_MESSAGE, PROFILE_MISSING_MESSAGE};
    use crate::models::{NewProfile, UserType};

    fn store_with_alice() -> ProfileStore {
        let store = ProfileStore::new();
        store.create_or_replace(NewProfile {
            name: "alice".to_string(),
            age: 21,
            user_type: UserType::Student,
            income: 1200.0,
            expenses: 900.0,
            goals: String::new(),
        });
        store
    }

    #[test]
    fn test_analyze_basic() {
        let store = store_with_alice();
        let report = analyze(&store, "alice", "Food,500\nClothes,200\nTransport,150").unwrap();

        assert_eq!(report.total, 850.0);
        assert_eq!(report.top_category, "Food");
        assert_eq!(report.entries.len(), 3);
        assert_eq!(
            report.insights,
            "📊 Spending Analysis\n\n\
             Total Spending: $850.00\n\
             Highest Category: Food\n\n\
             - Review your top spending areas\n\
             - Set category-wise limits\n\
             - Look for optimization opportunities"
        );
    }

    #[test]
    fn test_unknown_profile() {
        let store = ProfileStore::new();
        let panel = Panel::from_result(analyze(&store, "alice", "Food,500"));
        assert_eq!(panel.text, PROFILE_MISSING_MESSAGE);
        assert!(panel.chart.is_none());
    }

    #[test]
    fn test_profile_checked_before_parsing() {
        let store = ProfileStore::new();
        let err = analyze(&store, "alice", "").unwrap_err();
        assert!(matches!(err, Error::ProfileNotFound(_)));
    }

    #[test]
    fn test_empty_blob_is_format_error() {
        let store = store_with_alice();
        for raw in ["", "   ", "\n\n"] {
            let panel = Panel::from_result(analyze(&store, "alice", raw));
            assert!(panel
                .text
                .starts_with("⚠️ Invalid spending data format."));
            assert!(panel.chart.is_none());
        }
    }

    #[test]
    fn test_header_only_blob_has_no_data() {
        let store = store_with_alice();
        let err = analyze(&store, "alice", "Category,Amount\n").unwrap_err();
        assert!(matches!(err, Error::NoSpendingData));
        assert_eq!(err.user_message(), NO_SPENDING_DATA_MESSAGE);
    }

    #[test]
    fn test_header_row_skipped() {
        let entries = parse_spending("Category,Amount\nFood,10").unwrap();
        assert_eq!(
            entries,
            vec![SpendingEntry {
                category: "Food".into(),
                amount: 10.0
            }]
        );
    }

    #[test]
    fn test_non_numeric_amount_coerces_to_zero() {
        let entries = parse_spending("Rent,abc\nFood,20\nFun,\nGifts").unwrap();
        let amounts: Vec<f64> = entries.iter().map(|e| e.amount).collect();
        assert_eq!(amounts, vec![0.0, 20.0, 0.0, 0.0]);

        let only = parse_spending("Rent,abc").unwrap();
        assert_eq!(only[0].category, "Rent");
        assert_eq!(only[0].amount, 0.0);
    }

    #[test]
    fn test_non_finite_amounts_coerce_to_zero() {
        let entries = parse_spending("A,nan\nB,inf\nC,5").unwrap();
        let amounts: Vec<f64> = entries.iter().map(|e| e.amount).collect();
        assert_eq!(amounts, vec![0.0, 0.0, 5.0]);
    }

    #[test]
    fn test_extra_fields_rejected() {
        let store = store_with_alice();
        let err = analyze(&store, "alice", "Food,500\nClothes,200,extra").unwrap_err();
        match &err {
            Error::InvalidSpendingData(detail) => {
                assert_eq!(detail, "Expected 2 fields in line 2, saw 3")
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(err.user_message().contains("Error: Expected 2 fields"));
    }

    #[test]
    fn test_whitespace_and_blank_lines() {
        let entries = parse_spending("  Food , 12.5 \n\nRent,1000\n").unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].category, "Food");
        assert_eq!(entries[0].amount, 12.5);
    }

    #[test]
    fn test_whitespace_only_lines_skipped() {
        let entries = parse_spending("Food,1\n   \nRent,2").unwrap();
        let categories: Vec<&str> = entries.iter().map(|e| e.category.as_str()).collect();
        assert_eq!(categories, vec!["Food", "Rent"]);

        // A header after leading blank lines is still a header
        let entries = parse_spending("  \n\t\nCategory,Amount\nFood,3").unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].category, "Food");
    }

    #[test]
    fn test_top_category_ties_first_wins() {
        let entries = parse_spending("Books,100\nGames,100\nFood,50").unwrap();
        assert_eq!(top_category(&entries), Some("Books"));
        assert_eq!(top_category(&[]), None);
    }

    #[test]
    fn test_all_zero_amounts_pick_first_row() {
        let report = build_report("alice", parse_spending("Rent,abc\nFood,xyz").unwrap()).unwrap();
        assert_eq!(report.total, 0.0);
        assert_eq!(report.top_category, "Rent");
    }

    #[test]
    fn test_pie_merges_duplicate_categories() {
        let report = build_report("alice", parse_spending("Food,5\nRent,10\nFood,7").unwrap())
            .unwrap();
        match report.chart {
            Chart::Pie { title, slices } => {
                assert_eq!(title, "Spending Pattern Analysis for alice");
                assert_eq!(
                    slices,
                    vec![
                        PieSlice {
                            label: "Food".into(),
                            value: 12.0
                        },
                        PieSlice {
                            label: "Rent".into(),
                            value: 10.0
                        },
                    ]
                );
            }
            other => panic!("expected pie, got {:?}", other),
        }
        // top category is per row, not per merged slice
        assert_eq!(report.top_category, "Rent");
    }
}
