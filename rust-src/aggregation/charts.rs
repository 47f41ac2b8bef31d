//! Grouped sums behind the four chart views.
//!
//! Every aggregate here is built from the full table. The state selector
//! never reaches these functions, so the charts stay put while the KPI row
//! follows the selection.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::config::MONTH_YEAR_FORMAT;
use crate::error::{DashboardError, Result};
use crate::models::{ComplaintRecord, Dataset};


/// Summed count for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    pub label: String,
    pub count: u64,
}


/// Summed count for one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthTotal {
    /// First day of the month.
    pub month: NaiveDate,
    pub count: u64,
}


/// First level of the issue treemap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssueGroup {
    pub issue: String,
    pub total: u64,
    pub sub_issues: Vec<CategoryTotal>,
}


/// All chart aggregates for the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartData {
    pub by_product: Vec<CategoryTotal>,
    pub by_month: Vec<MonthTotal>,
    pub by_channel: Vec<CategoryTotal>,
    pub by_issue: Vec<IssueGroup>,
}


impl ChartData {
    /// Build every chart aggregate from the unfiltered table.
    pub fn from_dataset(dataset: &Dataset) -> Result<Self> {
        let records = dataset.records();
        Ok(Self {
            by_product: group_sum(records, |r| &r.product)?,
            by_month: complaints_by_month(records)?,
            by_channel: group_sum(records, |r| &r.submitted_via)?,
            by_issue: complaints_by_issue(records)?,
        })
    }
}


/// Sum counts per key, ordered by key. Rows with an empty key are skipped.
pub fn group_sum<F>(records: &[ComplaintRecord], key: F) -> Result<Vec<CategoryTotal>>
where
    F: Fn(&ComplaintRecord) -> &str,
{
    let mut totals: BTreeMap<&str, u64> = BTreeMap::new();
    for record in records {
        let label = key(record);
        if label.is_empty() {
            continue;
        }
        let total = totals.entry(label).or_insert(0);
        *total = record.add_to(*total)?;
    }

    Ok(totals
        .into_iter()
        .map(|(label, count)| CategoryTotal {
            label: label.to_string(),
            count,
        })
        .collect())
}


/// Sum counts per calendar month in ascending order.
///
/// Empty `Month Year` cells are skipped; anything else that is not
/// `dd/mm/yyyy` fails the whole series.
pub fn complaints_by_month(records: &[ComplaintRecord]) -> Result<Vec<MonthTotal>> {
    let mut totals: BTreeMap<NaiveDate, u64> = BTreeMap::new();

    for record in records {
        let raw = record.month_year.trim();
        if raw.is_empty() {
            continue;
        }
        let month = parse_month(raw).ok_or_else(|| DashboardError::InvalidDate {
            line: record.line,
            value: raw.to_string(),
        })?;
        let total = totals.entry(month).or_insert(0);
        *total = record.add_to(*total)?;
    }

    Ok(totals
        .into_iter()
        .map(|(month, count)| MonthTotal { month, count })
        .collect())
}


/// Sum counts per (issue, sub-issue) pair, nested under each issue.
///
/// Pairs where either level is empty are left out.
pub fn complaints_by_issue(records: &[ComplaintRecord]) -> Result<Vec<IssueGroup>> {
    let mut tree: BTreeMap<&str, (u64, BTreeMap<&str, u64>)> = BTreeMap::new();

    for record in records {
        if record.issue.is_empty() || record.sub_issue.is_empty() {
            continue;
        }
        let (total, subs) = tree.entry(record.issue.as_str()).or_default();
        *total = record.add_to(*total)?;
        let sub = subs.entry(record.sub_issue.as_str()).or_insert(0);
        *sub = record.add_to(*sub)?;
    }

    Ok(tree
        .into_iter()
        .map(|(issue, (total, subs))| {
            let sub_issues: Vec<CategoryTotal> = subs
                .into_iter()
                .map(|(label, count)| CategoryTotal {
                    label: label.to_string(),
                    count,
                })
                .collect();
            IssueGroup {
                issue: issue.to_string(),
                total,
                sub_issues,
            }
        })
        .collect())
}


/// Parse `dd/mm/yyyy` and truncate to the first of the month.
fn parse_month(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, MONTH_YEAR_FORMAT)
        .ok()
        .and_then(|date| date.with_day(1))
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregation::{compute_kpis, DashboardView, StateFilter};

    fn row(product: &str, channel: &str, issue: &str, sub: &str, month: &str, count: u64) -> ComplaintRecord {
        ComplaintRecord {
            state: if count % 2 == 0 { "CA" } else { "NY" }.to_string(),
            product: product.to_string(),
            submitted_via: channel.to_string(),
            issue: issue.to_string(),
            sub_issue: sub.to_string(),
            month_year: month.to_string(),
            count,
            line: 2,
            ..Default::default()
        }
    }

    fn sample() -> Dataset {
        Dataset::new(vec![
            row("Mortgage", "Web", "Escrow", "Late", "01/03/2023", 4),
            row("Mortgage", "Phone", "Escrow", "Missing", "01/01/2023", 3),
            row("Credit card", "Web", "Billing", "Late", "15/03/2023", 2),
            row("Debt collection", "Referral", "Billing", "", "01/02/2023", 5),
        ])
    }

    #[test]
    fn test_group_by_product() {
        let totals = group_sum(sample().records(), |r| &r.product).unwrap();
        assert_eq!(
            totals,
            vec![
                CategoryTotal { label: "Credit card".to_string(), count: 2 },
                CategoryTotal { label: "Debt collection".to_string(), count: 5 },
                CategoryTotal { label: "Mortgage".to_string(), count: 7 },
            ]
        );
    }

    #[test]
    fn test_group_skips_empty_keys() {
        let data = Dataset::new(vec![row("", "Web", "I", "S", "01/01/2023", 9)]);
        assert!(group_sum(data.records(), |r| &r.product).unwrap().is_empty());
    }

    #[test]
    fn test_by_month_sorted_and_merged() {
        let months = complaints_by_month(sample().records()).unwrap();
        let expected = [
            (NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(), 3),
            (NaiveDate::from_ymd_opt(2023, 2, 1).unwrap(), 5),
            (NaiveDate::from_ymd_opt(2023, 3, 1).unwrap(), 6),
        ];
        let actual: Vec<_> = months.iter().map(|m| (m.month, m.count)).collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_by_month_rejects_garbled_date() {
        let data = Dataset::new(vec![row("P", "Web", "I", "S", "2023-03-01", 1)]);
        match complaints_by_month(data.records()) {
            Err(DashboardError::InvalidDate { line, value }) => {
                assert_eq!(line, 2);
                assert_eq!(value, "2023-03-01");
            }
            other => panic!("expected invalid date, got {other:?}"),
        }
    }

    #[test]
    fn test_by_month_skips_blank_dates() {
        let data = Dataset::new(vec![row("P", "Web", "I", "S", "  ", 1)]);
        assert!(complaints_by_month(data.records()).unwrap().is_empty());
    }

    #[test]
    fn test_issue_tree() {
        let tree = complaints_by_issue(sample().records()).unwrap();
        assert_eq!(tree.len(), 2);

        assert_eq!(tree[0].issue, "Billing");
        assert_eq!(tree[0].total, 2);
        assert_eq!(tree[0].sub_issues.len(), 1);

        assert_eq!(tree[1].issue, "Escrow");
        assert_eq!(tree[1].total, 7);
        assert_eq!(tree[1].sub_issues[0].label, "Late");
        assert_eq!(tree[1].sub_issues[1].label, "Missing");
    }

    #[test]
    fn test_overflowing_group_is_an_error() {
        let data = Dataset::new(vec![
            row("Mortgage", "Web", "Escrow", "Late", "01/03/2023", u64::MAX),
            row("Mortgage", "Web", "Escrow", "Late", "01/03/2023", 1),
        ]);
        assert!(matches!(
            ChartData::from_dataset(&data),
            Err(DashboardError::CountOverflow { line: 2 })
        ));
        assert!(complaints_by_issue(data.records()).is_err());
    }

    #[test]
    fn test_charts_ignore_state_selection() {
        let data = sample();
        let all = DashboardView::compute(&data, &StateFilter::All).unwrap();
        let ca = DashboardView::compute(&data, &StateFilter::State("CA".to_string())).unwrap();
        let ny = DashboardView::compute(&data, &StateFilter::State("NY".to_string())).unwrap();

        assert_eq!(all.charts, ca.charts);
        assert_eq!(all.charts, ny.charts);
        assert_ne!(ca.kpis, compute_kpis(&StateFilter::All.apply(&data)).unwrap());
    }
}
