//! The summary report: totals per kind, a category breakdown, and daily
//! trends for a time-series chart.

use std::collections::HashMap;

use serde::Serialize;
use time::Date;

use crate::transaction::{Transaction, TransactionKind};

use super::window::ReportWindow;

/// Income and expense totals with their transaction counts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Default)]
pub struct KindTotals {
    /// Total income in the window.
    pub income: f64,
    /// Total expenses in the window.
    pub expense: f64,
    /// The number of income transactions.
    pub income_count: u32,
    /// The number of expense transactions.
    pub expense_count: u32,
}

/// The count and total for one `(category, kind)` group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    /// The transaction category.
    pub category: String,
    /// Whether the group covers income or expenses.
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// The number of transactions in the group.
    pub count: u32,
    /// The summed amount of the group.
    pub total: f64,
}

/// The summed amount for one `(date, kind)` group, one point of the daily
/// trend chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyTotal {
    /// The calendar day.
    pub date: Date,
    /// Whether the point covers income or expenses.
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// The summed amount for the day.
    pub total: f64,
}

/// The summary report shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryReport {
    /// The window's display label.
    pub period: String,
    /// Totals per transaction kind.
    pub summary: KindTotals,
    /// Per-category totals, sorted descending by total.
    pub categories: Vec<CategoryTotal>,
    /// Per-day totals in date order.
    pub daily_trends: Vec<DailyTotal>,
    /// The resolved window the report covers.
    pub date_range: ReportWindow,
}

pub(super) fn build(window: ReportWindow, ledger: &[Transaction]) -> SummaryReport {
    let mut summary = KindTotals::default();

    for transaction in ledger {
        match transaction.kind {
            TransactionKind::Income => {
                summary.income += transaction.amount;
                summary.income_count += 1;
            }
            TransactionKind::Expense => {
                summary.expense += transaction.amount;
                summary.expense_count += 1;
            }
        }
    }

    SummaryReport {
        period: window.label.clone(),
        summary,
        categories: category_totals(ledger),
        daily_trends: daily_totals(ledger),
        date_range: window,
    }
}

/// Group transactions by `(category, kind)` and sort descending by total,
/// ties broken by category name then kind for a deterministic order.
fn category_totals(ledger: &[Transaction]) -> Vec<CategoryTotal> {
    let mut groups: HashMap<(&str, TransactionKind), (u32, f64)> = HashMap::new();

    for transaction in ledger {
        let entry = groups
            .entry((transaction.category.as_str(), transaction.kind))
            .or_insert((0, 0.0));
        entry.0 += 1;
        entry.1 += transaction.amount;
    }

    let mut totals: Vec<CategoryTotal> = groups
        .into_iter()
        .map(|((category, kind), (count, total))| CategoryTotal {
            category: category.to_owned(),
            kind,
            count,
            total,
        })
        .collect();

    totals.sort_by(|a, b| {
        b.total
            .total_cmp(&a.total)
            .then_with(|| a.category.cmp(&b.category))
            .then_with(|| a.kind.cmp(&b.kind))
    });

    totals
}

/// Group transactions by `(date, kind)` in chronological order.
fn daily_totals(ledger: &[Transaction]) -> Vec<DailyTotal> {
    let mut groups: HashMap<(Date, TransactionKind), f64> = HashMap::new();

    for transaction in ledger {
        *groups
            .entry((transaction.date, transaction.kind))
            .or_insert(0.0) += transaction.amount;
    }

    let mut totals: Vec<DailyTotal> = groups
        .into_iter()
        .map(|((date, kind), total)| DailyTotal { date, kind, total })
        .collect();

    totals.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.kind.cmp(&b.kind)));

    totals
}
