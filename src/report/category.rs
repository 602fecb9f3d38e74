//! The category report: per-category statistics.

use std::collections::HashMap;

use serde::Serialize;

use crate::transaction::{Transaction, TransactionKind};

use super::window::ReportWindow;

/// Statistics for one `(category, kind)` group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryStats {
    /// The transaction category.
    pub category: String,
    /// Whether the group covers income or expenses.
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// The number of transactions in the group.
    pub count: u32,
    /// The summed amount of the group.
    pub total: f64,
    /// The mean transaction amount.
    pub average: f64,
    /// The smallest transaction amount.
    pub min: f64,
    /// The largest transaction amount.
    pub max: f64,
}

/// The category report shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryReport {
    /// The window's display label.
    pub period: String,
    /// Per-category statistics, sorted descending by total.
    pub categories: Vec<CategoryStats>,
    /// The resolved window the report covers.
    pub date_range: ReportWindow,
}

pub(super) fn build(window: ReportWindow, ledger: &[Transaction]) -> CategoryReport {
    struct Accumulator {
        count: u32,
        total: f64,
        min: f64,
        max: f64,
    }

    let mut groups: HashMap<(&str, TransactionKind), Accumulator> = HashMap::new();

    for transaction in ledger {
        let entry = groups
            .entry((transaction.category.as_str(), transaction.kind))
            .or_insert(Accumulator {
                count: 0,
                total: 0.0,
                min: f64::INFINITY,
                max: f64::NEG_INFINITY,
            });

        entry.count += 1;
        entry.total += transaction.amount;
        entry.min = entry.min.min(transaction.amount);
        entry.max = entry.max.max(transaction.amount);
    }

    let mut categories: Vec<CategoryStats> = groups
        .into_iter()
        .map(|((category, kind), acc)| CategoryStats {
            category: category.to_owned(),
            kind,
            count: acc.count,
            total: acc.total,
            average: acc.total / f64::from(acc.count),
            min: acc.min,
            max: acc.max,
        })
        .collect();

    categories.sort_by(|a, b| {
        b.total
            .total_cmp(&a.total)
            .then_with(|| a.category.cmp(&b.category))
            .then_with(|| a.kind.cmp(&b.kind))
    });

    CategoryReport {
        period: window.label.clone(),
        categories,
        date_range: window,
    }
}

#[cfg(test)]
mod tests {
    use time::macros::{date, datetime};

    use crate::{
        report::{RangePreset, resolve_window},
        transaction::{Transaction, TransactionKind},
    };

    use super::build;

    fn march_window() -> crate::report::ReportWindow {
        resolve_window(RangePreset::ThisMonth, None, None, date!(2024 - 03 - 15)).unwrap()
    }

    fn transaction(kind: TransactionKind, category: &str, amount: f64) -> Transaction {
        Transaction {
            id: 0,
            user_id: 1,
            kind,
            category: category.to_owned(),
            amount,
            tags: None,
            note: None,
            date: date!(2024 - 03 - 10),
            created_at: datetime!(2024-03-10 12:00 UTC),
        }
    }

    #[test]
    fn stats_cover_count_total_average_min_and_max() {
        let ledger = vec![
            transaction(TransactionKind::Expense, "Food", 30.0),
            transaction(TransactionKind::Expense, "Food", 10.0),
            transaction(TransactionKind::Expense, "Food", 20.0),
        ];

        let report = build(march_window(), &ledger);

        assert_eq!(report.categories.len(), 1);
        let stats = &report.categories[0];
        assert_eq!(stats.count, 3);
        assert_eq!(stats.total, 60.0);
        assert_eq!(stats.average, 20.0);
        assert_eq!(stats.min, 10.0);
        assert_eq!(stats.max, 30.0);
    }

    #[test]
    fn single_transaction_has_equal_min_max_and_average() {
        let ledger = vec![transaction(TransactionKind::Income, "Salary", 2500.0)];

        let report = build(march_window(), &ledger);

        let stats = &report.categories[0];
        assert_eq!(stats.min, 2500.0);
        assert_eq!(stats.max, 2500.0);
        assert_eq!(stats.average, 2500.0);
    }

    #[test]
    fn categories_are_sorted_descending_by_total() {
        let ledger = vec![
            transaction(TransactionKind::Expense, "Food", 150.0),
            transaction(TransactionKind::Expense, "Rent", 1200.0),
            transaction(TransactionKind::Income, "Salary", 2500.0),
        ];

        let report = build(march_window(), &ledger);

        let names: Vec<&str> = report
            .categories
            .iter()
            .map(|stats| stats.category.as_str())
            .collect();
        assert_eq!(names, vec!["Salary", "Rent", "Food"]);
    }

    #[test]
    fn empty_ledger_builds_an_empty_report() {
        let report = build(march_window(), &[]);

        assert!(report.categories.is_empty());
        assert_eq!(report.period, "March 2024");
    }
}
