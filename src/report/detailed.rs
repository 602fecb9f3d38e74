//! The detailed report: the raw transaction list plus totals.

use serde::Serialize;

use crate::transaction::{Transaction, TransactionKind};

use super::window::ReportWindow;

/// Totals over the listed transactions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Default)]
pub struct DetailedTotals {
    /// Total income in the window.
    pub income: f64,
    /// Total expenses in the window.
    pub expense: f64,
    /// Income minus expenses.
    pub balance: f64,
    /// The number of listed transactions.
    pub transaction_count: u32,
}

/// The detailed report shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailedReport {
    /// The window's display label.
    pub period: String,
    /// Every transaction in the window, newest first.
    pub transactions: Vec<Transaction>,
    /// Totals over the listed transactions.
    pub summary: DetailedTotals,
    /// The resolved window the report covers.
    pub date_range: ReportWindow,
}

pub(super) fn build(window: ReportWindow, ledger: &[Transaction]) -> DetailedReport {
    let mut summary = DetailedTotals::default();

    for transaction in ledger {
        match transaction.kind {
            TransactionKind::Income => summary.income += transaction.amount,
            TransactionKind::Expense => summary.expense += transaction.amount,
        }
        summary.transaction_count += 1;
    }

    summary.balance = summary.income - summary.expense;

    let mut transactions = ledger.to_vec();
    transactions.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.id.cmp(&a.id)));

    DetailedReport {
        period: window.label.clone(),
        transactions,
        summary,
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

    fn transaction(id: i64, kind: TransactionKind, amount: f64, date: time::Date) -> Transaction {
        Transaction {
            id,
            user_id: 1,
            kind,
            category: "Misc".to_owned(),
            amount,
            tags: None,
            note: None,
            date,
            created_at: datetime!(2024-03-01 12:00 UTC),
        }
    }

    #[test]
    fn balance_is_income_minus_expenses() {
        let ledger = vec![
            transaction(1, TransactionKind::Income, 2000.0, date!(2024 - 03 - 01)),
            transaction(2, TransactionKind::Expense, 1200.0, date!(2024 - 03 - 02)),
            transaction(3, TransactionKind::Expense, 300.0, date!(2024 - 03 - 03)),
        ];

        let report = build(march_window(), &ledger);

        assert_eq!(report.summary.income, 2000.0);
        assert_eq!(report.summary.expense, 1500.0);
        assert_eq!(report.summary.balance, 500.0);
        assert_eq!(report.summary.transaction_count, 3);
    }

    #[test]
    fn transactions_are_listed_newest_first() {
        let ledger = vec![
            transaction(1, TransactionKind::Expense, 10.0, date!(2024 - 03 - 02)),
            transaction(2, TransactionKind::Expense, 20.0, date!(2024 - 03 - 10)),
            transaction(3, TransactionKind::Expense, 30.0, date!(2024 - 03 - 02)),
        ];

        let report = build(march_window(), &ledger);

        let ids: Vec<i64> = report.transactions.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn empty_ledger_builds_an_empty_report() {
        let report = build(march_window(), &[]);

        assert!(report.transactions.is_empty());
        assert_eq!(report.summary.balance, 0.0);
        assert_eq!(report.summary.transaction_count, 0);
    }
}
