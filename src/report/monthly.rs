//! The monthly report: per-month totals with savings rates.

use std::collections::BTreeMap;

use serde::Serialize;
use time::Date;

use crate::{
    dates::{month_label, month_start},
    transaction::{Transaction, TransactionKind},
};

use super::window::ReportWindow;

/// The savings rate bands used for display colouring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SavingsBucket {
    /// Saving at least 20% of income.
    Good,
    /// Saving at least 10% of income.
    Warning,
    /// Saving less than 10% of income.
    Danger,
}

/// The percentage of income kept rather than spent.
///
/// Months without income have a rate of zero, even when they had expenses.
pub fn savings_rate(net: f64, income: f64) -> f64 {
    if income > 0.0 {
        net / income * 100.0
    } else {
        0.0
    }
}

/// Classify a savings rate into its display band.
pub fn savings_bucket(rate: f64) -> SavingsBucket {
    if rate >= 20.0 {
        SavingsBucket::Good
    } else if rate >= 10.0 {
        SavingsBucket::Warning
    } else {
        SavingsBucket::Danger
    }
}

/// Totals for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyTotal {
    /// The first day of the month.
    pub month: Date,
    /// A display label such as "Mar 2024".
    pub label: String,
    /// Total income in the month.
    pub income: f64,
    /// The number of income transactions.
    pub income_count: u32,
    /// Total expenses in the month.
    pub expense: f64,
    /// The number of expense transactions.
    pub expense_count: u32,
    /// Income minus expenses.
    pub net: f64,
    /// The percentage of income kept rather than spent.
    pub savings_rate: f64,
    /// The display band for the savings rate.
    pub savings_bucket: SavingsBucket,
}

/// The monthly report shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyReport {
    /// The window's display label.
    pub period: String,
    /// Per-month totals in chronological order. Months without transactions
    /// are omitted.
    pub months: Vec<MonthlyTotal>,
    /// The resolved window the report covers.
    pub date_range: ReportWindow,
}

pub(super) fn build(window: ReportWindow, ledger: &[Transaction]) -> MonthlyReport {
    #[derive(Default)]
    struct Accumulator {
        income: f64,
        income_count: u32,
        expense: f64,
        expense_count: u32,
    }

    // BTreeMap keyed by the first of the month keeps months chronological.
    let mut groups: BTreeMap<Date, Accumulator> = BTreeMap::new();

    for transaction in ledger {
        let entry = groups.entry(month_start(transaction.date)).or_default();

        match transaction.kind {
            TransactionKind::Income => {
                entry.income += transaction.amount;
                entry.income_count += 1;
            }
            TransactionKind::Expense => {
                entry.expense += transaction.amount;
                entry.expense_count += 1;
            }
        }
    }

    let months = groups
        .into_iter()
        .map(|(month, acc)| {
            let net = acc.income - acc.expense;
            let rate = savings_rate(net, acc.income);

            MonthlyTotal {
                month,
                label: month_label(month),
                income: acc.income,
                income_count: acc.income_count,
                expense: acc.expense,
                expense_count: acc.expense_count,
                net,
                savings_rate: rate,
                savings_bucket: savings_bucket(rate),
            }
        })
        .collect();

    MonthlyReport {
        period: window.label.clone(),
        months,
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

    use super::{SavingsBucket, build, savings_bucket, savings_rate};

    fn year_window() -> crate::report::ReportWindow {
        resolve_window(RangePreset::ThisYear, None, None, date!(2024 - 03 - 15)).unwrap()
    }

    fn transaction(kind: TransactionKind, amount: f64, date: time::Date) -> Transaction {
        Transaction {
            id: 0,
            user_id: 1,
            kind,
            category: "Misc".to_owned(),
            amount,
            tags: None,
            note: None,
            date,
            created_at: datetime!(2024-01-01 12:00 UTC),
        }
    }

    #[test]
    fn month_rows_carry_net_and_savings_rate() {
        let ledger = vec![
            transaction(TransactionKind::Income, 2000.0, date!(2024 - 03 - 01)),
            transaction(TransactionKind::Expense, 1400.0, date!(2024 - 03 - 20)),
        ];

        let report = build(year_window(), &ledger);

        assert_eq!(report.months.len(), 1);
        let month = &report.months[0];
        assert_eq!(month.month, date!(2024 - 03 - 01));
        assert_eq!(month.label, "Mar 2024");
        assert_eq!(month.income, 2000.0);
        assert_eq!(month.expense, 1400.0);
        assert_eq!(month.net, 600.0);
        assert_eq!(month.savings_rate, 30.0);
        assert_eq!(month.savings_bucket, SavingsBucket::Good);
    }

    #[test]
    fn months_are_chronological_regardless_of_input_order() {
        let ledger = vec![
            transaction(TransactionKind::Expense, 10.0, date!(2024 - 05 - 01)),
            transaction(TransactionKind::Expense, 10.0, date!(2024 - 02 - 10)),
            transaction(TransactionKind::Expense, 10.0, date!(2024 - 03 - 31)),
        ];

        let report = build(year_window(), &ledger);

        let months: Vec<time::Date> = report.months.iter().map(|row| row.month).collect();
        assert_eq!(
            months,
            vec![
                date!(2024 - 02 - 01),
                date!(2024 - 03 - 01),
                date!(2024 - 05 - 01),
            ]
        );
    }

    #[test]
    fn a_month_without_income_has_a_zero_savings_rate() {
        let ledger = vec![transaction(
            TransactionKind::Expense,
            500.0,
            date!(2024 - 04 - 10),
        )];

        let report = build(year_window(), &ledger);

        let month = &report.months[0];
        assert_eq!(month.net, -500.0);
        assert_eq!(month.savings_rate, 0.0);
        assert_eq!(month.savings_bucket, SavingsBucket::Danger);
    }

    #[test]
    fn savings_rate_ignores_negative_income_sums() {
        assert_eq!(savings_rate(-500.0, 0.0), 0.0);
        assert_eq!(savings_rate(250.0, 1000.0), 25.0);
    }

    #[test]
    fn savings_buckets_have_closed_lower_boundaries() {
        assert_eq!(savings_bucket(20.0), SavingsBucket::Good);
        assert_eq!(savings_bucket(19.9), SavingsBucket::Warning);
        assert_eq!(savings_bucket(10.0), SavingsBucket::Warning);
        assert_eq!(savings_bucket(9.9), SavingsBucket::Danger);
        assert_eq!(savings_bucket(-40.0), SavingsBucket::Danger);
    }

    #[test]
    fn serialized_buckets_are_snake_case() {
        let value = serde_json::to_value(SavingsBucket::Good).unwrap();
        assert_eq!(value, "good");
    }
}
