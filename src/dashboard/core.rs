//! Builds the dashboard overview from a ledger slice.

use serde::Serialize;
use time::Date;

use crate::{
    dates::{month_end, month_label, month_start, shift_months},
    transaction::{Transaction, TransactionKind},
};

use std::collections::HashMap;

/// How many transactions the recent activity list shows.
pub const RECENT_TRANSACTION_COUNT: usize = 10;

/// How many calendar months the cash-flow trend covers.
pub const TREND_MONTH_COUNT: usize = 6;

/// The headline numbers at the top of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Default)]
pub struct DashboardTotals {
    /// All-time income minus all-time expenses.
    pub balance: f64,
    /// Income in the current calendar month.
    pub income: f64,
    /// Expenses in the current calendar month.
    pub expense: f64,
}

/// Income and expense totals for one month of the trend chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyCashFlow {
    /// The first day of the month.
    pub month: Date,
    /// A display label such as "Mar 2024".
    pub label: String,
    /// Total income in the month.
    pub income: f64,
    /// Total expenses in the month.
    pub expense: f64,
}

/// One slice of the current month's expense breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    /// The expense category.
    pub category: String,
    /// The summed expenses for the category this month.
    pub total: f64,
}

/// The dashboard shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    /// The headline balance and current-month totals.
    pub summary: DashboardTotals,
    /// Cash flow for the six months ending with the current month, oldest
    /// first. Always six entries, zero-filled for empty months.
    pub monthly_trend: Vec<MonthlyCashFlow>,
    /// This month's expenses by category, sorted descending by total.
    pub category_breakdown: Vec<CategoryShare>,
    /// The most recent transactions across all time, newest first.
    pub recent_transactions: Vec<Transaction>,
}

/// Build the dashboard from the user's full ledger as of `today`.
///
/// The whole dashboard is derived from one ledger slice so the balance, the
/// trend, and the breakdown always agree with each other.
pub fn build_dashboard(ledger: &[Transaction], today: Date) -> Dashboard {
    Dashboard {
        summary: totals(ledger, today),
        monthly_trend: monthly_trend(ledger, today),
        category_breakdown: category_breakdown(ledger, today),
        recent_transactions: recent_transactions(ledger),
    }
}

fn totals(ledger: &[Transaction], today: Date) -> DashboardTotals {
    let this_month = month_start(today)..=month_end(today);
    let mut summary = DashboardTotals::default();

    for transaction in ledger {
        match transaction.kind {
            TransactionKind::Income => {
                summary.balance += transaction.amount;
                if this_month.contains(&transaction.date) {
                    summary.income += transaction.amount;
                }
            }
            TransactionKind::Expense => {
                summary.balance -= transaction.amount;
                if this_month.contains(&transaction.date) {
                    summary.expense += transaction.amount;
                }
            }
        }
    }

    summary
}

/// The six months ending with the current month, oldest first. Every month
/// appears even when it had no transactions.
fn monthly_trend(ledger: &[Transaction], today: Date) -> Vec<MonthlyCashFlow> {
    let current_month = month_start(today);

    let mut trend: Vec<MonthlyCashFlow> = (0..TREND_MONTH_COUNT)
        .rev()
        .map(|months_ago| {
            let month = shift_months(current_month, -(months_ago as i32));

            MonthlyCashFlow {
                month,
                label: month_label(month),
                income: 0.0,
                expense: 0.0,
            }
        })
        .collect();

    for transaction in ledger {
        let month = month_start(transaction.date);
        let Some(row) = trend.iter_mut().find(|row| row.month == month) else {
            continue;
        };

        match transaction.kind {
            TransactionKind::Income => row.income += transaction.amount,
            TransactionKind::Expense => row.expense += transaction.amount,
        }
    }

    trend
}

fn category_breakdown(ledger: &[Transaction], today: Date) -> Vec<CategoryShare> {
    let this_month = month_start(today)..=month_end(today);
    let mut groups: HashMap<&str, f64> = HashMap::new();

    for transaction in ledger {
        if transaction.kind == TransactionKind::Expense && this_month.contains(&transaction.date) {
            *groups.entry(transaction.category.as_str()).or_insert(0.0) += transaction.amount;
        }
    }

    let mut breakdown: Vec<CategoryShare> = groups
        .into_iter()
        .map(|(category, total)| CategoryShare {
            category: category.to_owned(),
            total,
        })
        .collect();

    breakdown.sort_by(|a, b| {
        b.total
            .total_cmp(&a.total)
            .then_with(|| a.category.cmp(&b.category))
    });

    breakdown
}

fn recent_transactions(ledger: &[Transaction]) -> Vec<Transaction> {
    let mut recent = ledger.to_vec();
    recent.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.id.cmp(&a.id)));
    recent.truncate(RECENT_TRANSACTION_COUNT);

    recent
}
