//! Pure computation of budget consumption status.
//!
//! These functions never touch the database: the caller fetches the ledger
//! slice once and the same rows feed every derived view, so all numbers in a
//! response come from one consistent snapshot.

use serde::Serialize;
use time::Date;

use crate::transaction::{Transaction, TransactionKind};

use super::core::Budget;

/// How far through its limit a budget is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetHealth {
    /// Less than 80% of the limit spent.
    Good,
    /// At least 80% but less than 100% of the limit spent.
    Warning,
    /// The limit has been reached or exceeded.
    Exceeded,
}

/// The derived consumption state of one budget. Recomputed on every request,
/// never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BudgetStatus {
    /// Total expense amount in the budget's category and window.
    pub spent: f64,
    /// Spend as a percentage of the limit. Unclamped; overspent budgets
    /// exceed 100.
    pub percentage: f64,
    /// The limit minus the spend. Negative once the budget is exceeded.
    pub remaining: f64,
    /// The health bucket derived from the percentage.
    pub status: BudgetHealth,
    /// Whether today falls within the budget's window (inclusive).
    pub is_active: bool,
}

/// A budget together with its derived status, as served to clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetOverview {
    /// The stored budget record.
    #[serde(flatten)]
    pub budget: Budget,
    /// The derived consumption state.
    #[serde(flatten)]
    pub status: BudgetStatus,
}

/// Aggregate totals across all of a user's budgets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BudgetSummary {
    /// The number of budgets.
    pub count: u32,
    /// The sum of all budget limits.
    pub total_limit: f64,
    /// The sum of all spend.
    pub total_spent: f64,
    /// `total_limit - total_spent`.
    pub total_remaining: f64,
}

/// Compute the consumption status for one budget from a ledger slice.
///
/// `spent` sums the expense rows that match the budget's user and category
/// and fall within its inclusive window, so the caller may pass a wider
/// slice (e.g. all of the user's rows) without skewing the result. The
/// percentage guards against a zero limit by resolving to 0 rather than
/// dividing; limits are validated positive at creation so that path is a
/// defensive fallback only.
pub fn compute_budget_status(
    budget: &Budget,
    ledger: &[Transaction],
    today: Date,
) -> BudgetStatus {
    let spent: f64 = ledger
        .iter()
        .filter(|transaction| {
            transaction.user_id == budget.user_id
                && transaction.kind == TransactionKind::Expense
                && transaction.category == budget.category
                && transaction.date >= budget.start_date
                && transaction.date <= budget.end_date
        })
        .map(|transaction| transaction.amount)
        .sum();

    let percentage = if budget.budget_limit > 0.0 {
        spent / budget.budget_limit * 100.0
    } else {
        0.0
    };

    let status = if percentage >= 100.0 {
        BudgetHealth::Exceeded
    } else if percentage >= 80.0 {
        BudgetHealth::Warning
    } else {
        BudgetHealth::Good
    };

    BudgetStatus {
        spent,
        percentage,
        remaining: budget.budget_limit - spent,
        status,
        is_active: today >= budget.start_date && today <= budget.end_date,
    }
}

/// Compute the status of each budget against one shared ledger slice.
pub fn compute_budget_overviews(
    budgets: Vec<Budget>,
    ledger: &[Transaction],
    today: Date,
) -> Vec<BudgetOverview> {
    budgets
        .into_iter()
        .map(|budget| {
            let status = compute_budget_status(&budget, ledger, today);
            BudgetOverview { budget, status }
        })
        .collect()
}

/// Aggregate count, total limit, total spend, and total remaining across a
/// user's budgets.
pub fn summarize_budgets(overviews: &[BudgetOverview]) -> BudgetSummary {
    let total_limit: f64 = overviews
        .iter()
        .map(|overview| overview.budget.budget_limit)
        .sum();
    let total_spent: f64 = overviews.iter().map(|overview| overview.status.spent).sum();

    BudgetSummary {
        count: overviews.len() as u32,
        total_limit,
        total_spent,
        total_remaining: total_limit - total_spent,
    }
}
