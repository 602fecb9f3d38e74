//! Category budgets.
//!
//! This module contains:
//! - The [Budget] model, creation-time validation (including the
//!   non-overlapping window invariant), and database queries
//! - Pure computation of per-budget consumption status and the batch summary

mod core;
mod status;

pub use core::{
    Budget, BudgetForm, create_budget, create_budget_table, get_budget, get_budgets,
    map_budget_row,
};
pub use status::{
    BudgetHealth, BudgetOverview, BudgetStatus, BudgetSummary, compute_budget_overviews,
    compute_budget_status, summarize_budgets,
};
