//! Savings goals.
//!
//! This module contains:
//! - The [Goal] model, creation-time validation, and database queries
//! - Pure computation of goal progress and the batch summary
//! - The "add money" flow, which produces a deposit instruction the caller
//!   applies to storage (updating the goal and appending one synthetic
//!   `Savings` expense to the ledger)

mod core;
mod deposit;
mod progress;

pub use core::{Goal, GoalForm, create_goal, create_goal_table, get_goal, get_goals, map_goal_row};
pub use deposit::{GoalDeposit, SAVINGS_CATEGORY, add_money, record_deposit};
pub use progress::{
    GoalOverview, GoalProgress, GoalStanding, GoalSummary, compute_goal_overviews,
    compute_goal_progress, summarize_goals,
};
