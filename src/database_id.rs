//! Database ID type definitions.

/// Alias for the integer type used for mapping to database IDs.
pub type DatabaseId = i64;

/// The ID of the user that owns ledger rows, budgets, and goals.
pub type UserId = i64;

/// The ID of a ledger transaction.
pub type TransactionId = i64;

/// The ID of a budget.
pub type BudgetId = i64;

/// The ID of a savings goal.
pub type GoalId = i64;
