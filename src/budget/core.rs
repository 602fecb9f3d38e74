//! Defines the budget data model, creation-time validation, and database
//! queries.

use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::{
    Error,
    amount::parse_positive,
    database_id::{BudgetId, UserId},
    dates::parse_date,
};

/// A spending limit for one category over an inclusive date window.
///
/// For a given user and category, no two budgets may have overlapping
/// windows. This is enforced when the budget is created, not re-checked
/// afterward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    /// The ID of the budget.
    pub id: BudgetId,
    /// The ID of the user that owns the budget.
    pub user_id: UserId,
    /// The category the budget limits, e.g. "Groceries".
    pub category: String,
    /// The maximum amount to spend within the window.
    pub budget_limit: f64,
    /// The first day of the budget window.
    pub start_date: Date,
    /// The last day of the budget window (inclusive).
    pub end_date: Date,
    /// When the budget was created.
    pub created_at: OffsetDateTime,
}

/// The loose string form a budget arrives in from the outside world.
///
/// All parsing and validation of the "string or number" input happens here,
/// before anything reaches the aggregators.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BudgetForm {
    /// The category to limit.
    pub category: String,
    /// The spending limit as decimal text.
    pub budget_limit: String,
    /// The first day of the window as `YYYY-MM-DD`.
    pub start_date: String,
    /// The last day of the window as `YYYY-MM-DD`.
    pub end_date: String,
}

/// Validate a budget form and create the budget in the database.
///
/// # Errors
/// This function will return a:
/// - [Error::MissingField] if any field is empty,
/// - or [Error::NonPositiveAmount] if the limit is not a positive number,
/// - or [Error::InvalidDate] if either date cannot be parsed,
/// - or [Error::EmptyDateRange] if the window does not end after it starts,
/// - or [Error::BudgetOverlap] if a budget for the same user and category
///   already covers part of the window (inclusive-boundary test),
/// - or [Error::SqlError] if there is an SQL error.
pub fn create_budget(
    user_id: UserId,
    form: &BudgetForm,
    connection: &Connection,
) -> Result<Budget, Error> {
    let category = form.category.trim();

    if category.is_empty() {
        return Err(Error::MissingField("category"));
    }
    if form.budget_limit.trim().is_empty() {
        return Err(Error::MissingField("budget limit"));
    }
    if form.start_date.trim().is_empty() {
        return Err(Error::MissingField("start date"));
    }
    if form.end_date.trim().is_empty() {
        return Err(Error::MissingField("end date"));
    }

    let budget_limit = parse_positive(&form.budget_limit, "budget limit")?;
    let start_date = parse_date(&form.start_date)?;
    let end_date = parse_date(&form.end_date)?;

    if start_date >= end_date {
        return Err(Error::EmptyDateRange {
            start: start_date,
            end: end_date,
        });
    }

    let overlapping: i64 = connection
        .prepare(
            "SELECT COUNT(*) FROM budget
             WHERE user_id = ?1 AND category = ?2 AND start_date <= ?3 AND end_date >= ?4",
        )?
        .query_row(
            (user_id, category, end_date, start_date),
            |row| row.get(0),
        )?;

    if overlapping > 0 {
        return Err(Error::BudgetOverlap(category.to_owned()));
    }

    let budget = connection
        .prepare(
            "INSERT INTO budget (user_id, category, budget_limit, start_date, end_date, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             RETURNING id, user_id, category, budget_limit, start_date, end_date, created_at",
        )?
        .query_row(
            (
                user_id,
                category,
                budget_limit,
                start_date,
                end_date,
                OffsetDateTime::now_utc(),
            ),
            map_budget_row,
        )?;

    Ok(budget)
}

/// Retrieve one of a user's budgets by its ID.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a budget owned by `user_id`,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn get_budget(id: BudgetId, user_id: UserId, connection: &Connection) -> Result<Budget, Error> {
    let budget = connection
        .prepare(
            "SELECT id, user_id, category, budget_limit, start_date, end_date, created_at
             FROM budget WHERE id = ?1 AND user_id = ?2",
        )?
        .query_row((id, user_id), map_budget_row)?;

    Ok(budget)
}

/// Get all of a user's budgets, newest first.
///
/// # Errors
/// Returns [Error::SqlError] if the query fails.
pub fn get_budgets(user_id: UserId, connection: &Connection) -> Result<Vec<Budget>, Error> {
    connection
        .prepare(
            "SELECT id, user_id, category, budget_limit, start_date, end_date, created_at
             FROM budget WHERE user_id = ?1 ORDER BY created_at DESC, id DESC",
        )?
        .query_map([user_id], map_budget_row)?
        .map(|row_result| row_result.map_err(Error::from))
        .collect()
}

/// Create the budget table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL
/// error.
pub fn create_budget_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS budget (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL,
                category TEXT NOT NULL,
                budget_limit REAL NOT NULL,
                start_date TEXT NOT NULL,
                end_date TEXT NOT NULL,
                created_at TEXT NOT NULL
                )",
        (),
    )?;

    Ok(())
}

/// Map a database row to a [Budget].
pub fn map_budget_row(row: &rusqlite::Row) -> Result<Budget, rusqlite::Error> {
    Ok(Budget {
        id: row.get(0)?,
        user_id: row.get(1)?,
        category: row.get(2)?,
        budget_limit: row.get(3)?,
        start_date: row.get(4)?,
        end_date: row.get(5)?,
        created_at: row.get(6)?,
    })
}
