//! Defines the savings goal data model, creation-time validation, and
//! database queries.

use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::{
    Error,
    amount::{parse_non_negative, parse_positive},
    database_id::{GoalId, UserId},
    dates::{parse_date, shift_months},
};

/// Goal target dates more than this many months out are rejected at the form
/// boundary. A policy constraint carried over from the UI layer, not a core
/// invariant.
const MAX_TARGET_MONTHS: i32 = 120;

/// A savings goal: an amount to put aside by a target date.
///
/// `current_amount` may exceed `target_amount` after repeated deposits; the
/// creation-time check is deliberately not re-enforced on update. Only the
/// display percentage clamps, everything else uses the raw values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    /// The ID of the goal.
    pub id: GoalId,
    /// The ID of the user that owns the goal.
    pub user_id: UserId,
    /// A short human-readable title, e.g. "Emergency fund".
    pub title: String,
    /// The amount to save.
    pub target_amount: f64,
    /// The amount saved so far.
    pub current_amount: f64,
    /// The day the goal should be reached by.
    pub target_date: Date,
    /// When the goal was created.
    pub created_at: OffsetDateTime,
}

/// The loose string form a goal arrives in from the outside world.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GoalForm {
    /// The goal title.
    pub title: String,
    /// The target amount as decimal text.
    pub target_amount: String,
    /// The starting balance as decimal text. May be empty, defaulting to 0.
    #[serde(default)]
    pub current_amount: String,
    /// The target date as `YYYY-MM-DD`.
    pub target_date: String,
}

/// Validate a goal form and create the goal in the database.
///
/// # Errors
/// This function will return a:
/// - [Error::MissingField] if the title, target amount, or target date is
///   empty,
/// - or [Error::TitleTooShort] if the title has fewer than 3 characters,
/// - or [Error::NonPositiveAmount] if the target is not a positive number,
/// - or [Error::NegativeAmount] if the starting balance is negative,
/// - or [Error::CurrentExceedsTarget] if the starting balance is larger than
///   the target,
/// - or [Error::InvalidDate] if the target date cannot be parsed,
/// - or [Error::TargetDateNotFuture] if the target date is today or earlier,
/// - or [Error::TargetDateTooFar] if the target date is more than 10 years
///   away,
/// - or [Error::SqlError] if there is an SQL error.
pub fn create_goal(
    user_id: UserId,
    form: &GoalForm,
    today: Date,
    connection: &Connection,
) -> Result<Goal, Error> {
    let title = form.title.trim();

    if title.is_empty() {
        return Err(Error::MissingField("title"));
    }
    if form.target_amount.trim().is_empty() {
        return Err(Error::MissingField("target amount"));
    }
    if form.target_date.trim().is_empty() {
        return Err(Error::MissingField("target date"));
    }
    if title.chars().count() < 3 {
        return Err(Error::TitleTooShort);
    }

    let target_amount = parse_positive(&form.target_amount, "target amount")?;
    let current_amount = if form.current_amount.trim().is_empty() {
        0.0
    } else {
        parse_non_negative(&form.current_amount, "current amount")?
    };

    if current_amount > target_amount {
        return Err(Error::CurrentExceedsTarget);
    }

    let target_date = parse_date(&form.target_date)?;

    if target_date <= today {
        return Err(Error::TargetDateNotFuture(target_date));
    }
    if target_date > shift_months(today, MAX_TARGET_MONTHS) {
        return Err(Error::TargetDateTooFar(target_date));
    }

    let goal = connection
        .prepare(
            "INSERT INTO goal (user_id, title, target_amount, current_amount, target_date, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             RETURNING id, user_id, title, target_amount, current_amount, target_date, created_at",
        )?
        .query_row(
            (
                user_id,
                title,
                target_amount,
                current_amount,
                target_date,
                OffsetDateTime::now_utc(),
            ),
            map_goal_row,
        )?;

    Ok(goal)
}

/// Retrieve one of a user's goals by its ID.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a goal owned by `user_id`,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn get_goal(id: GoalId, user_id: UserId, connection: &Connection) -> Result<Goal, Error> {
    let goal = connection
        .prepare(
            "SELECT id, user_id, title, target_amount, current_amount, target_date, created_at
             FROM goal WHERE id = ?1 AND user_id = ?2",
        )?
        .query_row((id, user_id), map_goal_row)?;

    Ok(goal)
}

/// Get all of a user's goals, newest first.
///
/// # Errors
/// Returns [Error::SqlError] if the query fails.
pub fn get_goals(user_id: UserId, connection: &Connection) -> Result<Vec<Goal>, Error> {
    connection
        .prepare(
            "SELECT id, user_id, title, target_amount, current_amount, target_date, created_at
             FROM goal WHERE user_id = ?1 ORDER BY created_at DESC, id DESC",
        )?
        .query_map([user_id], map_goal_row)?
        .map(|row_result| row_result.map_err(Error::from))
        .collect()
}

/// Create the goal table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL
/// error.
pub fn create_goal_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS goal (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL,
                title TEXT NOT NULL,
                target_amount REAL NOT NULL,
                current_amount REAL NOT NULL,
                target_date TEXT NOT NULL,
                created_at TEXT NOT NULL
                )",
        (),
    )?;

    Ok(())
}

/// Map a database row to a [Goal].
pub fn map_goal_row(row: &rusqlite::Row) -> Result<Goal, rusqlite::Error> {
    Ok(Goal {
        id: row.get(0)?,
        user_id: row.get(1)?,
        title: row.get(2)?,
        target_amount: row.get(3)?,
        current_amount: row.get(4)?,
        target_date: row.get(5)?,
        created_at: row.get(6)?,
    })
}
