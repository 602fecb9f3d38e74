//! FinTrack is the aggregation and reporting core of a personal-finance
//! tracker: it turns a flat, append-mostly transaction ledger into derived
//! state such as budget consumption, savings goal progress, time-windowed
//! reports and a dashboard overview.
//!
//! The aggregators are pure functions over row sets fetched once per call.
//! Authentication, HTTP routing, and UI rendering are left to the caller;
//! this crate only provides the typed models, the SQLite-backed ledger
//! queries, and the derived, display-ready aggregate structures.

#![warn(missing_docs)]

use time::Date;

mod amount;
pub mod budget;
pub mod dashboard;
pub mod database_id;
pub mod dates;
pub mod db;
pub mod goal;
pub mod report;
pub mod transaction;

pub use database_id::{BudgetId, DatabaseId, GoalId, TransactionId, UserId};
pub use db::initialize as initialize_db;

/// The errors that may occur in the library.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A required form field was empty or absent.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// An amount that must be strictly positive was zero, negative, or not a
    /// number.
    #[error("{0} must be a positive number")]
    NonPositiveAmount(&'static str),

    /// An amount that must be non-negative was negative or not a number.
    #[error("{0} must be a non-negative number")]
    NegativeAmount(&'static str),

    /// A date string could not be parsed.
    ///
    /// Callers should pass in the original text that caused the error.
    #[error("could not parse {0:?} as a date, expected the format YYYY-MM-DD")]
    InvalidDate(String),

    /// A date range ended on or before the day it started.
    #[error("end date {end} must be after start date {start}")]
    EmptyDateRange {
        /// The first day of the rejected range.
        start: Date,
        /// The last day of the rejected range.
        end: Date,
    },

    /// A goal title was shorter than the minimum length.
    #[error("title must be at least 3 characters")]
    TitleTooShort,

    /// A goal was created with more money saved than its target.
    #[error("current amount cannot exceed target amount")]
    CurrentExceedsTarget,

    /// A goal target date was today or in the past.
    #[error("target date {0} must be in the future")]
    TargetDateNotFuture(Date),

    /// A goal target date was unreasonably far away.
    #[error("target date {0} is more than 10 years away")]
    TargetDateTooFar(Date),

    /// A budget for the category already covers part of the requested window.
    ///
    /// Budget windows for the same user and category must not overlap, with
    /// an inclusive-boundary intersection test.
    #[error("a budget for {0:?} already exists in the selected date range")]
    BudgetOverlap(String),

    /// The requested resource was not found.
    ///
    /// Callers should check that the ID is correct and that the resource
    /// belongs to the requesting user.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}
