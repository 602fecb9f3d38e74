//! Read-only ledger queries used to fetch the row slices the aggregators
//! consume.

use rusqlite::{Connection, params_from_iter, types::Value};
use time::Date;

use crate::{Error, database_id::UserId};

use super::core::{Transaction, TransactionKind, map_transaction_row};

/// A filter describing which slice of the ledger to fetch.
///
/// Every query is scoped to a single user; the remaining filters are
/// optional. Rows are always returned newest first (by date, then ID,
/// descending) so the most recent activity comes back at the front.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerQuery {
    /// The user whose ledger rows to fetch.
    pub user_id: UserId,
    /// Inclusive date range of transactions to return.
    pub date_range: Option<(Date, Date)>,
    /// Restrict results to one transaction kind.
    pub kind: Option<TransactionKind>,
    /// Restrict results to one category.
    pub category: Option<String>,
    /// Maximum number of rows to return.
    pub limit: Option<u32>,
}

impl LedgerQuery {
    /// A query for all of a user's ledger rows.
    pub fn for_user(user_id: UserId) -> Self {
        Self {
            user_id,
            date_range: None,
            kind: None,
            category: None,
            limit: None,
        }
    }

    /// Restrict the query to the inclusive date range `[start, end]`.
    pub fn in_range(mut self, start: Date, end: Date) -> Self {
        self.date_range = Some((start, end));
        self
    }

    /// Restrict the query to one transaction kind.
    pub fn with_kind(mut self, kind: TransactionKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Restrict the query to one category.
    pub fn in_category(mut self, category: &str) -> Self {
        self.category = Some(category.to_owned());
        self
    }

    /// Return at most `limit` of the newest rows.
    pub fn newest(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Fetch the ledger rows matching `query`, newest first.
///
/// # Errors
/// Returns [Error::SqlError] if:
/// - SQL query preparation or execution fails
/// - Transaction row mapping fails
pub fn query_ledger(query: &LedgerQuery, connection: &Connection) -> Result<Vec<Transaction>, Error> {
    let mut conditions = vec!["user_id = ?"];
    let mut params = vec![Value::Integer(query.user_id)];

    if let Some((start, end)) = query.date_range {
        conditions.push("date BETWEEN ? AND ?");
        params.push(Value::Text(start.to_string()));
        params.push(Value::Text(end.to_string()));
    }

    if let Some(kind) = query.kind {
        conditions.push("kind = ?");
        params.push(Value::Text(kind.as_str().to_owned()));
    }

    if let Some(ref category) = query.category {
        conditions.push("category = ?");
        params.push(Value::Text(category.clone()));
    }

    let mut sql = format!(
        "SELECT id, user_id, kind, category, amount, tags, note, date, created_at \
         FROM \"transaction\" WHERE {} ORDER BY date DESC, id DESC",
        conditions.join(" AND ")
    );

    if let Some(limit) = query.limit {
        sql.push_str(" LIMIT ?");
        params.push(Value::Integer(i64::from(limit)));
    }

    connection
        .prepare(&sql)?
        .query_map(params_from_iter(params), map_transaction_row)?
        .map(|row_result| row_result.map_err(Error::from))
        .collect()
}

/// Get a user's transactions within the inclusive date range `[start, end]`,
/// newest first.
///
/// # Errors
/// Returns [Error::SqlError] if the query fails.
pub fn get_transactions_in_range(
    user_id: UserId,
    start: Date,
    end: Date,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    query_ledger(&LedgerQuery::for_user(user_id).in_range(start, end), connection)
}

/// Get all of a user's transactions, newest first.
///
/// # Errors
/// Returns [Error::SqlError] if the query fails.
pub fn get_all_transactions(
    user_id: UserId,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    query_ledger(&LedgerQuery::for_user(user_id), connection)
}

/// Get a user's most recent transactions, newest first.
///
/// # Errors
/// Returns [Error::SqlError] if the query fails.
pub fn get_recent_transactions(
    user_id: UserId,
    limit: u32,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    query_ledger(&LedgerQuery::for_user(user_id).newest(limit), connection)
}
