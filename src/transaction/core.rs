//! Defines the core data model and database functions for ledger
//! transactions.

use rusqlite::{
    Connection, Row,
    types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef},
};
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::{
    Error,
    amount::require_positive,
    database_id::{TransactionId, UserId},
};

/// Whether a transaction brings money in or spends it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    /// Money earned, e.g. salary.
    Income,
    /// Money spent, e.g. groceries.
    Expense,
}

impl TransactionKind {
    /// The lower-case name used on the wire and in the database.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl ToSql for TransactionKind {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(self.as_str().into())
    }
}

impl FromSql for TransactionKind {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value.as_str()? {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(FromSqlError::Other(
                format!("unknown transaction kind {other:?}").into(),
            )),
        }
    }
}

/// An income or expense recorded in the ledger.
///
/// Transactions are immutable once read by the aggregators. To create a new
/// `Transaction`, use [Transaction::build].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// The ID of the user that owns the transaction.
    pub user_id: UserId,
    /// Whether the transaction is income or an expense.
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// The free-form category, e.g. "Groceries", "Rent".
    pub category: String,
    /// The amount of money moved. Always positive; direction comes from
    /// [Transaction::kind].
    pub amount: f64,
    /// Optional comma-separated tags.
    pub tags: Option<String>,
    /// An optional free-form note.
    pub note: Option<String>,
    /// When the transaction happened.
    pub date: Date,
    /// When the transaction was recorded.
    pub created_at: OffsetDateTime,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [TransactionBuilder] for discoverability.
    pub fn build(
        user_id: UserId,
        kind: TransactionKind,
        category: &str,
        amount: f64,
        date: Date,
    ) -> TransactionBuilder {
        TransactionBuilder {
            user_id,
            kind,
            category: category.to_owned(),
            amount,
            date,
            tags: None,
            note: None,
        }
    }
}

/// A builder for creating [Transaction] instances.
///
/// The optional fields default to `None`; pass the finished builder to
/// [create_transaction] to validate and persist the row.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionBuilder {
    /// The ID of the user that owns the transaction.
    pub user_id: UserId,
    /// Whether the transaction is income or an expense.
    pub kind: TransactionKind,
    /// The free-form category of the transaction.
    pub category: String,
    /// The amount of money moved, which must be positive.
    pub amount: f64,
    /// When the transaction happened.
    pub date: Date,
    /// Optional comma-separated tags.
    pub tags: Option<String>,
    /// An optional free-form note.
    pub note: Option<String>,
}

impl TransactionBuilder {
    /// Set the comma-separated tags for the transaction.
    pub fn tags(mut self, tags: &str) -> Self {
        self.tags = Some(tags.to_owned());
        self
    }

    /// Set the note for the transaction.
    pub fn note(mut self, note: &str) -> Self {
        self.note = Some(note.to_owned());
        self
    }
}

/// Create a new transaction in the database from a builder.
///
/// # Errors
/// This function will return a:
/// - [Error::MissingField] if the category is empty,
/// - or [Error::NonPositiveAmount] if the amount is zero or negative,
/// - or [Error::SqlError] if there is an SQL error.
pub fn create_transaction(
    builder: TransactionBuilder,
    connection: &Connection,
) -> Result<Transaction, Error> {
    if builder.category.trim().is_empty() {
        return Err(Error::MissingField("category"));
    }

    require_positive(builder.amount, "amount")?;

    let transaction = connection
        .prepare(
            "INSERT INTO \"transaction\" (user_id, kind, category, amount, tags, note, date, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
             RETURNING id, user_id, kind, category, amount, tags, note, date, created_at",
        )?
        .query_row(
            (
                builder.user_id,
                builder.kind,
                builder.category,
                builder.amount,
                builder.tags,
                builder.note,
                builder.date,
                OffsetDateTime::now_utc(),
            ),
            map_transaction_row,
        )?;

    Ok(transaction)
}

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL
/// error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL,
                kind TEXT NOT NULL,
                category TEXT NOT NULL,
                amount REAL NOT NULL,
                tags TEXT,
                note TEXT,
                date TEXT NOT NULL,
                created_at TEXT NOT NULL
                )",
        (),
    )?;

    // Composite index used by the windowed ledger queries.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_user_date ON \"transaction\"(user_id, date);",
        (),
    )?;

    Ok(())
}

/// Map a database row to a [Transaction].
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    Ok(Transaction {
        id: row.get(0)?,
        user_id: row.get(1)?,
        kind: row.get(2)?,
        category: row.get(3)?,
        amount: row.get(4)?,
        tags: row.get(5)?,
        note: row.get(6)?,
        date: row.get(7)?,
        created_at: row.get(8)?,
    })
}


#[cfg(test)]
mod serialization_tests {
    use time::macros::{date, datetime};

    use super::{Transaction, TransactionKind};

    #[test]
    fn transaction_uses_wire_field_names() {
        let transaction = Transaction {
            id: 7,
            user_id: 1,
            kind: TransactionKind::Expense,
            category: "Groceries".to_owned(),
            amount: 42.5,
            tags: None,
            note: Some("weekly shop".to_owned()),
            date: date!(2024 - 03 - 15),
            created_at: datetime!(2024-03-15 12:00 UTC),
        };

        let value = serde_json::to_value(&transaction).unwrap();

        assert_eq!(value["type"], "expense");
        assert_eq!(value["category"], "Groceries");
        assert_eq!(value["amount"], 42.5);
        assert_eq!(value["date"], "2024-03-15");
    }
}
