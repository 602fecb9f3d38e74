//! The transaction ledger.
//!
//! This module contains:
//! - The [Transaction] model and [TransactionBuilder] for creating ledger rows
//! - Database functions for storing transactions
//! - The read-only query capability used by the aggregators to fetch ledger
//!   slices scoped by user, date range, kind, and category

mod core;
mod query;

pub use core::{
    Transaction, TransactionBuilder, TransactionKind, create_transaction, create_transaction_table,
    map_transaction_row,
};
pub use query::{
    LedgerQuery, get_all_transactions, get_recent_transactions, get_transactions_in_range,
    query_ledger,
};
