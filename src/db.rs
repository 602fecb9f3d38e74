//! Database schema setup.

use rusqlite::{Connection, TransactionBehavior};

use crate::{
    budget::create_budget_table, goal::create_goal_table, transaction::create_transaction_table,
};

/// Create all of the application's tables.
///
/// The tables are created inside one exclusive SQL transaction so a partial
/// schema is never left behind.
///
/// # Errors
/// Returns an error if a table cannot be created or if there is an SQL error.
pub fn initialize(connection: &Connection) -> Result<(), rusqlite::Error> {
    let sql_transaction =
        rusqlite::Transaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    create_transaction_table(&sql_transaction)?;
    create_budget_table(&sql_transaction)?;
    create_goal_table(&sql_transaction)?;

    sql_transaction.commit()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;

    use super::initialize;

    #[test]
    fn initialize_creates_all_tables() {
        let conn = Connection::open_in_memory().unwrap();

        initialize(&conn).expect("Could not initialise the database");

        for table in ["transaction", "budget", "goal"] {
            let count: i64 = conn
                .query_row(
                    "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
                    [table],
                    |row| row.get(0),
                )
                .unwrap();

            assert_eq!(count, 1, "missing table {table:?}");
        }
    }

    #[test]
    fn initialize_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();

        initialize(&conn).expect("Could not initialise the database");
        initialize(&conn).expect("Second initialise failed");
    }
}
