//! The "add money" flow for savings goals.
//!
//! [add_money] is pure: it validates the deposit and describes the resulting
//! state as a [GoalDeposit], including the one synthetic ledger entry that
//! records the deposit as an expense in the `Savings` category. The caller
//! decides when to apply it; [record_deposit] does so atomically.

use rusqlite::Connection;
use time::Date;

use crate::{
    Error,
    amount::require_positive,
    database_id::GoalId,
    transaction::{Transaction, TransactionBuilder, TransactionKind, create_transaction},
};

use super::core::Goal;

/// The ledger category used for goal deposits.
pub const SAVINGS_CATEGORY: &str = "Savings";

/// The outcome of adding money to a goal: the goal's new balance plus the
/// ledger entry that should be appended alongside the update.
#[derive(Debug, Clone, PartialEq)]
pub struct GoalDeposit {
    /// The goal the deposit belongs to.
    pub goal_id: GoalId,
    /// The goal's balance after the deposit. Deliberately not clamped to the
    /// target; goals may be overfunded.
    pub new_current_amount: f64,
    /// The synthetic `Savings` expense recording the deposit.
    pub ledger_entry: TransactionBuilder,
}

/// Add money to a goal, producing a [GoalDeposit] for the caller to apply.
///
/// # Errors
/// Returns [Error::NonPositiveAmount] if `amount` is zero, negative, or not
/// a number.
pub fn add_money(
    goal: &Goal,
    amount: f64,
    note: Option<&str>,
    today: Date,
) -> Result<GoalDeposit, Error> {
    require_positive(amount, "amount")?;

    let mut ledger_note = format!("Added to savings goal: {}", goal.title);
    if let Some(note) = note.map(str::trim).filter(|note| !note.is_empty()) {
        ledger_note = format!("{ledger_note} - {note}");
    }

    let ledger_entry = Transaction::build(
        goal.user_id,
        TransactionKind::Expense,
        SAVINGS_CATEGORY,
        amount,
        today,
    )
    .note(&ledger_note);

    Ok(GoalDeposit {
        goal_id: goal.id,
        new_current_amount: goal.current_amount + amount,
        ledger_entry,
    })
}

/// Apply a deposit to storage: update the goal's balance and append the
/// ledger entry inside one SQL transaction, so readers never see one without
/// the other.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if the goal no longer exists for the user,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn record_deposit(deposit: GoalDeposit, connection: &Connection) -> Result<Transaction, Error> {
    let sql_transaction = rusqlite::Transaction::new_unchecked(
        connection,
        rusqlite::TransactionBehavior::Immediate,
    )?;

    let updated = sql_transaction.execute(
        "UPDATE goal SET current_amount = ?1 WHERE id = ?2 AND user_id = ?3",
        (
            deposit.new_current_amount,
            deposit.goal_id,
            deposit.ledger_entry.user_id,
        ),
    )?;

    if updated == 0 {
        return Err(Error::NotFound);
    }

    let transaction = create_transaction(deposit.ledger_entry, &sql_transaction)?;

    sql_transaction.commit()?;

    Ok(transaction)
}

#[cfg(test)]
mod tests {
    use time::macros::{date, datetime};

    use crate::{Error, goal::Goal, transaction::TransactionKind};

    use super::{SAVINGS_CATEGORY, add_money};

    const TODAY: time::Date = date!(2024 - 03 - 15);

    fn holiday_goal() -> Goal {
        Goal {
            id: 7,
            user_id: 1,
            title: "Holiday".to_owned(),
            target_amount: 1000.0,
            current_amount: 900.0,
            target_date: date!(2024 - 12 - 31),
            created_at: datetime!(2024-01-01 12:00 UTC),
        }
    }

    #[test]
    fn deposit_raises_the_balance_without_an_upper_clamp() {
        let deposit = add_money(&holiday_goal(), 250.0, None, TODAY).unwrap();

        assert_eq!(deposit.goal_id, 7);
        assert_eq!(deposit.new_current_amount, 1150.0);
    }

    #[test]
    fn deposit_describes_a_savings_expense() {
        let deposit = add_money(&holiday_goal(), 50.0, None, TODAY).unwrap();

        assert_eq!(deposit.ledger_entry.kind, TransactionKind::Expense);
        assert_eq!(deposit.ledger_entry.category, SAVINGS_CATEGORY);
        assert_eq!(deposit.ledger_entry.amount, 50.0);
        assert_eq!(deposit.ledger_entry.date, TODAY);
        assert_eq!(
            deposit.ledger_entry.note.as_deref(),
            Some("Added to savings goal: Holiday")
        );
    }

    #[test]
    fn deposit_note_is_appended_to_the_generated_note() {
        let deposit = add_money(&holiday_goal(), 50.0, Some("birthday money"), TODAY).unwrap();

        assert_eq!(
            deposit.ledger_entry.note.as_deref(),
            Some("Added to savings goal: Holiday - birthday money")
        );
    }

    #[test]
    fn non_positive_amounts_are_rejected() {
        for amount in [0.0, -10.0, f64::NAN] {
            let result = add_money(&holiday_goal(), amount, None, TODAY);
            assert_eq!(result, Err(Error::NonPositiveAmount("amount")));
        }
    }
}
