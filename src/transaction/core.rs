//! Defines the core data models and database queries for transactions.

use std::{fmt::Display, str::FromStr};

use rusqlite::{
    Connection, Row,
    types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef},
};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::Error;

// ============================================================================
// MODELS
// ============================================================================

/// Whether a transaction brought money in or took money out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    /// Money earned, e.g. a sale or interest payment.
    Revenue,
    /// Money spent, e.g. rent or supplies.
    Expense,
}

impl TransactionKind {
    /// The string stored in the database's `type` column.
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionKind::Revenue => "Revenue",
            TransactionKind::Expense => "Expense",
        }
    }
}

impl Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = String;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        match text {
            "Revenue" => Ok(TransactionKind::Revenue),
            "Expense" => Ok(TransactionKind::Expense),
            other => Err(format!("invalid transaction type \"{other}\"")),
        }
    }
}

impl ToSql for TransactionKind {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for TransactionKind {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()
            .and_then(|text| text.parse().map_err(|error: String| FromSqlError::Other(error.into())))
    }
}

/// A revenue or expense record, i.e. an event where money was either earned or spent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The caller-supplied, unique ID of the transaction.
    pub id: String,
    /// When the transaction happened.
    pub date: Date,
    /// A text description of what the transaction was for. May be empty.
    pub description: String,
    /// The amount of money earned or spent, always positive.
    pub amount: f64,
    /// Whether the transaction is revenue or an expense.
    pub kind: TransactionKind,
}

/// The mutable fields of a [Transaction], used to update a record in place.
///
/// Every field except the ID is replaceable; the ID is immutable once created.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionUpdate {
    /// The new transaction date.
    pub date: Date,
    /// The new description.
    pub description: String,
    /// The new amount, must be positive.
    pub amount: f64,
    /// The new transaction type.
    pub kind: TransactionKind,
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Create a new transaction in the database.
///
/// IDs must be non-empty and amounts strictly positive, both are checked
/// before any SQL runs.
///
/// # Errors
/// This function will return a:
/// - [Error::EmptyTransactionId] if the ID is empty or whitespace,
/// - [Error::NonPositiveAmount] if the amount is zero or negative,
/// - [Error::DuplicateTransactionId] if a transaction with the ID already exists,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_transaction(transaction: &Transaction, connection: &Connection) -> Result<(), Error> {
    validate_id(&transaction.id)?;
    validate_amount(transaction.amount)?;

    connection
        .execute(
            "INSERT INTO transactions (transaction_id, transaction_date, description, amount, type)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            (
                &transaction.id,
                transaction.date,
                &transaction.description,
                transaction.amount,
                transaction.kind,
            ),
        )
        .map_err(|error| match error {
            rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error {
                    code: _,
                    extended_code: rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY,
                },
                _,
            ) => Error::DuplicateTransactionId(transaction.id.clone()),
            error => error.into(),
        })?;

    Ok(())
}

/// Retrieve a transaction from the database by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid transaction,
/// - or [Error::SqlError] there is some other SQL error.
pub fn get_transaction(id: &str, connection: &Connection) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(
            "SELECT transaction_id, transaction_date, description, amount, type
             FROM transactions WHERE transaction_id = :id",
        )?
        .query_one(&[(":id", &id)], map_transaction_row)?;

    Ok(transaction)
}

/// Replace every mutable field of the transaction identified by `id`.
///
/// A value-identical update still succeeds. This function never inserts: an
/// unknown `id` is reported as an error.
///
/// # Errors
/// This function will return a:
/// - [Error::NonPositiveAmount] if the new amount is zero or negative,
/// - [Error::UpdateMissingTransaction] if `id` is not in the database,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn update_transaction(
    id: &str,
    update: &TransactionUpdate,
    connection: &Connection,
) -> Result<(), Error> {
    validate_amount(update.amount)?;

    let rows_affected = connection.execute(
        "UPDATE transactions
         SET transaction_date = ?1, description = ?2, amount = ?3, type = ?4
         WHERE transaction_id = ?5",
        (
            update.date,
            &update.description,
            update.amount,
            update.kind,
            id,
        ),
    )?;

    if rows_affected == 0 {
        return Err(Error::UpdateMissingTransaction);
    }

    Ok(())
}

/// Remove the transaction identified by `id` from the database.
///
/// # Errors
/// This function will return a:
/// - [Error::DeleteMissingTransaction] if `id` is not in the database,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn delete_transaction(id: &str, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "DELETE FROM transactions WHERE transaction_id = :id",
        &[(":id", &id)],
    )?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingTransaction);
    }

    Ok(())
}

/// Create the transactions table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS transactions (
                transaction_id   VARCHAR(255) PRIMARY KEY,
                transaction_date DATE NOT NULL,
                description      TEXT,
                amount           DECIMAL(10,2) NOT NULL,
                type             VARCHAR(20) CHECK (type IN ('Revenue','Expense'))
                )",
        (),
    )?;

    Ok(())
}

/// Map a database row to a Transaction.
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(0)?;
    let date = row.get(1)?;
    let description = row.get(2)?;
    let amount = row.get(3)?;
    let kind = row.get(4)?;

    Ok(Transaction {
        id,
        date,
        description,
        amount,
        kind,
    })
}

fn validate_id(id: &str) -> Result<(), Error> {
    if id.trim().is_empty() {
        return Err(Error::EmptyTransactionId);
    }

    Ok(())
}

fn validate_amount(amount: f64) -> Result<(), Error> {
    if amount <= 0.0 {
        return Err(Error::NonPositiveAmount(amount));
    }

    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod database_tests {
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        Error,
        db::initialize,
        transaction::{
            Transaction, TransactionKind, TransactionUpdate, create_transaction,
            delete_transaction, get_transaction, update_transaction,
        },
    };

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    fn sample_transaction(id: &str) -> Transaction {
        Transaction {
            id: id.to_owned(),
            date: date!(2024 - 01 - 05),
            description: "Sale".to_owned(),
            amount: 100.0,
            kind: TransactionKind::Revenue,
        }
    }

    #[test]
    fn create_succeeds_and_is_visible_to_reads() {
        let conn = get_test_connection();
        let want = sample_transaction("T1");

        create_transaction(&want, &conn).expect("Could not create transaction");

        let got = get_transaction("T1", &conn).expect("Could not get transaction");
        assert_eq!(want, got);
    }

    #[test]
    fn create_fails_on_duplicate_id() {
        let conn = get_test_connection();
        let original = sample_transaction("T1");
        create_transaction(&original, &conn).expect("Could not create transaction");

        let mut duplicate = sample_transaction("T1");
        duplicate.amount = 999.99;
        let result = create_transaction(&duplicate, &conn);

        assert_eq!(
            result,
            Err(Error::DuplicateTransactionId("T1".to_owned()))
        );
        // The original record must be left unchanged.
        let got = get_transaction("T1", &conn).unwrap();
        assert_eq!(original, got);
    }

    #[test]
    fn create_fails_on_empty_id() {
        let conn = get_test_connection();
        let transaction = sample_transaction("  ");

        let result = create_transaction(&transaction, &conn);

        assert_eq!(result, Err(Error::EmptyTransactionId));
    }

    #[test]
    fn create_fails_on_non_positive_amount() {
        let conn = get_test_connection();
        let cases = [0.0, -42.5];

        for amount in cases {
            let mut transaction = sample_transaction("T1");
            transaction.amount = amount;

            let result = create_transaction(&transaction, &conn);

            assert_eq!(result, Err(Error::NonPositiveAmount(amount)));
        }
    }

    #[test]
    fn get_transaction_fails_on_invalid_id() {
        let conn = get_test_connection();
        create_transaction(&sample_transaction("T1"), &conn).unwrap();

        let result = get_transaction("T2", &conn);

        assert_eq!(result, Err(Error::NotFound));
    }

    #[test]
    fn update_replaces_every_mutable_field() {
        let conn = get_test_connection();
        create_transaction(&sample_transaction("T1"), &conn).unwrap();

        let update = TransactionUpdate {
            date: date!(2024 - 02 - 10),
            description: "Corrected sale".to_owned(),
            amount: 250.75,
            kind: TransactionKind::Expense,
        };
        update_transaction("T1", &update, &conn).expect("Could not update transaction");

        let got = get_transaction("T1", &conn).unwrap();
        assert_eq!(got.date, update.date);
        assert_eq!(got.description, update.description);
        assert_eq!(got.amount, update.amount);
        assert_eq!(got.kind, update.kind);
        assert_eq!(got.id, "T1", "the ID must be immutable");
    }

    #[test]
    fn update_with_identical_values_succeeds() {
        let conn = get_test_connection();
        let transaction = sample_transaction("T1");
        create_transaction(&transaction, &conn).unwrap();

        let update = TransactionUpdate {
            date: transaction.date,
            description: transaction.description.clone(),
            amount: transaction.amount,
            kind: transaction.kind,
        };
        let result = update_transaction("T1", &update, &conn);

        assert_eq!(result, Ok(()));
    }

    #[test]
    fn update_missing_transaction_fails_and_does_not_insert() {
        let conn = get_test_connection();

        let update = TransactionUpdate {
            date: date!(2024 - 02 - 10),
            description: String::new(),
            amount: 1.0,
            kind: TransactionKind::Revenue,
        };
        let result = update_transaction("missing", &update, &conn);

        assert_eq!(result, Err(Error::UpdateMissingTransaction));
        assert_eq!(get_transaction("missing", &conn), Err(Error::NotFound));
    }

    #[test]
    fn delete_removes_transaction() {
        let conn = get_test_connection();
        create_transaction(&sample_transaction("T1"), &conn).unwrap();

        delete_transaction("T1", &conn).expect("Could not delete transaction");

        assert_eq!(get_transaction("T1", &conn), Err(Error::NotFound));
    }

    #[test]
    fn delete_twice_fails_the_second_time() {
        let conn = get_test_connection();
        create_transaction(&sample_transaction("T1"), &conn).unwrap();

        delete_transaction("T1", &conn).expect("Could not delete transaction");
        let result = delete_transaction("T1", &conn);

        assert_eq!(result, Err(Error::DeleteMissingTransaction));
    }

    #[test]
    fn kind_round_trips_through_database() {
        let conn = get_test_connection();
        let mut expense = sample_transaction("T2");
        expense.kind = TransactionKind::Expense;
        create_transaction(&expense, &conn).unwrap();

        let got = get_transaction("T2", &conn).unwrap();

        assert_eq!(got.kind, TransactionKind::Expense);
    }
}
