/*! Database initialization for the application. */

use rusqlite::Connection;

use crate::transaction::create_transaction_table;

/// Initialize the database with the tables for the domain models.
///
/// This function is idempotent: the table schema uses `IF NOT EXISTS`, so
/// calling it against an already initialized database is a no-op.
///
/// # Errors
/// Returns an error if the tables cannot be created or if there is an SQL error.
pub fn initialize(connection: &Connection) -> Result<(), rusqlite::Error> {
    create_transaction_table(connection)
}
