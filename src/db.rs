//! Database set up shared by the domain modules.

use std::sync::{Mutex, MutexGuard};

use rusqlite::{
    Connection, Transaction as SqlTransaction, TransactionBehavior, functions::FunctionFlags,
};

use crate::{
    Error, category::create_category_table, person::create_person_table,
    transaction::create_transaction_table,
};

/// Name of the SQL function that lowercases text with full Unicode case mapping.
///
/// SQLite's built-in `lower` only folds ASCII letters.
pub(crate) const UNICODE_LOWER: &str = "unicode_lower";

/// Prepare the connection and create the tables for the domain models.
///
/// Enables foreign key enforcement and registers [UNICODE_LOWER]. Both are
/// per-connection settings, so this must be called on every new connection.
///
/// # Errors
/// Returns an error if a table cannot be created or if there is an SQL error.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    connection.pragma_update(None, "foreign_keys", true)?;
    register_unicode_lower(connection)?;

    let transaction = SqlTransaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    create_category_table(&transaction)?;
    create_person_table(&transaction)?;
    create_transaction_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}

fn register_unicode_lower(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.create_scalar_function(
        UNICODE_LOWER,
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |context| {
            let text = context.get::<Option<String>>(0)?;
            Ok(text.map(|text| text.to_lowercase()))
        },
    )
}

/// Acquire the shared database connection.
///
/// # Errors
/// Returns [Error::DatabaseLockError] if the lock is poisoned.
pub(crate) fn lock_connection(
    connection: &Mutex<Connection>,
) -> Result<MutexGuard<'_, Connection>, Error> {
    connection.lock().map_err(|error| {
        tracing::error!("could not acquire database lock: {error}");
        Error::DatabaseLockError
    })
}

/// An in-memory database with the application schema, for tests.
#[cfg(test)]
pub(crate) fn get_test_connection() -> Connection {
    let connection = Connection::open_in_memory().expect("Could not open in-memory database");
    initialize(&connection).expect("Could not initialize database");
    connection
}

#[cfg(test)]
mod tests {
    use super::{UNICODE_LOWER, get_test_connection};

    #[test]
    fn unicode_lower_folds_non_ascii() {
        let connection = get_test_connection();

        let got: String = connection
            .query_row(&format!("SELECT {UNICODE_LOWER}('ÁGUA Mineral')"), [], |row| {
                row.get(0)
            })
            .unwrap();

        assert_eq!(got, "água mineral");
    }

    #[test]
    fn foreign_keys_are_enforced() {
        let connection = get_test_connection();

        let enabled: bool = connection
            .pragma_query_value(None, "foreign_keys", |row| row.get(0))
            .unwrap();

        assert!(enabled);
    }

    #[test]
    fn initialize_is_idempotent() {
        let connection = get_test_connection();

        assert_eq!(super::initialize(&connection), Ok(()));
    }
}
