//! The SQLite connection pool and schema initialisation.

use std::{path::Path, time::Duration};

use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{Connection, TransactionBehavior};

use crate::{
    Error, account::create_account_table, card::create_card_table,
    category::create_category_table, savings::create_savings_goal_table,
    transaction::create_transaction_table, user::create_user_table,
};

/// A pool of SQLite connections shared by the request handlers.
pub type DbPool = r2d2::Pool<SqliteConnectionManager>;

/// The default number of connections kept in the pool.
pub const DEFAULT_POOL_SIZE: u32 = 10;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Open a connection pool for the SQLite database file at `db_path`.
///
/// Every connection in the pool has foreign key enforcement turned on and uses
/// write-ahead logging so readers do not block the writer.
///
/// # Errors
/// Returns [Error::DatabasePool] if the pool could not open its connections.
pub fn create_pool(db_path: &Path, max_size: u32) -> Result<DbPool, Error> {
    build_pool(SqliteConnectionManager::file(db_path), max_size)
}

fn build_pool(manager: SqliteConnectionManager, max_size: u32) -> Result<DbPool, Error> {
    let manager = manager.with_init(|connection| {
        connection.busy_timeout(BUSY_TIMEOUT)?;
        connection.query_row("PRAGMA journal_mode = WAL", [], |_row| Ok(()))?;
        connection.execute_batch("PRAGMA foreign_keys = ON;")
    });

    r2d2::Pool::builder()
        .max_size(max_size)
        .build(manager)
        .map_err(Error::from)
}

/// Create a pool holding a single in-memory database.
///
/// Only one connection is opened so that every checkout sees the same data.
#[cfg(test)]
pub fn create_memory_pool() -> DbPool {
    let manager = SqliteConnectionManager::memory().with_init(|connection| {
        connection.execute_batch("PRAGMA foreign_keys = ON;")
    });

    r2d2::Pool::builder()
        .max_size(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .build(manager)
        .expect("Could not create in-memory database pool.")
}

/// Create the tables for the application and seed the default categories.
///
/// This is idempotent, existing tables and rows are left untouched.
///
/// # Errors
/// Returns an error if any of the tables could not be created.
pub fn initialize(connection: &mut Connection) -> Result<(), Error> {
    let transaction = connection.transaction_with_behavior(TransactionBehavior::Exclusive)?;

    create_user_table(&transaction)?;
    create_account_table(&transaction)?;
    create_category_table(&transaction)?;
    create_transaction_table(&transaction)?;
    create_card_table(&transaction)?;
    create_savings_goal_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{create_memory_pool, initialize};

    #[test]
    fn initialize_is_idempotent() {
        let pool = create_memory_pool();
        let mut connection = pool.get().unwrap();

        initialize(&mut connection).unwrap();
        initialize(&mut connection).unwrap();

        let category_count: i64 = connection
            .query_row("SELECT COUNT(*) FROM category", [], |row| row.get(0))
            .unwrap();
        assert_eq!(category_count, 8);
    }

    #[test]
    fn foreign_keys_are_enforced() {
        let pool = create_memory_pool();
        let mut connection = pool.get().unwrap();
        initialize(&mut connection).unwrap();

        let result = connection.execute(
            "INSERT INTO account (user_id, name, balance) VALUES (999, 'Orphan', 0)",
            [],
        );

        assert!(result.is_err());
    }
}
