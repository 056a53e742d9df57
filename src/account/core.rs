use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};

use crate::{Error, UserID};

/// The database ID of an account.
pub type AccountId = i64;

/// The name of the account created for every new user.
pub const DEFAULT_ACCOUNT_NAME: &str = "Main";

/// A store of money owned by a user, such as a bank account.
///
/// The balance is kept equal to the sum of the user's income minus expenses
/// recorded against the account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// The id for the account.
    pub id: AccountId,
    /// The name of the account.
    pub name: String,
    /// The balance.
    pub balance: f64,
}

pub fn create_account_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS account (
            id INTEGER PRIMARY KEY,
            user_id INTEGER NOT NULL,
            name TEXT NOT NULL,
            balance REAL NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            FOREIGN KEY(user_id) REFERENCES user(id) ON UPDATE CASCADE ON DELETE CASCADE
        )",
        (),
    )?;

    Ok(())
}

pub fn map_row_to_account(row: &Row) -> Result<Account, rusqlite::Error> {
    let id = row.get(0)?;
    let name = row.get(1)?;
    let balance = row.get(2)?;

    Ok(Account { id, name, balance })
}

/// Create an account with a zero balance for `user_id`.
///
/// # Errors
/// Returns [Error::SqlError] if the user does not exist or the insert fails.
pub fn create_account(
    user_id: UserID,
    name: &str,
    connection: &Connection,
) -> Result<Account, Error> {
    connection.execute(
        "INSERT INTO account (user_id, name, balance) VALUES (?1, ?2, 0)",
        (user_id.as_i64(), name),
    )?;

    Ok(Account {
        id: connection.last_insert_rowid(),
        name: name.to_owned(),
        balance: 0.0,
    })
}

/// Get the accounts owned by `user_id`, oldest first.
pub fn get_accounts(user_id: UserID, connection: &Connection) -> Result<Vec<Account>, Error> {
    connection
        .prepare("SELECT id, name, balance FROM account WHERE user_id = ?1 ORDER BY id ASC")?
        .query_map([user_id.as_i64()], map_row_to_account)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(Error::from)
}

/// Add `delta` to the balance of the account `account_id` owned by `user_id`.
///
/// # Errors
/// Returns [Error::AccountNotFound] if the account does not exist or belongs to another user.
pub fn adjust_account_balance(
    account_id: AccountId,
    user_id: UserID,
    delta: f64,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "UPDATE account SET balance = balance + ?1 WHERE id = ?2 AND user_id = ?3",
        (delta, account_id, user_id.as_i64()),
    )?;

    if rows_affected == 0 {
        return Err(Error::AccountNotFound);
    }

    Ok(())
}

/// Get the total balance across all accounts owned by `user_id`.
///
/// # Arguments
/// * `user_id` - The owner of the accounts
/// * `connection` - Database connection reference
///
/// # Errors
/// Returns [Error] if:
/// - Database connection fails
/// - SQL query preparation or execution fails
pub fn get_total_account_balance(user_id: UserID, connection: &Connection) -> Result<f64, Error> {
    let mut stmt =
        connection.prepare("SELECT COALESCE(SUM(balance), 0.0) FROM account WHERE user_id = ?1")?;

    let total: f64 = stmt.query_row([user_id.as_i64()], |row| row.get(0))?;

    Ok(total)
}

#[cfg(test)]
mod create_table_tests {
    use rusqlite::Connection;

    use super::create_account_table;

    #[test]
    fn sql_is_valid() {
        let connection =
            Connection::open_in_memory().expect("Could not initialise in-memory SQLite database");

        assert_eq!(Ok(()), create_account_table(&connection));
    }
}
