//! Defines the core data models and database queries for transactions.

use rusqlite::{
    Connection, Row, ToSql, TransactionBehavior,
    types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef},
};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    Error, UserID,
    account::{AccountId, adjust_account_balance},
    category::CategoryId,
};

pub(crate) mod date_format {
    //! Serializes a [time::Date] as "YYYY-MM-DD".
    use serde::{Deserialize, Deserializer, Serializer};
    use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

    /// Date format for transactions, e.g. "2025-01-31".
    pub const DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

    pub fn serialize<S>(date: &Date, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let formatted = date.format(DATE_FORMAT).map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&formatted)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Date, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Date::parse(&s, DATE_FORMAT).map_err(serde::de::Error::custom)
    }
}

/// The database ID of a transaction.
pub type TransactionId = i64;

/// Whether money was earned or spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money that was earned.
    Income,
    /// Money that was spent.
    Expense,
}

impl TransactionType {
    /// The lowercase name used in JSON and in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }

    /// The change to an account balance caused by a transaction of `amount`.
    pub fn balance_delta(&self, amount: f64) -> f64 {
        match self {
            TransactionType::Income => amount,
            TransactionType::Expense => -amount,
        }
    }
}

impl ToSql for TransactionType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for TransactionType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value.as_str()? {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            other => Err(FromSqlError::Other(
                format!("unknown transaction type {other}").into(),
            )),
        }
    }
}

/// An expense or income, i.e. an event where money was either spent or earned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// The account the money went into or came out of.
    pub account_id: AccountId,
    /// The ID of the category the transaction belongs to.
    pub category_id: CategoryId,
    /// A text description of what the transaction was for.
    pub description: String,
    /// The amount of money spent or earned in this transaction, always positive.
    pub amount: f64,
    /// Whether the money was earned or spent.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// When the transaction happened.
    #[serde(with = "date_format")]
    pub date: Date,
}

/// The validated data for a transaction that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    /// The account the money went into or came out of.
    pub account_id: AccountId,
    /// The ID of the category the transaction belongs to.
    pub category_id: CategoryId,
    /// A text description of what the transaction was for.
    pub description: String,
    /// The amount of money, always positive.
    pub amount: f64,
    /// Whether the money was earned or spent.
    pub transaction_type: TransactionType,
    /// When the transaction happened, never in the future.
    pub date: Date,
}

/// A transaction joined with its category for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionListItem {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// A text description of what the transaction was for.
    pub description: String,
    /// The amount of money, always positive.
    pub amount: f64,
    /// Whether the money was earned or spent.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// When the transaction happened.
    #[serde(with = "date_format")]
    pub date: Date,
    /// The name of the category.
    pub category: String,
    /// The icon of the category.
    pub icon: Option<String>,
}

pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY,
                user_id INTEGER NOT NULL,
                account_id INTEGER NOT NULL,
                category_id INTEGER NOT NULL,
                description TEXT NOT NULL,
                amount REAL NOT NULL CHECK (amount > 0),
                type TEXT NOT NULL CHECK (type IN ('income', 'expense')),
                date TEXT NOT NULL,
                created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
                FOREIGN KEY(user_id) REFERENCES user(id) ON UPDATE CASCADE ON DELETE CASCADE,
                FOREIGN KEY(account_id) REFERENCES account(id) ON UPDATE CASCADE ON DELETE CASCADE,
                FOREIGN KEY(category_id) REFERENCES category(id) ON UPDATE CASCADE ON DELETE RESTRICT
                );
        CREATE INDEX IF NOT EXISTS idx_transaction_user_date ON \"transaction\"(user_id, date);",
    )
}

/// Store a transaction for `user_id` and apply it to the balance of its account.
///
/// The insert and the balance update are committed together or not at all.
/// The write lock is taken up front so concurrent writers wait on the busy timeout
/// instead of failing to upgrade a read lock.
///
/// # Errors
/// This function will return a:
/// - [Error::AccountNotFound] if the account does not exist or belongs to another user,
/// - [Error::InvalidCategory] if `category_id` does not refer to a category,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_transaction(
    new_transaction: NewTransaction,
    user_id: UserID,
    connection: &mut Connection,
) -> Result<Transaction, Error> {
    let sql_transaction = connection.transaction_with_behavior(TransactionBehavior::Immediate)?;

    adjust_account_balance(
        new_transaction.account_id,
        user_id,
        new_transaction
            .transaction_type
            .balance_delta(new_transaction.amount),
        &sql_transaction,
    )?;

    sql_transaction
        .execute(
            "INSERT INTO \"transaction\" (user_id, account_id, category_id, description, amount, type, date)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            (
                user_id.as_i64(),
                new_transaction.account_id,
                new_transaction.category_id,
                &new_transaction.description,
                new_transaction.amount,
                new_transaction.transaction_type,
                new_transaction.date,
            ),
        )
        .map_err(|error| match error {
            // Code 787 occurs when a FOREIGN KEY constraint failed.
            // The account and user were checked above, so it must be the category.
            rusqlite::Error::SqliteFailure(error, Some(_)) if error.extended_code == 787 => {
                Error::InvalidCategory
            }
            error => error.into(),
        })?;

    let id = sql_transaction.last_insert_rowid();
    sql_transaction.commit()?;

    Ok(Transaction {
        id,
        account_id: new_transaction.account_id,
        category_id: new_transaction.category_id,
        description: new_transaction.description,
        amount: new_transaction.amount,
        transaction_type: new_transaction.transaction_type,
        date: new_transaction.date,
    })
}

/// Delete the transaction `id` owned by `user_id` and undo its effect on the account balance.
///
/// # Errors
/// Returns [Error::DeleteMissingTransaction] if the transaction does not exist or belongs to
/// another user, in which case nothing is changed.
pub fn delete_transaction(
    id: TransactionId,
    user_id: UserID,
    connection: &mut Connection,
) -> Result<(), Error> {
    let sql_transaction = connection.transaction_with_behavior(TransactionBehavior::Immediate)?;

    let (account_id, amount, transaction_type): (AccountId, f64, TransactionType) =
        match sql_transaction.query_row(
            "SELECT account_id, amount, type FROM \"transaction\" WHERE id = ?1 AND user_id = ?2",
            (id, user_id.as_i64()),
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
        ) {
            Ok(row) => row,
            Err(rusqlite::Error::QueryReturnedNoRows) => {
                return Err(Error::DeleteMissingTransaction);
            }
            Err(error) => return Err(error.into()),
        };

    let rows_affected = sql_transaction.execute(
        "DELETE FROM \"transaction\" WHERE id = ?1 AND user_id = ?2",
        (id, user_id.as_i64()),
    )?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingTransaction);
    }

    adjust_account_balance(
        account_id,
        user_id,
        -transaction_type.balance_delta(amount),
        &sql_transaction,
    )?;

    sql_transaction.commit()?;

    Ok(())
}

fn map_row_to_list_item(row: &Row) -> Result<TransactionListItem, rusqlite::Error> {
    Ok(TransactionListItem {
        id: row.get(0)?,
        description: row.get(1)?,
        amount: row.get(2)?,
        transaction_type: row.get(3)?,
        date: row.get(4)?,
        category: row.get(5)?,
        icon: row.get(6)?,
    })
}

/// Get the transactions of `user_id`, newest first, with their category.
///
/// Returns every transaction if `limit` is `None`.
pub fn get_transactions(
    user_id: UserID,
    limit: Option<u32>,
    connection: &Connection,
) -> Result<Vec<TransactionListItem>, Error> {
    // A negative limit means no limit in SQLite.
    let limit = limit.map(i64::from).unwrap_or(-1);

    connection
        .prepare(
            "SELECT t.id, t.description, t.amount, t.type, t.date, c.name, c.icon
            FROM \"transaction\" t
            INNER JOIN category c ON c.id = t.category_id
            WHERE t.user_id = ?1
            ORDER BY t.date DESC, t.id DESC
            LIMIT ?2",
        )?
        .query_map((user_id.as_i64(), limit), map_row_to_list_item)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(Error::from)
}
