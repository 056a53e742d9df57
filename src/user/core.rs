//! Code for creating the user table and fetching users from the database.

use std::fmt::Display;

use email_address::EmailAddress;
use rusqlite::{Connection, OptionalExtension, Row};
use serde::{Deserialize, Serialize};

use crate::{Error, PasswordHash};

/// The theme given to new users.
pub const DEFAULT_THEME: &str = "light";

/// A newtype wrapper for integer user IDs.
///
/// This helps disambiguate user IDs from other types of IDs, leading to better compile time
/// errors, and more flexible generics that can have distinct implementations for multiple ID types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct UserID(i64);

impl UserID {
    /// Create a new user ID.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Cast the user ID to a 64 bit integer.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl Display for UserID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A user of the application.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    /// The user's ID in the application database.
    pub id: UserID,
    /// The user's display name.
    pub name: String,
    /// The email the user logs in with.
    pub email: String,
    /// The user's password hash.
    pub password_hash: PasswordHash,
    /// A link to the user's profile picture, if they have set one.
    pub avatar_url: Option<String>,
    /// The user's preferred colour theme.
    pub theme: String,
}

/// Create the user table.
///
/// Emails are compared case-insensitively.
///
/// # Errors
///
/// This function will return an error if the SQL query failed.
pub fn create_user_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS user (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                email TEXT NOT NULL UNIQUE COLLATE NOCASE,
                password TEXT NOT NULL,
                avatar_url TEXT,
                theme TEXT NOT NULL DEFAULT 'light',
                created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
                )",
        (),
    )?;

    Ok(())
}

/// Check that `email` is a well formed email address and return it trimmed.
///
/// # Errors
///
/// Returns [Error::Validation] if the email is blank or malformed.
pub fn validate_email(email: &str) -> Result<String, Error> {
    let email = email.trim();

    if email.is_empty() {
        return Err(Error::Validation("Email is required.".to_owned()));
    }

    if !EmailAddress::is_valid(email) {
        return Err(Error::Validation(format!(
            "{email} is not a valid email address."
        )));
    }

    Ok(email.to_owned())
}

/// Create and insert a new user into the database.
///
/// # Errors
///
/// Returns a [Error::DuplicateEmail] if the email is taken, or [Error::SqlError] if another SQL
/// related error occurred.
pub fn create_user(
    name: &str,
    email: &str,
    password_hash: &PasswordHash,
    connection: &Connection,
) -> Result<User, Error> {
    connection.execute(
        "INSERT INTO user (name, email, password) VALUES (?1, ?2, ?3)",
        (name, email, password_hash.as_ref()),
    )?;

    let id = UserID::new(connection.last_insert_rowid());

    Ok(User {
        id,
        name: name.to_owned(),
        email: email.to_owned(),
        password_hash: password_hash.clone(),
        avatar_url: None,
        theme: DEFAULT_THEME.to_owned(),
    })
}

fn map_row_to_user(row: &Row) -> Result<User, rusqlite::Error> {
    let raw_id = row.get(0)?;
    let name = row.get(1)?;
    let email = row.get(2)?;
    let raw_password_hash: String = row.get(3)?;
    let avatar_url = row.get(4)?;
    let theme = row.get(5)?;

    Ok(User {
        id: UserID::new(raw_id),
        name,
        email,
        password_hash: PasswordHash::new_unchecked(&raw_password_hash),
        avatar_url,
        theme,
    })
}

/// Get the user from the database with the ID `id`.
///
/// # Errors
///
/// Returns [Error::NotFound] if there is no user with the ID `id`.
pub fn get_user_by_id(id: UserID, connection: &Connection) -> Result<User, Error> {
    connection
        .query_row(
            "SELECT id, name, email, password, avatar_url, theme FROM user WHERE id = :id",
            &[(":id", &id.as_i64())],
            map_row_to_user,
        )
        .map_err(Error::from)
}

/// Get the user from the database registered with `email`.
///
/// # Errors
///
/// Returns [Error::NotFound] if no user has the email `email`.
pub fn get_user_by_email(email: &str, connection: &Connection) -> Result<User, Error> {
    connection
        .query_row(
            "SELECT id, name, email, password, avatar_url, theme FROM user WHERE email = :email",
            &[(":email", &email)],
            map_row_to_user,
        )
        .map_err(Error::from)
}

/// Check whether a user other than `user_id` has registered `email`.
pub fn is_email_taken(
    email: &str,
    user_id: UserID,
    connection: &Connection,
) -> Result<bool, Error> {
    let other_user: Option<i64> = connection
        .query_row(
            "SELECT id FROM user WHERE email = ?1 AND id != ?2",
            (email, user_id.as_i64()),
            |row| row.get(0),
        )
        .optional()?;

    Ok(other_user.is_some())
}
