//! Implements a struct that holds the state of the REST server.

use time::Duration;

use crate::{
    Error, PasswordHash,
    auth::TokenKeys,
    db::{DbPool, initialize},
};

/// How long a session token stays valid after log-in.
pub const DEFAULT_TOKEN_DURATION: Duration = Duration::hours(1);

/// The state of the REST server.
#[derive(Clone)]
pub struct AppState {
    /// The pool of database connections.
    pub db_pool: DbPool,

    /// The keys for signing and verifying session tokens.
    pub token_keys: TokenKeys,

    /// The duration for which session tokens are valid.
    pub token_duration: Duration,

    /// The bcrypt cost used when hashing new passwords.
    pub password_cost: u32,

    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl AppState {
    /// Create a new [AppState] with a pool of SQLite database connections.
    ///
    /// This function will initialize the database by adding the tables for the domain models.
    /// `local_timezone` should be a valid, canonical timezone name, e.g. "Pacific/Auckland".
    ///
    /// # Errors
    /// Returns an error if a connection cannot be checked out or the database cannot be initialized.
    pub fn new(db_pool: DbPool, token_secret: &str, local_timezone: &str) -> Result<Self, Error> {
        let mut connection = db_pool.get()?;
        initialize(&mut connection)?;

        Ok(Self {
            db_pool,
            token_keys: TokenKeys::new(token_secret),
            token_duration: DEFAULT_TOKEN_DURATION,
            password_cost: PasswordHash::DEFAULT_COST,
            local_timezone: local_timezone.to_owned(),
        })
    }
}
