//! Defines the app level error type and its conversion to JSON error responses.
use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use time::Date;

/// The errors that may occur in the application.
///
/// The `Display` text of each client facing variant is sent to the client in
/// the `message` field of the JSON error body. Server errors are logged and
/// replaced with a generic message.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The request body, path or query was missing a field or had a field
    /// with the wrong type or an invalid value.
    #[error("{0}")]
    Validation(String),

    /// The category ID used to create a transaction did not match a category.
    #[error("The category ID does not refer to a valid category.")]
    InvalidCategory,

    /// A date in the future was used to create a transaction.
    ///
    /// Transactions record events that have already happened, therefore future
    /// dates are not allowed.
    #[error("{0} is a date in the future, which is not allowed.")]
    FutureDate(Date),

    /// The new password and its confirmation differ.
    #[error("New passwords do not match.")]
    PasswordMismatch,

    /// The email is not registered or the password is wrong.
    ///
    /// The two cases are deliberately indistinguishable to the client.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The request did not carry a bearer token.
    #[error("Authentication required.")]
    MissingToken,

    /// The bearer token could not be decoded, has expired or has a bad signature.
    #[error("Invalid or expired token.")]
    InvalidToken,

    /// The current password given for a password change was wrong.
    #[error("Incorrect current password.")]
    IncorrectPassword,

    /// The email address is already registered to another user.
    #[error("User with this email already exists.")]
    DuplicateEmail,

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("The requested resource could not be found.")]
    NotFound,

    /// The account does not exist or belongs to another user.
    #[error("Account not found.")]
    AccountNotFound,

    /// Tried to delete a transaction that does not exist or belongs to another user.
    #[error("Transaction not found or you do not have permission to delete it.")]
    DeleteMissingTransaction,

    /// Tried to delete a card that does not exist or belongs to another user.
    #[error("Card not found or you do not have permission to delete it.")]
    DeleteMissingCard,

    /// Tried to delete a savings goal that does not exist or belongs to another user.
    #[error("Savings goal not found or you do not have permission to delete it.")]
    DeleteMissingSavingsGoal,

    /// Tried to update a savings goal that does not exist or belongs to another user.
    #[error("Savings goal not found or you do not have permission to update it.")]
    UpdateMissingSavingsGoal,

    /// An unexpected error occurred with the underlying hashing library.
    ///
    /// The error string should only be logged for debugging on the server.
    #[error("hashing failed: {0}")]
    HashingError(String),

    /// The session token could not be signed.
    #[error("could not create token: {0}")]
    TokenCreation(String),

    /// The request body is larger than the server accepts.
    #[error("The request body is too large.")]
    PayloadTooLarge,

    /// A configured CORS origin is not a valid header value.
    #[error("invalid CORS origin {0:?}")]
    InvalidOrigin(String),

    /// The configured timezone is not a canonical timezone name.
    #[error("invalid timezone {0}")]
    InvalidTimezone(String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// A connection could not be checked out of the database pool in time.
    #[error("could not get a database connection: {0}")]
    DatabasePool(String),
}

impl Error {
    /// The HTTP status code that this error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Validation(_)
            | Error::InvalidCategory
            | Error::FutureDate(_)
            | Error::PasswordMismatch => StatusCode::BAD_REQUEST,
            Error::InvalidCredentials | Error::MissingToken => StatusCode::UNAUTHORIZED,
            Error::InvalidToken | Error::IncorrectPassword => StatusCode::FORBIDDEN,
            Error::NotFound
            | Error::AccountNotFound
            | Error::DeleteMissingTransaction
            | Error::DeleteMissingCard
            | Error::DeleteMissingSavingsGoal
            | Error::UpdateMissingSavingsGoal => StatusCode::NOT_FOUND,
            Error::DuplicateEmail => StatusCode::CONFLICT,
            Error::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Error::HashingError(_)
            | Error::TokenCreation(_)
            | Error::InvalidOrigin(_)
            | Error::InvalidTimezone(_)
            | Error::SqlError(_)
            | Error::DatabasePool(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            // Code 2067 occurs when a UNIQUE constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, Some(ref desc))
                if sql_error.extended_code == 2067 && desc.ends_with("user.email") =>
            {
                Error::DuplicateEmail
            }
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl From<r2d2::Error> for Error {
    fn from(value: r2d2::Error) -> Self {
        tracing::error!("could not check out a database connection: {value}");
        Error::DatabasePool(value.to_string())
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Error::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for Error {
    fn from(rejection: PathRejection) -> Self {
        Error::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for Error {
    fn from(rejection: QueryRejection) -> Self {
        Error::Validation(rejection.body_text())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = if status.is_server_error() {
            // Any errors that are not handled above are not intended to be shown to the client.
            tracing::error!("An unexpected error occurred: {}", self);
            "An unexpected error occurred, check the server logs for more details.".to_owned()
        } else {
            self.to_string()
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}
