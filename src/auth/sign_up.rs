//! Defines the endpoint for registering a new user.

use axum::{
    Json,
    extract::{FromRef, State},
    http::StatusCode,
};
use rusqlite::{Connection, TransactionBehavior};
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error, PasswordHash, RawPassword,
    account::{DEFAULT_ACCOUNT_NAME, create_account},
    db::DbPool,
    extract::{JsonBody, required_text},
    user::{User, UserID, create_user, validate_email},
};

/// The state needed to register a user.
#[derive(Clone)]
pub struct SignUpState {
    /// The database connection pool.
    pub db_pool: DbPool,
    /// The bcrypt cost for hashing passwords.
    pub password_cost: u32,
}

impl FromRef<AppState> for SignUpState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_pool: state.db_pool.clone(),
            password_cost: state.password_cost,
        }
    }
}

/// The data for registering a user.
#[derive(Default, Deserialize)]
#[serde(default)]
pub struct SignUpForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// The response body for a successful sign up.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpResponse {
    pub message: String,
    pub user_id: UserID,
}

/// A route handler for registering a new user.
///
/// The user gets a default account that transactions are recorded against.
pub async fn sign_up(
    State(state): State<SignUpState>,
    JsonBody(form): JsonBody<SignUpForm>,
) -> Result<(StatusCode, Json<SignUpResponse>), Error> {
    let name = required_text("Name", &form.name)?;
    let email = validate_email(&form.email)?;
    let password = RawPassword::new(&form.password)?;
    let password_hash = PasswordHash::new(&password, state.password_cost)?;

    let mut connection = state.db_pool.get()?;
    let user = register_user(&name, &email, &password_hash, &mut connection)?;

    tracing::info!("Registered user {}", user.id);

    Ok((
        StatusCode::CREATED,
        Json(SignUpResponse {
            message: "User registered successfully".to_owned(),
            user_id: user.id,
        }),
    ))
}

/// Create a user together with their default account.
///
/// Either both rows are created or neither is.
///
/// # Errors
///
/// Returns [Error::DuplicateEmail] if `email` is already registered.
pub fn register_user(
    name: &str,
    email: &str,
    password_hash: &PasswordHash,
    connection: &mut Connection,
) -> Result<User, Error> {
    let transaction = connection.transaction_with_behavior(TransactionBehavior::Immediate)?;

    let user = create_user(name, email, password_hash, &transaction)?;
    create_account(user.id, DEFAULT_ACCOUNT_NAME, &transaction)?;

    transaction.commit()?;

    Ok(user)
}
