//! This file defines the route for handling log-in requests.
//! The rest of the auth module handles the lower level token logic.

use axum::{
    Json,
    extract::{FromRef, State},
};
use serde::{Deserialize, Serialize};
use time::Duration;

use crate::{
    AppState, Error,
    auth::token::{TokenKeys, encode_token},
    db::DbPool,
    extract::JsonBody,
    user::{UserID, get_user_by_email},
};

/// The state needed to perform a login.
#[derive(Clone)]
pub struct LogInState {
    /// The database connection pool.
    pub db_pool: DbPool,
    /// The keys for signing session tokens.
    pub token_keys: TokenKeys,
    /// How long issued tokens stay valid.
    pub token_duration: Duration,
}

impl FromRef<AppState> for LogInState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_pool: state.db_pool.clone(),
            token_keys: state.token_keys.clone(),
            token_duration: state.token_duration,
        }
    }
}

/// The credentials entered by a user when logging in.
#[derive(Default, Deserialize)]
#[serde(default)]
pub struct LogInForm {
    pub email: String,
    pub password: String,
}

/// The response body for a successful log-in.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogInResponse {
    pub message: String,
    pub token: String,
    pub user_id: UserID,
}

/// Handler for log-in requests via the POST method.
///
/// An unknown email and a wrong password both result in [Error::InvalidCredentials].
pub async fn log_in(
    State(state): State<LogInState>,
    JsonBody(form): JsonBody<LogInForm>,
) -> Result<Json<LogInResponse>, Error> {
    let email = form.email.trim();

    if email.is_empty() || form.password.is_empty() {
        return Err(Error::Validation(
            "Email and password are required.".to_owned(),
        ));
    }

    let user = {
        let connection = state.db_pool.get()?;

        match get_user_by_email(email, &connection) {
            Ok(user) => user,
            Err(Error::NotFound) => return Err(Error::InvalidCredentials),
            Err(error) => return Err(error),
        }
    };

    if !user.password_hash.verify(&form.password)? {
        tracing::info!("Failed log-in attempt for user {}", user.id);
        return Err(Error::InvalidCredentials);
    }

    let token = encode_token(user.id, state.token_duration, &state.token_keys)?;

    tracing::info!("User {} logged in", user.id);

    Ok(Json(LogInResponse {
        message: "Login successful".to_owned(),
        token,
        user_id: user.id,
    }))
}
