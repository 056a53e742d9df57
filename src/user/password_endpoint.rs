//! Defines the endpoint for changing the logged in user's password.

use axum::{Extension, Json, extract::State};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{
    AppState, Error, PasswordHash, RawPassword,
    db::DbPool,
    extract::JsonBody,
    user::core::{UserID, get_user_by_id},
};

/// The state needed to change a password.
#[derive(Clone)]
pub struct ChangePasswordState {
    /// The database connection pool.
    pub db_pool: DbPool,
    /// The bcrypt cost for hashing the new password.
    pub password_cost: u32,
}

impl axum::extract::FromRef<AppState> for ChangePasswordState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_pool: state.db_pool.clone(),
            password_cost: state.password_cost,
        }
    }
}

#[derive(Default, Deserialize)]
#[serde(default)]
pub struct ChangePasswordForm {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: Option<String>,
}

/// A route handler for changing the logged in user's password.
///
/// The current password must be given and correct. If a confirmation is
/// supplied it must match the new password.
pub async fn change_password(
    State(state): State<ChangePasswordState>,
    Extension(user_id): Extension<UserID>,
    JsonBody(form): JsonBody<ChangePasswordForm>,
) -> Result<Json<Value>, Error> {
    let new_password = RawPassword::new(&form.new_password)?;

    if let Some(confirm_password) = &form.confirm_password
        && *confirm_password != form.new_password
    {
        return Err(Error::PasswordMismatch);
    }

    let connection = state.db_pool.get()?;
    let user = get_user_by_id(user_id, &connection)?;

    if !user.password_hash.verify(&form.current_password)? {
        tracing::warn!("User {user_id} gave an incorrect current password");
        return Err(Error::IncorrectPassword);
    }

    let password_hash = PasswordHash::new(&new_password, state.password_cost)?;
    connection.execute(
        "UPDATE user SET password = ?1 WHERE id = ?2",
        (password_hash.as_ref(), user_id.as_i64()),
    )?;

    tracing::info!("User {user_id} changed their password");

    Ok(Json(json!({ "message": "Password updated successfully" })))
}
