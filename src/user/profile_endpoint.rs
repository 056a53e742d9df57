//! Defines the endpoints for reading and updating the user's profile.

use axum::{
    Extension, Json,
    extract::{FromRef, State},
};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::{
    AppState, Error,
    db::DbPool,
    extract::{JsonBody, required_text},
    user::core::{UserID, get_user_by_id, is_email_taken, validate_email},
};

/// The state needed for the user profile and settings endpoints.
#[derive(Clone)]
pub struct UserState {
    /// The database connection pool.
    pub db_pool: DbPool,
}

impl FromRef<AppState> for UserState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_pool: state.db_pool.clone(),
        }
    }
}

/// The public view of a user.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    pub avatar_url: Option<String>,
    pub theme: String,
}

/// A route handler for getting the logged in user's profile.
pub async fn get_user_profile(
    State(state): State<UserState>,
    Extension(user_id): Extension<UserID>,
) -> Result<Json<UserProfile>, Error> {
    let connection = state.db_pool.get()?;
    let user = get_user_by_id(user_id, &connection)?;

    Ok(Json(UserProfile {
        name: user.name,
        email: user.email,
        avatar_url: user.avatar_url,
        theme: user.theme,
    }))
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ProfileForm {
    pub name: String,
    pub email: String,
}

/// A route handler for changing the logged in user's name and email.
pub async fn update_user_profile(
    State(state): State<UserState>,
    Extension(user_id): Extension<UserID>,
    JsonBody(form): JsonBody<ProfileForm>,
) -> Result<Json<Value>, Error> {
    let name = required_text("Name", &form.name)?;
    let email = validate_email(&form.email)?;

    let connection = state.db_pool.get()?;
    update_profile(user_id, &name, &email, &connection)?;

    tracing::info!("User {user_id} updated their profile");

    Ok(Json(json!({ "message": "Profile updated successfully" })))
}

fn update_profile(
    user_id: UserID,
    name: &str,
    email: &str,
    connection: &Connection,
) -> Result<(), Error> {
    if is_email_taken(email, user_id, connection)? {
        return Err(Error::DuplicateEmail);
    }

    let rows_affected = connection.execute(
        "UPDATE user SET name = ?1, email = ?2 WHERE id = ?3",
        (name, email, user_id.as_i64()),
    )?;

    if rows_affected == 0 {
        return Err(Error::NotFound);
    }

    Ok(())
}
