//! Defines the endpoints for the user's avatar and display preferences.

use axum::{Extension, Json, extract::State};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{
    Error,
    extract::JsonBody,
    user::{core::UserID, profile_endpoint::UserState},
};

#[derive(Default, Deserialize)]
#[serde(default)]
pub struct AvatarForm {
    pub avatar_url: Option<String>,
}

/// A route handler for setting the link to the user's profile picture.
pub async fn update_avatar(
    State(state): State<UserState>,
    Extension(user_id): Extension<UserID>,
    JsonBody(form): JsonBody<AvatarForm>,
) -> Result<Json<Value>, Error> {
    let avatar_url = match form.avatar_url.as_deref().map(str::trim) {
        Some(url) if !url.is_empty() => url.to_owned(),
        _ => return Err(Error::Validation("Avatar URL is required.".to_owned())),
    };

    let connection = state.db_pool.get()?;
    let rows_affected = connection.execute(
        "UPDATE user SET avatar_url = ?1 WHERE id = ?2",
        (&avatar_url, user_id.as_i64()),
    )?;

    if rows_affected == 0 {
        return Err(Error::NotFound);
    }

    Ok(Json(json!({
        "message": "Avatar updated successfully",
        "avatar_url": avatar_url,
    })))
}

#[derive(Default, Deserialize)]
#[serde(default)]
pub struct PreferencesForm {
    pub theme: Option<String>,
}

/// A route handler for saving the user's colour theme.
pub async fn update_preferences(
    State(state): State<UserState>,
    Extension(user_id): Extension<UserID>,
    JsonBody(form): JsonBody<PreferencesForm>,
) -> Result<Json<Value>, Error> {
    let theme = match form.theme.as_deref().map(str::trim) {
        Some(theme) if !theme.is_empty() => theme.to_owned(),
        _ => return Err(Error::Validation("Theme preference is required.".to_owned())),
    };

    let connection = state.db_pool.get()?;
    let rows_affected = connection.execute(
        "UPDATE user SET theme = ?1 WHERE id = ?2",
        (&theme, user_id.as_i64()),
    )?;

    if rows_affected == 0 {
        return Err(Error::NotFound);
    }

    Ok(Json(json!({ "message": "Preferences updated successfully" })))
}
