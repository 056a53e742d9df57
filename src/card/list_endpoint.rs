//! Defines the endpoint for listing the user's saved cards.

use axum::{
    Extension, Json,
    extract::{FromRef, State},
};

use crate::{
    AppState, Error, UserID,
    card::core::{Card, get_cards},
    db::DbPool,
};

/// The state needed to manage cards.
#[derive(Clone)]
pub struct CardState {
    /// The database connection pool.
    pub db_pool: DbPool,
}

impl FromRef<AppState> for CardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_pool: state.db_pool.clone(),
        }
    }
}

/// A route handler that responds with the user's cards, newest first.
///
/// Only the last four digits of each card number are included.
pub async fn get_cards_endpoint(
    State(state): State<CardState>,
    Extension(user_id): Extension<UserID>,
) -> Result<Json<Vec<Card>>, Error> {
    let connection = state.db_pool.get()?;

    get_cards(user_id, &connection).map(Json)
}
