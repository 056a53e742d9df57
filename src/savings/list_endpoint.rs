//! Defines the endpoint for listing the user's savings goals.

use axum::{
    Extension, Json,
    extract::{FromRef, State},
};
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error, UserID,
    db::DbPool,
    savings::core::{SavingsGoal, get_savings_goals},
};

/// The state needed to manage savings goals.
#[derive(Clone)]
pub struct SavingsState {
    /// The database connection pool.
    pub db_pool: DbPool,
}

impl FromRef<AppState> for SavingsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_pool: state.db_pool.clone(),
        }
    }
}

/// A savings goal together with how far along it is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsGoalListItem {
    /// The stored goal, flattened into the same JSON object.
    #[serde(flatten)]
    pub goal: SavingsGoal,
    /// The ratio of the current amount to the target amount.
    pub progress: f64,
}

/// A route handler that responds with the user's savings goals, newest first.
pub async fn get_savings_goals_endpoint(
    State(state): State<SavingsState>,
    Extension(user_id): Extension<UserID>,
) -> Result<Json<Vec<SavingsGoalListItem>>, Error> {
    let connection = state.db_pool.get()?;

    let goals = get_savings_goals(user_id, &connection)?
        .into_iter()
        .map(|goal| SavingsGoalListItem {
            progress: goal.progress(),
            goal,
        })
        .collect();

    Ok(Json(goals))
}
