//! Defines the endpoint for deleting a savings goal.

use axum::{Extension, Json, extract::State};
use serde_json::{Value, json};

use crate::{
    Error, UserID,
    extract::PathParam,
    savings::{
        core::{SavingsGoalId, delete_savings_goal},
        list_endpoint::SavingsState,
    },
};

/// A route handler for deleting one of the user's savings goals.
pub async fn delete_savings_goal_endpoint(
    State(state): State<SavingsState>,
    Extension(user_id): Extension<UserID>,
    PathParam(goal_id): PathParam<SavingsGoalId>,
) -> Result<Json<Value>, Error> {
    let connection = state.db_pool.get()?;

    match delete_savings_goal(goal_id, user_id, &connection)? {
        0 => Err(Error::DeleteMissingSavingsGoal),
        _ => {
            tracing::info!("User {user_id} deleted savings goal {goal_id}");
            Ok(Json(json!({ "message": "Savings goal deleted successfully" })))
        }
    }
}
