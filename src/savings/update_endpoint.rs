//! Defines the endpoint for replacing a savings goal.

use axum::{Extension, Json, extract::State};
use serde_json::{Value, json};

use crate::{
    Error, UserID,
    extract::{JsonBody, PathParam},
    savings::{
        core::{SavingsGoalId, update_savings_goal},
        form::SavingsGoalForm,
        list_endpoint::SavingsState,
    },
};

/// A route handler for replacing the name and amounts of one of the user's savings goals.
pub async fn update_savings_goal_endpoint(
    State(state): State<SavingsState>,
    Extension(user_id): Extension<UserID>,
    PathParam(goal_id): PathParam<SavingsGoalId>,
    JsonBody(form): JsonBody<SavingsGoalForm>,
) -> Result<Json<Value>, Error> {
    let goal = form.validate()?;

    let connection = state.db_pool.get()?;

    match update_savings_goal(goal_id, &goal, user_id, &connection)? {
        0 => Err(Error::UpdateMissingSavingsGoal),
        _ => Ok(Json(json!({ "message": "Savings goal updated successfully" }))),
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::{
        endpoints::{self, format_endpoint},
        savings::{core::SavingsGoal, create_endpoint::CreateSavingsGoalResponse},
        test_utils::{get_test_server, sign_up_and_log_in},
    };

    #[tokio::test]
    async fn replaces_goal() {
        let server = get_test_server();
        let user = sign_up_and_log_in(&server, "Alice", "alice@example.com").await;
        let goal = server
            .post("/api/savings")
            .authorization_bearer(&user.token)
            .json(&json!({ "name": "Holiday", "target_amount": 2000.0, "current_amount": 100.0 }))
            .await
            .json::<CreateSavingsGoalResponse>()
            .goal;

        server
            .put(&format_endpoint(endpoints::SAVINGS_GOAL, goal.id))
            .authorization_bearer(&user.token)
            .json(&json!({ "name": "Europe", "target_amount": 3000.0, "current_amount": 500.0 }))
            .await
            .assert_status_ok();

        let goals = server
            .get("/api/savings")
            .authorization_bearer(&user.token)
            .await
            .json::<Vec<SavingsGoal>>();
        assert_eq!(
            goals,
            vec![SavingsGoal {
                id: goal.id,
                name: "Europe".to_owned(),
                target_amount: 3000.0,
                current_amount: 500.0,
            }]
        );
    }

    #[tokio::test]
    async fn missing_goal_is_not_found() {
        let server = get_test_server();
        let user = sign_up_and_log_in(&server, "Alice", "alice@example.com").await;

        server
            .put("/api/savings/404")
            .authorization_bearer(&user.token)
            .json(&json!({ "name": "Europe", "target_amount": 3000.0, "current_amount": 0.0 }))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn other_users_goal_is_not_found() {
        let server = get_test_server();
        let alice = sign_up_and_log_in(&server, "Alice", "alice@example.com").await;
        let bob = sign_up_and_log_in(&server, "Bob", "bob@example.com").await;
        let goal = server
            .post("/api/savings")
            .authorization_bearer(&alice.token)
            .json(&json!({ "name": "Holiday", "target_amount": 2000.0 }))
            .await
            .json::<CreateSavingsGoalResponse>()
            .goal;

        server
            .put(&format_endpoint(endpoints::SAVINGS_GOAL, goal.id))
            .authorization_bearer(&bob.token)
            .json(&json!({ "name": "Mine now", "target_amount": 1.0, "current_amount": 0.0 }))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
}
