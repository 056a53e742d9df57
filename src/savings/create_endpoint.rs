//! Defines the endpoint for creating a savings goal.

use axum::{Extension, Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use crate::{
    Error, UserID,
    extract::JsonBody,
    savings::{
        core::{SavingsGoal, create_savings_goal},
        form::SavingsGoalForm,
        list_endpoint::SavingsState,
    },
};

/// The response body for a created savings goal.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateSavingsGoalResponse {
    pub message: String,
    pub goal: SavingsGoal,
}

/// A route handler for creating a savings goal.
pub async fn create_savings_goal_endpoint(
    State(state): State<SavingsState>,
    Extension(user_id): Extension<UserID>,
    JsonBody(form): JsonBody<SavingsGoalForm>,
) -> Result<(StatusCode, Json<CreateSavingsGoalResponse>), Error> {
    let goal = form.validate()?;

    let connection = state.db_pool.get()?;
    let goal = create_savings_goal(goal, user_id, &connection)?;

    tracing::info!("User {user_id} created savings goal {}", goal.id);

    Ok((
        StatusCode::CREATED,
        Json(CreateSavingsGoalResponse {
            message: "Savings goal created successfully".to_owned(),
            goal,
        }),
    ))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::{
        savings::core::SavingsGoal,
        test_utils::{get_test_server, sign_up_and_log_in},
    };

    use super::CreateSavingsGoalResponse;

    #[tokio::test]
    async fn creates_goal_with_default_current_amount() {
        let server = get_test_server();
        let user = sign_up_and_log_in(&server, "Alice", "alice@example.com").await;

        let response = server
            .post("/api/savings")
            .authorization_bearer(&user.token)
            .json(&json!({ "name": "Holiday", "target_amount": 2000.0 }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let goal = response.json::<CreateSavingsGoalResponse>().goal;
        assert_eq!(goal.current_amount, 0.0);

        let goals = server
            .get("/api/savings")
            .authorization_bearer(&user.token)
            .await
            .json::<Vec<SavingsGoal>>();
        assert_eq!(goals, vec![goal]);
    }

    #[tokio::test]
    async fn fails_on_non_positive_target() {
        let server = get_test_server();
        let user = sign_up_and_log_in(&server, "Alice", "alice@example.com").await;

        server
            .post("/api/savings")
            .authorization_bearer(&user.token)
            .json(&json!({ "name": "Holiday", "target_amount": 0 }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn fails_on_string_amount() {
        let server = get_test_server();
        let user = sign_up_and_log_in(&server, "Alice", "alice@example.com").await;

        server
            .post("/api/savings")
            .authorization_bearer(&user.token)
            .json(&json!({ "name": "Holiday", "target_amount": "lots" }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }
}
