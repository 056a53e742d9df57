//! Defines the endpoint for deleting a saved card.

use axum::{Extension, Json, extract::State};
use serde_json::{Value, json};

use crate::{
    Error, UserID,
    card::{
        core::{CardId, delete_card},
        list_endpoint::CardState,
    },
    extract::PathParam,
};

/// A route handler for deleting one of the user's cards.
pub async fn delete_card_endpoint(
    State(state): State<CardState>,
    Extension(user_id): Extension<UserID>,
    PathParam(card_id): PathParam<CardId>,
) -> Result<Json<Value>, Error> {
    let connection = state.db_pool.get()?;

    match delete_card(card_id, user_id, &connection)? {
        0 => Err(Error::DeleteMissingCard),
        _ => {
            tracing::info!("User {user_id} deleted card {card_id}");
            Ok(Json(json!({ "message": "Card deleted successfully" })))
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::{Value, json};

    use crate::{
        card::create_endpoint::CreateCardResponse,
        endpoints::{self, format_endpoint},
        test_utils::{TestUser, get_test_server, sign_up_and_log_in},
    };

    async fn add_card(server: &axum_test::TestServer, user: &TestUser) -> i64 {
        server
            .post("/api/cards")
            .authorization_bearer(&user.token)
            .json(&json!({
                "card_number": "5500 0000 0000 0004",
                "card_holder": "Alice Smith",
                "expiry_date": "01/28",
                "type": "mastercard",
            }))
            .await
            .json::<CreateCardResponse>()
            .card
            .id
    }

    #[tokio::test]
    async fn deletes_own_card() {
        let server = get_test_server();
        let user = sign_up_and_log_in(&server, "Alice", "alice@example.com").await;
        let card_id = add_card(&server, &user).await;

        server
            .delete(&format_endpoint(endpoints::CARD, card_id))
            .authorization_bearer(&user.token)
            .await
            .assert_status_ok();

        server
            .get("/api/cards")
            .authorization_bearer(&user.token)
            .await
            .assert_json(&json!([]));
    }

    #[tokio::test]
    async fn other_users_card_is_not_found() {
        let server = get_test_server();
        let alice = sign_up_and_log_in(&server, "Alice", "alice@example.com").await;
        let bob = sign_up_and_log_in(&server, "Bob", "bob@example.com").await;
        let card_id = add_card(&server, &alice).await;

        server
            .delete(&format_endpoint(endpoints::CARD, card_id))
            .authorization_bearer(&bob.token)
            .await
            .assert_status(StatusCode::NOT_FOUND);

        let cards = server
            .get("/api/cards")
            .authorization_bearer(&alice.token)
            .await
            .json::<Value>();
        assert_eq!(cards.as_array().unwrap().len(), 1);
    }
}
