//! Defines the endpoint for saving a new card.

use axum::{Extension, Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use crate::{
    Error, UserID,
    card::{
        core::{Card, NewCard, create_card, last_four_digits},
        list_endpoint::CardState,
    },
    extract::{JsonBody, required_text},
};

/// The JSON data for saving a card.
///
/// Any other fields sent by the client, such as a CVV, are dropped.
#[derive(Default, Deserialize)]
#[serde(default)]
pub struct CardForm {
    pub card_number: String,
    pub card_holder: String,
    pub expiry_date: String,
    #[serde(rename = "type")]
    pub card_type: String,
}

/// The response body for a saved card.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateCardResponse {
    pub message: String,
    pub card: Card,
}

/// A route handler for saving a card, only the last four digits of the number are stored.
pub async fn create_card_endpoint(
    State(state): State<CardState>,
    Extension(user_id): Extension<UserID>,
    JsonBody(form): JsonBody<CardForm>,
) -> Result<(StatusCode, Json<CreateCardResponse>), Error> {
    let new_card = validate_form(&form)?;

    let connection = state.db_pool.get()?;
    let card = create_card(new_card, user_id, &connection)?;

    tracing::info!("User {user_id} added card {}", card.id);

    Ok((
        StatusCode::CREATED,
        Json(CreateCardResponse {
            message: "Card added successfully".to_owned(),
            card,
        }),
    ))
}

fn validate_form(form: &CardForm) -> Result<NewCard, Error> {
    if form.card_number.trim().is_empty() {
        return Err(Error::Validation("Card number is required.".to_owned()));
    }

    Ok(NewCard {
        last4: last_four_digits(&form.card_number)?,
        card_holder: required_text("Card holder", &form.card_holder)?,
        expiry_date: required_text("Expiry date", &form.expiry_date)?,
        card_type: required_text("Type", &form.card_type)?,
    })
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::{Value, json};

    use crate::test_utils::{get_test_server, sign_up_and_log_in};

    use super::CreateCardResponse;

    #[tokio::test]
    async fn stores_only_last_four_digits() {
        let server = get_test_server();
        let user = sign_up_and_log_in(&server, "Alice", "alice@example.com").await;

        let response = server
            .post("/api/cards")
            .authorization_bearer(&user.token)
            .json(&json!({
                "card_number": "4111111111111234",
                "card_holder": "Alice Smith",
                "expiry_date": "12/27",
                "cvv": "123",
                "type": "visa",
            }))
            .await;

        response.assert_status(StatusCode::CREATED);
        assert_eq!(response.json::<CreateCardResponse>().card.last4, "1234");

        let cards = server
            .get("/api/cards")
            .authorization_bearer(&user.token)
            .await
            .json::<Value>();
        let card = cards[0].as_object().unwrap();
        assert_eq!(card["last4"], "1234");
        assert_eq!(card["card_holder"], "Alice Smith");
        assert!(!card.contains_key("card_number"));
        assert!(!card.contains_key("cvv"));
    }

    #[tokio::test]
    async fn fails_on_invalid_card_number() {
        let server = get_test_server();
        let user = sign_up_and_log_in(&server, "Alice", "alice@example.com").await;

        for card_number in ["", "12", "abcd-efgh"] {
            server
                .post("/api/cards")
                .authorization_bearer(&user.token)
                .json(&json!({
                    "card_number": card_number,
                    "card_holder": "Alice Smith",
                    "expiry_date": "12/27",
                    "type": "visa",
                }))
                .await
                .assert_status(StatusCode::BAD_REQUEST);
        }
    }

    #[tokio::test]
    async fn fails_on_missing_holder() {
        let server = get_test_server();
        let user = sign_up_and_log_in(&server, "Alice", "alice@example.com").await;

        server
            .post("/api/cards")
            .authorization_bearer(&user.token)
            .json(&json!({
                "card_number": "4111111111111234",
                "expiry_date": "12/27",
                "type": "visa",
            }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }
}
