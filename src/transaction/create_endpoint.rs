//! Defines the endpoint for creating a new transaction.

use axum::{
    Extension, Json,
    extract::{FromRef, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    AppState, Error, UserID,
    account::AccountId,
    category::CategoryId,
    db::DbPool,
    extract::{JsonBody, positive_amount, required_text},
    timezone::local_today,
    transaction::core::{
        NewTransaction, Transaction, TransactionType, create_transaction, date_format::DATE_FORMAT,
    },
};

/// The state needed to create a transaction.
#[derive(Clone)]
pub struct CreateTransactionState {
    /// The database connection pool.
    pub db_pool: DbPool,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_pool: state.db_pool.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The JSON data for creating a transaction.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TransactionForm {
    /// Text detailing the transaction.
    pub description: String,
    /// The value of the transaction in dollars.
    pub amount: Option<f64>,
    /// Whether the money was earned or spent.
    #[serde(rename = "type")]
    pub transaction_type: Option<TransactionType>,
    /// The category of the transaction.
    pub category_id: Option<CategoryId>,
    /// The account the transaction is recorded against.
    pub account_id: Option<AccountId>,
    /// The date when the transaction occurred, defaults to today.
    pub date: Option<String>,
}

/// The response body for a created transaction.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateTransactionResponse {
    pub message: String,
    pub transaction: Transaction,
}

/// A route handler for creating a new transaction and updating the balance of its account.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
    Extension(user_id): Extension<UserID>,
    JsonBody(form): JsonBody<TransactionForm>,
) -> Result<(StatusCode, Json<CreateTransactionResponse>), Error> {
    let today = local_today(&state.local_timezone)?;
    let new_transaction = validate_form(form, today)?;

    let mut connection = state.db_pool.get()?;
    let transaction = create_transaction(new_transaction, user_id, &mut connection)?;

    tracing::info!(
        "User {user_id} added transaction {} to account {}",
        transaction.id,
        transaction.account_id
    );

    Ok((
        StatusCode::CREATED,
        Json(CreateTransactionResponse {
            message: "Transaction added successfully".to_owned(),
            transaction,
        }),
    ))
}

fn validate_form(form: TransactionForm, today: Date) -> Result<NewTransaction, Error> {
    let description = required_text("Description", &form.description)?;
    let amount = positive_amount("Amount", form.amount)?;
    let transaction_type = form
        .transaction_type
        .ok_or_else(|| Error::Validation("Type is required.".to_owned()))?;
    let category_id = form
        .category_id
        .ok_or_else(|| Error::Validation("Category ID is required.".to_owned()))?;
    let account_id = form
        .account_id
        .ok_or_else(|| Error::Validation("Account ID is required.".to_owned()))?;

    let date = match form.date.as_deref().map(str::trim) {
        None | Some("") => today,
        Some(raw_date) => Date::parse(raw_date, DATE_FORMAT).map_err(|_| {
            Error::Validation(format!("{raw_date} is not a valid date, expected YYYY-MM-DD."))
        })?,
    };

    if date > today {
        return Err(Error::FutureDate(date));
    }

    Ok(NewTransaction {
        account_id,
        category_id,
        description,
        amount,
        transaction_type,
        date,
    })
}


#[cfg(test)]
mod endpoint_tests {
    use axum::http::StatusCode;
    use serde_json::{Value, json};

    use crate::test_utils::{get_default_account_id, get_test_server, sign_up_and_log_in};

    use super::CreateTransactionResponse;

    #[tokio::test]
    async fn create_income_increases_balance() {
        let server = get_test_server();
        let user = sign_up_and_log_in(&server, "Alice", "alice@example.com").await;
        let account_id = get_default_account_id(&server, &user).await;

        let response = server
            .post("/api/transactions")
            .authorization_bearer(&user.token)
            .json(&json!({
                "description": "Pay day",
                "amount": 100.0,
                "type": "income",
                "category_id": 7,
                "account_id": account_id,
            }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let body = response.json::<CreateTransactionResponse>();
        assert_eq!(body.message, "Transaction added successfully");
        assert_eq!(body.transaction.amount, 100.0);

        let accounts = server
            .get("/api/accounts")
            .authorization_bearer(&user.token)
            .await
            .json::<Value>();
        assert_eq!(accounts[0]["balance"], json!(100.0));
    }

    #[tokio::test]
    async fn create_fails_on_invalid_category() {
        let server = get_test_server();
        let user = sign_up_and_log_in(&server, "Alice", "alice@example.com").await;
        let account_id = get_default_account_id(&server, &user).await;

        server
            .post("/api/transactions")
            .authorization_bearer(&user.token)
            .json(&json!({
                "description": "Mystery",
                "amount": 10.0,
                "type": "expense",
                "category_id": 999,
                "account_id": account_id,
            }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn create_fails_on_other_users_account() {
        let server = get_test_server();
        let alice = sign_up_and_log_in(&server, "Alice", "alice@example.com").await;
        let bob = sign_up_and_log_in(&server, "Bob", "bob@example.com").await;
        let alice_account_id = get_default_account_id(&server, &alice).await;

        server
            .post("/api/transactions")
            .authorization_bearer(&bob.token)
            .json(&json!({
                "description": "Sneaky",
                "amount": 10.0,
                "type": "income",
                "category_id": 1,
                "account_id": alice_account_id,
            }))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn create_fails_on_unknown_type() {
        let server = get_test_server();
        let user = sign_up_and_log_in(&server, "Alice", "alice@example.com").await;
        let account_id = get_default_account_id(&server, &user).await;

        server
            .post("/api/transactions")
            .authorization_bearer(&user.token)
            .json(&json!({
                "description": "Refund",
                "amount": 10.0,
                "type": "refund",
                "category_id": 1,
                "account_id": account_id,
            }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn create_fails_on_future_date() {
        let server = get_test_server();
        let user = sign_up_and_log_in(&server, "Alice", "alice@example.com").await;
        let account_id = get_default_account_id(&server, &user).await;

        server
            .post("/api/transactions")
            .authorization_bearer(&user.token)
            .json(&json!({
                "description": "Time travel",
                "amount": 10.0,
                "type": "expense",
                "category_id": 1,
                "account_id": account_id,
                "date": "9999-12-31",
            }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }
}
