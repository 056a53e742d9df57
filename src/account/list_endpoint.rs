//! Defines the endpoint for listing the user's accounts.

use axum::{
    Extension, Json,
    extract::{FromRef, State},
};

use crate::{
    AppState, Error, UserID,
    account::core::{Account, get_accounts},
    db::DbPool,
};

/// The state needed to list accounts.
#[derive(Clone)]
pub struct AccountsState {
    /// The database connection pool.
    pub db_pool: DbPool,
}

impl FromRef<AppState> for AccountsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_pool: state.db_pool.clone(),
        }
    }
}

/// A route handler that responds with the logged in user's accounts and balances.
pub async fn get_accounts_endpoint(
    State(state): State<AccountsState>,
    Extension(user_id): Extension<UserID>,
) -> Result<Json<Vec<Account>>, Error> {
    let connection = state.db_pool.get()?;

    get_accounts(user_id, &connection).map(Json)
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use crate::{
        account::{Account, DEFAULT_ACCOUNT_NAME},
        test_utils::{get_test_server, sign_up_and_log_in},
    };

    #[tokio::test]
    async fn lists_only_own_accounts() {
        let server = get_test_server();
        let alice = sign_up_and_log_in(&server, "Alice", "alice@example.com").await;
        sign_up_and_log_in(&server, "Bob", "bob@example.com").await;

        let response = server
            .get("/api/accounts")
            .authorization_bearer(&alice.token)
            .await;

        response.assert_status_ok();
        let accounts = response.json::<Vec<Account>>();
        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0].name, DEFAULT_ACCOUNT_NAME);
        assert_eq!(accounts[0].balance, 0.0);
    }

    #[tokio::test]
    async fn requires_token() {
        let server = get_test_server();

        server
            .get("/api/accounts")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }
}
