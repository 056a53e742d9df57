//! Defines the endpoint for deleting a transaction.

use axum::{
    Extension, Json,
    extract::{FromRef, State},
};
use serde_json::{Value, json};

use crate::{
    AppState, Error, UserID,
    db::DbPool,
    extract::PathParam,
    transaction::core::{TransactionId, delete_transaction},
};

/// The state needed to delete a transaction.
#[derive(Clone)]
pub struct DeleteTransactionState {
    /// The database connection pool.
    pub db_pool: DbPool,
}

impl FromRef<AppState> for DeleteTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_pool: state.db_pool.clone(),
        }
    }
}

/// A route handler for deleting a transaction, the account balance is updated to match.
pub async fn delete_transaction_endpoint(
    State(state): State<DeleteTransactionState>,
    Extension(user_id): Extension<UserID>,
    PathParam(transaction_id): PathParam<TransactionId>,
) -> Result<Json<Value>, Error> {
    let mut connection = state.db_pool.get()?;
    delete_transaction(transaction_id, user_id, &mut connection)?;

    tracing::info!("User {user_id} deleted transaction {transaction_id}");

    Ok(Json(json!({ "message": "Transaction deleted successfully" })))
}
