//! Defines the endpoints for listing the user's transactions.

use axum::{
    Extension, Json,
    extract::{FromRef, Query, State},
};
use serde::Deserialize;

use crate::{
    AppState, Error, UserID,
    db::DbPool,
    transaction::core::{TransactionListItem, get_transactions},
};

/// How many transactions are returned for the recent transactions list by default.
pub const DEFAULT_RECENT_LIMIT: u32 = 5;

/// The state needed to list transactions.
#[derive(Clone)]
pub struct ListTransactionsState {
    /// The database connection pool.
    pub db_pool: DbPool,
}

impl FromRef<AppState> for ListTransactionsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_pool: state.db_pool.clone(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct RecentTransactionsQuery {
    /// The maximum number of transactions to return.
    ///
    /// Kept as a string so that bad values fall back to the default instead of failing.
    pub limit: Option<String>,
}

/// A route handler that responds with the user's most recent transactions.
pub async fn get_recent_transactions(
    State(state): State<ListTransactionsState>,
    Extension(user_id): Extension<UserID>,
    Query(query): Query<RecentTransactionsQuery>,
) -> Result<Json<Vec<TransactionListItem>>, Error> {
    let limit = parse_limit(query.limit.as_deref());
    let connection = state.db_pool.get()?;

    get_transactions(user_id, Some(limit), &connection).map(Json)
}

/// A route handler that responds with every one of the user's transactions.
pub async fn get_all_transactions(
    State(state): State<ListTransactionsState>,
    Extension(user_id): Extension<UserID>,
) -> Result<Json<Vec<TransactionListItem>>, Error> {
    let connection = state.db_pool.get()?;

    get_transactions(user_id, None, &connection).map(Json)
}

fn parse_limit(raw_limit: Option<&str>) -> u32 {
    raw_limit
        .and_then(|limit| limit.trim().parse::<u32>().ok())
        .filter(|&limit| limit > 0)
        .unwrap_or(DEFAULT_RECENT_LIMIT)
}
