//! Application router configuration with protected and unprotected route definitions.

use std::path::Path;

use axum::{
    Json, Router,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use serde_json::json;
use tower_http::{cors::CorsLayer, services::ServeDir};

use crate::{
    AppState, Error,
    account::get_accounts_endpoint,
    auth::{auth_guard, log_in, sign_up},
    card::{create_card_endpoint, delete_card_endpoint, get_cards_endpoint},
    category::get_categories_endpoint,
    dashboard::{get_chart_data, get_summary},
    endpoints,
    logging::logging_middleware,
    savings::{
        create_savings_goal_endpoint, delete_savings_goal_endpoint, get_savings_goals_endpoint,
        update_savings_goal_endpoint,
    },
    transaction::{
        create_transaction_endpoint, delete_transaction_endpoint, get_all_transactions,
        get_recent_transactions,
    },
    user::{
        change_password, get_user_profile, update_avatar, update_preferences, update_user_profile,
    },
};

/// Return a router with all the app's routes.
///
/// Paths that do not match an API route are served from `static_dir` when it
/// is given, otherwise they get a JSON 404 response.
/// `cors` wraps every route so that preflight requests are answered before routing.
pub fn build_router(state: AppState, static_dir: Option<&Path>, cors: CorsLayer) -> Router {
    let unprotected_routes = Router::new()
        .route(endpoints::COFFEE, get(get_coffee))
        .route(endpoints::SIGN_UP, post(sign_up))
        .route(endpoints::LOG_IN, post(log_in));

    let protected_routes = Router::new()
        .route(
            endpoints::USER,
            get(get_user_profile).put(update_user_profile),
        )
        .route(endpoints::USER_PASSWORD, put(change_password))
        .route(endpoints::USER_AVATAR, put(update_avatar))
        .route(endpoints::USER_PREFERENCES, put(update_preferences))
        .route(endpoints::SUMMARY, get(get_summary))
        .route(endpoints::CHART_DATA, get(get_chart_data))
        .route(endpoints::ACCOUNTS, get(get_accounts_endpoint))
        .route(endpoints::CATEGORIES, get(get_categories_endpoint))
        .route(
            endpoints::TRANSACTIONS,
            get(get_recent_transactions).post(create_transaction_endpoint),
        )
        .route(endpoints::ALL_TRANSACTIONS, get(get_all_transactions))
        .route(endpoints::TRANSACTION, delete(delete_transaction_endpoint))
        .route(
            endpoints::CARDS,
            get(get_cards_endpoint).post(create_card_endpoint),
        )
        .route(endpoints::CARD, delete(delete_card_endpoint))
        .route(
            endpoints::SAVINGS_GOALS,
            get(get_savings_goals_endpoint).post(create_savings_goal_endpoint),
        )
        .route(
            endpoints::SAVINGS_GOAL,
            put(update_savings_goal_endpoint).delete(delete_savings_goal_endpoint),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_guard));

    let router = protected_routes.merge(unprotected_routes);

    let router = match static_dir {
        Some(static_dir) => router.fallback_service(ServeDir::new(static_dir)),
        None => router.fallback(get_404_not_found),
    };

    router
        .with_state(state)
        .layer(middleware::from_fn(logging_middleware))
        .layer(cors)
}

/// Attempt to get a cup of coffee from the server.
async fn get_coffee() -> Response {
    (
        StatusCode::IM_A_TEAPOT,
        Json(json!({ "message": "I'm a teapot" })),
    )
        .into_response()
}

async fn get_404_not_found() -> Error {
    Error::NotFound
}
