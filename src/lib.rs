//! A personal finance dashboard served as a JSON API.
//!
//! Users sign up and log in to get a bearer token, then manage their accounts,
//! transactions, payment cards and savings goals. The dashboard endpoints
//! aggregate transactions into a monthly summary and a twelve month chart.
//!
//! The app state is backed by a pooled SQLite database, see [AppState] and
//! [build_router].

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod account;
mod app_state;
mod auth;
mod card;
mod category;
mod cors;
mod dashboard;
mod db;
mod endpoints;
mod error;
mod extract;
mod logging;
mod routing;
mod savings;
mod timezone;
mod transaction;
mod user;

#[cfg(test)]
mod test_utils;

pub use account::{Account, get_accounts};
pub use app_state::{AppState, DEFAULT_TOKEN_DURATION};
pub use auth::{PasswordHash, RawPassword, register_user};
pub use card::{NewCard, create_card, last_four_digits};
pub use cors::cors_layer;
pub use db::{DEFAULT_POOL_SIZE, DbPool, create_pool, initialize as initialize_db};
pub use error::Error;
pub use logging::{LOG_BODY_LENGTH_LIMIT, REQUEST_BODY_LIMIT, logging_middleware};
pub use routing::build_router;
pub use savings::{SavingsGoalData, create_savings_goal};
pub use timezone::{get_local_offset, local_today};
pub use transaction::{NewTransaction, TransactionType, create_transaction};
pub use user::{User, UserID, get_user_by_email};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("Could not install the Ctrl+C handler: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::error!("Could not install the terminate signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}
