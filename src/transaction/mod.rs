//! Transaction management for the finance dashboard.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and the queries that keep account balances in step with it
//! - Handlers for listing, creating and deleting transactions

mod core;
mod create_endpoint;
mod delete_endpoint;
mod list_endpoint;

pub use core::{
    NewTransaction, TransactionType, create_transaction, create_transaction_table,
};
pub use create_endpoint::create_transaction_endpoint;
pub use delete_endpoint::delete_transaction_endpoint;
pub use list_endpoint::{get_all_transactions, get_recent_transactions};
