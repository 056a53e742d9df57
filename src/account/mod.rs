//! Accounts hold the balances that transactions move money in and out of.

mod core;
mod list_endpoint;

pub use core::{
    Account, AccountId, DEFAULT_ACCOUNT_NAME, adjust_account_balance, create_account,
    create_account_table, get_accounts, get_total_account_balance,
};
pub use list_endpoint::get_accounts_endpoint;
