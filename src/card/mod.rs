//! Payment cards saved by users.

mod core;
mod create_endpoint;
mod delete_endpoint;
mod list_endpoint;

pub use core::{NewCard, create_card, create_card_table, last_four_digits};
pub use create_endpoint::create_card_endpoint;
pub use delete_endpoint::delete_card_endpoint;
pub use list_endpoint::get_cards_endpoint;
