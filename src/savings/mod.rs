//! Savings goals and the progress made towards them.

mod core;
mod create_endpoint;
mod delete_endpoint;
mod form;
mod list_endpoint;
mod update_endpoint;

pub use core::{SavingsGoalData, create_savings_goal, create_savings_goal_table};
pub use create_endpoint::create_savings_goal_endpoint;
pub use delete_endpoint::delete_savings_goal_endpoint;
pub use list_endpoint::get_savings_goals_endpoint;
pub use update_endpoint::update_savings_goal_endpoint;
