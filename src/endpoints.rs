//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/api/cards/{card_id}', use [format_endpoint].

/// The route to request a cup of coffee (experimental).
pub const COFFEE: &str = "/api/coffee";
/// The route for registering a new user.
pub const SIGN_UP: &str = "/api/auth/signup";
/// The route for logging in a user.
pub const LOG_IN: &str = "/api/auth/login";
/// The route for the logged in user's profile.
pub const USER: &str = "/api/user";
/// The route for changing the logged in user's password.
pub const USER_PASSWORD: &str = "/api/user/password";
/// The route for updating the logged in user's avatar.
pub const USER_AVATAR: &str = "/api/user/avatar";
/// The route for updating the logged in user's display preferences.
pub const USER_PREFERENCES: &str = "/api/user/preferences";
/// The route for the dashboard totals.
pub const SUMMARY: &str = "/api/summary";
/// The route for the monthly income and expense chart.
pub const CHART_DATA: &str = "/api/chart-data";
/// The route to list accounts.
pub const ACCOUNTS: &str = "/api/accounts";
/// The route to list categories.
pub const CATEGORIES: &str = "/api/categories";
/// The route to list recent transactions and create transactions.
pub const TRANSACTIONS: &str = "/api/transactions";
/// The route to list every transaction.
pub const ALL_TRANSACTIONS: &str = "/api/transactions/all";
/// The route to access a single transaction.
pub const TRANSACTION: &str = "/api/transactions/{transaction_id}";
/// The route to list and create cards.
pub const CARDS: &str = "/api/cards";
/// The route to access a single card.
pub const CARD: &str = "/api/cards/{card_id}";
/// The route to list and create savings goals.
pub const SAVINGS_GOALS: &str = "/api/savings";
/// The route to access a single savings goal.
pub const SAVINGS_GOAL: &str = "/api/savings/{goal_id}";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/api/cards/{card_id}', '{card_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
#[cfg(test)]
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_owned();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map_or(endpoint_path.len(), |end| param_start + end + 1);

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}
