//! The totals shown at the top of the dashboard.

use axum::{
    Extension, Json,
    extract::{FromRef, State},
};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error, UserID,
    account::get_total_account_balance,
    dashboard::months::YearMonth,
    db::DbPool,
    timezone::local_today,
};

/// The state needed for the dashboard endpoints.
#[derive(Clone)]
pub struct DashboardState {
    /// The database connection pool.
    pub db_pool: DbPool,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_pool: state.db_pool.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The user's balance and the current month's cash flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// The sum of the balances of all of the user's accounts.
    pub total_balance: f64,
    /// Income for the current month.
    pub total_income: f64,
    /// Expenses for the current month.
    pub total_expenses: f64,
    /// Income minus expenses for the current month.
    pub savings: f64,
}

/// A route handler that responds with the dashboard summary for the logged in user.
pub async fn get_summary(
    State(state): State<DashboardState>,
    Extension(user_id): Extension<UserID>,
) -> Result<Json<Summary>, Error> {
    let current_month = YearMonth::containing(local_today(&state.local_timezone)?);
    let connection = state.db_pool.get()?;

    calculate_summary(user_id, current_month, &connection).map(Json)
}

fn calculate_summary(
    user_id: UserID,
    month: YearMonth,
    connection: &Connection,
) -> Result<Summary, Error> {
    let total_balance = get_total_account_balance(user_id, connection)?;

    let (total_income, total_expenses): (f64, f64) = connection.query_row(
        "SELECT
            COALESCE(SUM(CASE WHEN type = 'income' THEN amount END), 0.0),
            COALESCE(SUM(CASE WHEN type = 'expense' THEN amount END), 0.0)
        FROM \"transaction\"
        WHERE user_id = ?1 AND date >= ?2 AND date < ?3",
        (user_id.as_i64(), month.first_day(), month.next().first_day()),
        |row| Ok((row.get(0)?, row.get(1)?)),
    )?;

    Ok(Summary {
        total_balance,
        total_income,
        total_expenses,
        savings: total_income - total_expenses,
    })
}

#[cfg(test)]
mod tests {
    use time::{Date, macros::date};

    use crate::{
        UserID,
        dashboard::months::YearMonth,
        test_utils::get_test_connection,
        transaction::{NewTransaction, TransactionType, create_transaction},
    };

    use super::{Summary, calculate_summary};

    fn add(
        connection: &mut rusqlite::Connection,
        user_id: UserID,
        account_id: i64,
        amount: f64,
        transaction_type: TransactionType,
        date: Date,
    ) {
        create_transaction(
            NewTransaction {
                account_id,
                category_id: 1,
                description: "test".to_owned(),
                amount,
                transaction_type,
                date,
            },
            user_id,
            connection,
        )
        .unwrap();
    }

    #[test]
    fn sums_current_month_only() {
        let (mut connection, user_id, account_id) = get_test_connection();
        add(&mut connection, user_id, account_id, 3000.0, TransactionType::Income, date!(2025 - 03 - 01));
        add(&mut connection, user_id, account_id, 250.0, TransactionType::Expense, date!(2025 - 03 - 31));
        add(&mut connection, user_id, account_id, 500.0, TransactionType::Income, date!(2025 - 02 - 28));
        add(&mut connection, user_id, account_id, 100.0, TransactionType::Expense, date!(2025 - 04 - 01));

        let summary = calculate_summary(
            user_id,
            YearMonth::containing(date!(2025 - 03 - 15)),
            &connection,
        )
        .unwrap();

        assert_eq!(
            summary,
            Summary {
                total_balance: 3150.0,
                total_income: 3000.0,
                total_expenses: 250.0,
                savings: 2750.0,
            }
        );
    }

    #[test]
    fn empty_month_is_all_zeros() {
        let (connection, user_id, _) = get_test_connection();

        let summary = calculate_summary(
            user_id,
            YearMonth::containing(date!(2025 - 03 - 15)),
            &connection,
        )
        .unwrap();

        assert_eq!(
            summary,
            Summary {
                total_balance: 0.0,
                total_income: 0.0,
                total_expenses: 0.0,
                savings: 0.0,
            }
        );
    }
}
