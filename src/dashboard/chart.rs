//! The monthly income and expense chart on the dashboard.

use std::collections::HashMap;

use axum::{
    Extension, Json,
    extract::State,
};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{
    Error, UserID,
    dashboard::{
        months::{YearMonth, trailing_months},
        summary::DashboardState,
    },
    timezone::local_today,
};

/// How many months are shown in the chart.
const CHART_MONTHS: usize = 12;

/// Income and expenses per month, oldest month first.
///
/// The three vectors always have the same length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    /// The short month names, oldest first.
    pub labels: Vec<String>,
    /// The total income for each month.
    pub income_data: Vec<f64>,
    /// The total expenses for each month.
    pub expense_data: Vec<f64>,
}

/// A route handler that responds with the income and expenses for the last twelve months.
pub async fn get_chart_data(
    State(state): State<DashboardState>,
    Extension(user_id): Extension<UserID>,
) -> Result<Json<ChartData>, Error> {
    let current_month = YearMonth::containing(local_today(&state.local_timezone)?);
    let connection = state.db_pool.get()?;

    build_chart_data(user_id, current_month, &connection).map(Json)
}

fn build_chart_data(
    user_id: UserID,
    current_month: YearMonth,
    connection: &Connection,
) -> Result<ChartData, Error> {
    let months = trailing_months(current_month, CHART_MONTHS);
    let (Some(first_month), Some(last_month)) = (months.first(), months.last()) else {
        return Ok(ChartData {
            labels: Vec::new(),
            income_data: Vec::new(),
            expense_data: Vec::new(),
        });
    };

    let totals_by_month: HashMap<String, (f64, f64)> = connection
        .prepare(
            "SELECT
                substr(date, 1, 7) AS month,
                COALESCE(SUM(CASE WHEN type = 'income' THEN amount END), 0.0),
                COALESCE(SUM(CASE WHEN type = 'expense' THEN amount END), 0.0)
            FROM \"transaction\"
            WHERE user_id = ?1 AND date >= ?2 AND date < ?3
            GROUP BY month",
        )?
        .query_map(
            (
                user_id.as_i64(),
                first_month.first_day(),
                last_month.next().first_day(),
            ),
            |row| -> rusqlite::Result<(String, (f64, f64))> {
                Ok((row.get(0)?, (row.get(1)?, row.get(2)?)))
            },
        )?
        .collect::<Result<_, _>>()?;

    let mut chart_data = ChartData {
        labels: Vec::with_capacity(months.len()),
        income_data: Vec::with_capacity(months.len()),
        expense_data: Vec::with_capacity(months.len()),
    };

    for month in &months {
        let (income, expenses) = totals_by_month
            .get(&month.key())
            .copied()
            .unwrap_or((0.0, 0.0));

        chart_data.labels.push(month.label().to_owned());
        chart_data.income_data.push(income);
        chart_data.expense_data.push(expenses);
    }

    Ok(chart_data)
}
