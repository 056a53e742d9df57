//! Aggregated views of a user's finances for the dashboard.

mod chart;
mod months;
mod summary;

pub use chart::get_chart_data;
pub use summary::get_summary;
