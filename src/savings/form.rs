use serde::Deserialize;

use crate::{
    Error,
    extract::{non_negative_amount, positive_amount, required_text},
    savings::core::SavingsGoalData,
};

/// The JSON data for creating or replacing a savings goal.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SavingsGoalForm {
    pub name: String,
    pub target_amount: Option<f64>,
    /// Defaults to zero.
    pub current_amount: Option<f64>,
}

impl SavingsGoalForm {
    pub fn validate(&self) -> Result<SavingsGoalData, Error> {
        Ok(SavingsGoalData {
            name: required_text("Name", &self.name)?,
            target_amount: positive_amount("Target amount", self.target_amount)?,
            current_amount: non_negative_amount("Current amount", self.current_amount)?,
        })
    }
}
