//! Income streams and one-off/recurring adjustments.

use super::ids::AccountId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamOwner {
    Primary,
    Spouse,
    Joint,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeStream {
    pub id: AccountId,
    pub name: String,
    pub owner: StreamOwner,
    pub start_year: i32,
    pub end_year: Option<i32>,
    pub annual_amount: f64,
    pub cola_pct: Option<f64>,
    pub taxable: bool,
    pub survivor_continues: bool,
}

impl IncomeStream {
    pub fn is_active_in(&self, calendar_year: i32) -> bool {
        let end = self.end_year.unwrap_or(i32::MAX);
        self.start_year <= calendar_year && calendar_year <= end
    }
}

/// A signed, possibly time-bounded, possibly inflation-adjusted cash adjustment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Adjustment {
    pub year: i32,
    pub end_year: Option<i32>,
    pub amount: f64,
    pub taxable: bool,
    pub inflation_adjusted: bool,
}

impl Adjustment {
    pub fn is_active_in(&self, calendar_year: i32) -> bool {
        let end = self.end_year.unwrap_or(self.year);
        self.year <= calendar_year && calendar_year <= end
    }
}
