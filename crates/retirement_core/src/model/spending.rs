//! Spending goals and guardrails.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendingPlan {
    pub target_annual_spend: f64,
    pub inflation_pct: f64,
    pub floor_annual_spend: Option<f64>,
    pub ceiling_annual_spend: Option<f64>,
    pub survivor_spending_adjustment_pct: f64,
}
