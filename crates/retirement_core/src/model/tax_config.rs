//! Tax assumptions attached to a plan.

use serde::{Deserialize, Serialize};

/// The engine implements `Effective` only; `Bracket` is accepted on ingress
/// and recorded in `assumptionsUsed`, but is a reserved surface-level option.
/// The pipeline always uses the flat effective rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FederalModel {
    Effective,
    Bracket,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StateModel {
    None,
    Effective,
    Bracket,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxConfig {
    pub federal_model: FederalModel,
    pub state_model: StateModel,
    pub federal_effective_rate_pct: f64,
    pub state_effective_rate_pct: Option<f64>,
    pub cap_gains_rate_pct: f64,
    pub state_cap_gains_rate_pct: Option<f64>,
    pub standard_deduction_override: Option<f64>,
}
