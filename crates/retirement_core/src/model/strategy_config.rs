//! Withdrawal ordering and rebalance cadence.

use serde::{Deserialize, Serialize};

/// One tagged enum matched at the single withdrawal-solver call site
/// rather than a trait object, since the set of strategies is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WithdrawalOrder {
    TaxableFirst,
    TaxDeferredFirst,
    ProRata,
    TaxOptimized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RebalanceFrequency {
    None,
    Annual,
    Quarterly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyConfig {
    pub withdrawal_order: WithdrawalOrder,
    pub rebalance_frequency: RebalanceFrequency,
    pub guardrails_enabled: bool,
}
