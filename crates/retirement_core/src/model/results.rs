//! Simulation outputs.

use super::account::AccountId;
use super::household::FilingStatus;
use super::market_config::SimulationMode;
use super::strategy_config::{RebalanceFrequency, WithdrawalOrder};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One simulated year. All per-account maps use the account id as key;
/// balances/basis are floored at 0 when the year result is produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearResult {
    pub year: i32,
    pub age_primary: i32,
    pub age_spouse: Option<i32>,
    pub is_survivor_phase: bool,
    pub filing_status: FilingStatus,

    pub target_spend: f64,
    pub actual_spend: f64,

    pub gross_income: f64,
    pub social_security_income: f64,
    pub nqdc_distributions: f64,
    pub rmd_total: f64,
    pub pension_and_other_income: f64,
    pub roth_withdrawals: f64,
    pub withdrawals_by_account: BTreeMap<AccountId, f64>,

    pub taxes_federal: f64,
    pub taxes_state: f64,
    pub taxable_ordinary_income: f64,
    pub taxable_capital_gains: f64,

    pub net_spendable: f64,
    pub shortfall: f64,
    pub surplus: f64,

    pub end_balance_by_account: BTreeMap<AccountId, f64>,
    pub cost_basis_by_account: BTreeMap<AccountId, f64>,
}

/// A year in which the tax/withdrawal fixed-point solver did
/// not settle within the 12-iteration cap. Non-fatal: the engine keeps the
/// last iteration's numbers and continues.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvergenceWarning {
    pub year: i32,
    pub iterations: u32,
    pub residual_dollars: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanSummary {
    pub success_probability: f64,
    pub median_terminal_value: f64,
    pub worst_case_shortfall: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssumptionsUsed {
    pub simulation_mode: SimulationMode,
    pub inflation_pct: f64,
    pub federal_effective_rate_pct: f64,
    pub cap_gains_rate_pct: f64,
    pub withdrawal_order: WithdrawalOrder,
    pub rebalance_frequency: RebalanceFrequency,
    pub guardrails_enabled: bool,
    pub horizon: u32,
    pub base_calendar_year: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanResult {
    pub summary: PlanSummary,
    pub yearly: Vec<YearResult>,
    pub assumptions_used: AssumptionsUsed,
    pub convergence_warnings: Vec<ConvergenceWarning>,
}

impl PlanResult {
    pub fn from_years(
        yearly: Vec<YearResult>,
        assumptions_used: AssumptionsUsed,
        convergence_warnings: Vec<ConvergenceWarning>,
    ) -> Self {
        let success_probability = if yearly.iter().all(|y| y.shortfall <= 0.0) {
            1.0
        } else {
            0.0
        };
        let median_terminal_value = yearly
            .last()
            .map(|y| y.end_balance_by_account.values().sum())
            .unwrap_or(0.0);
        let total_shortfall: f64 = yearly.iter().map(|y| y.shortfall).sum();
        let worst_case_shortfall = if total_shortfall > 0.0 {
            Some(total_shortfall)
        } else {
            None
        };

        PlanResult {
            summary: PlanSummary {
                success_probability,
                median_terminal_value,
                worst_case_shortfall,
            },
            yearly,
            assumptions_used,
            convergence_warnings,
        }
    }
}
