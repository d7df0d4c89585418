//! Fixed-point solver wrapping steps 7–9.

use crate::model::PlanInput;
use crate::pipeline::phase::PhaseInfo;
use crate::pipeline::taxes::{self, TaxResult};
use crate::pipeline::withdrawals::{self, WithdrawalResult};
use crate::state::SimulationState;

const MAX_ITERATIONS: u32 = 12;
const CONVERGENCE_THRESHOLD: f64 = 100.0;

/// Left in modeled inputs nowhere (no field represents capital gains
/// realized outside a withdrawal or rebalance) — see `DESIGN.md`.
const MANDATORY_CAP_GAINS: f64 = 0.0;

pub struct ConvergenceResult {
    pub withdrawals: WithdrawalResult,
    pub taxes: TaxResult,
    pub ordinary_before_ss: f64,
    pub iterations: u32,
    pub converged: bool,
    pub residual_dollars: f64,
}

#[allow(clippy::too_many_arguments)]
pub fn solve(
    state: &mut SimulationState,
    phase: &PhaseInfo,
    actual_spend: f64,
    mandatory_income_total: f64,
    ordinary_before_ss_excl_withdrawals: f64,
    ss_income: f64,
    rmd_total: f64,
    standard_deduction: f64,
) -> ConvergenceResult {
    let plan: &PlanInput = state.plan;
    let snapshot = state.snapshot_accounts();

    let mut estimated_taxes = if state.prior_year_total_tax_dollars > 0.0 {
        state.prior_year_total_tax_dollars
    } else {
        actual_spend * plan.tax.federal_effective_rate_pct / 100.0 * 0.5
    };

    let state_standard_deduction_fallback = (standard_deduction * 0.5).round();

    let mut last_withdrawals = WithdrawalResult::default();
    let mut last_taxes = TaxResult::default();
    let mut last_ordinary_before_ss = ordinary_before_ss_excl_withdrawals;
    let mut converged = false;
    let mut iterations_run = 0;
    let mut residual_dollars = 0.0;

    for iteration in 1..=MAX_ITERATIONS {
        iterations_run = iteration;
        state.restore_accounts(&snapshot);

        let target = withdrawals::compute_withdrawal_target(
            actual_spend,
            estimated_taxes,
            mandatory_income_total,
            rmd_total,
        );

        let withdrawal_result = withdrawals::solve_withdrawals(
            &mut state.accounts,
            target,
            plan.strategy.withdrawal_order,
            ordinary_before_ss_excl_withdrawals,
            standard_deduction,
            plan.tax.cap_gains_rate_pct,
            plan.tax.federal_effective_rate_pct,
        );

        let ordinary_before_ss =
            ordinary_before_ss_excl_withdrawals + withdrawal_result.ordinary_from_withdrawals;

        let tax_result = taxes::calculate_taxes(
            plan,
            phase.filing_status,
            ordinary_before_ss,
            ss_income,
            MANDATORY_CAP_GAINS,
            withdrawal_result.capital_gains_from_withdrawals,
            state.prior_year_rebalance_gains,
            standard_deduction,
            state_standard_deduction_fallback,
        );

        let actual_taxes = tax_result.total();
        residual_dollars = (actual_taxes - estimated_taxes).abs();
        last_withdrawals = withdrawal_result;
        last_ordinary_before_ss = ordinary_before_ss;
        last_taxes = tax_result;

        if residual_dollars <= CONVERGENCE_THRESHOLD {
            converged = true;
            break;
        }
        estimated_taxes = actual_taxes;
    }

    if !converged {
        tracing::warn!(
            year = state.current_year,
            age_primary = phase.age_primary,
            iterations = iterations_run,
            "tax/withdrawal convergence loop did not settle within {MAX_ITERATIONS} iterations"
        );
    }

    state.prior_year_total_tax_dollars = last_taxes.total();

    ConvergenceResult {
        withdrawals: last_withdrawals,
        taxes: last_taxes,
        ordinary_before_ss: last_ordinary_before_ss,
        iterations: iterations_run,
        converged,
        residual_dollars,
    }
}
