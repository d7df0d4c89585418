//! Top-level orchestrator: `PlanInput → validate → SimulationState init →
//! for year in 0..horizon { run 13 steps } → PlanResult`.

use crate::error::{HorizonError, Result};
use crate::model::{AssumptionsUsed, ConvergenceWarning, PlanInput, PlanResult};
use crate::pipeline::{convergence, deduction, fees, income, net, phase, rebalance, result, returns, rmd, spending};
use crate::state::SimulationState;
use crate::validate;

const MAX_HORIZON: u32 = 120;

fn compute_horizon(plan: &PlanInput) -> std::result::Result<u32, HorizonError> {
    let primary = &plan.household.primary;
    let primary_remaining = primary.life_expectancy as i32 - primary.current_age as i32;
    let spouse_remaining = plan
        .household
        .spouse
        .as_ref()
        .map(|s| s.life_expectancy as i32 - s.current_age as i32);

    let max_remaining = match spouse_remaining {
        Some(s) => s.max(primary_remaining),
        None => primary_remaining,
    };

    if max_remaining <= 0 {
        return Err(HorizonError {
            current_age: primary.current_age,
            life_expectancy: primary.life_expectancy,
        });
    }

    Ok(((max_remaining + 1) as u32).min(MAX_HORIZON))
}

/// Runs the simulation to completion. Pure function of `plan`: no I/O, no
/// randomness in deterministic mode, no suspension points.
pub fn simulate(plan: &PlanInput) -> Result<PlanResult> {
    validate::validate_plan(plan)?;
    let horizon = compute_horizon(plan)?;

    tracing::info!(
        horizon,
        marital_status = ?plan.household.marital_status,
        withdrawal_order = ?plan.strategy.withdrawal_order,
        "starting simulation run"
    );

    let mut state = SimulationState::new(plan, horizon);
    let mut yearly = Vec::with_capacity(horizon as usize);
    let mut convergence_warnings = Vec::new();

    for year_index in 0..horizon {
        state.year_index = year_index;
        state.current_year = crate::model::BASE_CALENDAR_YEAR + year_index as i32;

        if year_index > 0 {
            state.advance_cumulative_inflation();
        }
        state.recompute_baseline_return();

        let phase_info = phase::determine_phase(&mut state);
        returns::apply_returns(&mut state);
        let mandatory = income::compute_mandatory_income(&mut state, &phase_info);
        let standard_deduction =
            deduction::inflate_standard_deduction(plan, &phase_info, state.cumulative_inflation());
        let rmd_result = rmd::compute_rmds(&mut state, &phase_info);
        let spend_result = spending::compute_spending(&state, &phase_info);

        let ordinary_before_ss_excl_withdrawals = rmd_result.total + mandatory.ordinary_before_ss();

        let conv = convergence::solve(
            &mut state,
            &phase_info,
            spend_result.actual_spend,
            mandatory.total(),
            ordinary_before_ss_excl_withdrawals,
            mandatory.ss_total,
            rmd_result.total,
            standard_deduction,
        );

        if !conv.converged {
            convergence_warnings.push(ConvergenceWarning {
                year: state.current_year,
                iterations: conv.iterations,
                residual_dollars: conv.residual_dollars,
            });
        }

        let net_result = net::compute_net(
            &mandatory,
            &rmd_result,
            &conv.withdrawals,
            &conv.taxes,
            spend_result.actual_spend,
        );
        net::deposit_surplus(&mut state, net_result.surplus);

        fees::apply_fees(&mut state);
        rebalance::rebalance(&mut state);

        let year_result = result::build_year_result(
            &state,
            &phase_info,
            spend_result.target_spend,
            spend_result.actual_spend,
            &mandatory,
            &rmd_result,
            &conv.withdrawals,
            &conv.taxes,
            &net_result,
        );
        yearly.push(year_result);

        for account in state.accounts.iter_mut() {
            account.prior_year_end_balance = account.balance;
        }
    }

    let assumptions_used = AssumptionsUsed {
        simulation_mode: plan.market.simulation_mode,
        inflation_pct: plan.spending.inflation_pct,
        federal_effective_rate_pct: plan.tax.federal_effective_rate_pct,
        cap_gains_rate_pct: plan.tax.cap_gains_rate_pct,
        withdrawal_order: plan.strategy.withdrawal_order,
        rebalance_frequency: plan.strategy.rebalance_frequency,
        guardrails_enabled: plan.strategy.guardrails_enabled,
        horizon,
        base_calendar_year: crate::model::BASE_CALENDAR_YEAR,
    };

    Ok(PlanResult::from_years(yearly, assumptions_used, convergence_warnings))
}
