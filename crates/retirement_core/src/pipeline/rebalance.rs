//! Step 12 — Rebalance.
//!
//! The engine's per-year timestep has no sub-year resolution, so `annual`
//! and `quarterly` both rebalance once per simulated year; see the Open
//! Question resolution in `DESIGN.md`.

use crate::model::{AccountType, RebalanceFrequency};
use crate::state::SimulationState;

pub fn rebalance(state: &mut SimulationState) {
    let plan = state.plan;
    state.prior_year_rebalance_gains = 0.0;

    if plan.strategy.rebalance_frequency == RebalanceFrequency::None {
        return;
    }

    let weight_sum: f64 = state
        .accounts
        .iter()
        .filter_map(|a| a.target_allocation_pct)
        .sum();
    if weight_sum <= 0.0 {
        return;
    }

    let pool_total: f64 = state
        .accounts
        .iter()
        .filter(|a| a.target_allocation_pct.is_some())
        .map(|a| a.balance.max(0.0))
        .sum();
    if pool_total <= 0.0 {
        return;
    }

    let mut realized_gains = 0.0;

    // Sell overweight positions first so the freed cash is available.
    let mut freed_cash = 0.0;
    for account in state.accounts.iter_mut() {
        let Some(weight) = account.target_allocation_pct else {
            continue;
        };
        let target_balance = pool_total * (weight / weight_sum);
        let overweight = account.balance - target_balance;
        if overweight <= 0.0 {
            continue;
        }

        if account.account_type == AccountType::Taxable {
            let gain_fraction = account.gain_fraction();
            realized_gains += overweight * gain_fraction;
            account.cost_basis = (account.cost_basis - overweight * (1.0 - gain_fraction)).max(0.0);
        }
        account.balance -= overweight;
        freed_cash += overweight;
    }

    // Buy into underweight positions; incoming cash is new basis.
    let underweight_total: f64 = state
        .accounts
        .iter()
        .filter_map(|a| {
            let weight = a.target_allocation_pct?;
            let target_balance = pool_total * (weight / weight_sum);
            Some((target_balance - a.balance).max(0.0))
        })
        .sum();

    if underweight_total > 0.0 {
        for account in state.accounts.iter_mut() {
            let Some(weight) = account.target_allocation_pct else {
                continue;
            };
            let target_balance = pool_total * (weight / weight_sum);
            let shortfall = (target_balance - account.balance).max(0.0);
            if shortfall <= 0.0 {
                continue;
            }
            let incoming = freed_cash * (shortfall / underweight_total);
            account.balance += incoming;
            if account.account_type == AccountType::Taxable {
                account.cost_basis += incoming;
            }
        }
    }

    state.prior_year_rebalance_gains = realized_gains;
}
