//! Step 6 — Inflate Spending & Apply Guardrails.

use crate::pipeline::phase::PhaseInfo;
use crate::state::SimulationState;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SpendResult {
    pub target_spend: f64,
    pub actual_spend: f64,
}

pub fn compute_spending(state: &SimulationState, phase: &PhaseInfo) -> SpendResult {
    let plan = state.plan;
    let both_dead = !phase.primary_alive && !phase.spouse_alive;

    if both_dead {
        return SpendResult::default();
    }

    let cumulative_inflation = state.cumulative_inflation();
    let mut target_spend = plan.spending.target_annual_spend * cumulative_inflation;
    if phase.is_survivor_phase {
        target_spend *= plan.spending.survivor_spending_adjustment_pct / 100.0;
    }

    let actual_spend = if plan.strategy.guardrails_enabled {
        apply_guardrails(state, plan, target_spend, cumulative_inflation)
    } else {
        target_spend
    };

    SpendResult {
        target_spend,
        actual_spend,
    }
}

fn apply_guardrails(
    state: &SimulationState,
    plan: &crate::model::PlanInput,
    target_spend: f64,
    cumulative_inflation: f64,
) -> f64 {
    let portfolio = state.total_portfolio_value();
    let inflated_ceiling = plan
        .spending
        .ceiling_annual_spend
        .map(|c| c * cumulative_inflation);
    let inflated_floor = plan
        .spending
        .floor_annual_spend
        .map(|f| f * cumulative_inflation);

    if let Some(ceiling) = inflated_ceiling {
        if portfolio > 20.0 * ceiling {
            return target_spend.max(ceiling);
        }
    }

    if portfolio > 0.0 && target_spend / portfolio > 0.06 {
        let floor = inflated_floor.unwrap_or(0.0);
        return floor.max(target_spend.min(portfolio * 0.06));
    }

    target_spend
}
