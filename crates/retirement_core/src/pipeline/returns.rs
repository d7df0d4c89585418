//! Step 2 — Apply Returns.

use crate::state::SimulationState;

pub fn apply_returns(state: &mut SimulationState) {
    let scenario_rate = state
        .scenario_returns
        .as_ref()
        .and_then(|s| s.get(state.year_index as usize))
        .copied();
    let baseline = state.baseline_return;

    for account in state.accounts.iter_mut() {
        if account.balance <= 0.0 {
            continue;
        }
        let rate = match scenario_rate {
            Some(scenario) => scenario + (account.expected_return_pct - baseline),
            None => account.expected_return_pct,
        };
        account.balance = (account.balance * (1.0 + rate / 100.0)).max(0.0);
        // Cost basis is not adjusted by returns; growth is unrealized.
    }
}
