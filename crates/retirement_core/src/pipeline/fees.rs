//! Step 11 — Apply Fees.

use crate::state::SimulationState;

pub fn apply_fees(state: &mut SimulationState) {
    for account in state.accounts.iter_mut() {
        if account.balance <= 0.0 {
            continue;
        }
        account.balance = (account.balance * (1.0 - account.fee_pct / 100.0)).max(0.0);
    }
}
