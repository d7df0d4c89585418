//! Step 5 — Compute RMDs.

use crate::model::{AccountId, AccountType, PersonId};
use crate::pipeline::phase::PhaseInfo;
use crate::reference;
use crate::state::SimulationState;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RmdResult {
    pub by_account: BTreeMap<AccountId, f64>,
    pub total: f64,
}

fn owner_age_and_birth_year(
    plan: &crate::model::PlanInput,
    phase: &PhaseInfo,
    owner: PersonId,
) -> Option<(i32, i32)> {
    match owner {
        PersonId::Primary => Some((phase.age_primary, plan.household.primary.birth_year)),
        PersonId::Spouse => {
            let age = phase.age_spouse?;
            let birth_year = plan.household.spouse.as_ref()?.birth_year;
            Some((age, birth_year))
        }
    }
}

pub fn compute_rmds(state: &mut SimulationState, phase: &PhaseInfo) -> RmdResult {
    let mut result = RmdResult::default();
    let plan = state.plan;

    for account in state.accounts.iter_mut() {
        if account.account_type != AccountType::TaxDeferred || account.balance <= 0.0 {
            continue;
        }
        let Some(owner) = account.owner_person() else {
            continue;
        };
        let Some((owner_age, birth_year)) = owner_age_and_birth_year(plan, phase, owner) else {
            continue;
        };

        let start_age = reference::rmd_start_age(birth_year) as i32;
        if owner_age < start_age {
            continue;
        }

        let divisor = reference::distribution_period(owner_age as u32);
        let rmd = (account.prior_year_end_balance / divisor).max(0.0);
        let rmd = rmd.min(account.balance);
        account.balance -= rmd;

        result.by_account.insert(account.id.clone(), rmd);
        result.total += rmd;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::support::single_baseline_plan;

    #[test]
    fn no_rmd_before_start_age() {
        let plan = single_baseline_plan();
        let mut state = SimulationState::new(&plan, 25);
        let phase = crate::pipeline::phase::determine_phase(&mut state);
        let result = compute_rmds(&mut state, &phase);
        assert_eq!(result.total, 0.0);
    }
}
