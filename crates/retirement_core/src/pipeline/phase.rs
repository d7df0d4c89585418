//! Step 1 — Determine Phase.

use crate::model::{AccountOwner, FilingStatus, PersonId};
use crate::state::SimulationState;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseInfo {
    pub age_primary: i32,
    pub age_spouse: Option<i32>,
    pub primary_alive: bool,
    pub spouse_alive: bool,
    pub is_survivor_phase: bool,
    pub filing_status: FilingStatus,
}

/// `true` once `yearIndex >= lifeExpectancy - currentAge`, i.e. the age
/// would have advanced past life expectancy without freezing.
fn alive_and_age(current_age: u32, life_expectancy: u32, year_index: u32) -> (bool, i32) {
    let years_to_life_expectancy = life_expectancy.saturating_sub(current_age);
    let alive = year_index <= years_to_life_expectancy;
    let age = if year_index >= years_to_life_expectancy {
        life_expectancy as i32
    } else {
        current_age as i32 + year_index as i32
    };
    (alive, age)
}

pub fn determine_phase(state: &mut SimulationState) -> PhaseInfo {
    let plan = state.plan;
    let year_index = state.year_index;

    let (primary_alive, age_primary) = alive_and_age(
        plan.household.primary.current_age,
        plan.household.primary.life_expectancy,
        year_index,
    );

    let spouse_info = plan
        .household
        .spouse
        .as_ref()
        .map(|s| alive_and_age(s.current_age, s.life_expectancy, year_index));
    let spouse_alive = spouse_info.map(|(alive, _)| alive).unwrap_or(false);
    let age_spouse = spouse_info.map(|(_, age)| age);

    let has_spouse = plan.household.spouse.is_some();
    let is_survivor_phase = has_spouse && (primary_alive != spouse_alive);

    if is_survivor_phase && !state.survivor_transitioned {
        transition_to_survivor(state, primary_alive);
    }

    let both_dead = if has_spouse {
        !primary_alive && !spouse_alive
    } else {
        !primary_alive
    };

    let filing_status = if both_dead {
        FilingStatus::Single
    } else if is_survivor_phase {
        let years_since_transition = state
            .first_survivor_year_index
            .map(|first| year_index - first)
            .unwrap_or(0);
        if years_since_transition < 2 {
            FilingStatus::Mfj
        } else {
            FilingStatus::Single
        }
    } else {
        plan.household.filing_status
    };

    PhaseInfo {
        age_primary,
        age_spouse,
        primary_alive,
        spouse_alive,
        is_survivor_phase,
        filing_status,
    }
}

/// Rewrites `owner` of every account owned by the deceased spouse (or
/// jointly) to the survivor, exactly once.
fn transition_to_survivor(state: &mut SimulationState, primary_alive: bool) {
    let (deceased, survivor) = if primary_alive {
        (AccountOwner::Spouse, AccountOwner::Primary)
    } else {
        (AccountOwner::Primary, AccountOwner::Spouse)
    };

    for account in state.accounts.iter_mut() {
        if account.owner == deceased || account.owner == AccountOwner::Joint {
            account.owner = survivor;
        }
    }

    state.survivor_transitioned = true;
    state.first_survivor_year_index = Some(state.year_index);
}

/// Resolve a [`PersonId`] to whether they're alive this year.
pub fn person_alive(phase: &PhaseInfo, person: PersonId) -> bool {
    match person {
        PersonId::Primary => phase.primary_alive,
        PersonId::Spouse => phase.spouse_alive,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ages_freeze_at_life_expectancy() {
        assert_eq!(alive_and_age(65, 90, 0), (true, 65));
        assert_eq!(alive_and_age(65, 90, 25), (true, 90));
        assert_eq!(alive_and_age(65, 90, 26), (false, 90));
        assert_eq!(alive_and_age(65, 90, 40), (false, 90));
    }
}
