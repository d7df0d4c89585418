//! Step 3 — Compute Mandatory Income.

use crate::model::{AccountType, BASE_CALENDAR_YEAR, DistributionFrequency, StreamOwner};
use crate::pipeline::phase::PhaseInfo;
use crate::state::SimulationState;

/// Sources accumulated before withdrawals are solved: Social Security,
/// NQDC distributions, pensions/other streams, and signed adjustments.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MandatoryIncome {
    pub ss_total: f64,
    pub nqdc_total: f64,
    pub pension_taxable_total: f64,
    pub pension_nontaxable_total: f64,
    pub adjustments_taxable_total: f64,
    pub adjustments_nontaxable_total: f64,
}

impl MandatoryIncome {
    pub fn total(&self) -> f64 {
        self.ss_total
            + self.nqdc_total
            + self.pension_taxable_total
            + self.pension_nontaxable_total
            + self.adjustments_taxable_total
            + self.adjustments_nontaxable_total
    }

    /// Ordinary income contributed by this aggregate alone, i.e. excluding
    /// RMDs, withdrawals, and Social Security (taxed separately, step 9).
    pub fn ordinary_before_ss(&self) -> f64 {
        self.nqdc_total + self.pension_taxable_total + self.adjustments_taxable_total
    }
}

fn inflation_ratio_from_year(state: &SimulationState, from_year: i32, to_year: i32) -> f64 {
    let last_idx = state.cumulative_inflation_by_year.len().saturating_sub(1);
    let from_idx = (from_year - BASE_CALENDAR_YEAR).max(0) as usize;
    let to_idx = (to_year - BASE_CALENDAR_YEAR).max(0) as usize;
    let from_idx = from_idx.min(last_idx);
    let to_idx = to_idx.min(last_idx);
    state.cumulative_inflation_by_year[to_idx] / state.cumulative_inflation_by_year[from_idx]
}

fn social_security_benefit(
    state: &SimulationState,
    birth_year: i32,
    claim: &crate::model::SocialSecurityClaim,
) -> f64 {
    let first_eligible_year = birth_year + claim.claim_age as i32;
    if state.current_year < first_eligible_year {
        return 0.0;
    }
    let mut growth = 1.0;
    let mut y = first_eligible_year;
    while y < state.current_year {
        let rate = if y >= BASE_CALENDAR_YEAR {
            let idx = (y - BASE_CALENDAR_YEAR) as usize;
            state
                .scenario_inflation
                .as_ref()
                .and_then(|s| s.get(idx))
                .copied()
                .unwrap_or(claim.cola_pct)
        } else {
            claim.cola_pct
        };
        growth *= 1.0 + rate / 100.0;
        y += 1;
    }
    claim.estimated_monthly_benefit_at_claim * 12.0 * growth
}

fn compute_social_security(state: &SimulationState, phase: &PhaseInfo) -> f64 {
    let primary = &state.plan.household.primary;
    let primary_ss = primary
        .social_security
        .as_ref()
        .map(|c| social_security_benefit(state, primary.birth_year, c))
        .unwrap_or(0.0);
    let spouse_ss = state
        .plan
        .household
        .spouse
        .as_ref()
        .and_then(|s| {
            s.social_security
                .as_ref()
                .map(|c| social_security_benefit(state, s.birth_year, c))
        })
        .unwrap_or(0.0);

    if phase.is_survivor_phase {
        if phase.primary_alive {
            primary_ss.max(spouse_ss)
        } else {
            spouse_ss.max(primary_ss)
        }
    } else {
        let mut total = 0.0;
        if phase.primary_alive {
            total += primary_ss;
        }
        if phase.spouse_alive {
            total += spouse_ss;
        }
        total
    }
}

/// NQDC distributions for this year, draining the account balances in
/// place. Returns the total distributed.
fn distribute_nqdc(state: &mut SimulationState) -> f64 {
    let calendar_year = state.current_year;
    let mut total = 0.0;

    for account in state.accounts.iter_mut() {
        if account.account_type != AccountType::DeferredComp {
            continue;
        }
        let Some(schedule) = account.deferred_comp_schedule else {
            continue;
        };
        if account.balance <= 0.0 {
            continue;
        }

        let distribution = if calendar_year >= schedule.start_year && calendar_year <= schedule.end_year
        {
            let scheduled = match schedule.frequency {
                DistributionFrequency::Monthly => schedule.amount * 12.0,
                DistributionFrequency::Annual => schedule.amount,
            };
            let scheduled = if schedule.inflation_adjusted {
                scheduled
                    * inflation_ratio_from_year(state, schedule.start_year, calendar_year)
            } else {
                scheduled
            };
            scheduled.min(account.balance)
        } else if calendar_year > schedule.end_year {
            account.balance
        } else {
            0.0
        };

        account.balance -= distribution;
        total += distribution;
    }

    total
}

fn owner_alive(owner: StreamOwner, phase: &PhaseInfo) -> bool {
    match owner {
        StreamOwner::Primary => phase.primary_alive,
        StreamOwner::Spouse => phase.spouse_alive,
        StreamOwner::Joint => true,
    }
}

fn compute_streams_and_adjustments(state: &SimulationState, phase: &PhaseInfo) -> (f64, f64, f64, f64) {
    let calendar_year = state.current_year;
    let mut pension_taxable = 0.0;
    let mut pension_nontaxable = 0.0;

    for stream in &state.plan.income_streams {
        if !stream.is_active_in(calendar_year) {
            continue;
        }
        let active = owner_alive(stream.owner, phase)
            || (phase.is_survivor_phase && stream.survivor_continues);
        if !active {
            continue;
        }
        let cola = stream.cola_pct.unwrap_or(0.0);
        let years_elapsed = (calendar_year - stream.start_year).max(0);
        let amount = stream.annual_amount * (1.0 + cola / 100.0).powi(years_elapsed);
        if stream.taxable {
            pension_taxable += amount;
        } else {
            pension_nontaxable += amount;
        }
    }

    let mut adjustments_taxable = 0.0;
    let mut adjustments_nontaxable = 0.0;
    for adjustment in &state.plan.adjustments {
        if !adjustment.is_active_in(calendar_year) {
            continue;
        }
        let amount = if adjustment.inflation_adjusted {
            adjustment.amount * inflation_ratio_from_year(state, adjustment.year, calendar_year)
        } else {
            adjustment.amount
        };
        if adjustment.taxable {
            adjustments_taxable += amount;
        } else {
            adjustments_nontaxable += amount;
        }
    }

    (
        pension_taxable,
        pension_nontaxable,
        adjustments_taxable,
        adjustments_nontaxable,
    )
}

pub fn compute_mandatory_income(state: &mut SimulationState, phase: &PhaseInfo) -> MandatoryIncome {
    let ss_total = compute_social_security(state, phase);
    let nqdc_total = distribute_nqdc(state);
    let (pension_taxable_total, pension_nontaxable_total, adjustments_taxable_total, adjustments_nontaxable_total) =
        compute_streams_and_adjustments(state, phase);

    MandatoryIncome {
        ss_total,
        nqdc_total,
        pension_taxable_total,
        pension_nontaxable_total,
        adjustments_taxable_total,
        adjustments_nontaxable_total,
    }
}
