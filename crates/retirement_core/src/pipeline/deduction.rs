//! Step 4 — Inflate Standard Deduction.

use crate::model::{FilingStatus, PlanInput};
use crate::pipeline::phase::PhaseInfo;
use crate::reference;

pub fn inflate_standard_deduction(
    plan: &PlanInput,
    phase: &PhaseInfo,
    cumulative_inflation: f64,
) -> f64 {
    let base = plan
        .tax
        .standard_deduction_override
        .unwrap_or_else(|| reference::base_standard_deduction(phase.filing_status));

    let mut deduction = base * cumulative_inflation;

    match phase.filing_status {
        FilingStatus::Single | FilingStatus::Hoh => {
            if phase.primary_alive && phase.age_primary >= 65 {
                deduction +=
                    reference::EXTRA_DEDUCTION_SINGLE_65_PLUS * cumulative_inflation;
            }
        }
        FilingStatus::Mfj | FilingStatus::Survivor => {
            if phase.primary_alive && phase.age_primary >= 65 {
                deduction +=
                    reference::EXTRA_DEDUCTION_MFJ_65_PLUS_PER_PERSON * cumulative_inflation;
            }
            if phase.spouse_alive && phase.age_spouse.map(|a| a >= 65).unwrap_or(false) {
                deduction +=
                    reference::EXTRA_DEDUCTION_MFJ_65_PLUS_PER_PERSON * cumulative_inflation;
            }
        }
    }

    deduction
}
