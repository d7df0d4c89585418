//! 2025 standard deduction amounts and age-65+ additions.

use crate::model::FilingStatus;

pub const STANDARD_DEDUCTION_SINGLE: f64 = 15_000.0;
pub const STANDARD_DEDUCTION_MFJ: f64 = 30_000.0;
pub const STANDARD_DEDUCTION_SURVIVOR: f64 = 30_000.0;
pub const STANDARD_DEDUCTION_HOH: f64 = 22_500.0;

pub const EXTRA_DEDUCTION_SINGLE_65_PLUS: f64 = 2_000.0;
pub const EXTRA_DEDUCTION_MFJ_65_PLUS_PER_PERSON: f64 = 1_600.0;

pub fn base_standard_deduction(filing_status: FilingStatus) -> f64 {
    match filing_status {
        FilingStatus::Single => STANDARD_DEDUCTION_SINGLE,
        FilingStatus::Mfj => STANDARD_DEDUCTION_MFJ,
        FilingStatus::Survivor => STANDARD_DEDUCTION_SURVIVOR,
        FilingStatus::Hoh => STANDARD_DEDUCTION_HOH,
    }
}
