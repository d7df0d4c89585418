//! Process-wide read-only reference tables: state tax rates, the IRS
//! RMD uniform lifetime table, and 2025 standard deduction amounts.
//! Initialized once from embedded literals; no teardown.

pub mod rmd_table;
pub mod standard_deduction;
pub mod state_table;

pub use rmd_table::{distribution_period, rmd_start_age};
pub use standard_deduction::{
    base_standard_deduction, EXTRA_DEDUCTION_MFJ_65_PLUS_PER_PERSON,
    EXTRA_DEDUCTION_SINGLE_65_PLUS,
};
pub use state_table::{lookup as lookup_state, SsTaxExempt, StateTaxInfo};
