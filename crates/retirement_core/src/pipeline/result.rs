//! Step 13 — Produce Year Result.

use crate::model::YearResult;
use crate::pipeline::income::MandatoryIncome;
use crate::pipeline::net::NetResult;
use crate::pipeline::phase::PhaseInfo;
use crate::pipeline::rmd::RmdResult;
use crate::pipeline::taxes::TaxResult;
use crate::pipeline::withdrawals::WithdrawalResult;
use crate::state::SimulationState;

#[allow(clippy::too_many_arguments)]
pub fn build_year_result(
    state: &SimulationState,
    phase: &PhaseInfo,
    target_spend: f64,
    actual_spend: f64,
    mandatory: &MandatoryIncome,
    rmd: &RmdResult,
    withdrawals: &WithdrawalResult,
    taxes: &TaxResult,
    net: &NetResult,
) -> YearResult {
    let end_balance_by_account = state
        .accounts
        .iter()
        .map(|a| (a.id.clone(), a.balance.max(0.0)))
        .collect();
    let cost_basis_by_account = state
        .accounts
        .iter()
        .map(|a| (a.id.clone(), a.cost_basis.max(0.0)))
        .collect();

    YearResult {
        year: state.current_year,
        age_primary: phase.age_primary,
        age_spouse: phase.age_spouse,
        is_survivor_phase: phase.is_survivor_phase,
        filing_status: phase.filing_status,

        target_spend,
        actual_spend,

        gross_income: net.gross_income,
        social_security_income: mandatory.ss_total,
        nqdc_distributions: mandatory.nqdc_total,
        rmd_total: rmd.total,
        pension_and_other_income: mandatory.pension_taxable_total
            + mandatory.pension_nontaxable_total
            + mandatory.adjustments_taxable_total
            + mandatory.adjustments_nontaxable_total,
        roth_withdrawals: withdrawals.roth_withdrawals,
        withdrawals_by_account: withdrawals.by_account.clone(),

        taxes_federal: taxes.taxes_federal,
        taxes_state: taxes.taxes_state,
        taxable_ordinary_income: taxes.total_ordinary_income,
        taxable_capital_gains: taxes.total_cap_gains,

        net_spendable: net.net_spendable,
        shortfall: net.shortfall,
        surplus: net.surplus,

        end_balance_by_account,
        cost_basis_by_account,
    }
}
