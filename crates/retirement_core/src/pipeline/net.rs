//! Step 10 — Net Spendable.

use crate::model::{AccountId, AccountType};
use crate::pipeline::income::MandatoryIncome;
use crate::pipeline::rmd::RmdResult;
use crate::pipeline::taxes::TaxResult;
use crate::pipeline::withdrawals::WithdrawalResult;
use crate::state::SimulationState;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NetResult {
    pub gross_income: f64,
    pub net_spendable: f64,
    pub shortfall: f64,
    pub surplus: f64,
}

pub fn compute_net(
    mandatory: &MandatoryIncome,
    rmd: &RmdResult,
    withdrawals: &WithdrawalResult,
    taxes: &TaxResult,
    actual_spend: f64,
) -> NetResult {
    let total_non_roth_withdrawals = withdrawals.total_withdrawn - withdrawals.roth_withdrawals;
    let gross_income = mandatory.total() + rmd.total + total_non_roth_withdrawals;
    let net_spendable = gross_income + withdrawals.roth_withdrawals - taxes.taxes_federal - taxes.taxes_state;

    let shortfall = (actual_spend - net_spendable).max(0.0);
    let surplus = (net_spendable - actual_spend).max(0.0);

    NetResult {
        gross_income,
        net_spendable,
        shortfall,
        surplus,
    }
}

/// Deposits `surplus` into the taxable account with the largest balance;
/// both balance and cost basis increase (new money, new basis). Lost if no
/// taxable account exists.
pub fn deposit_surplus(state: &mut SimulationState, surplus: f64) {
    if surplus <= 0.0 {
        return;
    }

    let largest: Option<&AccountId> = state
        .accounts
        .iter()
        .filter(|a| a.account_type == AccountType::Taxable)
        .max_by(|a, b| a.balance.partial_cmp(&b.balance).unwrap())
        .map(|a| &a.id);

    let Some(id) = largest.cloned() else {
        return;
    };

    if let Some(account) = state.account_mut(&id) {
        account.balance += surplus;
        account.cost_basis += surplus;
    }
}
