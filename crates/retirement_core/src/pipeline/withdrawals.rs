//! Steps 7–8 — Compute Withdrawal Target & Solve Withdrawals.

use crate::model::{AccountId, AccountType, WithdrawalOrder};
use crate::state::AccountState;
use std::collections::BTreeMap;

/// `max(0, actualSpend + estimatedTaxes − mandatoryIncome.total − rmdTotal)`.
pub fn compute_withdrawal_target(
    actual_spend: f64,
    estimated_taxes: f64,
    mandatory_income_total: f64,
    rmd_total: f64,
) -> f64 {
    (actual_spend + estimated_taxes - mandatory_income_total - rmd_total).max(0.0)
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WithdrawalResult {
    pub by_account: BTreeMap<AccountId, f64>,
    pub total_withdrawn: f64,
    pub roth_withdrawals: f64,
    pub ordinary_from_withdrawals: f64,
    pub capital_gains_from_withdrawals: f64,
}

impl WithdrawalResult {
    fn record(&mut self, account: &AccountId, amount: f64) {
        if amount <= 0.0 {
            return;
        }
        *self.by_account.entry(account.clone()).or_insert(0.0) += amount;
        self.total_withdrawn += amount;
    }
}

/// Draw from one account, updating its balance/basis, and fold the tax
/// effect of the draw into `result` per the account type's own rules.
fn draw_from_account(account: &mut AccountState, amount: f64, result: &mut WithdrawalResult) -> f64 {
    let drawn = amount.min(account.balance.max(0.0));
    if drawn <= 0.0 {
        return 0.0;
    }

    match account.account_type {
        AccountType::Taxable => {
            let gain_fraction = account.gain_fraction();
            let gains = drawn * gain_fraction;
            let return_of_basis = drawn * (1.0 - gain_fraction);
            account.cost_basis = (account.cost_basis - return_of_basis).max(0.0);
            account.balance -= drawn;
            result.capital_gains_from_withdrawals += gains;
        }
        AccountType::TaxDeferred | AccountType::DeferredComp => {
            account.balance -= drawn;
            result.ordinary_from_withdrawals += drawn;
        }
        AccountType::Roth => {
            account.balance -= drawn;
            result.roth_withdrawals += drawn;
        }
    }

    result.record(&account.id, drawn);
    drawn
}

fn draw_in_order(
    accounts: &mut [AccountState],
    types: &[AccountType],
    mut remaining: f64,
    result: &mut WithdrawalResult,
) -> f64 {
    for t in types {
        if remaining <= 0.0 {
            break;
        }
        for account in accounts.iter_mut().filter(|a| a.account_type == *t) {
            if remaining <= 0.0 {
                break;
            }
            let drawn = draw_from_account(account, remaining, result);
            remaining -= drawn;
        }
    }
    remaining
}

fn draw_pro_rata(accounts: &mut [AccountState], target: f64, result: &mut WithdrawalResult) {
    let total_balance: f64 = accounts.iter().map(|a| a.balance.max(0.0)).sum();
    if total_balance <= 0.0 || target <= 0.0 {
        return;
    }
    let target_draw = target.min(total_balance);

    let mut indices: Vec<usize> = accounts
        .iter()
        .enumerate()
        .filter(|(_, a)| a.balance > 0.0)
        .map(|(i, _)| i)
        .collect();
    let Some(last_idx) = indices.pop() else {
        return;
    };

    let mut drawn_so_far = 0.0;
    for idx in indices {
        let weight = accounts[idx].balance / total_balance;
        let share = target_draw * weight;
        let drawn = draw_from_account(&mut accounts[idx], share, result);
        drawn_so_far += drawn;
    }

    // Last account absorbs rounding dust so the sum equals target_draw exactly.
    let dust_share = (target_draw - drawn_so_far).max(0.0);
    draw_from_account(&mut accounts[last_idx], dust_share, result);
}

fn draw_tax_optimized(
    accounts: &mut [AccountState],
    target: f64,
    current_ordinary_income: f64,
    standard_deduction: f64,
    cap_gains_rate_pct: f64,
    federal_rate_pct: f64,
    result: &mut WithdrawalResult,
) {
    let mut remaining = target;

    // 1. Fill the 0%-bracket space from ordinary-income accounts.
    let bracket_space = (standard_deduction - current_ordinary_income).max(0.0);
    let fill = bracket_space.min(remaining);
    if fill > 0.0 {
        let leftover_capacity =
            draw_in_order(accounts, &[AccountType::TaxDeferred, AccountType::DeferredComp], fill, result);
        remaining -= fill - leftover_capacity;
    }

    if remaining <= 0.0 {
        return;
    }

    // 2. Prefer whichever is cheaper: taxable (least-gain-first) or tax-deferred.
    if cap_gains_rate_pct < federal_rate_pct {
        let mut taxable_indices: Vec<usize> = accounts
            .iter()
            .enumerate()
            .filter(|(_, a)| a.account_type == AccountType::Taxable && a.balance > 0.0)
            .map(|(i, _)| i)
            .collect();
        taxable_indices.sort_by(|&a, &b| {
            accounts[a]
                .gain_fraction()
                .partial_cmp(&accounts[b].gain_fraction())
                .unwrap()
        });
        for idx in taxable_indices {
            if remaining <= 0.0 {
                break;
            }
            let drawn = draw_from_account(&mut accounts[idx], remaining, result);
            remaining -= drawn;
        }
        if remaining > 0.0 {
            remaining = draw_in_order(
                accounts,
                &[AccountType::TaxDeferred, AccountType::DeferredComp],
                remaining,
                result,
            );
        }
    } else {
        remaining = draw_in_order(
            accounts,
            &[AccountType::TaxDeferred, AccountType::DeferredComp, AccountType::Taxable],
            remaining,
            result,
        );
    }

    // 3. Roth last.
    if remaining > 0.0 {
        draw_in_order(accounts, &[AccountType::Roth], remaining, result);
    }
}

#[allow(clippy::too_many_arguments)]
pub fn solve_withdrawals(
    accounts: &mut [AccountState],
    target: f64,
    order: WithdrawalOrder,
    current_ordinary_income: f64,
    standard_deduction: f64,
    cap_gains_rate_pct: f64,
    federal_rate_pct: f64,
) -> WithdrawalResult {
    let mut result = WithdrawalResult::default();
    if target <= 0.0 {
        return result;
    }

    match order {
        WithdrawalOrder::TaxableFirst => {
            draw_in_order(
                accounts,
                &[
                    AccountType::Taxable,
                    AccountType::TaxDeferred,
                    AccountType::DeferredComp,
                    AccountType::Roth,
                ],
                target,
                &mut result,
            );
        }
        WithdrawalOrder::TaxDeferredFirst => {
            draw_in_order(
                accounts,
                &[
                    AccountType::TaxDeferred,
                    AccountType::DeferredComp,
                    AccountType::Taxable,
                    AccountType::Roth,
                ],
                target,
                &mut result,
            );
        }
        WithdrawalOrder::ProRata => {
            draw_pro_rata(accounts, target, &mut result);
        }
        WithdrawalOrder::TaxOptimized => {
            draw_tax_optimized(
                accounts,
                target,
                current_ordinary_income,
                standard_deduction,
                cap_gains_rate_pct,
                federal_rate_pct,
                &mut result,
            );
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AccountOwner, AccountType as AT};

    fn account(id: &str, account_type: AT, balance: f64, cost_basis: f64) -> AccountState {
        AccountState {
            id: AccountId(id.to_string()),
            name: id.to_string(),
            account_type,
            owner: AccountOwner::Primary,
            balance,
            cost_basis,
            expected_return_pct: 0.0,
            fee_pct: 0.0,
            target_allocation_pct: None,
            deferred_comp_schedule: None,
            prior_year_end_balance: balance,
        }
    }

    #[test]
    fn pro_rata_sums_to_target_exactly() {
        let mut accounts = vec![
            account("a", AT::Taxable, 100_000.0, 60_000.0),
            account("b", AT::TaxDeferred, 200_000.0, 200_000.0),
            account("c", AT::Roth, 50_000.0, 50_000.0),
        ];
        let result = solve_withdrawals(
            &mut accounts,
            33_333.33,
            WithdrawalOrder::ProRata,
            0.0,
            15_000.0,
            0.15,
            0.12,
        );
        assert!((result.total_withdrawn - 33_333.33).abs() < 1e-6);
    }

    #[test]
    fn pro_rata_caps_at_total_balance() {
        let mut accounts = vec![
            account("a", AT::Taxable, 1_000.0, 1_000.0),
            account("b", AT::Roth, 500.0, 500.0),
        ];
        let result = solve_withdrawals(
            &mut accounts,
            10_000.0,
            WithdrawalOrder::ProRata,
            0.0,
            15_000.0,
            0.15,
            0.12,
        );
        assert!((result.total_withdrawn - 1_500.0).abs() < 1e-6);
    }

    #[test]
    fn roth_withdrawals_never_taxed() {
        let mut accounts = vec![account("a", AT::Roth, 10_000.0, 10_000.0)];
        let result = solve_withdrawals(
            &mut accounts,
            5_000.0,
            WithdrawalOrder::TaxableFirst,
            0.0,
            15_000.0,
            0.15,
            0.12,
        );
        assert_eq!(result.ordinary_from_withdrawals, 0.0);
        assert_eq!(result.capital_gains_from_withdrawals, 0.0);
        assert_eq!(result.roth_withdrawals, 5_000.0);
    }

    #[test]
    fn taxable_first_prefers_taxable_and_splits_gain() {
        let mut accounts = vec![
            account("a", AT::Taxable, 100_000.0, 60_000.0),
            account("b", AT::TaxDeferred, 100_000.0, 100_000.0),
        ];
        let result = solve_withdrawals(
            &mut accounts,
            10_000.0,
            WithdrawalOrder::TaxableFirst,
            0.0,
            15_000.0,
            0.15,
            0.12,
        );
        // gain_fraction = 1 - 60000/100000 = 0.4
        assert!((result.capital_gains_from_withdrawals - 4_000.0).abs() < 1e-6);
        assert_eq!(result.ordinary_from_withdrawals, 0.0);
    }
}
