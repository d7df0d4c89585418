//! Per-run mutable simulation state.

use crate::model::{Account, AccountId, AccountOwner, AccountType, PersonId, PlanInput};

/// Mutable mirror of [`Account`] carried across years. `owner` is rewritten
/// exactly once, at the first survivor year.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountState {
    pub id: AccountId,
    pub name: String,
    pub account_type: AccountType,
    pub owner: AccountOwner,
    pub balance: f64,
    pub cost_basis: f64,
    pub expected_return_pct: f64,
    pub fee_pct: f64,
    pub target_allocation_pct: Option<f64>,
    pub deferred_comp_schedule: Option<crate::model::DeferredCompSchedule>,
    /// End-of-prior-year balance, snapshotted before returns are applied
    /// each year. RMDs use this value.
    pub prior_year_end_balance: f64,
}

impl AccountState {
    fn from_account(account: &Account) -> Self {
        AccountState {
            id: account.id.clone(),
            name: account.name.clone(),
            account_type: account.account_type,
            owner: account.owner,
            balance: account.current_balance,
            cost_basis: account.initial_cost_basis(),
            expected_return_pct: account.expected_return_pct,
            fee_pct: account.fee_pct,
            target_allocation_pct: account.target_allocation_pct,
            deferred_comp_schedule: account.deferred_comp_schedule,
            prior_year_end_balance: account.current_balance,
        }
    }

    pub fn owner_person(&self) -> Option<PersonId> {
        match self.owner {
            AccountOwner::Primary => Some(PersonId::Primary),
            AccountOwner::Spouse => Some(PersonId::Spouse),
            AccountOwner::Joint => None,
        }
    }

    /// Gain fraction used to split a taxable withdrawal into capital gain
    /// vs. return of basis.
    pub fn gain_fraction(&self) -> f64 {
        if self.balance <= 0.0 {
            return 0.0;
        }
        (1.0 - self.cost_basis / self.balance).max(0.0)
    }
}

/// A shallow numeric snapshot of one account, used by the convergence loop
/// to restore state between fixed-point iterations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccountSnapshot {
    pub balance: f64,
    pub cost_basis: f64,
}

/// All mutable per-run bookkeeping. Owns `accounts` exclusively; `plan` is
/// borrowed read-only for the run's duration.
pub struct SimulationState<'p> {
    pub plan: &'p PlanInput,
    pub accounts: Vec<AccountState>,
    pub current_year: i32,
    pub year_index: u32,
    pub prior_year_total_tax_dollars: f64,
    pub prior_year_rebalance_gains: f64,
    pub scenario_returns: Option<Vec<f64>>,
    pub scenario_inflation: Option<Vec<f64>>,
    pub cumulative_inflation_by_year: Vec<f64>,
    pub baseline_return: f64,
    pub survivor_transitioned: bool,
    pub first_survivor_year_index: Option<u32>,
}

impl<'p> SimulationState<'p> {
    pub fn new(plan: &'p PlanInput, horizon: u32) -> Self {
        let accounts = plan.accounts.iter().map(AccountState::from_account).collect();
        let mut cumulative_inflation_by_year = vec![0.0; horizon as usize];
        if horizon > 0 {
            cumulative_inflation_by_year[0] = 1.0;
        }

        SimulationState {
            plan,
            accounts,
            current_year: crate::model::BASE_CALENDAR_YEAR,
            year_index: 0,
            prior_year_total_tax_dollars: 0.0,
            prior_year_rebalance_gains: 0.0,
            scenario_returns: None,
            scenario_inflation: None,
            cumulative_inflation_by_year,
            baseline_return: 0.0,
            survivor_transitioned: false,
            first_survivor_year_index: None,
        }
    }

    pub fn account_mut(&mut self, id: &AccountId) -> Option<&mut AccountState> {
        self.accounts.iter_mut().find(|a| &a.id == id)
    }

    pub fn total_portfolio_value(&self) -> f64 {
        self.accounts.iter().map(|a| a.balance.max(0.0)).sum()
    }

    pub fn snapshot_accounts(&self) -> Vec<AccountSnapshot> {
        self.accounts
            .iter()
            .map(|a| AccountSnapshot {
                balance: a.balance,
                cost_basis: a.cost_basis,
            })
            .collect()
    }

    pub fn restore_accounts(&mut self, snapshot: &[AccountSnapshot]) {
        for (account, snap) in self.accounts.iter_mut().zip(snapshot) {
            account.balance = snap.balance;
            account.cost_basis = snap.cost_basis;
        }
    }

    /// `cumulativeInflationByYear[y] = cumulativeInflationByYear[y-1] * (1 + rate(y-1)/100)`.
    pub fn advance_cumulative_inflation(&mut self) {
        let y = self.year_index as usize;
        if y == 0 {
            return;
        }
        let rate = self.inflation_rate_for_year(self.year_index - 1);
        self.cumulative_inflation_by_year[y] =
            self.cumulative_inflation_by_year[y - 1] * (1.0 + rate / 100.0);
    }

    pub fn inflation_rate_for_year(&self, year_index: u32) -> f64 {
        if let Some(scenario) = &self.scenario_inflation {
            if let Some(rate) = scenario.get(year_index as usize) {
                return *rate;
            }
        }
        self.plan.spending.inflation_pct
    }

    pub fn cumulative_inflation(&self) -> f64 {
        self.cumulative_inflation_by_year[self.year_index as usize]
    }

    /// Balance-weighted mean of `expected_return_pct` across all accounts,
    /// recomputed every year.
    pub fn recompute_baseline_return(&mut self) {
        let total: f64 = self.accounts.iter().map(|a| a.balance.max(0.0)).sum();
        self.baseline_return = if total <= 0.0 {
            0.0
        } else {
            self.accounts
                .iter()
                .map(|a| a.balance.max(0.0) * a.expected_return_pct)
                .sum::<f64>()
                / total
        };
    }
}
