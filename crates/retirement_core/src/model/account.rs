//! Account definitions.
//!
//! `Account` is the immutable plan-input shape; the mutable per-run
//! counterpart, [`AccountState`](crate::state::AccountState), lives in
//! `crate::state` since it is simulation state rather than domain model.

use super::ids::{AccountId, PersonId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AccountType {
    Taxable,
    TaxDeferred,
    Roth,
    DeferredComp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountOwner {
    Primary,
    Spouse,
    Joint,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistributionFrequency {
    Annual,
    Monthly,
}

/// A fixed disbursement schedule for a `deferredComp` account.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeferredCompSchedule {
    pub start_year: i32,
    pub end_year: i32,
    pub frequency: DistributionFrequency,
    pub amount: f64,
    pub inflation_adjusted: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: AccountId,
    pub name: String,
    #[serde(rename = "type")]
    pub account_type: AccountType,
    pub owner: AccountOwner,
    pub current_balance: f64,
    /// Defaults to `current_balance` for taxable accounts when absent.
    pub cost_basis: Option<f64>,
    pub expected_return_pct: f64,
    pub fee_pct: f64,
    pub target_allocation_pct: Option<f64>,
    pub deferred_comp_schedule: Option<DeferredCompSchedule>,
}

impl Account {
    /// Owning person for accounts that aren't `joint`/don't apply to both.
    pub fn owner_person(&self) -> Option<PersonId> {
        match self.owner {
            AccountOwner::Primary => Some(PersonId::Primary),
            AccountOwner::Spouse => Some(PersonId::Spouse),
            AccountOwner::Joint => None,
        }
    }

    /// The basis the simulation should seed the account with.
    pub fn initial_cost_basis(&self) -> f64 {
        match self.cost_basis {
            Some(basis) => basis,
            None if self.account_type == AccountType::Taxable => self.current_balance,
            None => self.current_balance,
        }
    }
}
