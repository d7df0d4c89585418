//! Immutable plan domain types.
//!
//! Everything in this module is what a caller provides (`PlanInput` and its
//! parts) or receives back (`PlanResult` and its parts). Mutable per-run
//! bookkeeping lives in `crate::state`.

mod account;
mod household;
mod ids;
mod income;
mod market_config;
mod person;
mod plan;
mod results;
mod spending;
mod strategy_config;
mod tax_config;

pub use account::{
    Account, AccountOwner, AccountType, DeferredCompSchedule, DistributionFrequency,
};
pub use household::{FilingStatus, HouseholdProfile, MaritalStatus};
pub use ids::{AccountId, PersonId};
pub use income::{Adjustment, IncomeStream, StreamOwner};
pub use market_config::{MarketConfig, SimulationMode};
pub use person::{PersonProfile, SocialSecurityClaim};
pub use plan::{PlanInput, BASE_CALENDAR_YEAR, SCHEMA_VERSION};
pub use results::{
    AssumptionsUsed, ConvergenceWarning, PlanResult, PlanSummary, YearResult,
};
pub use spending::SpendingPlan;
pub use strategy_config::{RebalanceFrequency, StrategyConfig, WithdrawalOrder};
pub use tax_config::{FederalModel, StateModel, TaxConfig};
