//! Baseline `PlanInput` fixture shared by unit tests in `crate::pipeline`
//! and `crate::validate`. Intentionally minimal: single filer, one taxable
//! account, no tax-deferred RMD exposure, no-income-tax state.

use crate::model::*;

pub fn single_baseline_plan() -> PlanInput {
    PlanInput {
        schema_version: SCHEMA_VERSION.to_string(),
        household: HouseholdProfile {
            marital_status: MaritalStatus::Single,
            filing_status: FilingStatus::Single,
            state_of_residence: "TX".to_string(),
            primary: PersonProfile {
                id: PersonId::Primary,
                birth_year: BASE_CALENDAR_YEAR - 65,
                current_age: 65,
                retirement_age: 65,
                life_expectancy: 90,
                social_security: Some(SocialSecurityClaim {
                    claim_age: 67,
                    estimated_monthly_benefit_at_claim: 2_200.0,
                    cola_pct: 2.0,
                }),
            },
            spouse: None,
        },
        accounts: vec![
            Account {
                id: AccountId("taxable-1".to_string()),
                name: "Brokerage".to_string(),
                account_type: AccountType::Taxable,
                owner: AccountOwner::Primary,
                current_balance: 500_000.0,
                cost_basis: Some(300_000.0),
                expected_return_pct: 6.0,
                fee_pct: 0.1,
                target_allocation_pct: None,
                deferred_comp_schedule: None,
            },
            Account {
                id: AccountId("tax-deferred-1".to_string()),
                name: "Traditional IRA".to_string(),
                account_type: AccountType::TaxDeferred,
                owner: AccountOwner::Primary,
                current_balance: 400_000.0,
                cost_basis: None,
                expected_return_pct: 6.0,
                fee_pct: 0.1,
                target_allocation_pct: None,
                deferred_comp_schedule: None,
            },
        ],
        income_streams: Vec::new(),
        adjustments: Vec::new(),
        spending: SpendingPlan {
            target_annual_spend: 60_000.0,
            inflation_pct: 2.5,
            floor_annual_spend: None,
            ceiling_annual_spend: None,
            survivor_spending_adjustment_pct: 100.0,
        },
        tax: TaxConfig {
            federal_model: FederalModel::Effective,
            state_model: StateModel::None,
            federal_effective_rate_pct: 22.0,
            state_effective_rate_pct: None,
            cap_gains_rate_pct: 15.0,
            state_cap_gains_rate_pct: None,
            standard_deduction_override: None,
        },
        market: MarketConfig {
            simulation_mode: SimulationMode::Deterministic,
            deterministic_return_pct: Some(6.0),
            deterministic_inflation_pct: Some(2.5),
            monte_carlo_runs: None,
        },
        strategy: StrategyConfig {
            withdrawal_order: WithdrawalOrder::TaxableFirst,
            rebalance_frequency: RebalanceFrequency::None,
            guardrails_enabled: false,
        },
    }
}
