//! Plan-input validation.

use crate::error::{ValidationError, ValidationIssue};
use crate::model::{
    AccountOwner, AccountType, FilingStatus, MaritalStatus, PlanInput, BASE_CALENDAR_YEAR,
    SCHEMA_VERSION,
};

/// Reject a `PlanInput` that violates any data-model invariant, reporting
/// every offending path in one error rather than stopping at the first.
pub fn validate_plan(plan: &PlanInput) -> Result<(), ValidationError> {
    let mut issues = Vec::new();

    if plan.schema_version != SCHEMA_VERSION {
        issues.push(ValidationIssue::new(
            "schemaVersion",
            format!(
                "expected {SCHEMA_VERSION}, got {}",
                plan.schema_version
            ),
        ));
    }

    validate_household(plan, &mut issues);
    validate_accounts(plan, &mut issues);

    if issues.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { issues })
    }
}

fn validate_household(plan: &PlanInput, issues: &mut Vec<ValidationIssue>) {
    let h = &plan.household;

    validate_person(
        "household.primary",
        h.primary.birth_year,
        h.primary.current_age,
        h.primary.retirement_age,
        h.primary.life_expectancy,
        issues,
    );

    match (h.marital_status, &h.spouse) {
        (MaritalStatus::Single, Some(_)) => issues.push(ValidationIssue::new(
            "household.spouse",
            "single household must not have a spouse profile",
        )),
        (MaritalStatus::Married, None) => issues.push(ValidationIssue::new(
            "household.spouse",
            "married household must have a spouse profile",
        )),
        (MaritalStatus::Married, Some(spouse)) => {
            validate_person(
                "household.spouse",
                spouse.birth_year,
                spouse.current_age,
                spouse.retirement_age,
                spouse.life_expectancy,
                issues,
            );
        }
        (MaritalStatus::Single, None) => {}
    }

    if h.filing_status == FilingStatus::Mfj
        && (h.marital_status != MaritalStatus::Married || h.spouse.is_none())
    {
        issues.push(ValidationIssue::new(
            "household.filingStatus",
            "mfj filing status requires a married household with a spouse",
        ));
    }

    if crate::reference::lookup_state(&h.state_of_residence).is_none() {
        issues.push(ValidationIssue::new(
            "household.stateOfResidence",
            format!("unrecognized state code: {}", h.state_of_residence),
        ));
    }
}

fn validate_person(
    path: &str,
    birth_year: i32,
    current_age: u32,
    retirement_age: u32,
    life_expectancy: u32,
    issues: &mut Vec<ValidationIssue>,
) {
    if life_expectancy < current_age {
        issues.push(ValidationIssue::new(
            format!("{path}.lifeExpectancy"),
            "life expectancy must be >= current age",
        ));
    }
    if life_expectancy < retirement_age {
        issues.push(ValidationIssue::new(
            format!("{path}.lifeExpectancy"),
            "life expectancy must be >= retirement age",
        ));
    }
    let implied_age = BASE_CALENDAR_YEAR - birth_year;
    if (implied_age - current_age as i32).abs() > 2 {
        issues.push(ValidationIssue::new(
            format!("{path}.currentAge"),
            format!(
                "current age {current_age} is inconsistent with birth year {birth_year} \
                 (implies age {implied_age} in {BASE_CALENDAR_YEAR})"
            ),
        ));
    }
}

fn validate_accounts(plan: &PlanInput, issues: &mut Vec<ValidationIssue>) {
    for (idx, acct) in plan.accounts.iter().enumerate() {
        let path = format!("accounts[{idx}]");

        if acct.current_balance < 0.0 {
            issues.push(ValidationIssue::new(
                format!("{path}.currentBalance"),
                "balance must be >= 0",
            ));
        }
        if !(-100.0..=100.0).contains(&acct.expected_return_pct) {
            issues.push(ValidationIssue::new(
                format!("{path}.expectedReturnPct"),
                "must be within [-100, 100]",
            ));
        }
        if !(0.0..=100.0).contains(&acct.fee_pct) {
            issues.push(ValidationIssue::new(
                format!("{path}.feePct"),
                "must be within [0, 100]",
            ));
        }
        if acct.owner == AccountOwner::Joint && acct.account_type != AccountType::Taxable {
            issues.push(ValidationIssue::new(
                format!("{path}.owner"),
                "jointly-owned accounts must be taxable",
            ));
        }
        if let Some(schedule) = &acct.deferred_comp_schedule {
            if acct.account_type != AccountType::DeferredComp {
                issues.push(ValidationIssue::new(
                    format!("{path}.deferredCompSchedule"),
                    "a deferred comp schedule requires account type deferredComp",
                ));
            }
            if schedule.start_year > schedule.end_year {
                issues.push(ValidationIssue::new(
                    format!("{path}.deferredCompSchedule.startYear"),
                    "startYear must be <= endYear",
                ));
            }
            if schedule.amount < 0.0 {
                issues.push(ValidationIssue::new(
                    format!("{path}.deferredCompSchedule.amount"),
                    "amount must be >= 0",
                ));
            }
        }
        if acct.account_type == AccountType::DeferredComp && acct.deferred_comp_schedule.is_none()
        {
            issues.push(ValidationIssue::new(
                format!("{path}.deferredCompSchedule"),
                "deferredComp accounts require a schedule",
            ));
        }
    }

    for claim_path_person in [("household.primary", &plan.household.primary)]
        .into_iter()
        .chain(
            plan.household
                .spouse
                .as_ref()
                .map(|s| ("household.spouse", s)),
        )
    {
        let (path, person) = claim_path_person;
        if let Some(ss) = &person.social_security {
            if !(62..=70).contains(&ss.claim_age) {
                issues.push(ValidationIssue::new(
                    format!("{path}.socialSecurity.claimAge"),
                    "claim age must be within [62, 70]",
                ));
            }
            if ss.estimated_monthly_benefit_at_claim < 0.0 {
                issues.push(ValidationIssue::new(
                    format!("{path}.socialSecurity.estimatedMonthlyBenefitAtClaim"),
                    "must be >= 0",
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::support::single_baseline_plan;

    #[test]
    fn baseline_plan_is_valid() {
        let plan = single_baseline_plan();
        assert!(validate_plan(&plan).is_ok());
    }

    #[test]
    fn rejects_schema_version_mismatch() {
        let mut plan = single_baseline_plan();
        plan.schema_version = "1.0.0".to_string();
        let err = validate_plan(&plan).unwrap_err();
        assert!(err.issues.iter().any(|i| i.path == "schemaVersion"));
    }

    #[test]
    fn rejects_single_household_with_spouse() {
        use crate::model::{MaritalStatus, PersonId, PersonProfile};
        let mut plan = single_baseline_plan();
        plan.household.spouse = Some(PersonProfile {
            id: PersonId::Spouse,
            birth_year: 1965,
            current_age: 61,
            retirement_age: 65,
            life_expectancy: 90,
            social_security: None,
        });
        plan.household.marital_status = MaritalStatus::Single;
        let err = validate_plan(&plan).unwrap_err();
        assert!(err.issues.iter().any(|i| i.path == "household.spouse"));
    }

    #[test]
    fn rejects_joint_tax_deferred_account() {
        let mut plan = single_baseline_plan();
        plan.accounts[0].owner = AccountOwner::Joint;
        plan.accounts[0].account_type = AccountType::TaxDeferred;
        let err = validate_plan(&plan).unwrap_err();
        assert!(err.issues.iter().any(|i| i.path.ends_with(".owner")));
    }
}
