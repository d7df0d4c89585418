//! Household members and their Social Security claims.

use serde::{Deserialize, Serialize};

/// Social Security claiming parameters for one person.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialSecurityClaim {
    /// Age at which benefits are (or were) claimed, in `[62, 70]`.
    pub claim_age: u32,
    /// Estimated monthly benefit at the claim age, before any COLA growth.
    pub estimated_monthly_benefit_at_claim: f64,
    /// Annual cost-of-living adjustment applied every calendar year after claiming.
    pub cola_pct: f64,
}

/// One member of the household.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonProfile {
    pub id: crate::model::PersonId,
    pub birth_year: i32,
    pub current_age: u32,
    pub retirement_age: u32,
    pub life_expectancy: u32,
    pub social_security: Option<SocialSecurityClaim>,
}

impl PersonProfile {
    /// The age this person would be in `calendar_year`, floored to 0.
    pub fn age_in(&self, calendar_year: i32) -> i32 {
        calendar_year - self.birth_year
    }
}
