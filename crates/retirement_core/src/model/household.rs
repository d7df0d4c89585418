//! Household composition and filing status.

use super::person::PersonProfile;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaritalStatus {
    Single,
    Married,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilingStatus {
    Single,
    Mfj,
    Survivor,
    Hoh,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseholdProfile {
    pub marital_status: MaritalStatus,
    pub filing_status: FilingStatus,
    /// Two-letter USPS state code, or `"DC"`.
    pub state_of_residence: String,
    pub primary: PersonProfile,
    pub spouse: Option<PersonProfile>,
}

impl HouseholdProfile {
    pub fn is_married(&self) -> bool {
        self.marital_status == MaritalStatus::Married
    }
}
