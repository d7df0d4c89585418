//! Domain types shared by tax-year aggregation, anomaly detection, and
//! checklist generation.

use retirement_core::model::FilingStatus;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaxRecordStatus {
    Draft,
    Filed,
    Amended,
}

/// Income components as they appear on a 1040 and its supporting forms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct IncomeComponents {
    pub wages: f64,
    /// Gross Social Security benefits received; taxability is computed via
    /// the provisional-income method, not included here directly.
    pub social_security_benefits: f64,
    pub interest: f64,
    pub dividends: f64,
    pub qualified_dividends: f64,
    pub capital_gain_distributions: f64,
    pub retirement_distributions: f64,
    pub rents: f64,
    pub other_income: f64,
    pub self_employment_income: f64,
    pub short_term_capital_gains: f64,
    pub long_term_capital_gains: f64,
    pub capital_losses: f64,
}

impl IncomeComponents {
    /// `sum(income components) − capital losses`.
    pub fn gross_income(&self) -> f64 {
        self.wages
            + self.interest
            + self.dividends
            + self.capital_gain_distributions
            + self.retirement_distributions
            + self.rents
            + self.other_income
            + self.self_employment_income
            + self.short_term_capital_gains
            + self.long_term_capital_gains
            - self.capital_losses
    }

    /// Ordinary income excludes qualified dividends and net capital gains;
    /// includes taxable SS, added separately by the caller.
    pub fn ordinary_excl_preferential(&self) -> f64 {
        self.wages
            + self.interest
            + (self.dividends - self.qualified_dividends)
            + self.retirement_distributions
            + self.rents
            + self.other_income
            + self.self_employment_income
    }

    /// Qualified dividends + net capital gains, taxed at the preferential rate.
    pub fn preferential_income(&self) -> f64 {
        let net_capital_gains = (self.capital_gain_distributions
            + self.short_term_capital_gains
            + self.long_term_capital_gains
            - self.capital_losses)
            .max(0.0);
        self.qualified_dividends + net_capital_gains
    }

    /// Losses in excess of gains; reported, not offset or carried forward
    ///.
    pub fn excess_capital_losses(&self) -> f64 {
        let gains = self.capital_gain_distributions
            + self.short_term_capital_gains
            + self.long_term_capital_gains;
        (self.capital_losses - gains).max(0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Payments {
    pub federal_withheld: f64,
    pub state_withheld: f64,
    pub estimated_payments: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ItemizedDeductions {
    pub state_and_local_taxes: f64,
    pub mortgage_interest: f64,
    pub charitable: f64,
    pub medical_expenses: f64,
    pub other: f64,
}

/// SALT capped at $10k; medical expenses only count above the 7.5%-AGI
/// floor.
const SALT_CAP: f64 = 10_000.0;
const MEDICAL_AGI_FLOOR_PCT: f64 = 7.5;

impl ItemizedDeductions {
    pub fn total(&self, agi: f64) -> f64 {
        let salt = self.state_and_local_taxes.min(SALT_CAP);
        let medical_floor = agi * MEDICAL_AGI_FLOOR_PCT / 100.0;
        let medical = (self.medical_expenses - medical_floor).max(0.0);
        salt + self.mortgage_interest + self.charitable + medical + self.other
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TaxComputationResult {
    pub gross_income: f64,
    pub ordinary_income: f64,
    pub preferential_income: f64,
    pub deduction: f64,
    pub excess_capital_losses: f64,
    pub federal_tax: f64,
    pub state_tax: f64,
}

/// One year's tax picture: either the authoritative filed numbers, or
/// inputs for `tax_computation::compute_tax_year` to derive them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxYearRecord {
    pub year: i32,
    pub filing_status: FilingStatus,
    pub state_of_residence: String,
    pub status: TaxRecordStatus,
    pub income: IncomeComponents,
    pub payments: Payments,
    pub use_itemized: bool,
    pub itemized: ItemizedDeductions,
    pub standard_deduction_override: Option<f64>,
    pub federal_effective_rate_pct: f64,
    pub state_effective_rate_pct: Option<f64>,
    pub cap_gains_rate_pct: f64,
    pub total_credits: f64,
    /// Present and authoritative when `status` is `filed` or `amended`.
    pub filed_result: Option<TaxComputationResult>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormType {
    W2,
    Form1099Int,
    Form1099Div,
    Form1099R,
    Form1099B,
    Form1099Misc,
    Form1099Nec,
    Form1098,
    FormK1,
}

/// One document already reduced to extracted field values, keyed by the template's field key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedDocument {
    pub form_type: FormType,
    pub issuer_name: String,
    pub tax_year: i32,
    pub fields: BTreeMap<String, f64>,
    pub confidence: f64,
    pub low_confidence_fields: Vec<String>,
}
