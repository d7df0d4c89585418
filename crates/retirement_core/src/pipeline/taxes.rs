//! Step 9 — Calculate Taxes.

use crate::model::{FederalModel, FilingStatus, PlanInput, StateModel};
use crate::reference::{self, SsTaxExempt};

/// Provisional-income thresholds for Social Security taxability, dollars.
struct ProvisionalThresholds {
    lower: f64,
    upper: f64,
    mid_band_cap: f64,
}

fn provisional_thresholds(filing_status: FilingStatus) -> ProvisionalThresholds {
    match filing_status {
        FilingStatus::Single | FilingStatus::Hoh => ProvisionalThresholds {
            lower: 25_000.0,
            upper: 34_000.0,
            mid_band_cap: 4_500.0,
        },
        FilingStatus::Mfj | FilingStatus::Survivor => ProvisionalThresholds {
            lower: 32_000.0,
            upper: 44_000.0,
            mid_band_cap: 6_000.0,
        },
    }
}

/// `PI = ordinaryBeforeSS + 0.5 × ssIncome`, piecewise taxable fraction.
pub fn taxable_social_security(ordinary_before_ss: f64, ss_income: f64, filing_status: FilingStatus) -> f64 {
    if ss_income <= 0.0 {
        return 0.0;
    }
    let t = provisional_thresholds(filing_status);
    let pi = ordinary_before_ss + 0.5 * ss_income;

    if pi <= t.lower {
        0.0
    } else if pi <= t.upper {
        (0.5 * ss_income).min(0.5 * (pi - t.lower))
    } else {
        (0.85 * ss_income).min(0.85 * (pi - t.upper) + t.mid_band_cap)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TaxResult {
    pub taxable_ss: f64,
    pub total_ordinary_income: f64,
    pub total_cap_gains: f64,
    pub taxes_federal: f64,
    pub taxes_state: f64,
}

impl TaxResult {
    pub fn total(&self) -> f64 {
        self.taxes_federal + self.taxes_state
    }
}

#[allow(clippy::too_many_arguments)]
pub fn calculate_taxes(
    plan: &PlanInput,
    filing_status: FilingStatus,
    ordinary_before_ss: f64,
    ss_income: f64,
    mandatory_cap_gains: f64,
    cap_gains_from_withdrawals: f64,
    prior_year_rebalance_gains: f64,
    standard_deduction: f64,
    state_standard_deduction_fallback: f64,
) -> TaxResult {
    let taxable_ss = taxable_social_security(ordinary_before_ss, ss_income, filing_status);
    let total_ordinary_income = ordinary_before_ss + taxable_ss;
    let total_cap_gains = mandatory_cap_gains + cap_gains_from_withdrawals + prior_year_rebalance_gains;

    debug_assert!(matches!(plan.tax.federal_model, FederalModel::Effective));

    let taxes_federal = ((total_ordinary_income - standard_deduction).max(0.0)
        * plan.tax.federal_effective_rate_pct
        / 100.0
        + total_cap_gains * plan.tax.cap_gains_rate_pct / 100.0)
        .max(0.0);

    let taxes_state = match plan.tax.state_model {
        StateModel::None => 0.0,
        StateModel::Effective | StateModel::Bracket => calculate_state_tax(
            plan,
            total_ordinary_income,
            taxable_ss,
            total_cap_gains,
            state_standard_deduction_fallback,
        ),
    };

    TaxResult {
        taxable_ss,
        total_ordinary_income,
        total_cap_gains,
        taxes_federal,
        taxes_state,
    }
}

fn calculate_state_tax(
    plan: &PlanInput,
    total_ordinary_income: f64,
    taxable_ss: f64,
    total_cap_gains: f64,
    fallback_deduction: f64,
) -> f64 {
    let Some(info) = reference::lookup_state(&plan.household.state_of_residence) else {
        return 0.0;
    };

    let ss_for_state = match info.ss_tax_exempt {
        SsTaxExempt::Yes => 0.0,
        SsTaxExempt::Partial => taxable_ss * 0.5,
        SsTaxExempt::No => taxable_ss,
    };
    let ordinary_for_state = (total_ordinary_income - taxable_ss) + ss_for_state;

    let deduction = info.state_standard_deduction.unwrap_or(fallback_deduction);
    let income_rate = plan.tax.state_effective_rate_pct.unwrap_or(info.income_rate);
    let cap_gains_rate = plan.tax.state_cap_gains_rate_pct.unwrap_or(info.capital_gains_rate);

    let taxable_cap_gains = match info.capital_gains_threshold {
        Some(threshold) => (total_cap_gains - threshold).max(0.0),
        None => total_cap_gains,
    };

    ((ordinary_for_state - deduction).max(0.0) * income_rate / 100.0
        + taxable_cap_gains * cap_gains_rate / 100.0)
        .max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_ss_taxable_below_lower_threshold() {
        assert_eq!(taxable_social_security(10_000.0, 10_000.0, FilingStatus::Mfj), 0.0);
    }

    #[test]
    fn half_band_caps_at_half_of_benefit() {
        let taxable = taxable_social_security(40_000.0, 20_000.0, FilingStatus::Mfj);
        assert!(taxable <= 0.5 * 20_000.0 + 1e-9);
        assert!(taxable > 0.0);
    }

    #[test]
    fn top_band_caps_at_eighty_five_percent_of_benefit() {
        let taxable = taxable_social_security(200_000.0, 30_000.0, FilingStatus::Single);
        assert!((taxable - 0.85 * 30_000.0).abs() < 1e-6);
    }
}
