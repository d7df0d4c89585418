//! Standalone tax computation, consumed by `TaxYearRecord`s
//! outside the simulation engine. Shares the provisional-SS-income method
//! and state table with `retirement_core::pipeline::taxes`, but applies
//! the SALT cap and medical-AGI floor the engine's in-loop math skips.

use crate::model::{TaxComputationResult, TaxRecordStatus, TaxYearRecord};
use retirement_core::pipeline::taxes::taxable_social_security;
use retirement_core::reference::{self, SsTaxExempt};

pub fn compute_tax_year(record: &TaxYearRecord) -> TaxComputationResult {
    if matches!(record.status, TaxRecordStatus::Filed | TaxRecordStatus::Amended) {
        if let Some(filed) = record.filed_result {
            return filed;
        }
    }

    let gross_income = record.income.gross_income();
    let taxable_ss = taxable_social_security(
        record.income.ordinary_excl_preferential(),
        record.income.social_security_benefits,
        record.filing_status,
    );
    let ordinary_income = record.income.ordinary_excl_preferential() + taxable_ss;
    let preferential_income = record.income.preferential_income();
    let excess_capital_losses = record.income.excess_capital_losses();

    let deduction = if record.use_itemized {
        record.itemized.total(gross_income)
    } else {
        record
            .standard_deduction_override
            .unwrap_or_else(|| reference::base_standard_deduction(record.filing_status))
    };

    let ordinary_after_deduction = (ordinary_income - deduction).max(0.0);
    let federal_tax = (ordinary_after_deduction * record.federal_effective_rate_pct / 100.0
        + preferential_income * record.cap_gains_rate_pct / 100.0
        - record.total_credits)
        .max(0.0);

    let state_tax = compute_state_tax(record, ordinary_income, taxable_ss, preferential_income, deduction);

    TaxComputationResult {
        gross_income,
        ordinary_income,
        preferential_income,
        deduction,
        excess_capital_losses,
        federal_tax,
        state_tax,
    }
}

fn compute_state_tax(
    record: &TaxYearRecord,
    ordinary_income: f64,
    taxable_ss: f64,
    preferential_income: f64,
    federal_deduction: f64,
) -> f64 {
    let Some(info) = reference::lookup_state(&record.state_of_residence) else {
        return 0.0;
    };

    let ss_for_state = match info.ss_tax_exempt {
        SsTaxExempt::Yes => 0.0,
        SsTaxExempt::Partial => taxable_ss * 0.5,
        SsTaxExempt::No => taxable_ss,
    };
    let ordinary_for_state = (ordinary_income - taxable_ss) + ss_for_state;

    let deduction = info
        .state_standard_deduction
        .unwrap_or_else(|| (federal_deduction * 0.5).round());
    let income_rate = record.state_effective_rate_pct.unwrap_or(info.income_rate);

    let taxable_gains = match info.capital_gains_threshold {
        Some(threshold) => (preferential_income - threshold).max(0.0),
        None => preferential_income,
    };
    let cap_gains_rate = info.capital_gains_rate;

    ((ordinary_for_state - deduction).max(0.0) * income_rate / 100.0
        + taxable_gains * cap_gains_rate / 100.0)
        .max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::IncomeComponents;
    use retirement_core::model::FilingStatus;

    fn baseline_record() -> TaxYearRecord {
        TaxYearRecord {
            year: 2025,
            filing_status: FilingStatus::Single,
            state_of_residence: "TX".to_string(),
            status: TaxRecordStatus::Draft,
            income: IncomeComponents {
                wages: 90_000.0,
                ..Default::default()
            },
            payments: Default::default(),
            use_itemized: false,
            itemized: Default::default(),
            standard_deduction_override: None,
            federal_effective_rate_pct: 18.0,
            state_effective_rate_pct: None,
            cap_gains_rate_pct: 15.0,
            total_credits: 0.0,
            filed_result: None,
        }
    }

    #[test]
    fn filed_record_returns_recorded_numbers_verbatim() {
        let mut record = baseline_record();
        record.status = TaxRecordStatus::Filed;
        record.filed_result = Some(TaxComputationResult {
            gross_income: 1.0,
            ordinary_income: 2.0,
            preferential_income: 3.0,
            deduction: 4.0,
            excess_capital_losses: 5.0,
            federal_tax: 6.0,
            state_tax: 7.0,
        });

        let result = compute_tax_year(&record);
        assert_eq!(result.federal_tax, 6.0);
        assert_eq!(result.state_tax, 7.0);
    }

    #[test]
    fn draft_record_subtracts_standard_deduction_before_federal_tax() {
        let record = baseline_record();
        let result = compute_tax_year(&record);
        let expected_ordinary_after_deduction = (90_000.0 - 15_000.0_f64).max(0.0);
        assert!((result.federal_tax - expected_ordinary_after_deduction * 0.18).abs() < 1e-6);
        assert_eq!(result.state_tax, 0.0);
    }

    #[test]
    fn excess_capital_losses_are_reported_not_offset() {
        let mut record = baseline_record();
        record.income.capital_losses = 10_000.0;
        let result = compute_tax_year(&record);
        assert_eq!(result.excess_capital_losses, 10_000.0);
    }
}
