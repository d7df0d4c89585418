//! Deterministic tax-prep checklist generation: document
//! expectations, income reminders, deduction reviews, life-event flags,
//! and filing deadlines for a given tax year.

use crate::anomaly::issuer_names_match;
use crate::model::{ExtractedDocument, FormType, ItemizedDeductions, TaxYearRecord};
use retirement_core::model::{Account, AccountType, IncomeStream};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ChecklistCategory {
    Document,
    Income,
    Deduction,
    LifeEvent,
    Deadline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ChecklistStatus {
    Pending,
    Received,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistItem {
    pub id: String,
    pub category: ChecklistCategory,
    pub description: String,
    pub status: ChecklistStatus,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistResult {
    pub items: Vec<ChecklistItem>,
    pub completion_pct: f64,
}

#[allow(clippy::too_many_arguments)]
pub fn generate_checklist(
    year: i32,
    prior: &TaxYearRecord,
    current: &TaxYearRecord,
    prior_documents: &[ExtractedDocument],
    current_documents: &[ExtractedDocument],
    accounts: &[Account],
    income_streams: &[IncomeStream],
) -> ChecklistResult {
    let mut items = Vec::new();
    let mut index = 0usize;
    let mut push = |items: &mut Vec<ChecklistItem>,
                    index: &mut usize,
                    category: ChecklistCategory,
                    description: String,
                    status: ChecklistStatus| {
        items.push(ChecklistItem {
            id: format!("checklist-{year}-{index}"),
            category,
            description,
            status,
        });
        *index += 1;
    };

    // Rule 1: document expectations carried over from last year's documents.
    for prior_doc in prior_documents {
        let received = current_documents.iter().any(|d| {
            d.form_type == prior_doc.form_type && issuer_names_match(&d.issuer_name, &prior_doc.issuer_name)
        });
        push(
            &mut items,
            &mut index,
            ChecklistCategory::Document,
            format!("{:?} from {}", prior_doc.form_type, prior_doc.issuer_name),
            if received {
                ChecklistStatus::Received
            } else {
                ChecklistStatus::Pending
            },
        );
    }

    // Rule 2: 1099-INT/DIV expected from every taxable account with a balance.
    for account in accounts {
        if account.account_type == AccountType::Taxable && account.current_balance > 0.0 {
            push(
                &mut items,
                &mut index,
                ChecklistCategory::Income,
                format!("1099-INT/DIV expected from {}", account.name),
                ChecklistStatus::Pending,
            );
        }
    }

    // Rule 3: 1099-R expected from every tax-deferred/Roth account.
    for account in accounts {
        if matches!(account.account_type, AccountType::TaxDeferred | AccountType::Roth) {
            let received = current_documents
                .iter()
                .any(|d| d.form_type == FormType::Form1099R && issuer_names_match(&d.issuer_name, &account.name));
            push(
                &mut items,
                &mut index,
                ChecklistCategory::Document,
                format!("1099-R expected from {}", account.name),
                if received {
                    ChecklistStatus::Received
                } else {
                    ChecklistStatus::Pending
                },
            );
        }
    }

    // Rule 4: one item per income stream active in this calendar year.
    for stream in income_streams {
        if stream.is_active_in(year) {
            push(
                &mut items,
                &mut index,
                ChecklistCategory::Income,
                format!("Report income stream: {}", stream.name),
                ChecklistStatus::Pending,
            );
        }
    }

    // Rule 5: review each itemized deduction category that had a positive
    // prior-year value.
    for (label, value) in itemized_categories(&prior.itemized) {
        if value > 0.0 {
            push(
                &mut items,
                &mut index,
                ChecklistCategory::Deduction,
                format!("Review {label} deduction (prior year: {value:.2})"),
                ChecklistStatus::Pending,
            );
        }
    }

    // Rule 6: filing status or state change from the prior year.
    if let Some(life_event) = detect_life_event(year, index, prior, current) {
        items.push(life_event);
        index += 1;
    }

    // Rule 7: federal filing deadline.
    push(
        &mut items,
        &mut index,
        ChecklistCategory::Deadline,
        format!("Federal filing deadline: April 15, {}", year + 1),
        ChecklistStatus::Pending,
    );

    // Rule 8: quarterly estimated-payment deadlines if the prior year made
    // estimated payments.
    if prior.payments.estimated_payments > 0.0 {
        for (quarter, due) in [
            ("Q1", format!("April 15, {year}")),
            ("Q2", format!("June 15, {year}")),
            ("Q3", format!("September 15, {year}")),
            ("Q4", format!("January 15, {}", year + 1)),
        ] {
            push(
                &mut items,
                &mut index,
                ChecklistCategory::Deadline,
                format!("Estimated payment {quarter} due {due}"),
                ChecklistStatus::Pending,
            );
        }
    }

    let total = items.len();
    let completed = items
        .iter()
        .filter(|i| i.status != ChecklistStatus::Pending)
        .count();
    let completion_pct = if total == 0 {
        100.0
    } else {
        completed as f64 / total as f64 * 100.0
    };

    ChecklistResult { items, completion_pct }
}

/// Rule 6: the life-event item when the current record's filing status or
/// state differs from the prior record's. Kept as a standalone function
/// (called from `generate_checklist`) since it compares two whole records
/// rather than folding into the `push`-closure pattern the other rules use.
pub fn detect_life_event(year: i32, index: usize, prior: &TaxYearRecord, current: &TaxYearRecord) -> Option<ChecklistItem> {
    if prior.filing_status != current.filing_status || prior.state_of_residence != current.state_of_residence {
        Some(ChecklistItem {
            id: format!("checklist-{year}-{index}"),
            category: ChecklistCategory::LifeEvent,
            description: "Filing status or state of residence changed from last year".to_string(),
            status: ChecklistStatus::Pending,
        })
    } else {
        None
    }
}

fn itemized_categories(itemized: &ItemizedDeductions) -> [(&'static str, f64); 5] {
    [
        ("state and local tax", itemized.state_and_local_taxes),
        ("mortgage interest", itemized.mortgage_interest),
        ("charitable", itemized.charitable),
        ("medical expenses", itemized.medical_expenses),
        ("other", itemized.other),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{IncomeComponents, Payments, TaxRecordStatus};
    use retirement_core::model::FilingStatus;

    fn empty_record(year: i32) -> TaxYearRecord {
        TaxYearRecord {
            year,
            filing_status: FilingStatus::Single,
            state_of_residence: "TX".to_string(),
            status: TaxRecordStatus::Draft,
            income: IncomeComponents::default(),
            payments: Payments::default(),
            use_itemized: false,
            itemized: ItemizedDeductions::default(),
            standard_deduction_override: None,
            federal_effective_rate_pct: 18.0,
            state_effective_rate_pct: None,
            cap_gains_rate_pct: 15.0,
            total_credits: 0.0,
            filed_result: None,
        }
    }

    #[test]
    fn always_includes_federal_deadline() {
        let prior = empty_record(2024);
        let current = empty_record(2025);
        let result = generate_checklist(2025, &prior, &current, &[], &[], &[], &[]);
        assert!(result
            .items
            .iter()
            .any(|i| i.category == ChecklistCategory::Deadline && i.description.contains("April 15, 2026")));
    }

    #[test]
    fn estimated_payments_add_four_quarterly_deadlines() {
        let mut prior = empty_record(2024);
        prior.payments.estimated_payments = 4_000.0;
        let current = empty_record(2025);
        let result = generate_checklist(2025, &prior, &current, &[], &[], &[], &[]);
        let quarterly = result
            .items
            .iter()
            .filter(|i| i.category == ChecklistCategory::Deadline && i.description.contains("Estimated payment"))
            .count();
        assert_eq!(quarterly, 4);
    }

    #[test]
    fn completion_pct_is_100_when_no_items() {
        let prior = empty_record(2024);
        let current = empty_record(2025);
        let result = generate_checklist(2025, &prior, &current, &[], &[], &[], &[]);
        assert!(result.completion_pct <= 100.0);
        assert!(result.completion_pct >= 0.0);
    }

    #[test]
    fn life_event_detected_on_state_change() {
        let prior = empty_record(2024);
        let mut current = empty_record(2025);
        current.state_of_residence = "CA".to_string();
        let item = detect_life_event(2025, 0, &prior, &current);
        assert!(item.is_some());
    }

    #[test]
    fn generate_checklist_includes_life_event_on_filing_status_change() {
        let prior = empty_record(2024);
        let mut current = empty_record(2025);
        current.filing_status = FilingStatus::Mfj;
        let result = generate_checklist(2025, &prior, &current, &[], &[], &[], &[]);
        assert!(result.items.iter().any(|i| i.category == ChecklistCategory::LifeEvent));
    }
}
