//! Cross-year anomaly detection: document omissions, field-level
//! swings, and multi-year pattern breaks, surfaced against a prior-year
//! record and that year's document list.

use crate::model::{ExtractedDocument, IncomeComponents, TaxYearRecord};
use serde::Serialize;
use std::collections::HashSet;

const DEFAULT_THRESHOLD_PCT: f64 = 25.0;
const DEFAULT_THRESHOLD_ABSOLUTE: f64 = 5_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Anomaly {
    pub id: String,
    pub severity: Severity,
    pub message: String,
}

pub struct AnomalyThresholds {
    pub pct: f64,
    pub absolute: f64,
}

impl Default for AnomalyThresholds {
    fn default() -> Self {
        AnomalyThresholds {
            pct: DEFAULT_THRESHOLD_PCT,
            absolute: DEFAULT_THRESHOLD_ABSOLUTE,
        }
    }
}

/// lowercase -> strip punctuation -> drop common suffixes -> collapse
/// whitespace.
pub fn normalize_issuer_name(name: &str) -> String {
    let stop_words: HashSet<&str> = ["inc", "llc", "corp", "ltd", "co", "the"].into_iter().collect();

    let stripped: String = name
        .chars()
        .map(|c| if c.is_ascii_punctuation() { ' ' } else { c })
        .collect();

    let tokens: Vec<&str> = stripped
        .to_lowercase()
        .split_whitespace()
        .filter(|t| !stop_words.contains(t))
        .collect();

    tokens.join(" ")
}

fn token_set(normalized: &str) -> HashSet<&str> {
    normalized.split_whitespace().collect()
}

/// Jaccard similarity of the normalized names' token sets, or exact
/// normalized-string equality.
pub fn issuer_names_match(a: &str, b: &str) -> bool {
    let norm_a = normalize_issuer_name(a);
    let norm_b = normalize_issuer_name(b);
    if norm_a == norm_b {
        return true;
    }

    let set_a = token_set(&norm_a);
    let set_b = token_set(&norm_b);
    if set_a.is_empty() || set_b.is_empty() {
        return false;
    }

    let intersection = set_a.intersection(&set_b).count();
    let union = set_a.union(&set_b).count();
    (intersection as f64 / union as f64) >= 0.6
}

struct NamedField {
    name: &'static str,
    value: fn(&IncomeComponents) -> f64,
}

const NAMED_FIELDS: &[NamedField] = &[
    NamedField { name: "wages", value: |i| i.wages },
    NamedField {
        name: "social_security_benefits",
        value: |i| i.social_security_benefits,
    },
    NamedField { name: "interest", value: |i| i.interest },
    NamedField { name: "dividends", value: |i| i.dividends },
    NamedField {
        name: "retirement_distributions",
        value: |i| i.retirement_distributions,
    },
    NamedField { name: "rents", value: |i| i.rents },
    NamedField { name: "other_income", value: |i| i.other_income },
    NamedField {
        name: "self_employment_income",
        value: |i| i.self_employment_income,
    },
];

/// Document omissions, per-field swings, and (with 3+ years of history)
/// trend reversals for `current` relative to `prior` and, for pattern
/// breaks, `two_years_ago`.
pub fn detect_anomalies(
    current: &TaxYearRecord,
    current_documents: &[ExtractedDocument],
    prior: Option<(&TaxYearRecord, &[ExtractedDocument])>,
    two_years_ago: Option<&TaxYearRecord>,
    thresholds: &AnomalyThresholds,
) -> Vec<Anomaly> {
    let mut anomalies = Vec::new();
    let mut index = 0usize;

    if let Some((prior_record, prior_documents)) = prior {
        for prior_doc in prior_documents {
            let still_present = current_documents.iter().any(|d| {
                d.form_type == prior_doc.form_type && issuer_names_match(&d.issuer_name, &prior_doc.issuer_name)
            });
            if !still_present {
                anomalies.push(Anomaly {
                    id: format!("anomaly-{}-{}", current.year, index),
                    severity: Severity::Warning,
                    message: format!(
                        "{:?} from {} was present in {} but is missing this year",
                        prior_doc.form_type, prior_doc.issuer_name, prior_record.year
                    ),
                });
                index += 1;
            }
        }

        for field in NAMED_FIELDS {
            let prior_value = (field.value)(&prior_record.income);
            let current_value = (field.value)(&current.income);

            if let Some(severity) = field_anomaly_severity(prior_value, current_value, thresholds) {
                anomalies.push(Anomaly {
                    id: format!("anomaly-{}-{}", current.year, index),
                    severity,
                    message: format!(
                        "{} changed from {:.2} to {:.2}",
                        field.name, prior_value, current_value
                    ),
                });
                index += 1;
            }
        }

        if let Some(two_ago) = two_years_ago {
            for field in NAMED_FIELDS {
                let v0 = (field.value)(&two_ago.income);
                let v1 = (field.value)(&prior_record.income);
                let v2 = (field.value)(&current.income);
                let delta_prior = v1 - v0;
                let delta_current = v2 - v1;

                let opposite_signs = delta_prior != 0.0
                    && delta_current != 0.0
                    && delta_prior.signum() != delta_current.signum();
                if opposite_signs
                    && delta_current.abs() > thresholds.absolute
                    && delta_current.abs() > thresholds.pct / 2.0 / 100.0 * v1.abs()
                {
                    anomalies.push(Anomaly {
                        id: format!("anomaly-{}-{}", current.year, index),
                        severity: Severity::Warning,
                        message: format!("{} reversed trend direction this year", field.name),
                    });
                    index += 1;
                }
            }
        }
    }

    anomalies
}

fn field_anomaly_severity(prior: f64, current: f64, thresholds: &AnomalyThresholds) -> Option<Severity> {
    if prior == 0.0 {
        return if current > 0.0 { Some(Severity::Info) } else { None };
    }

    let delta = current - prior;
    let pct_change = (delta / prior).abs() * 100.0;
    let abs_change = delta.abs();

    if pct_change > thresholds.pct && abs_change > thresholds.absolute {
        if pct_change > 2.0 * thresholds.pct && abs_change > 2.0 * thresholds.absolute {
            Some(Severity::Critical)
        } else {
            Some(Severity::Warning)
        }
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issuer_names_match_ignores_suffix_and_case() {
        assert!(issuer_names_match("Fidelity Investments, Inc.", "FIDELITY INVESTMENTS"));
    }

    #[test]
    fn issuer_names_differ_when_token_overlap_is_low() {
        assert!(!issuer_names_match("Fidelity Investments", "Charles Schwab"));
    }

    #[test]
    fn new_income_source_is_info_not_warning() {
        let thresholds = AnomalyThresholds::default();
        assert_eq!(
            field_anomaly_severity(0.0, 10_000.0, &thresholds),
            Some(Severity::Info)
        );
    }

    #[test]
    fn large_swing_past_double_threshold_is_critical() {
        let thresholds = AnomalyThresholds::default();
        // +60% and +$15,000 both exceed double the default thresholds.
        assert_eq!(
            field_anomaly_severity(25_000.0, 40_000.0, &thresholds),
            Some(Severity::Critical)
        );
    }

    #[test]
    fn small_swing_is_not_an_anomaly() {
        let thresholds = AnomalyThresholds::default();
        assert_eq!(field_anomaly_severity(25_000.0, 26_000.0, &thresholds), None);
    }
}
