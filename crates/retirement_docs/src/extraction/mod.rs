//! Tax-form text extraction: form identification, labeled-field
//! parsing, issuer-name heuristics, confidence scoring, and aggregation of
//! extracted documents into income/payment totals.

mod templates;

pub use templates::{FieldSpec, FormTemplate, ValueType, TEMPLATES};

use crate::model::{ExtractedDocument, FormType, IncomeComponents, Payments};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 0.8;
const MIN_IDENTIFICATION_SCORE: u32 = 1;

/// External collaborator that turns a raw document into text; this crate
/// never calls it, since `extract_document` takes text directly. Synchronous
/// because nothing else in this workspace runs on an async executor.
pub trait TextExtractor {
    fn extract_text(&self, file: &[u8]) -> crate::error::Result<String>;
}

static ISSUER_CUES: &[&str] = &[
    "employer's name",
    "payer's name",
    "filer's name",
    "lender's name",
    "recipient's name",
];

static EIN_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)(EIN|TIN):?\s*\d{2}-\d{7}|\d{2}-\d{7}").unwrap());
static TRIPLE_SPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s{3,}").unwrap());
static CURRENCY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?P<open>\()?\s*(?P<sign>[-\u{2013}\u{2212}])?\s*\$\s*(?P<num>[\d,]+(?:\.\d+)?)\s*(?P<close>\))?").unwrap());
static BARE_NUMBER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?P<sign>[-\u{2013}\u{2212}])?\s*(?P<num>[\d,]+(?:\.\d+)?)").unwrap());

fn identify_form(text: &str) -> Option<&'static FormTemplate> {
    let lower = text.to_lowercase();
    let mut best: Option<(&'static FormTemplate, u32)> = None;

    for template in TEMPLATES {
        let score: u32 = template
            .form_identifiers
            .iter()
            .map(|id| lower.matches(&id.to_lowercase()).count() as u32)
            .sum();

        if score > best.map(|(_, s)| s).unwrap_or(0) {
            best = Some((template, score));
        }
    }

    match best {
        Some((template, score)) if score >= MIN_IDENTIFICATION_SCORE => Some(template),
        _ => None,
    }
}

fn window_after(text: &str, byte_offset: usize, max_chars: usize) -> &str {
    let rest = &text[byte_offset..];
    match rest.char_indices().nth(max_chars) {
        Some((idx, _)) => &rest[..idx],
        None => rest,
    }
}

fn parse_currency_window(window: &str) -> Option<f64> {
    let captures = CURRENCY_PATTERN.captures(window)?;
    let num: f64 = captures
        .name("num")?
        .as_str()
        .replace(',', "")
        .parse()
        .ok()?;
    let negative = captures.name("sign").is_some()
        || (captures.name("open").is_some() && captures.name("close").is_some());
    Some(if negative { -num } else { num })
}

fn parse_bare_number_window(window: &str) -> Option<f64> {
    let captures = BARE_NUMBER_PATTERN.captures(window)?;
    let num: f64 = captures
        .name("num")?
        .as_str()
        .replace(',', "")
        .parse()
        .ok()?;
    Some(if captures.name("sign").is_some() { -num } else { num })
}

fn extract_currency_field(text: &str, patterns: &[Regex]) -> Option<(f64, f64)> {
    let mut matches: Vec<regex::Match> = patterns.iter().flat_map(|p| p.find_iter(text)).collect();
    matches.sort_by_key(|m| m.start());
    if matches.is_empty() {
        return None;
    }

    for m in &matches {
        let window = window_after(text, m.end(), 100);
        if let Some(value) = parse_currency_window(window) {
            return Some((value, 1.0));
        }
    }

    let last = matches.last().unwrap();
    let window = window_after(text, last.end(), 100);
    parse_bare_number_window(window).map(|value| (value, 0.8))
}

fn extract_code_field(text: &str, patterns: &[Regex]) -> Option<(String, f64)> {
    let m = patterns.iter().find_map(|p| p.find(text))?;
    let window = window_after(text, m.end(), 100);
    let token = window.split_whitespace().next()?;
    Some((token.to_string(), 1.0))
}

fn extract_issuer_name(text: &str) -> String {
    let lower = text.to_lowercase();
    for cue in ISSUER_CUES {
        let Some(idx) = lower.find(cue) else { continue };
        let after = &text[idx + cue.len()..];
        let line_end = after.find('\n').unwrap_or(after.len());
        let mut tail = after[..line_end]
            .trim_start_matches(|c: char| c == ':' || c.is_whitespace())
            .to_string();

        tail = EIN_PATTERN.replace_all(&tail, "").to_string();
        if let Some(m) = TRIPLE_SPACE.find(&tail) {
            tail.truncate(m.start());
        }

        let tail = tail.trim();
        if !tail.is_empty() {
            return tail.chars().take(200).collect();
        }
    }
    "Unknown".to_string()
}

/// Runs form identification and field extraction over the text of a single
/// document. Returns `None` when no template scores above the minimum
/// (caller surfaces this as `PDF_FORM_UNRECOGNIZED`).
pub fn extract_document(text: &str, tax_year: i32) -> Option<ExtractedDocument> {
    let template = identify_form(text)?;
    let template_index = TEMPLATES.iter().position(|t| std::ptr::eq(t, template)).unwrap();
    let compiled = &templates::COMPILED_LABEL_PATTERNS[template_index];

    let mut fields = BTreeMap::new();
    let mut confidences = Vec::new();
    let mut low_confidence_fields = Vec::new();

    for (field_spec, patterns) in template.fields.iter().zip(compiled.iter()) {
        match field_spec.value_type {
            ValueType::Currency => match extract_currency_field(text, patterns) {
                Some((value, confidence)) => {
                    fields.insert(field_spec.key.to_string(), value);
                    confidences.push(confidence);
                    if confidence < DEFAULT_CONFIDENCE_THRESHOLD {
                        low_confidence_fields.push(field_spec.key.to_string());
                    }
                }
                None if field_spec.required => {
                    confidences.push(0.0);
                    low_confidence_fields.push(field_spec.key.to_string());
                }
                None => {}
            },
            ValueType::Code => match extract_code_field(text, patterns) {
                Some((_, confidence)) => confidences.push(confidence),
                None if field_spec.required => {
                    confidences.push(0.0);
                    low_confidence_fields.push(field_spec.key.to_string());
                }
                None => {}
            },
        }
    }

    let confidence = if confidences.is_empty() {
        0.0
    } else {
        confidences.iter().sum::<f64>() / confidences.len() as f64
    };

    Some(ExtractedDocument {
        form_type: template.form_type,
        issuer_name: extract_issuer_name(text),
        tax_year,
        fields,
        confidence,
        low_confidence_fields,
    })
}

/// Sums extracted fields per form type into income and payment totals
///. 1098 and unrecognized documents don't
/// contribute.
pub fn aggregate(documents: &[ExtractedDocument]) -> (IncomeComponents, Payments) {
    let mut income = IncomeComponents::default();
    let mut payments = Payments::default();

    for doc in documents {
        let get = |key: &str| doc.fields.get(key).copied().unwrap_or(0.0);

        match doc.form_type {
            FormType::W2 => {
                income.wages += get("wages");
                payments.federal_withheld += get("federal_withheld");
                payments.state_withheld += get("state_withheld");
            }
            FormType::Form1099Int => {
                income.interest += get("interest");
            }
            FormType::Form1099Div => {
                income.dividends += get("dividends");
                income.qualified_dividends += get("qualified_dividends");
                income.capital_gain_distributions += get("capital_gain_distributions");
            }
            FormType::Form1099R => {
                income.retirement_distributions += get("taxable_amount");
            }
            FormType::Form1099B => {
                let reported_gain_loss = get("gain_loss");
                let gain_loss = if reported_gain_loss != 0.0 {
                    reported_gain_loss
                } else {
                    get("proceeds") - get("cost_basis")
                };
                if gain_loss >= 0.0 {
                    income.short_term_capital_gains += gain_loss;
                } else {
                    income.capital_losses += gain_loss.abs();
                }
            }
            FormType::Form1099Misc => {
                income.rents += get("rents");
                income.other_income += get("other_income");
            }
            FormType::Form1099Nec => {
                income.self_employment_income += get("nonemployee_compensation");
            }
            FormType::FormK1 => {
                income.interest += get("interest_income");
                income.dividends += get("ordinary_dividends");
                income.qualified_dividends += get("qualified_dividends");
                income.rents += get("net_rental_income");
                income.other_income += get("ordinary_business_income");

                let short_term = get("net_short_term_gain");
                let long_term = get("net_long_term_gain");
                if short_term >= 0.0 {
                    income.short_term_capital_gains += short_term;
                } else {
                    income.capital_losses += short_term.abs();
                }
                if long_term >= 0.0 {
                    income.long_term_capital_gains += long_term;
                } else {
                    income.capital_losses += long_term.abs();
                }
            }
            FormType::Form1098 => {}
        }
    }

    (income, payments)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifies_w2_and_extracts_wages() {
        let text = "Form W-2 Wage and Tax Statement 2025\nWages, tips, other compensation\n$80,000.00\nFederal income tax withheld\n$15,000.00\n";
        let doc = extract_document(text, 2025).unwrap();
        assert_eq!(doc.form_type, FormType::W2);
        assert_eq!(doc.fields.get("wages").copied(), Some(80_000.0));
        assert_eq!(doc.fields.get("federal_withheld").copied(), Some(15_000.0));
    }

    #[test]
    fn parenthesized_currency_is_negative() {
        let text = "Form 1099-B Proceeds From Broker\nGain or loss\n($1,200.00)\n";
        let doc = extract_document(text, 2025).unwrap();
        assert_eq!(doc.fields.get("gain_loss").copied(), Some(-1_200.0));
    }

    #[test]
    fn unrecognized_text_returns_none() {
        assert!(extract_document("not a tax form at all", 2025).is_none());
    }

    #[test]
    fn issuer_name_strips_ein_and_clamps() {
        let text = "Payer's name: Acme Brokerage LLC  EIN: 12-3456789\nMore unrelated text";
        let name = extract_issuer_name(text);
        assert!(name.starts_with("Acme Brokerage"));
        assert!(!name.contains("12-3456789"));
    }

    #[test]
    fn aggregation_sums_two_w2s_and_a_1099_int() {
        let w2a = "Form W-2 Wage and Tax Statement\nWages, tips, other compensation\n$80,000\nFederal income tax withheld\n$15,000\n";
        let w2b = "Form W-2 Wage and Tax Statement\nWages, tips, other compensation\n$45,000\nFederal income tax withheld\n$8,500\n";
        let int_doc = "Form 1099-INT Interest Income\nInterest Income\n$2,500\n";

        let docs: Vec<ExtractedDocument> = [w2a, w2b, int_doc]
            .iter()
            .map(|t| extract_document(t, 2025).unwrap())
            .collect();
        assert_eq!(docs.len(), 3);

        let (income, payments) = aggregate(&docs);
        assert_eq!(income.wages, 125_000.0);
        assert_eq!(income.interest, 2_500.0);
        assert_eq!(payments.federal_withheld, 23_500.0);
    }
}
