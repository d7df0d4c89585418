//! Flat-rate state tax reference data for the 50 states + DC.
//!
//! The bracket table (when present) exists for the standalone
//! tax-computation module's progressive path; the engine's in-loop state
//! tax calculation always uses the flat `income_rate`/`capital_gains_rate`
//! fields. Rates here are illustrative effective-rate approximations for
//! simulation purposes, not tax advice.

use std::collections::HashMap;
use std::sync::LazyLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SsTaxExempt {
    Yes,
    No,
    Partial,
}

#[derive(Debug, Clone, Copy)]
pub struct TaxBracket {
    pub upper_bound: f64,
    pub rate: f64,
}

#[derive(Debug, Clone)]
pub struct StateTaxInfo {
    pub state_code: &'static str,
    pub state_name: &'static str,
    pub income_rate: f64,
    pub capital_gains_rate: f64,
    pub ss_tax_exempt: SsTaxExempt,
    pub state_standard_deduction: Option<f64>,
    pub brackets: Option<Vec<TaxBracket>>,
    pub capital_gains_threshold: Option<f64>,
    pub capital_gains_excludes_qual_divs: bool,
}

macro_rules! state {
    ($code:expr, $name:expr, $income:expr, $cg:expr, $ss:expr) => {
        StateTaxInfo {
            state_code: $code,
            state_name: $name,
            income_rate: $income,
            capital_gains_rate: $cg,
            ss_tax_exempt: $ss,
            state_standard_deduction: None,
            brackets: None,
            capital_gains_threshold: None,
            capital_gains_excludes_qual_divs: false,
        }
    };
}

// Rates are expressed in percentage-point units (9.3 means 9.3%), matching
// the `*_pct` convention used throughout `PlanInput` (e.g. `feePct`).
fn build_table() -> Vec<StateTaxInfo> {
    use SsTaxExempt::*;
    vec![
        state!("AL", "Alabama", 5.0, 5.0, Yes),
        state!("AK", "Alaska", 0.0, 0.0, Yes),
        state!("AZ", "Arizona", 2.5, 2.5, Yes),
        state!("AR", "Arkansas", 3.9, 3.9, Yes),
        state!("CA", "California", 9.3, 9.3, Yes),
        state!("CO", "Colorado", 4.4, 4.4, Partial),
        state!("CT", "Connecticut", 4.99, 6.99, Partial),
        state!("DE", "Delaware", 6.6, 6.6, Yes),
        state!("DC", "District of Columbia", 8.95, 8.95, Yes),
        state!("FL", "Florida", 0.0, 0.0, Yes),
        state!("GA", "Georgia", 5.39, 5.39, Yes),
        state!("HI", "Hawaii", 7.9, 7.25, Yes),
        state!("ID", "Idaho", 5.8, 5.8, Yes),
        state!("IL", "Illinois", 4.95, 4.95, Yes),
        state!("IN", "Indiana", 3.05, 3.05, Yes),
        state!("IA", "Iowa", 3.8, 3.8, Yes),
        state!("KS", "Kansas", 5.58, 5.58, Yes),
        state!("KY", "Kentucky", 4.0, 4.0, Yes),
        state!("LA", "Louisiana", 3.0, 3.0, Yes),
        state!("ME", "Maine", 7.15, 7.15, Yes),
        state!("MD", "Maryland", 5.75, 5.75, Yes),
        state!("MA", "Massachusetts", 5.0, 8.5, Yes),
        state!("MI", "Michigan", 4.25, 4.25, Yes),
        state!("MN", "Minnesota", 9.85, 9.85, Partial),
        state!("MS", "Mississippi", 4.7, 4.7, Yes),
        state!("MO", "Missouri", 4.95, 4.95, Yes),
        state!("MT", "Montana", 5.9, 5.9, Partial),
        state!("NE", "Nebraska", 5.64, 5.64, Yes),
        state!("NV", "Nevada", 0.0, 0.0, Yes),
        state!("NH", "New Hampshire", 0.0, 0.0, Yes),
        state!("NJ", "New Jersey", 6.37, 6.37, Yes),
        state!("NM", "New Mexico", 5.9, 5.9, Partial),
        state!("NY", "New York", 6.85, 6.85, Yes),
        state!("NC", "North Carolina", 4.25, 4.25, Yes),
        state!("ND", "North Dakota", 2.5, 2.5, Yes),
        state!("OH", "Ohio", 3.99, 3.99, Yes),
        state!("OK", "Oklahoma", 4.75, 4.75, Yes),
        state!("OR", "Oregon", 9.9, 9.9, Yes),
        state!("PA", "Pennsylvania", 3.07, 3.07, Yes),
        state!("RI", "Rhode Island", 5.99, 5.99, Partial),
        state!("SC", "South Carolina", 6.5, 6.5, Yes),
        state!("SD", "South Dakota", 0.0, 0.0, Yes),
        state!("TN", "Tennessee", 0.0, 0.0, Yes),
        state!("TX", "Texas", 0.0, 0.0, Yes),
        state!("UT", "Utah", 4.65, 4.65, Partial),
        state!("VT", "Vermont", 8.75, 8.75, Partial),
        state!("VA", "Virginia", 5.75, 5.75, Yes),
        state!("WA", "Washington", 0.0, 7.0, Yes),
        state!("WV", "West Virginia", 4.82, 4.82, Yes),
        state!("WI", "Wisconsin", 7.65, 7.65, Yes),
        state!("WY", "Wyoming", 0.0, 0.0, Yes),
    ]
}

pub static STATE_TAX_TABLE: LazyLock<HashMap<&'static str, StateTaxInfo>> = LazyLock::new(|| {
    let mut table = build_table();

    // Washington's capital gains excise tax only applies above a threshold
    // and does not reach qualified dividends.
    if let Some(wa) = table.iter_mut().find(|s| s.state_code == "WA") {
        wa.capital_gains_threshold = Some(262_000.0);
        wa.capital_gains_excludes_qual_divs = true;
    }

    table
        .into_iter()
        .map(|info| (info.state_code, info))
        .collect()
});

pub fn lookup(state_code: &str) -> Option<&'static StateTaxInfo> {
    STATE_TAX_TABLE.get(state_code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn has_51_jurisdictions() {
        assert_eq!(STATE_TAX_TABLE.len(), 51);
    }

    #[test]
    fn washington_has_no_income_tax_but_taxes_gains_above_threshold() {
        let wa = lookup("WA").unwrap();
        assert_eq!(wa.income_rate, 0.0);
        assert!(wa.capital_gains_threshold.is_some());
    }

    #[test]
    fn unknown_code_is_none() {
        assert!(lookup("ZZ").is_none());
    }
}
