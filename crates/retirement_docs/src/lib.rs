//! Tax-year record aggregation, anomaly detection, checklist generation,
//! and tax-document field extraction, built on top of `retirement_core`'s
//! plan/account model and reference tables.
//!
//! ```no_run
//! use retirement_docs::model::{IncomeComponents, TaxRecordStatus, TaxYearRecord};
//! use retirement_core::model::FilingStatus;
//!
//! let record = TaxYearRecord {
//!     year: 2025,
//!     filing_status: FilingStatus::Single,
//!     state_of_residence: "TX".to_string(),
//!     status: TaxRecordStatus::Draft,
//!     income: IncomeComponents { wages: 90_000.0, ..Default::default() },
//!     payments: Default::default(),
//!     use_itemized: false,
//!     itemized: Default::default(),
//!     standard_deduction_override: None,
//!     federal_effective_rate_pct: 18.0,
//!     state_effective_rate_pct: None,
//!     cap_gains_rate_pct: 15.0,
//!     total_credits: 0.0,
//!     filed_result: None,
//! };
//! let result = retirement_docs::tax_computation::compute_tax_year(&record);
//! assert!(result.federal_tax >= 0.0);
//! ```
#![warn(clippy::all)]

pub mod anomaly;
pub mod checklist;
pub mod error;
pub mod extraction;
pub mod model;
pub mod tax_computation;

pub use error::{DocumentError, Result};
