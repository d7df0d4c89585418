//! Error taxonomy.
//!
//! `ValidationError` aggregates every invariant violation found in a
//! `PlanInput` into a single error rather than failing on the first one, so
//! a caller can show the user a complete list. `ConvergenceWarning` is
//! deliberately not part of this enum: it's non-fatal and is surfaced via
//! `tracing::warn!` plus `PlanResult::convergence_warnings`, not as an
//! `Err`.

use thiserror::Error;

/// One invariant violation, with the dotted path of the offending field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub path: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        ValidationIssue {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Raised before any simulation step when a `PlanInput` violates one or
/// more data-model invariants. Carries every offending path + message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("plan input is invalid: {}", format_issues(.issues))]
pub struct ValidationError {
    pub issues: Vec<ValidationIssue>,
}

fn format_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(|i| format!("{}: {}", i.path, i.message))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Age already at or beyond life expectancy: there are no years to simulate.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("horizon is non-positive: current age {current_age} >= life expectancy {life_expectancy}")]
pub struct HorizonError {
    pub current_age: u32,
    pub life_expectancy: u32,
}

/// Top-level error returned by `simulate`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SimulationError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Horizon(#[from] HorizonError),
}

pub type Result<T> = std::result::Result<T, SimulationError>;
