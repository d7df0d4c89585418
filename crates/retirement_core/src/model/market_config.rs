//! Market return/inflation assumptions.
//!
//! The core only executes `Deterministic` mode directly. `Historical` and
//! `Stress` are expressed via the optional `scenario_returns`/
//! `scenario_inflation` arrays on [`crate::state::SimulationState`] — the
//! plan's `MarketConfig` just records which mode a given scenario array
//! represents for `assumptionsUsed`. `MonteCarlo` is entirely a calling-layer
//! concern: the caller re-invokes `simulate` once per sampled path.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SimulationMode {
    Deterministic,
    Historical,
    Stress,
    MonteCarlo,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketConfig {
    pub simulation_mode: SimulationMode,
    pub deterministic_return_pct: Option<f64>,
    pub deterministic_inflation_pct: Option<f64>,
    pub monte_carlo_runs: Option<u32>,
}
