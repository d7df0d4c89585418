//! The thirteen-step per-year pipeline, one module per step or
//! small group of adjacent steps.

pub mod convergence;
pub mod deduction;
pub mod fees;
pub mod income;
pub mod net;
pub mod phase;
pub mod rebalance;
pub mod result;
pub mod returns;
pub mod rmd;
pub mod spending;
pub mod taxes;
pub mod withdrawals;
