//! Shared fixtures for unit tests scattered across `crate::pipeline` and
//! `crate::validate`. Integration tests for full-run scenarios live in
//! `tests/golden_scenarios.rs`.

pub mod support;
