//! Statutory Payroll Calculation Engine for Kenya
//!
//! This crate converts a salary structure (basic pay plus allowances and
//! benefits) or a flat gross figure into gross pay, PAYE, NSSF, SHIF,
//! Housing Levy and net pay, using effective-dated rate tables loaded from
//! YAML configuration.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
