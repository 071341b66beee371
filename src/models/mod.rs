//! Core data models for the Payroll Calculation Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod audit;
mod compensation;
mod component;
mod money;
mod payroll_result;

pub use audit::{AuditStep, AuditTrace, AuditWarning};
pub use compensation::{CompensationInput, CompensationPayload};
pub use component::{Allowance, Benefit, BenefitType, CompensationComponent};
pub use money::{round_money, MONEY_DECIMAL_PLACES};
pub use payroll_result::{PayrollComputation, PayrollMeta, PayrollResult};
