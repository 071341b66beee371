//! Payroll result models.
//!
//! This module contains the [`PayrollResult`] produced by every calculation,
//! the [`PayrollMeta`] audit echo it carries, and [`PayrollComputation`],
//! which pairs a result with the audit trace explaining it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Allowance, AuditTrace, Benefit};

/// Raw inputs echoed back with a result for audit and debugging.
///
/// None of these figures feed the deduction pipeline beyond what is already
/// reflected in `gross_pay`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollMeta {
    /// Basic salary.
    pub basic: Decimal,
    /// Sum of taxable allowances.
    pub taxable_allowances: Decimal,
    /// Sum of non-taxable allowances.
    pub non_taxable_allowances: Decimal,
    /// Sum of taxable benefits.
    pub taxable_benefits: Decimal,
    /// Sum of non-taxable benefits.
    pub non_taxable_benefits: Decimal,
    /// Allowance line items as supplied.
    pub allowances: Vec<Allowance>,
    /// Benefit line items as supplied.
    pub benefits: Vec<Benefit>,
}

/// The itemized outcome of a payroll calculation.
///
/// Field names match what payroll-record storage and payslip renderers
/// expect. All amounts are rounded to two decimal places, and
/// `net_salary + total_deductions == gross_pay` holds exactly.
///
/// # Example
///
/// ```
/// use payroll_engine::config::ConfigLoader;
/// use payroll_engine::engine::PayrollEngine;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let rates = ConfigLoader::load("./config/kenya").unwrap().latest_rates().unwrap().clone();
/// let engine = PayrollEngine::new(rates).unwrap();
///
/// let result = engine.calculate_from_gross(Decimal::from_str("20000").unwrap(), None).unwrap();
/// assert_eq!(result.net_salary, Decimal::from_str("17650.00").unwrap());
/// assert_eq!(result.net_salary + result.total_deductions, result.gross_pay);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollResult {
    /// Basic + taxable allowances + taxable benefits, or the supplied gross.
    pub gross_pay: Decimal,
    /// Gross pay less the employee NSSF contribution.
    pub taxable_income: Decimal,
    /// Employee NSSF contribution.
    pub nssf_employee: Decimal,
    /// Employer NSSF contribution.
    pub nssf_employer: Decimal,
    /// Income tax after personal relief, never negative.
    pub paye: Decimal,
    /// SHIF contribution.
    pub shif: Decimal,
    /// Housing levy.
    pub housing_levy: Decimal,
    /// Personal relief granted against PAYE.
    pub personal_relief: Decimal,
    /// PAYE + employee NSSF + SHIF + housing levy.
    pub total_deductions: Decimal,
    /// Gross pay less total deductions.
    pub net_salary: Decimal,
    /// Raw inputs, when known.
    #[serde(rename = "_meta")]
    pub meta: Option<PayrollMeta>,
}

/// A payroll result together with the audit trace that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollComputation {
    /// The payroll result.
    pub result: PayrollResult,
    /// Every pipeline step, in order.
    pub audit_trace: AuditTrace,
}
