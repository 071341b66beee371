//! Request types for the Payroll Calculation Engine API.
//!
//! This module defines the JSON request structure for the `/calculate` endpoint.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{Allowance, Benefit, CompensationPayload};

/// Request body for the `/calculate` endpoint.
///
/// Either `gross` or `basic` must be present. When both are sent, `gross`
/// wins and the salary structure is ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CalculationRequest {
    /// Flat monthly gross pay.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gross: Option<Decimal>,
    /// Monthly basic salary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub basic: Option<Decimal>,
    /// Allowances in payslip order.
    #[serde(default)]
    pub allowances: Vec<Allowance>,
    /// Benefits in payslip order.
    #[serde(default)]
    pub benefits: Vec<Benefit>,
    /// Date whose rate table applies; the latest table when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pay_date: Option<NaiveDate>,
}

impl From<CalculationRequest> for CompensationPayload {
    fn from(req: CalculationRequest) -> Self {
        CompensationPayload {
            gross: req.gross,
            basic: req.basic,
            allowances: req.allowances,
            benefits: req.benefits,
        }
    }
}
