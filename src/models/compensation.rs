//! Compensation inputs accepted by the engine.
//!
//! A calculation starts either from a flat gross figure or from a salary
//! structure. [`CompensationPayload`] is the loose shape callers send;
//! [`CompensationPayload::resolve`] turns it into exactly one
//! [`CompensationInput`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::{Allowance, Benefit, PayrollMeta};

/// The two mutually exclusive ways to describe what an employee earns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompensationInput {
    /// A gross figure computed elsewhere.
    Gross {
        /// Monthly gross pay.
        gross: Decimal,
        /// Optional audit data echoed into the result.
        meta: Option<PayrollMeta>,
    },
    /// Basic salary plus itemized allowances and benefits.
    Structured {
        /// Monthly basic salary.
        basic: Decimal,
        /// Allowances in payslip order.
        allowances: Vec<Allowance>,
        /// Benefits in payslip order.
        benefits: Vec<Benefit>,
    },
}

/// A compensation payload with every field optional.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{CompensationInput, CompensationPayload};
///
/// let payload: CompensationPayload = serde_json::from_str(
///     r#"{"basic": "30000", "allowances": [{"name": "House", "amount": "5000"}]}"#,
/// ).unwrap();
/// assert!(matches!(payload.resolve().unwrap(), CompensationInput::Structured { .. }));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompensationPayload {
    /// Flat monthly gross. Takes precedence over everything else.
    #[serde(default)]
    pub gross: Option<Decimal>,
    /// Monthly basic salary.
    #[serde(default)]
    pub basic: Option<Decimal>,
    /// Allowances in payslip order.
    #[serde(default)]
    pub allowances: Vec<Allowance>,
    /// Benefits in payslip order.
    #[serde(default)]
    pub benefits: Vec<Benefit>,
}

impl CompensationPayload {
    /// Returns true if a gross figure will shadow a salary structure that was
    /// also supplied.
    pub fn gross_overrides_structure(&self) -> bool {
        self.gross.is_some()
            && (self.basic.is_some() || !self.allowances.is_empty() || !self.benefits.is_empty())
    }

    /// Picks the calculation path.
    ///
    /// If `gross` is present it wins and `basic`, `allowances` and `benefits`
    /// are dropped without being inspected. Otherwise `basic` is required.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidInput`] if neither `gross` nor `basic`
    /// is present.
    pub fn resolve(self) -> EngineResult<CompensationInput> {
        match (self.gross, self.basic) {
            (Some(gross), _) => Ok(CompensationInput::Gross { gross, meta: None }),
            (None, Some(basic)) => Ok(CompensationInput::Structured {
                basic,
                allowances: self.allowances,
                benefits: self.benefits,
            }),
            (None, None) => Err(EngineError::InvalidInput {
                message: "either gross or basic must be provided".to_string(),
            }),
        }
    }
}
