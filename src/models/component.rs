//! Allowance and benefit line items.
//!
//! A salary structure carries a basic salary plus ordered lists of
//! allowances and benefits. The two differ only in their taxability
//! default: allowances are taxable unless marked otherwise, benefits are
//! not taxable unless marked otherwise.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

fn taxable_by_default() -> bool {
    true
}

/// Whether a benefit is paid in cash or provided in kind.
///
/// Informational only; taxability is decided by the `taxable` flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BenefitType {
    /// Paid out in cash.
    #[default]
    Cash,
    /// Provided in kind (medical cover, housing, car).
    NonCash,
}

/// An allowance paid on top of basic salary.
///
/// `taxable` defaults to `true` when omitted. Unknown fields are rejected.
///
/// # Example
///
/// ```
/// use payroll_engine::models::Allowance;
///
/// let house: Allowance = serde_json::from_str(r#"{"name": "House", "amount": "5000"}"#).unwrap();
/// assert!(house.taxable);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Allowance {
    /// Label shown on the payslip.
    pub name: String,
    /// Monthly amount.
    pub amount: Decimal,
    /// Whether the allowance enters gross pay.
    #[serde(default = "taxable_by_default")]
    pub taxable: bool,
}

/// A benefit provided to the employee.
///
/// `taxable` defaults to `false` and `benefit_type` to `cash` when omitted.
/// Unknown fields are rejected.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{Benefit, BenefitType};
///
/// let medical: Benefit = serde_json::from_str(
///     r#"{"name": "Medical", "amount": "2000", "benefit_type": "non_cash"}"#,
/// ).unwrap();
/// assert!(!medical.taxable);
/// assert_eq!(medical.benefit_type, BenefitType::NonCash);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Benefit {
    /// Label shown on the payslip.
    pub name: String,
    /// Monthly value.
    pub amount: Decimal,
    /// Whether the benefit enters gross pay.
    #[serde(default)]
    pub taxable: bool,
    /// Cash or in-kind.
    #[serde(default)]
    pub benefit_type: BenefitType,
}

/// Either kind of line item, for code that treats them uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompensationComponent<'a> {
    /// An allowance.
    Allowance(&'a Allowance),
    /// A benefit.
    Benefit(&'a Benefit),
}

impl CompensationComponent<'_> {
    /// Returns the line item label.
    pub fn name(&self) -> &str {
        match self {
            CompensationComponent::Allowance(a) => &a.name,
            CompensationComponent::Benefit(b) => &b.name,
        }
    }

    /// Returns the line item amount.
    pub fn amount(&self) -> Decimal {
        match self {
            CompensationComponent::Allowance(a) => a.amount,
            CompensationComponent::Benefit(b) => b.amount,
        }
    }

    /// Returns true if the line item enters gross pay.
    pub fn is_taxable(&self) -> bool {
        match self {
            CompensationComponent::Allowance(a) => a.taxable,
            CompensationComponent::Benefit(b) => b.taxable,
        }
    }

    /// Returns the input field prefix used in validation messages.
    pub fn field_prefix(&self) -> &'static str {
        match self {
            CompensationComponent::Allowance(_) => "allowances",
            CompensationComponent::Benefit(_) => "benefits",
        }
    }
}

impl<'a> From<&'a Allowance> for CompensationComponent<'a> {
    fn from(allowance: &'a Allowance) -> Self {
        CompensationComponent::Allowance(allowance)
    }
}

impl<'a> From<&'a Benefit> for CompensationComponent<'a> {
    fn from(benefit: &'a Benefit) -> Self {
        CompensationComponent::Benefit(benefit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_allowance_defaults_to_taxable() {
        let allowance: Allowance =
            serde_json::from_str(r#"{"name": "Transport", "amount": "3000"}"#).unwrap();
        assert!(allowance.taxable);
        assert_eq!(allowance.amount, dec("3000"));
    }

    #[test]
    fn test_allowance_can_be_marked_non_taxable() {
        let allowance: Allowance =
            serde_json::from_str(r#"{"name": "Per diem", "amount": "1500", "taxable": false}"#)
                .unwrap();
        assert!(!allowance.taxable);
    }

    #[test]
    fn test_benefit_defaults_to_non_taxable_cash() {
        let benefit: Benefit =
            serde_json::from_str(r#"{"name": "Bonus", "amount": "1000"}"#).unwrap();
        assert!(!benefit.taxable);
        assert_eq!(benefit.benefit_type, BenefitType::Cash);
    }

    #[test]
    fn test_missing_amount_is_rejected() {
        let result: Result<Allowance, _> = serde_json::from_str(r#"{"name": "House"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let result: Result<Benefit, _> = serde_json::from_str(
            r#"{"name": "Car", "amount": "500", "is_taxable": true}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_benefit_type_is_rejected() {
        let result: Result<Benefit, _> = serde_json::from_str(
            r#"{"name": "Car", "amount": "500", "benefit_type": "voucher"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_component_view_over_both_kinds() {
        let allowance = Allowance {
            name: "House".to_string(),
            amount: dec("5000"),
            taxable: true,
        };
        let benefit = Benefit {
            name: "Medical".to_string(),
            amount: dec("2000"),
            taxable: false,
            benefit_type: BenefitType::NonCash,
        };

        let components: Vec<CompensationComponent> =
            vec![(&allowance).into(), (&benefit).into()];

        assert_eq!(components[0].name(), "House");
        assert!(components[0].is_taxable());
        assert_eq!(components[0].field_prefix(), "allowances");
        assert_eq!(components[1].amount(), dec("2000"));
        assert!(!components[1].is_taxable());
        assert_eq!(components[1].field_prefix(), "benefits");
    }
}
