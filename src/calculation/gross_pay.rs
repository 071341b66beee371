//! Gross pay derivation from a salary structure.
//!
//! Gross pay is basic salary plus every taxable allowance and taxable
//! benefit. Non-taxable items are totalled for the audit echo but never
//! enter gross pay.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    round_money, Allowance, AuditStep, Benefit, CompensationComponent, PayrollMeta,
};

/// The result of deriving gross pay, including the audit step.
#[derive(Debug, Clone)]
pub struct GrossPayResult {
    /// Gross pay rounded to two decimal places.
    pub gross_pay: Decimal,
    /// Totals by taxability plus the raw line items.
    pub meta: PayrollMeta,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

fn checked_sum(a: Decimal, b: Decimal, field: &str) -> EngineResult<Decimal> {
    a.checked_add(b).ok_or_else(|| EngineError::AmountOutOfRange {
        field: field.to_string(),
    })
}

fn split_by_taxability<'a, I>(components: I, field: &str) -> EngineResult<(Decimal, Decimal)>
where
    I: IntoIterator<Item = CompensationComponent<'a>>,
{
    components
        .into_iter()
        .try_fold((Decimal::ZERO, Decimal::ZERO), |(taxable, exempt), c| {
            if c.is_taxable() {
                Ok((checked_sum(taxable, c.amount(), field)?, exempt))
            } else {
                Ok((taxable, checked_sum(exempt, c.amount(), field)?))
            }
        })
}

/// Derives gross pay from basic salary, allowances and benefits.
///
/// # Arguments
///
/// * `basic` - Monthly basic salary
/// * `allowances` - Allowance line items
/// * `benefits` - Benefit line items
/// * `step_number` - The step number for audit trail sequencing
///
/// # Errors
///
/// Returns [`EngineError::AmountOutOfRange`] if a total exceeds what a
/// `Decimal` can hold.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::derive_gross_pay;
/// use payroll_engine::models::{Allowance, Benefit, BenefitType};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let allowances = vec![Allowance {
///     name: "House".to_string(),
///     amount: Decimal::from_str("5000").unwrap(),
///     taxable: true,
/// }];
/// let benefits = vec![Benefit {
///     name: "Medical".to_string(),
///     amount: Decimal::from_str("2000").unwrap(),
///     taxable: false,
///     benefit_type: BenefitType::NonCash,
/// }];
///
/// let result = derive_gross_pay(Decimal::from_str("30000").unwrap(), &allowances, &benefits, 1).unwrap();
/// assert_eq!(result.gross_pay, Decimal::from_str("35000").unwrap());
/// assert_eq!(result.meta.non_taxable_benefits, Decimal::from_str("2000").unwrap());
/// ```
pub fn derive_gross_pay(
    basic: Decimal,
    allowances: &[Allowance],
    benefits: &[Benefit],
    step_number: u32,
) -> EngineResult<GrossPayResult> {
    let (taxable_allowances, non_taxable_allowances) =
        split_by_taxability(allowances.iter().map(CompensationComponent::from), "allowances")?;
    let (taxable_benefits, non_taxable_benefits) =
        split_by_taxability(benefits.iter().map(CompensationComponent::from), "benefits")?;

    let gross = checked_sum(basic, taxable_allowances, "gross_pay")?;
    let gross_pay = round_money(checked_sum(gross, taxable_benefits, "gross_pay")?);
    let excluded = checked_sum(non_taxable_allowances, non_taxable_benefits, "non_taxable")?;

    let audit_step = AuditStep {
        step_number,
        rule_id: "gross_pay".to_string(),
        rule_name: "Gross Pay".to_string(),
        config_ref: "salary_structure".to_string(),
        input: serde_json::json!({
            "basic": basic.to_string(),
            "allowance_count": allowances.len(),
            "benefit_count": benefits.len()
        }),
        output: serde_json::json!({
            "gross_pay": gross_pay.to_string(),
            "taxable_allowances": taxable_allowances.to_string(),
            "taxable_benefits": taxable_benefits.to_string(),
            "excluded_non_taxable": excluded.to_string()
        }),
        reasoning: format!(
            "{} basic + {} taxable allowances + {} taxable benefits = {}",
            basic.normalize(),
            taxable_allowances.normalize(),
            taxable_benefits.normalize(),
            gross_pay
        ),
    };

    Ok(GrossPayResult {
        gross_pay,
        meta: PayrollMeta {
            basic,
            taxable_allowances,
            non_taxable_allowances,
            taxable_benefits,
            non_taxable_benefits,
            allowances: allowances.to_vec(),
            benefits: benefits.to_vec(),
        },
        audit_step,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BenefitType;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn allowance(name: &str, amount: &str, taxable: bool) -> Allowance {
        Allowance {
            name: name.to_string(),
            amount: dec(amount),
            taxable,
        }
    }

    fn benefit(name: &str, amount: &str, taxable: bool) -> Benefit {
        Benefit {
            name: name.to_string(),
            amount: dec(amount),
            taxable,
            benefit_type: BenefitType::Cash,
        }
    }

    #[test]
    fn test_basic_only() {
        let result = derive_gross_pay(dec("45000"), &[], &[], 1).unwrap();
        assert_eq!(result.gross_pay, dec("45000.00"));
        assert_eq!(result.meta.taxable_allowances, Decimal::ZERO);
    }

    #[test]
    fn test_taxable_allowances_enter_gross() {
        let allowances = vec![
            allowance("House", "5000", true),
            allowance("Transport", "2500.50", true),
        ];
        let result = derive_gross_pay(dec("30000"), &allowances, &[], 1).unwrap();
        assert_eq!(result.gross_pay, dec("37500.50"));
        assert_eq!(result.meta.taxable_allowances, dec("7500.50"));
    }

    #[test]
    fn test_non_taxable_allowance_excluded_but_tracked() {
        let allowances = vec![
            allowance("House", "5000", true),
            allowance("Per diem", "1200", false),
        ];
        let result = derive_gross_pay(dec("30000"), &allowances, &[], 1).unwrap();
        assert_eq!(result.gross_pay, dec("35000"));
        assert_eq!(result.meta.non_taxable_allowances, dec("1200"));
    }

    #[test]
    fn test_taxable_benefit_enters_gross() {
        let benefits = vec![benefit("Car", "4000", true), benefit("Medical", "2000", false)];
        let result = derive_gross_pay(dec("30000"), &[], &benefits, 1).unwrap();
        assert_eq!(result.gross_pay, dec("34000"));
        assert_eq!(result.meta.taxable_benefits, dec("4000"));
        assert_eq!(result.meta.non_taxable_benefits, dec("2000"));
    }

    #[test]
    fn test_gross_rounded_to_cents() {
        let allowances = vec![allowance("Shift", "100.005", true)];
        let result = derive_gross_pay(dec("1000"), &allowances, &[], 1).unwrap();
        assert_eq!(result.gross_pay.to_string(), "1100.01");
    }

    #[test]
    fn test_meta_echoes_line_items_in_order() {
        let allowances = vec![allowance("A", "1", true), allowance("B", "2", false)];
        let benefits = vec![benefit("C", "3", false)];
        let result = derive_gross_pay(dec("10"), &allowances, &benefits, 1).unwrap();
        assert_eq!(result.meta.basic, dec("10"));
        assert_eq!(result.meta.allowances, allowances);
        assert_eq!(result.meta.benefits, benefits);
    }

    #[test]
    fn test_overflowing_total_is_an_error() {
        let allowances = vec![allowance("House", "1", true)];
        let result = derive_gross_pay(Decimal::MAX, &allowances, &[], 1);
        assert!(matches!(
            result,
            Err(EngineError::AmountOutOfRange { ref field }) if field == "gross_pay"
        ));
    }

    #[test]
    fn test_overflowing_line_items_name_the_list() {
        let benefits = vec![
            benefit("Medical", "79228162514264337593543950335", false),
            benefit("Car", "1", false),
        ];
        let result = derive_gross_pay(dec("30000"), &[], &benefits, 1);
        assert!(matches!(
            result,
            Err(EngineError::AmountOutOfRange { ref field }) if field == "benefits"
        ));
    }

    #[test]
    fn test_audit_step_records_exclusions() {
        let benefits = vec![benefit("Medical", "2000", false)];
        let result = derive_gross_pay(dec("30000"), &[], &benefits, 4).unwrap();
        assert_eq!(result.audit_step.step_number, 4);
        assert_eq!(result.audit_step.rule_id, "gross_pay");
        assert_eq!(
            result.audit_step.output["excluded_non_taxable"].as_str().unwrap(),
            "2000"
        );
        assert!(result.audit_step.reasoning.contains("30000 basic"));
    }
}
