//! PAYE income tax calculation.
//!
//! Tax is computed by walking the configured bands in order. Each explicit
//! band consumes its stated `limit` from the remaining taxable income, so
//! the second band's limit acts as a width rather than a cumulative
//! threshold: with bands `24000 @ 10%` and `32333 @ 25%`, the 25% band
//! covers the next 32333 of income, not the next 8333. Personal relief is
//! then deducted and the result floored at zero.

use rust_decimal::Decimal;

use crate::config::{BandLimit, PayeBand, PayeConfig};
use crate::models::AuditStep;

/// The result of a PAYE calculation, including the audit step.
#[derive(Debug, Clone)]
pub struct PayeResult {
    /// Tax from the bands before relief.
    pub tax_before_relief: Decimal,
    /// Relief granted.
    pub personal_relief: Decimal,
    /// Tax payable, never negative.
    pub paye: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Applies PAYE bands to a taxable amount.
///
/// Returns the tax before personal relief. A table without a remainder
/// band leaves income beyond the last band untaxed; validated tables always
/// end in one.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::apply_paye_bands;
/// use payroll_engine::config::{BandLimit, PayeBand};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let bands = vec![
///     PayeBand { limit: BandLimit::UpTo(Decimal::from(24000)), rate: Decimal::from_str("0.10").unwrap() },
///     PayeBand { limit: BandLimit::UpTo(Decimal::from(32333)), rate: Decimal::from_str("0.25").unwrap() },
///     PayeBand { limit: BandLimit::Remainder, rate: Decimal::from_str("0.30").unwrap() },
/// ];
///
/// assert_eq!(apply_paye_bands(Decimal::from(24000), &bands), Decimal::from(2400));
/// assert_eq!(apply_paye_bands(Decimal::from(32900), &bands), Decimal::from(4625));
/// ```
pub fn apply_paye_bands(taxable: Decimal, bands: &[PayeBand]) -> Decimal {
    let mut tax = Decimal::ZERO;
    let mut remaining = taxable;

    for band in bands {
        match band.limit {
            BandLimit::Remainder => {
                tax += remaining * band.rate;
                break;
            }
            BandLimit::UpTo(limit) if remaining <= limit => {
                tax += remaining * band.rate;
                return tax;
            }
            BandLimit::UpTo(limit) => {
                tax += limit * band.rate;
                remaining -= limit;
            }
        }
    }

    tax
}

/// Calculates PAYE on taxable income after personal relief.
///
/// # Arguments
///
/// * `taxable_income` - Gross pay less pre-tax deductions
/// * `config` - Bands and personal relief
/// * `step_number` - The step number for audit trail sequencing
pub fn calculate_paye(taxable_income: Decimal, config: &PayeConfig, step_number: u32) -> PayeResult {
    let tax_before_relief = apply_paye_bands(taxable_income, &config.bands);
    let paye = (tax_before_relief - config.personal_relief).max(Decimal::ZERO);

    let reasoning = if paye.is_zero() && !tax_before_relief.is_zero() {
        format!(
            "Tax {} fully offset by personal relief {}",
            tax_before_relief.normalize(),
            config.personal_relief.normalize()
        )
    } else {
        format!(
            "Tax {} - relief {} = {}",
            tax_before_relief.normalize(),
            config.personal_relief.normalize(),
            paye.normalize()
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "paye".to_string(),
        rule_name: "PAYE Income Tax".to_string(),
        config_ref: "paye".to_string(),
        input: serde_json::json!({
            "taxable_income": taxable_income.to_string(),
            "band_count": config.bands.len()
        }),
        output: serde_json::json!({
            "tax_before_relief": tax_before_relief.to_string(),
            "personal_relief": config.personal_relief.to_string(),
            "paye": paye.to_string()
        }),
        reasoning,
    };

    PayeResult {
        tax_before_relief,
        personal_relief: config.personal_relief,
        paye,
        audit_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn bands() -> Vec<PayeBand> {
        vec![
            PayeBand {
                limit: BandLimit::UpTo(dec("24000")),
                rate: dec("0.10"),
            },
            PayeBand {
                limit: BandLimit::UpTo(dec("32333")),
                rate: dec("0.25"),
            },
            PayeBand {
                limit: BandLimit::Remainder,
                rate: dec("0.30"),
            },
        ]
    }

    fn config() -> PayeConfig {
        PayeConfig {
            bands: bands(),
            personal_relief: dec("2400"),
        }
    }

    #[test]
    fn test_zero_taxable_is_zero_tax() {
        assert_eq!(apply_paye_bands(Decimal::ZERO, &bands()), Decimal::ZERO);
    }

    #[test]
    fn test_within_first_band() {
        assert_eq!(apply_paye_bands(dec("18800"), &bands()), dec("1880"));
    }

    /// The boundary value stays entirely in the first band.
    #[test]
    fn test_exactly_at_first_band_limit() {
        assert_eq!(apply_paye_bands(dec("24000"), &bands()), dec("2400"));
    }

    #[test]
    fn test_one_unit_into_second_band() {
        assert_eq!(apply_paye_bands(dec("24001"), &bands()), dec("2400.25"));
    }

    /// The second band covers a further 32333, up to 56333 in total.
    #[test]
    fn test_second_band_limit_is_a_width() {
        assert_eq!(apply_paye_bands(dec("56333"), &bands()), dec("10483.25"));
        assert_eq!(apply_paye_bands(dec("56334"), &bands()), dec("10483.55"));
    }

    #[test]
    fn test_remainder_band_taxes_everything_left() {
        // 2400 + 8083.25 + (100000 - 56333) x 0.30
        assert_eq!(apply_paye_bands(dec("100000"), &bands()), dec("23583.35"));
    }

    #[test]
    fn test_table_without_remainder_leaves_excess_untaxed() {
        let mut bands = bands();
        bands.pop();
        assert_eq!(apply_paye_bands(dec("100000"), &bands), dec("10483.25"));
    }

    #[test]
    fn test_relief_floors_paye_at_zero() {
        let result = calculate_paye(dec("18800"), &config(), 1);
        assert_eq!(result.tax_before_relief, dec("1880"));
        assert_eq!(result.paye, Decimal::ZERO);
        assert!(result.audit_step.reasoning.contains("fully offset"));
    }

    #[test]
    fn test_relief_deducted_above_threshold() {
        let result = calculate_paye(dec("32900"), &config(), 1);
        assert_eq!(result.tax_before_relief, dec("4625"));
        assert_eq!(result.paye, dec("2225"));
        assert_eq!(result.personal_relief, dec("2400"));
    }

    #[test]
    fn test_relief_exactly_equal_to_tax() {
        let result = calculate_paye(dec("24000"), &config(), 1);
        assert_eq!(result.paye, Decimal::ZERO);
    }

    #[test]
    fn test_audit_step_fields() {
        let result = calculate_paye(dec("32900"), &config(), 3);
        assert_eq!(result.audit_step.step_number, 3);
        assert_eq!(result.audit_step.rule_id, "paye");
        assert_eq!(result.audit_step.output["paye"].as_str().unwrap(), "2225.00");
        assert_eq!(result.audit_step.reasoning, "Tax 4625 - relief 2400 = 2225");
    }
}
