//! NSSF contribution calculation.
//!
//! ## Tier Structure
//!
//! - **Tier I**: pensionable pay up to `tier_one_cap`
//! - **Tier II**: pensionable pay above `tier_one_cap`, up to `tier_two_cap`
//!
//! Pay above `tier_two_cap` attracts no contribution. The employer matches
//! the employee contribution.

use rust_decimal::Decimal;

use crate::config::NssfConfig;
use crate::models::AuditStep;

/// The result of an NSSF calculation, including the audit step.
#[derive(Debug, Clone)]
pub struct NssfResult {
    /// Pay falling into Tier I.
    pub tier_one_base: Decimal,
    /// Pay falling into Tier II.
    pub tier_two_base: Decimal,
    /// Employee contribution (unrounded).
    pub employee: Decimal,
    /// Employer contribution (unrounded).
    pub employer: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates employee and employer NSSF contributions on gross pay.
///
/// # Arguments
///
/// * `gross` - Gross pay, already rounded
/// * `config` - Tier caps and rates
/// * `step_number` - The step number for audit trail sequencing
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_nssf;
/// use payroll_engine::config::NssfConfig;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let config = NssfConfig {
///     tier_one_cap: Decimal::from(7000),
///     tier_two_cap: Decimal::from(36000),
///     tier_one_rate: Decimal::from_str("0.06").unwrap(),
///     tier_two_rate: Decimal::from_str("0.06").unwrap(),
/// };
///
/// let result = calculate_nssf(Decimal::from(20000), &config, 1);
/// assert_eq!(result.employee, Decimal::from(1200));
/// assert_eq!(result.employer, result.employee);
/// ```
pub fn calculate_nssf(gross: Decimal, config: &NssfConfig, step_number: u32) -> NssfResult {
    let tier_one_base = gross.min(config.tier_one_cap);
    let tier_two_base = (gross - config.tier_one_cap)
        .max(Decimal::ZERO)
        .min(config.tier_two_cap - config.tier_one_cap);

    let tier_one = tier_one_base * config.tier_one_rate;
    let tier_two = tier_two_base * config.tier_two_rate;
    let employee = tier_one + tier_two;
    let employer = employee;

    let audit_step = AuditStep {
        step_number,
        rule_id: "nssf_contribution".to_string(),
        rule_name: "NSSF Contribution".to_string(),
        config_ref: "nssf".to_string(),
        input: serde_json::json!({
            "gross_pay": gross.to_string(),
            "tier_one_cap": config.tier_one_cap.to_string(),
            "tier_two_cap": config.tier_two_cap.to_string()
        }),
        output: serde_json::json!({
            "tier_one_base": tier_one_base.to_string(),
            "tier_two_base": tier_two_base.to_string(),
            "nssf_employee": employee.to_string(),
            "nssf_employer": employer.to_string()
        }),
        reasoning: format!(
            "Tier I {} x {} + Tier II {} x {} = {}",
            tier_one_base.normalize(),
            config.tier_one_rate.normalize(),
            tier_two_base.normalize(),
            config.tier_two_rate.normalize(),
            employee.normalize()
        ),
    };

    NssfResult {
        tier_one_base,
        tier_two_base,
        employee,
        employer,
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

    fn config() -> NssfConfig {
        NssfConfig {
            tier_one_cap: dec("7000"),
            tier_two_cap: dec("36000"),
            tier_one_rate: dec("0.06"),
            tier_two_rate: dec("0.06"),
        }
    }

    #[test]
    fn test_zero_gross_contributes_nothing() {
        let result = calculate_nssf(Decimal::ZERO, &config(), 1);
        assert_eq!(result.employee, Decimal::ZERO);
        assert_eq!(result.tier_two_base, Decimal::ZERO);
    }

    #[test]
    fn test_gross_within_tier_one() {
        let result = calculate_nssf(dec("5000"), &config(), 1);
        assert_eq!(result.tier_one_base, dec("5000"));
        assert_eq!(result.tier_two_base, Decimal::ZERO);
        assert_eq!(result.employee, dec("300"));
    }

    #[test]
    fn test_gross_exactly_at_tier_one_cap() {
        let result = calculate_nssf(dec("7000"), &config(), 1);
        assert_eq!(result.employee, dec("420"));
        assert_eq!(result.tier_two_base, Decimal::ZERO);
    }

    #[test]
    fn test_gross_spanning_both_tiers() {
        let result = calculate_nssf(dec("20000"), &config(), 1);
        assert_eq!(result.tier_one_base, dec("7000"));
        assert_eq!(result.tier_two_base, dec("13000"));
        assert_eq!(result.employee, dec("1200"));
    }

    #[test]
    fn test_gross_above_tier_two_cap_is_capped() {
        let result = calculate_nssf(dec("150000"), &config(), 1);
        assert_eq!(result.tier_two_base, dec("29000"));
        assert_eq!(result.employee, dec("2160"));
    }

    #[test]
    fn test_employer_matches_employee() {
        let result = calculate_nssf(dec("35000"), &config(), 1);
        assert_eq!(result.employee, dec("2100"));
        assert_eq!(result.employer, result.employee);
    }

    #[test]
    fn test_tier_rates_applied_independently() {
        let mut config = config();
        config.tier_two_rate = dec("0.05");
        let result = calculate_nssf(dec("10000"), &config, 1);
        // 7000 x 0.06 + 3000 x 0.05
        assert_eq!(result.employee, dec("570"));
    }

    #[test]
    fn test_audit_reasoning_shows_both_tiers() {
        let result = calculate_nssf(dec("20000"), &config(), 2);
        assert_eq!(result.audit_step.step_number, 2);
        assert_eq!(result.audit_step.rule_id, "nssf_contribution");
        assert!(result.audit_step.reasoning.contains("Tier I 7000 x 0.06"));
        assert!(result.audit_step.reasoning.contains("Tier II 13000 x 0.06"));
        assert!(result.audit_step.reasoning.ends_with("= 1200"));
    }
}
