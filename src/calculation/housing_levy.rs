//! Housing levy calculation.
//!
//! A flat share of gross pay with no cap.

use rust_decimal::Decimal;

use crate::config::HousingLevyConfig;
use crate::models::{round_money, AuditStep};

/// The result of a housing levy calculation, including the audit step.
#[derive(Debug, Clone)]
pub struct HousingLevyResult {
    /// Levy rounded to two decimal places.
    pub amount: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the housing levy on gross pay.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_housing_levy;
/// use payroll_engine::config::HousingLevyConfig;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let config = HousingLevyConfig { rate: Decimal::from_str("0.015").unwrap() };
/// let result = calculate_housing_levy(Decimal::from(20000), &config, 1);
/// assert_eq!(result.amount, Decimal::from(300));
/// ```
pub fn calculate_housing_levy(
    gross: Decimal,
    config: &HousingLevyConfig,
    step_number: u32,
) -> HousingLevyResult {
    let amount = round_money(gross * config.rate);

    let audit_step = AuditStep {
        step_number,
        rule_id: "housing_levy".to_string(),
        rule_name: "Housing Levy".to_string(),
        config_ref: "housing_levy".to_string(),
        input: serde_json::json!({
            "gross_pay": gross.to_string(),
            "rate": config.rate.to_string()
        }),
        output: serde_json::json!({
            "housing_levy": amount.to_string()
        }),
        reasoning: format!(
            "{} x {} = {}",
            gross.normalize(),
            config.rate.normalize(),
            amount
        ),
    };

    HousingLevyResult { amount, audit_step }
}
