//! SHIF contribution lookup.
//!
//! SHIF is a stepped flat charge, not a percentage: the first bracket whose
//! upper bound is at or above gross pay sets the contribution. The
//! remainder bracket catches any gross above the last explicit bound.

use rust_decimal::Decimal;

use crate::config::{BandLimit, ShifBracket, ShifConfig};
use crate::error::{EngineError, EngineResult};
use crate::models::AuditStep;

/// The result of a SHIF lookup, including the audit step.
#[derive(Debug, Clone)]
pub struct ShifResult {
    /// Position of the matching bracket in the table.
    pub bracket_index: usize,
    /// Flat contribution for that bracket.
    pub amount: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Finds the bracket applying to `gross`.
///
/// Returns `None` only for a table without a remainder bracket when gross
/// exceeds every explicit bound.
pub fn find_shif_bracket(gross: Decimal, brackets: &[ShifBracket]) -> Option<(usize, &ShifBracket)> {
    brackets
        .iter()
        .enumerate()
        .find(|(_, bracket)| match bracket.upper_bound {
            BandLimit::UpTo(bound) => gross <= bound,
            BandLimit::Remainder => true,
        })
}

/// Calculates the SHIF contribution on gross pay.
///
/// # Arguments
///
/// * `gross` - Gross pay, already rounded
/// * `config` - The graduated bracket table
/// * `step_number` - The step number for audit trail sequencing
///
/// # Errors
///
/// Returns [`EngineError::ConfigurationError`] if no bracket matches.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_shif;
/// use payroll_engine::config::ConfigLoader;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("./config/kenya").unwrap();
/// let config = &loader.latest_rates().unwrap().shif;
///
/// let result = calculate_shif(Decimal::from(20000), config, 1).unwrap();
/// assert_eq!(result.amount, Decimal::from(850));
/// ```
pub fn calculate_shif(gross: Decimal, config: &ShifConfig, step_number: u32) -> EngineResult<ShifResult> {
    let (bracket_index, bracket) =
        find_shif_bracket(gross, &config.brackets).ok_or_else(|| EngineError::ConfigurationError {
            message: format!("no SHIF bracket covers gross pay {}", gross),
        })?;

    let bound_label = match bracket.upper_bound {
        BandLimit::UpTo(bound) => format!("<= {}", bound.normalize()),
        BandLimit::Remainder => "remainder".to_string(),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "shif".to_string(),
        rule_name: "SHIF Contribution".to_string(),
        config_ref: format!("shif.brackets[{}]", bracket_index),
        input: serde_json::json!({
            "gross_pay": gross.to_string()
        }),
        output: serde_json::json!({
            "bracket": bound_label,
            "shif": bracket.amount.to_string()
        }),
        reasoning: format!(
            "Gross {} falls in bracket {} ({}): flat {}",
            gross.normalize(),
            bracket_index + 1,
            bound_label,
            bracket.amount.normalize()
        ),
    };

    Ok(ShifResult {
        bracket_index,
        amount: bracket.amount,
        audit_step,
    })
}
