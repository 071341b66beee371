//! The payroll calculation engine.
//!
//! [`PayrollEngine`] owns one validated [`StatutoryRates`] table and turns a
//! compensation input into a [`PayrollResult`]. It holds no mutable state;
//! share it behind an `Arc` and call it from any number of threads.
//!
//! ## Pipeline
//!
//! 1. Gross pay (from the salary structure, or as supplied), rounded to cents
//! 2. NSSF employee and employer contributions
//! 3. Taxable income = gross pay - employee NSSF
//! 4. PAYE on taxable income, less personal relief, floored at zero
//! 5. SHIF on gross pay
//! 6. Housing levy on gross pay
//! 7. Totals and net pay

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::calculation::{
    calculate_housing_levy, calculate_nssf, calculate_paye, calculate_shif, derive_gross_pay,
};
use crate::config::StatutoryRates;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    round_money, Allowance, AuditStep, AuditTrace, AuditWarning, Benefit, CompensationComponent,
    CompensationInput, CompensationPayload, PayrollComputation, PayrollMeta, PayrollResult,
};

/// Warning code recorded when a gross figure shadows a salary structure.
pub const GROSS_OVERRIDES_COMPONENTS: &str = "GROSS_OVERRIDES_COMPONENTS";

/// Computes payroll results against one statutory rate table.
///
/// # Example
///
/// ```
/// use payroll_engine::config::ConfigLoader;
/// use payroll_engine::engine::PayrollEngine;
/// use payroll_engine::models::{Allowance, Benefit, BenefitType};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let rates = ConfigLoader::load("./config/kenya").unwrap().latest_rates().unwrap().clone();
/// let engine = PayrollEngine::new(rates).unwrap();
///
/// let result = engine
///     .calculate(
///         Decimal::from(30000),
///         &[Allowance { name: "House".into(), amount: Decimal::from(5000), taxable: true }],
///         &[Benefit {
///             name: "Medical".into(),
///             amount: Decimal::from(2000),
///             taxable: false,
///             benefit_type: BenefitType::NonCash,
///         }],
///     )
///     .unwrap();
///
/// assert_eq!(result.gross_pay, Decimal::from(35000));
/// assert_eq!(result.net_salary, Decimal::from_str("29150.00").unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct PayrollEngine {
    rates: StatutoryRates,
}

impl PayrollEngine {
    /// Creates an engine for a rate table.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ConfigurationError`] if the table is malformed.
    pub fn new(rates: StatutoryRates) -> EngineResult<Self> {
        rates.validate()?;
        Ok(Self { rates })
    }

    /// Returns the rate table this engine applies.
    pub fn rates(&self) -> &StatutoryRates {
        &self.rates
    }

    /// Calculates payroll from a flat gross figure.
    ///
    /// `meta` is echoed into the result untouched.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NegativeAmount`] if `gross` is negative.
    pub fn calculate_from_gross(
        &self,
        gross: Decimal,
        meta: Option<PayrollMeta>,
    ) -> EngineResult<PayrollResult> {
        self.compute(&CompensationInput::Gross { gross, meta })
            .map(|computation| computation.result)
    }

    /// Calculates payroll from basic salary, allowances and benefits.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NegativeAmount`] if `basic` or any line item
    /// amount is negative, or [`EngineError::InvalidInput`] if a line item
    /// has a blank name.
    pub fn calculate(
        &self,
        basic: Decimal,
        allowances: &[Allowance],
        benefits: &[Benefit],
    ) -> EngineResult<PayrollResult> {
        self.compute(&CompensationInput::Structured {
            basic,
            allowances: allowances.to_vec(),
            benefits: benefits.to_vec(),
        })
        .map(|computation| computation.result)
    }

    /// Calculates payroll from a loose payload.
    ///
    /// A `gross` figure takes precedence: any `basic`, `allowances` or
    /// `benefits` sent alongside it are ignored and a
    /// [`GROSS_OVERRIDES_COMPONENTS`] warning is added to the audit trace.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidInput`] if neither `gross` nor `basic`
    /// is present, plus the errors of [`PayrollEngine::compute`].
    pub fn compute_payload(&self, payload: CompensationPayload) -> EngineResult<PayrollComputation> {
        let overridden = payload.gross_overrides_structure();
        let input = payload.resolve()?;
        let mut computation = self.compute(&input)?;

        if overridden {
            warn!("Gross pay supplied with a salary structure; structure ignored");
            computation.audit_trace.warnings.push(AuditWarning {
                code: GROSS_OVERRIDES_COMPONENTS.to_string(),
                message: "gross was supplied together with basic/allowances/benefits; \
                          only gross was used"
                    .to_string(),
                severity: "medium".to_string(),
            });
        }

        Ok(computation)
    }

    /// Runs the full pipeline and returns the result with its audit trace.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NegativeAmount`] or [`EngineError::InvalidInput`]
    /// for bad inputs, and [`EngineError::AmountOutOfRange`] when a total
    /// cannot be represented. Nothing is computed when validation fails.
    pub fn compute(&self, input: &CompensationInput) -> EngineResult<PayrollComputation> {
        let mut steps: Vec<AuditStep> = Vec::new();

        let (gross_pay, meta) = match input {
            CompensationInput::Gross { gross, meta } => {
                ensure_non_negative("gross", *gross)?;
                (round_money(*gross), meta.clone())
            }
            CompensationInput::Structured {
                basic,
                allowances,
                benefits,
            } => {
                ensure_non_negative("basic", *basic)?;
                validate_components(allowances.iter().map(CompensationComponent::from))?;
                validate_components(benefits.iter().map(CompensationComponent::from))?;

                let gross = derive_gross_pay(*basic, allowances, benefits, 1)?;
                steps.push(gross.audit_step);
                (gross.gross_pay, Some(gross.meta))
            }
        };

        let computation = self.run_deductions(gross_pay, meta, steps)?;

        debug!(
            rates_version = %self.rates.version,
            gross_pay = %computation.result.gross_pay,
            total_deductions = %computation.result.total_deductions,
            net_salary = %computation.result.net_salary,
            "Payroll computed"
        );

        Ok(computation)
    }

    fn run_deductions(
        &self,
        gross_pay: Decimal,
        meta: Option<PayrollMeta>,
        mut steps: Vec<AuditStep>,
    ) -> EngineResult<PayrollComputation> {
        let next_step = |steps: &[AuditStep]| steps.len() as u32 + 1;

        let nssf = calculate_nssf(gross_pay, &self.rates.nssf, next_step(&steps));
        steps.push(nssf.audit_step);

        let taxable_income = gross_pay - nssf.employee;

        let paye = calculate_paye(taxable_income, &self.rates.paye, next_step(&steps));
        steps.push(paye.audit_step);

        let shif = calculate_shif(gross_pay, &self.rates.shif, next_step(&steps))?;
        steps.push(shif.audit_step);

        let housing_levy =
            calculate_housing_levy(gross_pay, &self.rates.housing_levy, next_step(&steps));
        steps.push(housing_levy.audit_step);

        let nssf_employee = round_money(nssf.employee);
        let paye_amount = round_money(paye.paye);
        let shif_amount = round_money(shif.amount);
        let total_deductions = [paye_amount, nssf_employee, shif_amount, housing_levy.amount]
            .into_iter()
            .try_fold(Decimal::ZERO, |total, amount| total.checked_add(amount))
            .ok_or_else(|| EngineError::AmountOutOfRange {
                field: "total_deductions".to_string(),
            })?;
        let net_salary = gross_pay - total_deductions;

        steps.push(AuditStep {
            step_number: next_step(&steps),
            rule_id: "net_pay".to_string(),
            rule_name: "Net Pay".to_string(),
            config_ref: "totals".to_string(),
            input: serde_json::json!({
                "gross_pay": gross_pay.to_string(),
                "paye": paye_amount.to_string(),
                "nssf_employee": nssf_employee.to_string(),
                "shif": shif_amount.to_string(),
                "housing_levy": housing_levy.amount.to_string()
            }),
            output: serde_json::json!({
                "total_deductions": total_deductions.to_string(),
                "net_salary": net_salary.to_string()
            }),
            reasoning: format!(
                "{} - ({} + {} + {} + {}) = {}",
                gross_pay, paye_amount, nssf_employee, shif_amount, housing_levy.amount, net_salary
            ),
        });

        let result = PayrollResult {
            gross_pay,
            taxable_income: round_money(taxable_income),
            nssf_employee,
            nssf_employer: round_money(nssf.employer),
            paye: paye_amount,
            shif: shif_amount,
            housing_levy: housing_levy.amount,
            personal_relief: round_money(paye.personal_relief),
            total_deductions,
            net_salary,
            meta,
        };

        Ok(PayrollComputation {
            result,
            audit_trace: AuditTrace {
                steps,
                warnings: Vec::new(),
            },
        })
    }
}

fn ensure_non_negative(field: &str, amount: Decimal) -> EngineResult<()> {
    if amount < Decimal::ZERO {
        return Err(EngineError::NegativeAmount {
            field: field.to_string(),
            amount,
        });
    }
    Ok(())
}

fn validate_components<'a, I>(components: I) -> EngineResult<()>
where
    I: IntoIterator<Item = CompensationComponent<'a>>,
{
    for (index, component) in components.into_iter().enumerate() {
        let field = format!("{}[{}]", component.field_prefix(), index);
        if component.name().trim().is_empty() {
            return Err(EngineError::InvalidInput {
                message: format!("{}.name must not be blank", field),
            });
        }
        ensure_non_negative(&format!("{}.amount", field), component.amount())?;
    }
    Ok(())
}
