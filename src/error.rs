//! Error types for the Payroll Calculation Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while loading statutory rates
//! or computing a payroll.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

/// The main error type for the Payroll Calculation Engine.
///
/// Input errors are local to a single calculation. Configuration errors are
/// raised when rates are loaded or an engine is constructed, never while a
/// payroll is being computed.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/file.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/file.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Neither a gross figure nor a basic salary was supplied.
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// A description of what was missing or inconsistent.
        message: String,
    },

    /// A monetary input was negative.
    #[error("Negative amount for '{field}': {amount}")]
    NegativeAmount {
        /// The input field holding the negative value.
        field: String,
        /// The rejected amount.
        amount: Decimal,
    },

    /// A sum of monetary inputs exceeds the representable range.
    #[error("Amount out of range: '{field}' exceeds the largest supported value")]
    AmountOutOfRange {
        /// The total that overflowed.
        field: String,
    },

    /// A statutory rate table is malformed.
    #[error("Invalid rate configuration: {message}")]
    ConfigurationError {
        /// A description of the problem with the table.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// No rate table is effective on the requested date.
    #[error("No statutory rates effective on {date}")]
    RatesNotFound {
        /// The date for which rates were requested.
        date: NaiveDate,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_invalid_input_displays_message() {
        let error = EngineError::InvalidInput {
            message: "either gross or basic must be provided".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid input: either gross or basic must be provided"
        );
    }

    #[test]
    fn test_negative_amount_displays_field_and_amount() {
        let error = EngineError::NegativeAmount {
            field: "allowances[0].amount".to_string(),
            amount: Decimal::from_str("-50.00").unwrap(),
        };
        assert_eq!(
            error.to_string(),
            "Negative amount for 'allowances[0].amount': -50.00"
        );
    }

    #[test]
    fn test_amount_out_of_range_displays_field() {
        let error = EngineError::AmountOutOfRange {
            field: "gross_pay".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Amount out of range: 'gross_pay' exceeds the largest supported value"
        );
    }

    #[test]
    fn test_configuration_error_displays_message() {
        let error = EngineError::ConfigurationError {
            message: "PAYE bands must end with a remainder band".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid rate configuration: PAYE bands must end with a remainder band"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_rates_not_found_displays_date() {
        let error = EngineError::RatesNotFound {
            date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
        };
        assert_eq!(error.to_string(), "No statutory rates effective on 2020-01-01");
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_invalid_input() -> EngineResult<()> {
            Err(EngineError::InvalidInput {
                message: "empty".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_invalid_input()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
