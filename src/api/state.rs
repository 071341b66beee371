//! Application state for the Payroll Calculation Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::config::ConfigLoader;
use crate::engine::PayrollEngine;
use crate::error::{EngineError, EngineResult};

/// Shared application state.
///
/// Holds one engine per rate table, oldest first. Engines are built once at
/// startup so a malformed table stops the server from starting instead of
/// failing individual requests.
#[derive(Clone)]
pub struct AppState {
    /// One engine per rate table, in effective-date order.
    engines: Arc<Vec<PayrollEngine>>,
}

impl AppState {
    /// Creates a new application state with the given configuration loader.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ConfigurationError`] if any rate table is
    /// malformed.
    pub fn new(config: &ConfigLoader) -> EngineResult<Self> {
        let engines = config
            .config()
            .rates()
            .iter()
            .cloned()
            .map(PayrollEngine::new)
            .collect::<EngineResult<Vec<_>>>()?;

        Ok(Self {
            engines: Arc::new(engines),
        })
    }

    /// Returns the engine for a pay date, or the latest engine when no date
    /// is given.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::RatesNotFound`] if no table is effective on
    /// `pay_date`.
    pub fn engine_for(&self, pay_date: Option<NaiveDate>) -> EngineResult<&PayrollEngine> {
        match pay_date {
            Some(date) => self
                .engines
                .iter()
                .rev()
                .find(|engine| engine.rates().effective_date <= date)
                .ok_or(EngineError::RatesNotFound { date }),
            None => self
                .engines
                .last()
                .ok_or_else(|| EngineError::ConfigurationError {
                    message: "no rate tables loaded".to_string(),
                }),
        }
    }
}
