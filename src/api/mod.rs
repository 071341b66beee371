//! HTTP API module for the Payroll Calculation Engine.
//!
//! This module provides the REST API endpoint for calculating statutory
//! deductions and net pay.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::CalculationRequest;
pub use response::{ApiError, ApiErrorResponse, CalculationResponse};
pub use state::AppState;
