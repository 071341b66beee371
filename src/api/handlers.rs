//! HTTP request handlers for the Payroll Calculation Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::EngineError;
use crate::models::CompensationPayload;

use super::request::CalculationRequest;
use super::response::{ApiError, ApiErrorResponse, CalculationResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .with_state(state)
}

/// Handler for POST /calculate endpoint.
///
/// Accepts a calculation request and returns the payroll result wrapped in
/// a [`CalculationResponse`] envelope.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> Response {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    // Handle JSON parsing errors
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    // The body text carries serde's message, including the field name
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    if body_text.contains("missing field") || body_text.contains("unknown field")
                    {
                        ApiError::validation_error(body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            return (
                StatusCode::BAD_REQUEST,
                [(header::CONTENT_TYPE, "application/json")],
                Json(error),
            )
                .into_response();
        }
    };

    // Select the rate table for the pay date
    let pay_date = request.pay_date;
    let engine = match state.engine_for(pay_date) {
        Ok(engine) => engine,
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                pay_date = ?pay_date,
                "No rate table for pay date"
            );
            return error_response(err);
        }
    };

    // Perform the calculation
    let payload: CompensationPayload = request.into();
    let start_time = Instant::now();
    match engine.compute_payload(payload) {
        Ok(computation) => {
            let duration_us = u64::try_from(start_time.elapsed().as_micros()).unwrap_or(u64::MAX);
            info!(
                correlation_id = %correlation_id,
                rates_version = %engine.rates().version,
                gross_pay = %computation.result.gross_pay,
                net_salary = %computation.result.net_salary,
                duration_us,
                "Calculation completed successfully"
            );

            let response = CalculationResponse {
                calculation_id: correlation_id,
                timestamp: Utc::now(),
                engine_version: env!("CARGO_PKG_VERSION").to_string(),
                rates_version: engine.rates().version.clone(),
                result: computation.result,
                audit_trace: computation.audit_trace,
                duration_us,
            };
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(response),
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Calculation failed"
            );
            error_response(err)
        }
    }
}

fn error_response(err: EngineError) -> Response {
    ApiErrorResponse::from(err).into_response()
}
