//! HTTP request handlers for the payroll engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::calculate;
use crate::run::{PayrollRun, run_payroll};

use super::request::CalculationRequest;
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .route("/payroll-runs", post(payroll_run_handler))
        .with_state(state)
}

/// Handler for POST /calculate.
///
/// Calculates one employee for one period and returns the draft result.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            return json_response(StatusCode::BAD_REQUEST, reject(rejection, correlation_id));
        }
    };

    let fines = request.fine_records();
    let start_time = Instant::now();
    let result = calculate(
        &request.employee,
        state.config(),
        &request.period,
        &request.records,
        &request.options,
        &fines,
    );

    info!(
        correlation_id = %correlation_id,
        employee_id = %result.employee_id,
        gross = %result.earnings.gross,
        net_pay = %result.net_pay,
        warnings = result.audit_trace.warnings.len(),
        duration_us = start_time.elapsed().as_micros(),
        "Calculation completed successfully"
    );
    json_response(StatusCode::OK, result)
}

/// Handler for POST /payroll-runs.
///
/// Runs a whole period. Per-employee failures are reported in the outcome;
/// only run preconditions fail the request.
async fn payroll_run_handler(
    State(state): State<AppState>,
    payload: Result<Json<PayrollRun>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payroll run request");

    let run = match payload {
        Ok(Json(run)) => run,
        Err(rejection) => {
            return json_response(StatusCode::BAD_REQUEST, reject(rejection, correlation_id));
        }
    };

    let start_time = Instant::now();
    let headcount = run.employees.len();
    let joined = tokio::task::spawn_blocking(move || run_payroll(&run, state.config())).await;

    match joined {
        Ok(Ok(outcome)) => {
            info!(
                correlation_id = %correlation_id,
                headcount,
                calculated = outcome.results.len(),
                failed = outcome.failures.len(),
                total_net = %outcome.summary.total_net,
                duration_us = start_time.elapsed().as_micros(),
                "Payroll run completed"
            );
            json_response(StatusCode::OK, outcome)
        }
        Ok(Err(err)) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Payroll run rejected"
            );
            let api_error: ApiErrorResponse = err.into();
            json_response(api_error.status, api_error.error)
        }
        Err(join_error) => {
            warn!(
                correlation_id = %correlation_id,
                error = %join_error,
                "Payroll run worker failed"
            );
            json_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("RUN_FAILED", "Payroll run did not complete"),
            )
        }
    }
}

/// Maps a JSON extraction failure to an API error.
fn reject(rejection: JsonRejection, correlation_id: Uuid) -> ApiError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else if body_text.contains("Invalid payroll period") {
                ApiError::invalid_period(body_text)
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
    }
}

fn json_response<T: serde::Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}
