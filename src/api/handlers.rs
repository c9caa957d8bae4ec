//! HTTP request handlers for the shift pay engine API.
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
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{calculate_activity_pay, price_intervention, summarize_activities};
use crate::error::EngineError;
use crate::models::Activity;

use super::request::{CalculationRequest, InterventionPriceRequest, SummaryRequest};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/activities/calculate", post(calculate_handler))
        .route("/interventions/price", post(price_intervention_handler))
        .route("/activities/summary", post(summary_handler))
        .with_state(state)
}

/// Handler for POST /activities/calculate.
///
/// Prices one activity and returns its billing lines and total.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing activity calculation request");

    let request = match parse_payload(correlation_id, payload) {
        Ok(request) => request,
        Err(error) => return error.into_response(),
    };

    let start_time = Instant::now();
    let result = state
        .resolve_worker(&request.worker)
        .and_then(|worker| calculate_activity_pay(&request.activity, &worker, state.config().rates()));

    match result {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                worker_id = %request.worker.id,
                activity_id = %request.activity.id,
                lines = result.lines.len(),
                total_amount = %result.total_amount,
                duration_us = start_time.elapsed().as_micros(),
                "Activity calculation completed"
            );
            json_ok(result)
        }
        Err(err) => engine_failure(correlation_id, err),
    }
}

/// Handler for POST /interventions/price.
///
/// Prices a single intervention in isolation.
async fn price_intervention_handler(
    State(state): State<AppState>,
    payload: Result<Json<InterventionPriceRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing intervention pricing request");

    let request = match parse_payload(correlation_id, payload) {
        Ok(request) => request,
        Err(error) => return error.into_response(),
    };

    let result = state.resolve_worker(&request.worker).and_then(|worker| {
        price_intervention(&request.intervention, &worker, state.config().rates())
    });

    match result {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                worker_id = %request.worker.id,
                intervention_id = %result.intervention_id,
                amount = %result.amount,
                "Intervention pricing completed"
            );
            json_ok(result)
        }
        Err(err) => engine_failure(correlation_id, err),
    }
}

/// Handler for POST /activities/summary.
///
/// Summarizes a set of activities, optionally restricted to one month.
async fn summary_handler(
    State(state): State<AppState>,
    payload: Result<Json<SummaryRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing activity summary request");

    let request = match parse_payload(correlation_id, payload) {
        Ok(request) => request,
        Err(error) => return error.into_response(),
    };

    let month = match request.month_filter() {
        Ok(month) => month,
        Err(message) => {
            warn!(correlation_id = %correlation_id, error = %message, "Invalid month filter");
            return ApiErrorResponse::bad_request(ApiError::validation_error(message))
                .into_response();
        }
    };

    let activities: Vec<Activity> = match month {
        Some((year, month)) => request
            .activities
            .iter()
            .filter(|activity| activity.starts_in_month(year, month))
            .cloned()
            .collect(),
        None => request.activities.clone(),
    };

    let result = state
        .resolve_worker(&request.worker)
        .and_then(|worker| summarize_activities(&activities, &worker, state.config().rates()));

    match result {
        Ok(summary) => {
            info!(
                correlation_id = %correlation_id,
                worker_id = %request.worker.id,
                activities = summary.activity_count,
                interventions = summary.intervention_count,
                total_amount = %summary.total_amount,
                "Activity summary completed"
            );
            json_ok(summary)
        }
        Err(err) => engine_failure(correlation_id, err),
    }
}

/// Unwraps a JSON body, mapping extractor rejections to API errors.
fn parse_payload<T>(
    correlation_id: Uuid,
    payload: Result<Json<T>, JsonRejection>,
) -> Result<T, ApiErrorResponse> {
    let rejection = match payload {
        Ok(Json(request)) => return Ok(request),
        Err(rejection) => rejection,
    };

    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
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

    Err(ApiErrorResponse::bad_request(error))
}

fn json_ok<T: Serialize>(body: T) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn engine_failure(correlation_id: Uuid, err: EngineError) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Calculation failed"
    );
    ApiErrorResponse::from(err).into_response()
}
