//! HTTP request handlers for the geofence validation API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::exceptions::ExceptionQueue;
use crate::geofence::PunchValidator;
use crate::models::{ExceptionDecision, Zone};
use crate::registry::ZoneRegistry;
use crate::store::PunchStore;

use super::request::{AssignZonesRequest, DecisionRequest, PunchRequest, ZoneRequest};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/punches", post(submit_punch_handler))
        .route("/punches/:employee_id", get(punch_history_handler))
        .route("/zones", get(list_zones_handler).post(upsert_zone_handler))
        .route("/zones/:id", delete(deactivate_zone_handler))
        .route("/employees/:employee_id/zones", put(assign_zones_handler))
        .route("/exceptions", get(list_exceptions_handler))
        .route("/exceptions/:id/decision", post(decide_exception_handler))
        .with_state(state)
}

/// Handler for POST /punches.
///
/// Validates and records a punch; the response status distinguishes every
/// failure category so the client can choose its next step.
async fn submit_punch_handler(
    State(state): State<AppState>,
    payload: Result<Json<PunchRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing punch submission");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return json_rejection_response(correlation_id, rejection),
    };

    let now = Utc::now();
    let reading = request.reading.into_reading(now);
    let validator = PunchValidator::new(state.store(), state.config());

    match validator.submit_punch(&request.employee_id, request.kind, reading, now) {
        Ok(punch) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %request.employee_id,
                punch_id = %punch.id,
                "Punch approved"
            );
            (
                StatusCode::CREATED,
                [(header::CONTENT_TYPE, "application/json")],
                Json(punch),
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                employee_id = %request.employee_id,
                error = %err,
                "Punch rejected"
            );
            let api_error: ApiErrorResponse = err.into();
            api_error.into_response()
        }
    }
}

/// Query parameters for the punch history endpoint.
#[derive(Debug, Deserialize)]
struct HistoryQuery {
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
}

/// Handler for GET /punches/{employee_id}.
async fn punch_history_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    Query(query): Query<HistoryQuery>,
) -> impl IntoResponse {
    let from = query.from.unwrap_or(DateTime::<Utc>::MIN_UTC);
    let to = query.to.unwrap_or(DateTime::<Utc>::MAX_UTC);

    match state.store().punches_for(&employee_id, from, to) {
        Ok(punches) => Json(punches).into_response(),
        Err(err) => ApiErrorResponse::from(err).into_response(),
    }
}

/// Handler for GET /zones.
async fn list_zones_handler(State(state): State<AppState>) -> impl IntoResponse {
    let registry = ZoneRegistry::new(state.store());
    match registry.all_active_zones() {
        Ok(zones) => Json(zones).into_response(),
        Err(err) => ApiErrorResponse::from(err).into_response(),
    }
}

/// Handler for POST /zones.
async fn upsert_zone_handler(
    State(state): State<AppState>,
    payload: Result<Json<ZoneRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return json_rejection_response(correlation_id, rejection),
    };

    let registry = ZoneRegistry::new(state.store());
    match registry.upsert_zone(Zone::from(request)) {
        Ok(zone) => {
            info!(correlation_id = %correlation_id, zone_id = %zone.id, "Zone upserted");
            (StatusCode::CREATED, Json(zone)).into_response()
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Zone upsert failed");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for DELETE /zones/{id}. Soft delete with eager assignment prune.
async fn deactivate_zone_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let registry = ZoneRegistry::new(state.store());
    match registry.deactivate_zone(id) {
        Ok(zone) => {
            info!(zone_id = %zone.id, "Zone deactivated");
            Json(zone).into_response()
        }
        Err(err) => ApiErrorResponse::from(err).into_response(),
    }
}

/// Handler for PUT /employees/{employee_id}/zones.
async fn assign_zones_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    payload: Result<Json<AssignZonesRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return json_rejection_response(correlation_id, rejection),
    };

    let registry = ZoneRegistry::new(state.store());
    match registry.assign_zones(&employee_id, request.zone_ids) {
        Ok(()) => {
            info!(correlation_id = %correlation_id, employee_id = %employee_id, "Zones assigned");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Zone assignment failed");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Query parameters for the exception listing endpoint.
#[derive(Debug, Deserialize)]
struct ExceptionsQuery {
    decision: Option<ExceptionDecision>,
}

/// Handler for GET /exceptions.
///
/// Without a `decision` filter, returns every exception newest first.
async fn list_exceptions_handler(
    State(state): State<AppState>,
    Query(query): Query<ExceptionsQuery>,
) -> impl IntoResponse {
    let queue = ExceptionQueue::new(state.store());
    let result = match query.decision {
        Some(decision) => queue.list_by_decision(decision),
        None => {
            let mut all = Vec::new();
            let decisions = [
                ExceptionDecision::Pending,
                ExceptionDecision::Approved,
                ExceptionDecision::Denied,
            ];
            let mut failed = None;
            for decision in decisions {
                match queue.list_by_decision(decision) {
                    Ok(mut exceptions) => all.append(&mut exceptions),
                    Err(err) => {
                        failed = Some(err);
                        break;
                    }
                }
            }
            match failed {
                Some(err) => Err(err),
                None => {
                    all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
                    Ok(all)
                }
            }
        }
    };

    match result {
        Ok(exceptions) => Json(exceptions).into_response(),
        Err(err) => ApiErrorResponse::from(err).into_response(),
    }
}

/// Handler for POST /exceptions/{id}/decision.
async fn decide_exception_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<DecisionRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return json_rejection_response(correlation_id, rejection),
    };

    let queue = ExceptionQueue::new(state.store());
    match queue.decide(
        id,
        request.decision.into(),
        request.comment,
        request.decided_by,
        Utc::now(),
    ) {
        Ok(exception) => {
            info!(
                correlation_id = %correlation_id,
                exception_id = %exception.id,
                decision = %exception.decision,
                "Exception decided"
            );
            Json(exception).into_response()
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Exception decision failed");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Maps a JSON extraction rejection to a 400 response in the shared error
/// shape.
fn json_rejection_response(
    correlation_id: Uuid,
    rejection: JsonRejection,
) -> axum::response::Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::new("VALIDATION_ERROR", body_text)
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
        JsonRejection::MissingJsonContentType(_) => ApiError::new(
            "MISSING_CONTENT_TYPE",
            "Content-Type must be application/json",
        ),
        _ => ApiError::malformed_json("Failed to parse request body"),
    };

    (
        StatusCode::BAD_REQUEST,
        [(header::CONTENT_TYPE, "application/json")],
        Json(error),
    )
        .into_response()
}
