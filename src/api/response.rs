//! Response types for the geofence validation API.
//!
//! This module defines the error response structure and the mapping from the
//! engine's typed failures onto HTTP status codes. Every failure category
//! gets a distinct machine-readable code so a client can decide between
//! "try again", "you already punched", "ask your admin", and "submitted for
//! review" without parsing message text.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => {
                ApiErrorResponse {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    error: ApiError::with_details(
                        "CONFIG_ERROR",
                        "Configuration error",
                        error.to_string(),
                    ),
                }
            }
            EngineError::InvalidReading { ref field, .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "VALIDATION_ERROR",
                    error.to_string(),
                    format!("Field '{}' failed validation; do not retry unchanged", field),
                ),
            },
            EngineError::SequenceViolation {
                attempted,
                prior_kind,
                prior_at,
            } => ApiErrorResponse {
                status: StatusCode::CONFLICT,
                error: ApiError::with_details(
                    "SEQUENCE_ERROR",
                    format!("You have already punched {} today at {}", prior_kind, prior_at),
                    format!("Attempted '{}' conflicts with the daily punch sequence", attempted),
                ),
            },
            EngineError::MissingClockIn => ApiErrorResponse {
                status: StatusCode::CONFLICT,
                error: ApiError::new(
                    "SEQUENCE_ERROR",
                    "You must punch in before you can punch out",
                ),
            },
            EngineError::NoZonesAssigned { employee_id } => ApiErrorResponse {
                status: StatusCode::CONFLICT,
                error: ApiError::with_details(
                    "CONFIGURATION_ERROR",
                    "No work areas assigned to you. Contact your administrator.",
                    format!("Employee '{}' has no active zone assignments", employee_id),
                ),
            },
            EngineError::OutsideGeofence {
                punch_id,
                exception_id,
                boundary_margin_meters,
            } => ApiErrorResponse {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                error: ApiError::with_details(
                    "GEOFENCE_ERROR",
                    "Outside geofence. Exception created for approval.",
                    match boundary_margin_meters {
                        Some(margin) => format!(
                            "punch {}, exception {}, nearest boundary margin {:.1}m",
                            punch_id, exception_id, margin
                        ),
                        None => format!("punch {}, exception {}", punch_id, exception_id),
                    },
                ),
            },
            EngineError::InvalidZone { ref message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_ZONE",
                    "Zone geometry is invalid",
                    message.clone(),
                ),
            },
            EngineError::ZoneNotFound { id } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new("ZONE_NOT_FOUND", format!("Zone not found: {}", id)),
            },
            EngineError::InvalidDecision { message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new("VALIDATION_ERROR", message),
            },
            EngineError::ExceptionNotFound { id } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new(
                    "EXCEPTION_NOT_FOUND",
                    format!("Exception not found: {}", id),
                ),
            },
            EngineError::ExceptionAlreadyDecided { id, decision } => ApiErrorResponse {
                status: StatusCode::CONFLICT,
                error: ApiError::with_details(
                    "ALREADY_DECIDED",
                    format!("Exception {} was already decided", id),
                    format!("Recorded decision: {}", decision),
                ),
            },
            EngineError::Store { message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("STORE_ERROR", "Record store failure", message),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details")); // Should be skipped when None
    }

    #[test]
    fn test_api_error_with_details_serialization() {
        let error = ApiError::with_details("TEST_ERROR", "Test message", "Some details");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"details\":\"Some details\""));
    }

    #[test]
    fn test_geofence_error_maps_to_unprocessable() {
        let exception_id = Uuid::new_v4();
        let engine_error = EngineError::OutsideGeofence {
            punch_id: Uuid::new_v4(),
            exception_id,
            boundary_margin_meters: Some(12.5),
        };
        let api_error: ApiErrorResponse = engine_error.into();
        assert_eq!(api_error.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(api_error.error.code, "GEOFENCE_ERROR");
        assert!(
            api_error
                .error
                .details
                .unwrap()
                .contains(&exception_id.to_string())
        );
    }

    #[test]
    fn test_no_zones_maps_to_configuration_error() {
        let engine_error = EngineError::NoZonesAssigned {
            employee_id: "emp_001".to_string(),
        };
        let api_error: ApiErrorResponse = engine_error.into();
        assert_eq!(api_error.error.code, "CONFIGURATION_ERROR");
    }

    #[test]
    fn test_distinct_codes_per_failure_category() {
        let validation: ApiErrorResponse = EngineError::InvalidReading {
            field: "latitude".to_string(),
            message: "out of range".to_string(),
        }
        .into();
        let sequence: ApiErrorResponse = EngineError::MissingClockIn.into();
        let store: ApiErrorResponse = EngineError::Store {
            message: "down".to_string(),
        }
        .into();

        assert_eq!(validation.error.code, "VALIDATION_ERROR");
        assert_eq!(sequence.error.code, "SEQUENCE_ERROR");
        assert_eq!(store.error.code, "STORE_ERROR");
    }
}
