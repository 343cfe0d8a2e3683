//! HTTP API for the geofence validation engine.
//!
//! A thin axum presentation layer over the engine: it deserializes request
//! DTOs, invokes the validator/registry/queue, and maps the typed failure
//! taxonomy onto HTTP status codes and human-readable error bodies. The
//! engine itself never formats user-facing strings.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    AssignZonesRequest, DecisionChoice, DecisionRequest, PunchRequest, ReadingRequest, ZoneRequest,
};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
