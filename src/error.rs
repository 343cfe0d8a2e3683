//! Error types for the geofence validation engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur during punch validation, zone
//! management, and exception handling.

use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::models::{ExceptionDecision, PunchKind};

/// The main error type for the geofence validation engine.
///
/// Every failure category is a distinct variant carrying enough structured
/// data for a presentation layer to render a human message; the engine itself
/// never formats user-facing strings.
///
/// # Example
///
/// ```
/// use timeclock_engine::error::EngineError;
///
/// let error = EngineError::NoZonesAssigned {
///     employee_id: "emp_001".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "No work areas assigned to employee 'emp_001'"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
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

    /// A punch request carried structurally invalid data (bad coordinates,
    /// negative or non-finite accuracy). Never persisted.
    #[error("Invalid reading field '{field}': {message}")]
    InvalidReading {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A punch attempt violated the daily in/out state machine.
    #[error("Punch '{attempted}' conflicts with prior approved '{prior_kind}' at {prior_at}")]
    SequenceViolation {
        /// The punch kind that was attempted.
        attempted: PunchKind,
        /// The kind of the conflicting prior approved punch.
        prior_kind: PunchKind,
        /// When the conflicting punch was recorded.
        prior_at: DateTime<Utc>,
    },

    /// A clock-out was attempted with no approved clock-in on the same day.
    #[error("Punch 'out' requires a prior approved 'in' on the same day")]
    MissingClockIn,

    /// The employee has no active zones assigned. An admin-actionable
    /// configuration problem, not a location problem.
    #[error("No work areas assigned to employee '{employee_id}'")]
    NoZonesAssigned {
        /// The employee whose assignment set resolved empty.
        employee_id: String,
    },

    /// The reading fell outside every assigned zone under the uncertainty
    /// policy. A pending punch and an exception were persisted as evidence
    /// even though the submitting call fails.
    #[error("Reading outside all assigned zones; exception {exception_id} created")]
    OutsideGeofence {
        /// The pending punch record that was created.
        punch_id: Uuid,
        /// The exception created for admin review.
        exception_id: Uuid,
        /// Signed distance to the nearest circular zone boundary, in meters.
        /// Negative means the accuracy disk would sit inside the boundary.
        /// `None` when every candidate zone was a polygon.
        boundary_margin_meters: Option<f64>,
    },

    /// A zone definition failed its geometry invariants.
    #[error("Invalid zone: {message}")]
    InvalidZone {
        /// A description of the violated invariant.
        message: String,
    },

    /// No zone exists with the given id.
    #[error("Zone not found: {id}")]
    ZoneNotFound {
        /// The zone id that was not found.
        id: Uuid,
    },

    /// An admin decision request carried an invalid decision value.
    #[error("Invalid exception decision: {message}")]
    InvalidDecision {
        /// A description of what made the decision invalid.
        message: String,
    },

    /// No exception exists with the given id.
    #[error("Exception not found: {id}")]
    ExceptionNotFound {
        /// The exception id that was not found.
        id: Uuid,
    },

    /// An admin tried to decide an exception that already carries a decision.
    /// The first decision stands; the state never regresses.
    #[error("Exception {id} already decided: {decision}")]
    ExceptionAlreadyDecided {
        /// The exception id.
        id: Uuid,
        /// The decision already recorded.
        decision: ExceptionDecision,
    },

    /// The record store failed. Propagated unchanged; the engine never
    /// retries internally.
    #[error("Record store failure: {message}")]
    Store {
        /// A description of the store failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
