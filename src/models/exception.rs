//! Exception model for admin-reviewable punch failures.
//!
//! An exception is created when a punch fails geofence containment. It is
//! mutated exactly once, by an admin decision, and then serves as an audit
//! record over the punch event.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The admin decision state of an exception.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExceptionDecision {
    /// Awaiting admin review.
    Pending,
    /// The admin accepted the punch as legitimate.
    Approved,
    /// The admin rejected the punch.
    Denied,
}

impl std::fmt::Display for ExceptionDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExceptionDecision::Pending => write!(f, "pending"),
            ExceptionDecision::Approved => write!(f, "approved"),
            ExceptionDecision::Denied => write!(f, "denied"),
        }
    }
}

/// An admin-reviewable record of a punch that failed the geofence check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exception {
    /// Unique identifier for the exception.
    pub id: Uuid,
    /// The punch that spawned this exception, when one exists.
    pub punch_id: Option<Uuid>,
    /// The employee the exception concerns.
    pub employee_id: String,
    /// Why the exception was raised.
    pub reason: String,
    /// The current decision state.
    pub decision: ExceptionDecision,
    /// Optional admin comment recorded with the decision.
    pub comment: Option<String>,
    /// Which admin decided, once decided.
    pub decided_by: Option<String>,
    /// When the decision was recorded.
    pub decided_at: Option<DateTime<Utc>>,
    /// When the exception was created.
    pub created_at: DateTime<Utc>,
}

impl Exception {
    /// Creates a new pending exception tied to a punch.
    pub fn for_punch(
        punch_id: Uuid,
        employee_id: impl Into<String>,
        reason: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            punch_id: Some(punch_id),
            employee_id: employee_id.into(),
            reason: reason.into(),
            decision: ExceptionDecision::Pending,
            comment: None,
            decided_by: None,
            decided_at: None,
            created_at,
        }
    }
}
