//! Punch record model and related types.
//!
//! A punch is a single clock-in or clock-out event. Records are created
//! exclusively by the punch validator and are immutable once written except
//! for the status field, which transitions at most once away from Pending.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::GpsReading;

/// Whether a punch clocks the employee in or out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PunchKind {
    /// Start of the working day.
    In,
    /// End of the working day.
    Out,
}

impl std::fmt::Display for PunchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PunchKind::In => write!(f, "in"),
            PunchKind::Out => write!(f, "out"),
        }
    }
}

/// The lifecycle status of a punch record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PunchStatus {
    /// The reading passed the geofence check; the punch counts.
    Approved,
    /// The reading failed the geofence check; awaiting admin review.
    Pending,
    /// An admin rejected the punch.
    Denied,
}

/// A persisted clock-in/out event with its location evidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PunchRecord {
    /// Unique identifier for the punch.
    pub id: Uuid,
    /// The employee who submitted the punch.
    pub employee_id: String,
    /// Clock-in or clock-out.
    pub kind: PunchKind,
    /// The GPS reading submitted with the punch, kept as evidence.
    pub reading: GpsReading,
    /// The lifecycle status of the punch.
    pub status: PunchStatus,
    /// When the engine recorded the punch.
    pub created_at: DateTime<Utc>,
}

impl PunchRecord {
    /// Creates a new punch record with a fresh id.
    pub fn new(
        employee_id: impl Into<String>,
        kind: PunchKind,
        reading: GpsReading,
        status: PunchStatus,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            employee_id: employee_id.into(),
            kind,
            reading,
            status,
            created_at,
        }
    }
}
