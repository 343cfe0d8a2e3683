//! Abstract record store for punches, zones, and exceptions.
//!
//! Persistence technology stays out of the engine: the validator, registry,
//! and exception queue all work against these traits. The crate ships an
//! in-memory implementation used by the API state and the test suite.
//!
//! Two behaviors are contractual rather than incidental:
//!
//! - [`PunchStore::insert_approved`] enforces "at most one approved punch per
//!   employee per UTC day per kind" atomically, so a concurrent double-submit
//!   cannot create two approved clock-ins even though the validator's
//!   read-then-check is racy on its own.
//! - [`PunchStore::insert_pending_with_exception`] writes the pending punch
//!   and its exception as one unit, so a failed exception write never leaves
//!   an orphaned pending punch without an audit trail.

mod memory;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::EngineResult;
use crate::models::{Exception, ExceptionDecision, PunchRecord, Zone};

pub use memory::MemoryStore;

/// Durable storage for punch records.
pub trait PunchStore {
    /// Returns the employee's punches within the half-open window
    /// `[from, to)`, all statuses included, oldest first.
    fn punches_for(
        &self,
        employee_id: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> EngineResult<Vec<PunchRecord>>;

    /// Inserts an approved punch, enforcing the per-employee-per-day-per-kind
    /// uniqueness constraint among approved records. A conflicting insert
    /// fails with [`crate::error::EngineError::SequenceViolation`] carrying
    /// the existing punch's timestamp.
    fn insert_approved(&self, punch: PunchRecord) -> EngineResult<PunchRecord>;

    /// Inserts a pending punch and its exception as a single atomic unit.
    fn insert_pending_with_exception(
        &self,
        punch: PunchRecord,
        exception: Exception,
    ) -> EngineResult<(PunchRecord, Exception)>;
}

/// Durable storage for zones and employee zone assignments.
pub trait ZoneStore {
    /// Creates or replaces a zone definition.
    fn upsert_zone(&self, zone: Zone) -> EngineResult<Zone>;

    /// Fetches a zone by id.
    fn get_zone(&self, id: Uuid) -> EngineResult<Option<Zone>>;

    /// Returns every zone with `active == true`.
    fn active_zones(&self) -> EngineResult<Vec<Zone>>;

    /// Soft-deletes a zone and prunes it from every employee's assignment
    /// set in the same operation. Fails with
    /// [`crate::error::EngineError::ZoneNotFound`] for an unknown id.
    fn deactivate_zone(&self, id: Uuid) -> EngineResult<Zone>;

    /// Replaces an employee's assigned zone id set.
    fn set_assignments(&self, employee_id: &str, zone_ids: Vec<Uuid>) -> EngineResult<()>;

    /// Returns the zone ids currently assigned to an employee.
    fn assigned_zone_ids(&self, employee_id: &str) -> EngineResult<Vec<Uuid>>;
}

/// Durable storage for exceptions.
pub trait ExceptionStore {
    /// Fetches an exception by id.
    fn get_exception(&self, id: Uuid) -> EngineResult<Option<Exception>>;

    /// Returns exceptions filtered by decision state, newest first.
    fn exceptions_by_decision(&self, decision: ExceptionDecision) -> EngineResult<Vec<Exception>>;

    /// Records an admin decision on a pending exception. Fails with
    /// [`crate::error::EngineError::ExceptionAlreadyDecided`] when the
    /// exception already carries a decision; the stored record is unchanged
    /// in that case.
    fn record_decision(
        &self,
        id: Uuid,
        decision: ExceptionDecision,
        comment: Option<String>,
        decided_by: String,
        decided_at: DateTime<Utc>,
    ) -> EngineResult<Exception>;
}
