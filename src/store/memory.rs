//! In-memory record store.
//!
//! Backs the API state and the test suite. A single mutex guards all tables
//! so the multi-write operations (`insert_pending_with_exception`, the
//! deactivate-and-prune) and the approved-punch uniqueness check are atomic
//! with respect to concurrent submitters.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::geofence::utc_day_bounds;
use crate::models::{Exception, ExceptionDecision, PunchRecord, PunchStatus, Zone};

use super::{ExceptionStore, PunchStore, ZoneStore};

#[derive(Debug, Default)]
struct Tables {
    punches: Vec<PunchRecord>,
    zones: HashMap<Uuid, Zone>,
    assignments: HashMap<String, Vec<Uuid>>,
    exceptions: Vec<Exception>,
}

/// A thread-safe in-memory implementation of the record-store traits.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> EngineResult<std::sync::MutexGuard<'_, Tables>> {
        self.tables.lock().map_err(|e: PoisonError<_>| EngineError::Store {
            message: format!("store lock poisoned: {}", e),
        })
    }
}

impl PunchStore for MemoryStore {
    fn punches_for(
        &self,
        employee_id: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> EngineResult<Vec<PunchRecord>> {
        let tables = self.lock()?;
        let mut punches: Vec<PunchRecord> = tables
            .punches
            .iter()
            .filter(|p| p.employee_id == employee_id && p.created_at >= from && p.created_at < to)
            .cloned()
            .collect();
        punches.sort_by_key(|p| p.created_at);
        Ok(punches)
    }

    fn insert_approved(&self, punch: PunchRecord) -> EngineResult<PunchRecord> {
        let mut tables = self.lock()?;

        // The uniqueness constraint: one approved punch per employee per UTC
        // day per kind, checked under the same lock as the insert.
        let (day_start, day_end) = utc_day_bounds(punch.created_at);
        let conflict = tables.punches.iter().find(|p| {
            p.employee_id == punch.employee_id
                && p.kind == punch.kind
                && p.status == PunchStatus::Approved
                && p.created_at >= day_start
                && p.created_at < day_end
        });
        if let Some(existing) = conflict {
            return Err(EngineError::SequenceViolation {
                attempted: punch.kind,
                prior_kind: existing.kind,
                prior_at: existing.created_at,
            });
        }

        tables.punches.push(punch.clone());
        Ok(punch)
    }

    fn insert_pending_with_exception(
        &self,
        punch: PunchRecord,
        exception: Exception,
    ) -> EngineResult<(PunchRecord, Exception)> {
        let mut tables = self.lock()?;
        tables.punches.push(punch.clone());
        tables.exceptions.push(exception.clone());
        Ok((punch, exception))
    }
}

impl ZoneStore for MemoryStore {
    fn upsert_zone(&self, zone: Zone) -> EngineResult<Zone> {
        let mut tables = self.lock()?;
        tables.zones.insert(zone.id, zone.clone());
        Ok(zone)
    }

    fn get_zone(&self, id: Uuid) -> EngineResult<Option<Zone>> {
        let tables = self.lock()?;
        Ok(tables.zones.get(&id).cloned())
    }

    fn active_zones(&self) -> EngineResult<Vec<Zone>> {
        let tables = self.lock()?;
        let mut zones: Vec<Zone> = tables.zones.values().filter(|z| z.active).cloned().collect();
        zones.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(zones)
    }

    fn deactivate_zone(&self, id: Uuid) -> EngineResult<Zone> {
        let mut tables = self.lock()?;
        let zone = match tables.zones.get_mut(&id) {
            Some(zone) => {
                zone.active = false;
                zone.clone()
            }
            None => return Err(EngineError::ZoneNotFound { id }),
        };

        // Eager prune: stale references must never reach evaluation.
        for assigned in tables.assignments.values_mut() {
            assigned.retain(|zone_id| *zone_id != id);
        }

        Ok(zone)
    }

    fn set_assignments(&self, employee_id: &str, zone_ids: Vec<Uuid>) -> EngineResult<()> {
        let mut tables = self.lock()?;
        tables.assignments.insert(employee_id.to_string(), zone_ids);
        Ok(())
    }

    fn assigned_zone_ids(&self, employee_id: &str) -> EngineResult<Vec<Uuid>> {
        let tables = self.lock()?;
        Ok(tables
            .assignments
            .get(employee_id)
            .cloned()
            .unwrap_or_default())
    }
}

impl ExceptionStore for MemoryStore {
    fn get_exception(&self, id: Uuid) -> EngineResult<Option<Exception>> {
        let tables = self.lock()?;
        Ok(tables.exceptions.iter().find(|e| e.id == id).cloned())
    }

    fn exceptions_by_decision(&self, decision: ExceptionDecision) -> EngineResult<Vec<Exception>> {
        let tables = self.lock()?;
        let mut exceptions: Vec<Exception> = tables
            .exceptions
            .iter()
            .filter(|e| e.decision == decision)
            .cloned()
            .collect();
        exceptions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(exceptions)
    }

    fn record_decision(
        &self,
        id: Uuid,
        decision: ExceptionDecision,
        comment: Option<String>,
        decided_by: String,
        decided_at: DateTime<Utc>,
    ) -> EngineResult<Exception> {
        let mut tables = self.lock()?;
        let exception = tables
            .exceptions
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(EngineError::ExceptionNotFound { id })?;

        if exception.decision != ExceptionDecision::Pending {
            return Err(EngineError::ExceptionAlreadyDecided {
                id,
                decision: exception.decision,
            });
        }

        exception.decision = decision;
        exception.comment = comment;
        exception.decided_by = Some(decided_by);
        exception.decided_at = Some(decided_at);
        Ok(exception.clone())
    }
}
