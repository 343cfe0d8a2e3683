//! Exception queue: the admin approval trail over rejected punches.
//!
//! Exceptions are created by the punch validator when a reading fails the
//! geofence check, and move exactly once from pending to approved or denied
//! by an admin decision. Deciding an exception does not flip the linked punch
//! record's status; the queue is an audit trail over the punch event, and any
//! downstream status sync is a deliberate non-feature.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{Exception, ExceptionDecision};
use crate::store::ExceptionStore;

/// The admin-facing queue of geofence exceptions.
pub struct ExceptionQueue<'a, S: ExceptionStore> {
    store: &'a S,
}

impl<'a, S: ExceptionStore> ExceptionQueue<'a, S> {
    /// Creates a queue over the given exception store.
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Lists exceptions awaiting review, newest first.
    pub fn list_pending(&self) -> EngineResult<Vec<Exception>> {
        self.store
            .exceptions_by_decision(ExceptionDecision::Pending)
    }

    /// Lists exceptions in the given decision state, newest first.
    pub fn list_by_decision(&self, decision: ExceptionDecision) -> EngineResult<Vec<Exception>> {
        self.store.exceptions_by_decision(decision)
    }

    /// Records an admin decision on a pending exception.
    ///
    /// `decision` must be `Approved` or `Denied`; a decision of `Pending`
    /// is not a decision. Deciding an already-decided exception is an
    /// error and leaves the first decision untouched.
    pub fn decide(
        &self,
        id: Uuid,
        decision: ExceptionDecision,
        comment: Option<String>,
        decided_by: impl Into<String>,
        now: DateTime<Utc>,
    ) -> EngineResult<Exception> {
        if decision == ExceptionDecision::Pending {
            return Err(EngineError::InvalidDecision {
                message: "decision must be 'approved' or 'denied'".to_string(),
            });
        }
        self.store
            .record_decision(id, decision, comment, decided_by.into(), now)
    }
}
