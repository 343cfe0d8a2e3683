//! Punch validation orchestration.
//!
//! `PunchValidator` wires the structural validation, the daily sequence
//! check, zone resolution, and the membership evaluation into the single
//! `submit_punch` entry point, and owns the "fail visibly, capture evidence"
//! behavior: a reading outside every zone persists a pending punch plus an
//! exception before the call reports failure.

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{Exception, GpsReading, PunchKind, PunchRecord, PunchStatus};
use crate::registry::ZoneRegistry;
use crate::store::{PunchStore, ZoneStore};

use super::membership::evaluate_membership;
use super::sequence::{check_transition, derive_day_state, utc_day_bounds};

/// The reason string recorded on geofence exceptions.
pub(crate) const OUTSIDE_GEOFENCE_REASON: &str = "Outside geofence boundary";

/// Orchestrates acceptance or rejection of incoming punch requests.
///
/// Stateless and request-scoped: every submission re-reads today's punches
/// and the zone assignments from the store, so concurrent employees and
/// devices never observe stale cached state. "Now" is a parameter, which
/// keeps day-boundary behavior deterministic under test.
pub struct PunchValidator<'a, S: PunchStore + ZoneStore> {
    store: &'a S,
    config: &'a EngineConfig,
}

impl<'a, S: PunchStore + ZoneStore> PunchValidator<'a, S> {
    /// Creates a validator over the given store and policy configuration.
    pub fn new(store: &'a S, config: &'a EngineConfig) -> Self {
        Self { store, config }
    }

    /// Validates and records a punch.
    ///
    /// The checks run in a fixed order, each failing before any later work:
    ///
    /// 1. Structural validation of the reading (coordinate ranges, finite
    ///    non-negative accuracy, accuracy within the configured maximum).
    ///    No record is created.
    /// 2. Daily sequence check against today's approved punches. No record
    ///    is created.
    /// 3. Zone resolution; an empty assignment set is a configuration
    ///    error, distinct from being outside. No record is created.
    /// 4. Membership evaluation. Inside: one approved punch is written and
    ///    returned. Outside: a pending punch and its exception are written
    ///    as one unit, then the call fails with
    ///    [`EngineError::OutsideGeofence`] carrying both ids.
    pub fn submit_punch(
        &self,
        employee_id: &str,
        kind: PunchKind,
        reading: GpsReading,
        now: DateTime<Utc>,
    ) -> EngineResult<PunchRecord> {
        self.validate_reading(&reading)?;

        let (day_start, day_end) = utc_day_bounds(now);
        let todays = self.store.punches_for(employee_id, day_start, day_end)?;
        check_transition(derive_day_state(&todays), kind)?;

        let registry = ZoneRegistry::new(self.store);
        let zones = registry.active_zones_for(employee_id)?;
        if zones.is_empty() {
            return Err(EngineError::NoZonesAssigned {
                employee_id: employee_id.to_string(),
            });
        }

        let membership = evaluate_membership(&reading, &zones);
        if membership.inside {
            let punch = PunchRecord::new(employee_id, kind, reading, PunchStatus::Approved, now);
            let punch = self.store.insert_approved(punch)?;
            info!(
                employee_id,
                punch_id = %punch.id,
                kind = %kind,
                zone_id = ?membership.matched_zone_id,
                "punch approved"
            );
            return Ok(punch);
        }

        // Outside all zones: persist the evidence, then fail the request.
        let punch = PunchRecord::new(employee_id, kind, reading, PunchStatus::Pending, now);
        let exception = Exception::for_punch(punch.id, employee_id, OUTSIDE_GEOFENCE_REASON, now);
        let (punch, exception) = self.store.insert_pending_with_exception(punch, exception)?;
        warn!(
            employee_id,
            punch_id = %punch.id,
            exception_id = %exception.id,
            boundary_margin_meters = ?membership.boundary_margin_meters,
            "punch outside geofence, exception created"
        );

        Err(EngineError::OutsideGeofence {
            punch_id: punch.id,
            exception_id: exception.id,
            boundary_margin_meters: membership.boundary_margin_meters,
        })
    }

    fn validate_reading(&self, reading: &GpsReading) -> EngineResult<()> {
        let lat = reading.point.latitude;
        let lng = reading.point.longitude;
        let accuracy = reading.accuracy_meters;

        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(EngineError::InvalidReading {
                field: "latitude".to_string(),
                message: format!("must be between -90 and 90, got {}", lat),
            });
        }
        if !lng.is_finite() || !(-180.0..=180.0).contains(&lng) {
            return Err(EngineError::InvalidReading {
                field: "longitude".to_string(),
                message: format!("must be between -180 and 180, got {}", lng),
            });
        }
        if !accuracy.is_finite() || accuracy < 0.0 {
            return Err(EngineError::InvalidReading {
                field: "accuracy_meters".to_string(),
                message: format!("must be a non-negative number, got {}", accuracy),
            });
        }
        if accuracy > self.config.max_accuracy_meters {
            return Err(EngineError::InvalidReading {
                field: "accuracy_meters".to_string(),
                message: format!(
                    "accuracy {}m exceeds the maximum acceptable {}m",
                    accuracy, self.config.max_accuracy_meters
                ),
            });
        }
        Ok(())
    }
}
