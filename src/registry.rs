//! Zone registry: geofence definitions and employee assignments.
//!
//! Wraps the zone store with the invariants the rest of the engine relies
//! on: geometry is validated on write, deactivation prunes assignments
//! eagerly, and assignment resolution filters inactive or missing zones
//! defensively even though the prune should already have removed them.

use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{Zone, ZoneGeometry};
use crate::store::ZoneStore;

/// Registry of work zones and their employee assignments.
pub struct ZoneRegistry<'a, S: ZoneStore> {
    store: &'a S,
}

impl<'a, S: ZoneStore> ZoneRegistry<'a, S> {
    /// Creates a registry over the given zone store.
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Creates or replaces a zone after validating its geometry invariants:
    /// circle radius must be positive and finite, polygon rings need at
    /// least three vertices.
    pub fn upsert_zone(&self, zone: Zone) -> EngineResult<Zone> {
        match &zone.geometry {
            ZoneGeometry::Circle { radius_meters, .. } => {
                if !radius_meters.is_finite() || *radius_meters <= 0.0 {
                    return Err(EngineError::InvalidZone {
                        message: format!("circle radius must be positive, got {}", radius_meters),
                    });
                }
            }
            ZoneGeometry::Polygon { ring } => {
                if ring.len() < 3 {
                    return Err(EngineError::InvalidZone {
                        message: format!("polygon ring needs at least 3 vertices, got {}", ring.len()),
                    });
                }
            }
        }
        self.store.upsert_zone(zone)
    }

    /// Soft-deletes a zone. The store prunes the zone from every employee's
    /// assignment set in the same operation.
    pub fn deactivate_zone(&self, id: Uuid) -> EngineResult<Zone> {
        self.store.deactivate_zone(id)
    }

    /// Replaces an employee's assigned zone set. Unknown or inactive zone
    /// ids are rejected so assignments never point at dead zones.
    pub fn assign_zones(&self, employee_id: &str, zone_ids: Vec<Uuid>) -> EngineResult<()> {
        for id in &zone_ids {
            match self.store.get_zone(*id)? {
                Some(zone) if zone.active => {}
                Some(_) | None => return Err(EngineError::ZoneNotFound { id: *id }),
            }
        }
        self.store.set_assignments(employee_id, zone_ids)
    }

    /// Resolves the active zones assigned to an employee.
    ///
    /// Assignments pointing at inactive or missing zones are treated as
    /// absent regardless of whether deactivation already pruned them. The
    /// returned order follows the stored assignment order; the membership
    /// contract defines no priority beyond that.
    pub fn active_zones_for(&self, employee_id: &str) -> EngineResult<Vec<Zone>> {
        let mut zones = Vec::new();
        for id in self.store.assigned_zone_ids(employee_id)? {
            if let Some(zone) = self.store.get_zone(id)?
                && zone.active
            {
                zones.push(zone);
            }
        }
        Ok(zones)
    }

    /// Lists every active zone, for admin display. Not used by evaluation.
    pub fn all_active_zones(&self) -> EngineResult<Vec<Zone>> {
        self.store.active_zones()
    }
}
