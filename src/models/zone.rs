//! Zone (geofence) model and geometry variants.
//!
//! This module defines the Zone struct and the tagged ZoneGeometry enum.
//! Modeling the geometry as a tagged variant removes any need for runtime
//! type sniffing over optional fields.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::GeoPoint;

/// The geometry of a work zone.
///
/// The two supported encodings mirror the persisted shapes: a GeoJSON Point
/// plus radius for circles, a GeoJSON Polygon ring for polygons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ZoneGeometry {
    /// A circular zone around a center point.
    Circle {
        /// The center of the circle.
        center: GeoPoint,
        /// The radius in meters. Must be positive.
        radius_meters: f64,
    },
    /// A polygonal zone bounded by a closed ring.
    ///
    /// The ring must have at least three vertices and is assumed
    /// non-self-intersecting; the engine does not validate winding.
    Polygon {
        /// The ordered vertices of the closed ring.
        ring: Vec<GeoPoint>,
    },
}

/// An administrator-defined geographic work zone.
///
/// Zones are soft-deleted: deactivation flips `active` to false and the
/// registry prunes the zone from every employee's assignment set. Inactive
/// zones never participate in membership evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    /// Unique identifier for the zone.
    pub id: Uuid,
    /// Human-readable name shown to admins.
    pub name: String,
    /// The zone boundary.
    pub geometry: ZoneGeometry,
    /// Whether the zone participates in membership evaluation.
    pub active: bool,
}

impl Zone {
    /// Creates a new active zone with a fresh id.
    pub fn new(name: impl Into<String>, geometry: ZoneGeometry) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            geometry,
            active: true,
        }
    }
}
