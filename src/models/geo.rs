//! Geographic value types.
//!
//! This module defines the GeoPoint and GpsReading structs used to carry
//! device-reported locations through the engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A point on the Earth's surface in decimal degrees.
///
/// Immutable value type. Latitude is in `[-90, 90]`, longitude in
/// `[-180, 180]`; range enforcement happens at the validation boundary, not
/// in the constructor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
}

impl GeoPoint {
    /// Creates a new point from latitude and longitude.
    ///
    /// # Examples
    ///
    /// ```
    /// use timeclock_engine::models::GeoPoint;
    ///
    /// let p = GeoPoint::new(19.08934, 72.878176);
    /// assert_eq!(p.latitude, 19.08934);
    /// ```
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// A single GPS sample as reported by an employee's device.
///
/// The accuracy radius is the device-reported 1-sigma confidence circle in
/// meters; larger values mean a less trustworthy fix. Readings are ephemeral
/// request data until a punch record persists one as evidence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GpsReading {
    /// The reported position.
    pub point: GeoPoint,
    /// The device-reported confidence radius in meters.
    pub accuracy_meters: f64,
    /// When the device captured the fix.
    pub captured_at: DateTime<Utc>,
}
