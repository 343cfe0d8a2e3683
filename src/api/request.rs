//! Request types for the geofence validation API.
//!
//! DTOs are kept separate from the domain models so the wire contract can
//! evolve independently; each converts into its domain counterpart.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::models::{
    ExceptionDecision, GeoPoint, GpsReading, PunchKind, Zone, ZoneGeometry,
};

/// A device GPS fix as submitted with a punch.
#[derive(Debug, Clone, Deserialize)]
pub struct ReadingRequest {
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
    /// Device-reported accuracy radius in meters.
    pub accuracy_meters: f64,
    /// When the device captured the fix. Defaults to receipt time.
    #[serde(default)]
    pub captured_at: Option<DateTime<Utc>>,
}

impl ReadingRequest {
    /// Converts to a domain reading, filling in the capture time.
    pub fn into_reading(self, now: DateTime<Utc>) -> GpsReading {
        GpsReading {
            point: GeoPoint::new(self.latitude, self.longitude),
            accuracy_meters: self.accuracy_meters,
            captured_at: self.captured_at.unwrap_or(now),
        }
    }
}

/// Body for `POST /punches`.
#[derive(Debug, Clone, Deserialize)]
pub struct PunchRequest {
    /// The employee submitting the punch. In a deployed system this comes
    /// from the authenticated credential, not the body; the engine never
    /// authenticates.
    pub employee_id: String,
    /// Clock-in or clock-out.
    pub kind: PunchKind,
    /// The GPS reading backing the punch.
    pub reading: ReadingRequest,
}

/// Body for `POST /zones`.
#[derive(Debug, Clone, Deserialize)]
pub struct ZoneRequest {
    /// Zone id; omitted on create, supplied on update.
    #[serde(default)]
    pub id: Option<Uuid>,
    /// Human-readable zone name.
    pub name: String,
    /// The zone boundary.
    pub geometry: ZoneGeometry,
}

impl From<ZoneRequest> for Zone {
    fn from(request: ZoneRequest) -> Self {
        Zone {
            id: request.id.unwrap_or_else(Uuid::new_v4),
            name: request.name,
            geometry: request.geometry,
            active: true,
        }
    }
}

/// Body for `PUT /employees/{employee_id}/zones`.
#[derive(Debug, Clone, Deserialize)]
pub struct AssignZonesRequest {
    /// The full replacement set of assigned zone ids.
    pub zone_ids: Vec<Uuid>,
}

/// The admin's choice when deciding an exception. Deserializes only the two
/// terminal states, so "pending" is unrepresentable on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionChoice {
    /// Accept the punch as legitimate.
    Approved,
    /// Reject the punch.
    Denied,
}

impl From<DecisionChoice> for ExceptionDecision {
    fn from(choice: DecisionChoice) -> Self {
        match choice {
            DecisionChoice::Approved => ExceptionDecision::Approved,
            DecisionChoice::Denied => ExceptionDecision::Denied,
        }
    }
}

/// Body for `POST /exceptions/{id}/decision`.
#[derive(Debug, Clone, Deserialize)]
pub struct DecisionRequest {
    /// The admin's decision.
    pub decision: DecisionChoice,
    /// Optional comment recorded with the decision.
    #[serde(default)]
    pub comment: Option<String>,
    /// The deciding admin's identifier.
    pub decided_by: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_punch_request_deserialization() {
        let json = r#"{
            "employee_id": "emp_001",
            "kind": "in",
            "reading": {
                "latitude": 19.08934,
                "longitude": 72.878176,
                "accuracy_meters": 15.0
            }
        }"#;

        let request: PunchRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.employee_id, "emp_001");
        assert_eq!(request.kind, PunchKind::In);
        assert!(request.reading.captured_at.is_none());
    }

    #[test]
    fn test_reading_defaults_capture_time_to_now() {
        let request = ReadingRequest {
            latitude: 19.08934,
            longitude: 72.878176,
            accuracy_meters: 15.0,
            captured_at: None,
        };
        let now = Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap();
        assert_eq!(request.into_reading(now).captured_at, now);
    }

    #[test]
    fn test_zone_request_without_id_gets_fresh_id() {
        let json = r#"{
            "name": "Site A",
            "geometry": {
                "kind": "circle",
                "center": { "latitude": 19.08934, "longitude": 72.878176 },
                "radius_meters": 100.0
            }
        }"#;

        let request: ZoneRequest = serde_json::from_str(json).unwrap();
        let zone: Zone = request.into();
        assert!(zone.active);
        assert_eq!(zone.name, "Site A");
    }

    #[test]
    fn test_decision_choice_rejects_pending() {
        assert!(serde_json::from_str::<DecisionChoice>("\"pending\"").is_err());
        assert_eq!(
            serde_json::from_str::<DecisionChoice>("\"approved\"").unwrap(),
            DecisionChoice::Approved
        );
    }
}
