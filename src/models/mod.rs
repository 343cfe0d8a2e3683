//! Core data models for the geofence validation engine.
//!
//! This module contains all the domain models used throughout the engine.

mod exception;
mod geo;
mod punch;
mod zone;

pub use exception::{Exception, ExceptionDecision};
pub use geo::{GeoPoint, GpsReading};
pub use punch::{PunchKind, PunchRecord, PunchStatus};
pub use zone::{Zone, ZoneGeometry};
