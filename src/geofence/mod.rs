//! Geofence decision logic for punch validation.
//!
//! This module contains the spatial primitives, the uncertainty-aware
//! membership evaluator, the daily punch-sequence state machine, and the
//! orchestrating punch validator.

mod geo_math;
mod membership;
mod sequence;
mod validator;

pub use geo_math::{EARTH_RADIUS_METERS, great_circle_distance_meters, point_in_polygon};
pub use membership::{Membership, evaluate_membership};
pub use sequence::{DayState, check_transition, derive_day_state, utc_day_bounds};
pub use validator::PunchValidator;
