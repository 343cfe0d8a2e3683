//! Uncertainty-aware zone membership evaluation.
//!
//! This module holds the engine's central policy decision: a GPS reading
//! counts as inside a circular zone only when its entire accuracy disk fits
//! within the zone. A low-confidence fix near the edge of a zone is rejected
//! even if the raw point lands inside the nominal radius, which keeps edge
//! spoofing and blurry fixes from producing false approvals.
//!
//! Polygon zones are evaluated on the raw point only. The accuracy margin
//! deliberately does not extend to polygons; the asymmetry is inherited from
//! the system this engine validates against and is preserved rather than
//! silently "fixed".

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{GpsReading, Zone, ZoneGeometry};

use super::geo_math::{great_circle_distance_meters, point_in_polygon};

/// The outcome of evaluating a reading against a set of zones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Membership {
    /// Whether the reading counts as inside at least one zone.
    pub inside: bool,
    /// The first zone that contained the reading, if any. Iteration order is
    /// the order the caller supplied; no priority is defined beyond that.
    pub matched_zone_id: Option<Uuid>,
    /// Signed distance to the nearest circular zone boundary in meters,
    /// tracked across every circular zone regardless of pass/fail.
    ///
    /// The sign convention is `distance_to_center + accuracy - radius`:
    /// negative means the whole accuracy disk sits that many meters inside
    /// the boundary, positive means it protrudes past it. `None` when every
    /// candidate zone is a polygon.
    pub boundary_margin_meters: Option<f64>,
}

/// Evaluates whether a reading should be treated as inside any of the zones.
///
/// Containment per zone kind:
/// - Circle: `distance_to_center + accuracy_meters <= radius_meters`, so an
///   accuracy of zero degenerates to naive point-in-circle and an accuracy
///   larger than the radius can never pass.
/// - Polygon: ray-cast containment of the raw point, ignoring accuracy.
///
/// Short-circuits on the first containing zone. The boundary margin is
/// accumulated over the circles seen up to and including the match, so an
/// inside result still reports how far inside the matching boundary the
/// accuracy disk sat.
///
/// Callers are expected to pass active zones only; inactive zones are
/// skipped defensively anyway.
///
/// # Example
///
/// ```
/// use chrono::Utc;
/// use timeclock_engine::geofence::evaluate_membership;
/// use timeclock_engine::models::{GeoPoint, GpsReading, Zone, ZoneGeometry};
///
/// let zone = Zone::new(
///     "Site A",
///     ZoneGeometry::Circle {
///         center: GeoPoint::new(19.08934, 72.878176),
///         radius_meters: 100.0,
///     },
/// );
/// let reading = GpsReading {
///     point: GeoPoint::new(19.08934, 72.878176),
///     accuracy_meters: 20.0,
///     captured_at: Utc::now(),
/// };
///
/// let membership = evaluate_membership(&reading, &[zone]);
/// assert!(membership.inside);
/// assert_eq!(membership.boundary_margin_meters, Some(-80.0));
/// ```
pub fn evaluate_membership(reading: &GpsReading, zones: &[Zone]) -> Membership {
    let mut matched_zone_id = None;
    let mut boundary_margin_meters: Option<f64> = None;

    for zone in zones {
        if !zone.active {
            continue;
        }

        let contained = match &zone.geometry {
            ZoneGeometry::Circle {
                center,
                radius_meters,
            } => {
                let distance = great_circle_distance_meters(reading.point, *center);
                let margin = distance + reading.accuracy_meters - radius_meters;
                boundary_margin_meters = Some(match boundary_margin_meters {
                    Some(best) => best.min(margin),
                    None => margin,
                });
                margin <= 0.0
            }
            ZoneGeometry::Polygon { ring } => point_in_polygon(reading.point, ring),
        };

        if contained {
            matched_zone_id = Some(zone.id);
            break;
        }
    }

    Membership {
        inside: matched_zone_id.is_some(),
        matched_zone_id,
        boundary_margin_meters,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GeoPoint;
    use chrono::{TimeZone, Utc};
    use proptest::prelude::*;

    fn reading(point: GeoPoint, accuracy_meters: f64) -> GpsReading {
        GpsReading {
            point,
            accuracy_meters,
            captured_at: Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap(),
        }
    }

    fn circle(center: GeoPoint, radius_meters: f64) -> Zone {
        Zone::new(
            "circle",
            ZoneGeometry::Circle {
                center,
                radius_meters,
            },
        )
    }

    /// A point ~95m north of the reference center used across these tests.
    /// One degree of latitude is ~111,195m on the spherical model.
    fn offset_north(center: GeoPoint, meters: f64) -> GeoPoint {
        GeoPoint::new(center.latitude + meters / 111_194.93, center.longitude)
    }

    const CENTER: GeoPoint = GeoPoint {
        latitude: 19.08934,
        longitude: 72.878176,
    };

    #[test]
    fn test_reading_at_center_with_slack_is_inside() {
        let zone = circle(CENTER, 100.0);
        let membership = evaluate_membership(&reading(CENTER, 20.0), &[zone]);

        assert!(membership.inside);
        assert!(membership.matched_zone_id.is_some());
        let margin = membership.boundary_margin_meters.unwrap();
        assert!((margin - (-80.0)).abs() < 1e-6, "got {}", margin);
    }

    #[test]
    fn test_accuracy_pushes_edge_reading_outside() {
        // 95m from center, accuracy 10m: 95 + 10 = 105 > 100.
        let zone = circle(CENTER, 100.0);
        let point = offset_north(CENTER, 95.0);
        let membership = evaluate_membership(&reading(point, 10.0), &[zone]);

        assert!(!membership.inside);
        assert!(membership.matched_zone_id.is_none());
        let margin = membership.boundary_margin_meters.unwrap();
        assert!(margin > 0.0 && (margin - 5.0).abs() < 0.5, "got {}", margin);
    }

    #[test]
    fn test_zero_accuracy_degenerates_to_point_containment() {
        let zone = circle(CENTER, 100.0);
        let point = offset_north(CENTER, 95.0);
        let membership = evaluate_membership(&reading(point, 0.0), &[zone]);
        assert!(membership.inside);
    }

    #[test]
    fn test_accuracy_larger_than_radius_is_always_outside() {
        let zone = circle(CENTER, 100.0);
        // Even dead-center fails when the disk cannot fit.
        let membership = evaluate_membership(&reading(CENTER, 150.0), &[zone]);
        assert!(!membership.inside);
    }

    #[test]
    fn test_inactive_zone_is_skipped() {
        let mut zone = circle(CENTER, 100.0);
        zone.active = false;
        let membership = evaluate_membership(&reading(CENTER, 0.0), &[zone]);
        assert!(!membership.inside);
        assert_eq!(membership.boundary_margin_meters, None);
    }

    #[test]
    fn test_first_match_short_circuits() {
        let near = circle(CENTER, 100.0);
        let far = circle(offset_north(CENTER, 10_000.0), 100.0);
        let near_id = near.id;

        let membership = evaluate_membership(&reading(CENTER, 10.0), &[near, far]);
        assert_eq!(membership.matched_zone_id, Some(near_id));
    }

    #[test]
    fn test_polygon_uses_raw_point_only() {
        let ring = vec![
            GeoPoint::new(19.088, 72.877),
            GeoPoint::new(19.088, 72.880),
            GeoPoint::new(19.091, 72.880),
            GeoPoint::new(19.091, 72.877),
        ];
        let zone = Zone::new("yard", ZoneGeometry::Polygon { ring });

        // A huge accuracy radius does not matter for polygons.
        let membership = evaluate_membership(&reading(CENTER, 500.0), &[zone]);
        assert!(membership.inside);
        // Polygons contribute no boundary margin.
        assert_eq!(membership.boundary_margin_meters, None);
    }

    #[test]
    fn test_point_outside_polygon() {
        let ring = vec![
            GeoPoint::new(19.088, 72.877),
            GeoPoint::new(19.088, 72.880),
            GeoPoint::new(19.091, 72.880),
            GeoPoint::new(19.091, 72.877),
        ];
        let zone = Zone::new("yard", ZoneGeometry::Polygon { ring });
        let membership = evaluate_membership(&reading(GeoPoint::new(19.1, 72.9), 0.0), &[zone]);
        assert!(!membership.inside);
    }

    #[test]
    fn test_margin_tracked_across_failing_zones() {
        let far = circle(offset_north(CENTER, 500.0), 100.0); // margin ~ +410
        let near = circle(offset_north(CENTER, 150.0), 100.0); // margin ~ +60
        let membership = evaluate_membership(&reading(CENTER, 10.0), &[far, near]);

        assert!(!membership.inside);
        let margin = membership.boundary_margin_meters.unwrap();
        assert!((margin - 60.0).abs() < 1.0, "got {}", margin);
    }

    #[test]
    fn test_no_zones_yields_no_margin() {
        let membership = evaluate_membership(&reading(CENTER, 10.0), &[]);
        assert!(!membership.inside);
        assert_eq!(membership.boundary_margin_meters, None);
    }

    proptest! {
        /// Shrinking the accuracy radius can only preserve or widen the set
        /// of accepted readings: inside at accuracy `a` implies inside at any
        /// accuracy below `a`.
        #[test]
        fn prop_containment_monotone_in_accuracy(
            lat_offset in -0.002f64..0.002,
            lng_offset in -0.002f64..0.002,
            accuracy in 0.0f64..200.0,
            tighter in 0.0f64..1.0,
        ) {
            let zone = circle(CENTER, 150.0);
            let point = GeoPoint::new(CENTER.latitude + lat_offset, CENTER.longitude + lng_offset);

            let loose = evaluate_membership(&reading(point, accuracy), std::slice::from_ref(&zone));
            let tight = evaluate_membership(&reading(point, accuracy * tighter), std::slice::from_ref(&zone));

            if loose.inside {
                prop_assert!(tight.inside);
            }
        }

        /// Haversine distance is symmetric and non-negative.
        #[test]
        fn prop_distance_symmetric(
            lat_a in -60.0f64..60.0,
            lng_a in -170.0f64..170.0,
            lat_b in -60.0f64..60.0,
            lng_b in -170.0f64..170.0,
        ) {
            let a = GeoPoint::new(lat_a, lng_a);
            let b = GeoPoint::new(lat_b, lng_b);
            let ab = great_circle_distance_meters(a, b);
            let ba = great_circle_distance_meters(b, a);
            prop_assert!(ab >= 0.0);
            prop_assert!((ab - ba).abs() < 1e-6);
        }
    }
}
