//! Spherical distance and planar containment primitives.
//!
//! These are the only places the engine does raw geometry. Distances use the
//! haversine formula on a spherical earth; polygon containment treats
//! latitude/longitude as planar coordinates, which is accurate at the
//! city-scale zone sizes this engine works with.

use crate::models::GeoPoint;

/// Mean Earth radius in meters, as used by the haversine distance.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Computes the great-circle distance between two points in meters.
///
/// Uses the haversine formula on a sphere of radius
/// [`EARTH_RADIUS_METERS`]. Symmetric and non-negative; zero (within
/// floating tolerance) iff the points coincide. Standard haversine error
/// bounds apply near antipodal pairs, which is acceptable for sub-kilometer
/// work zones.
///
/// # Example
///
/// ```
/// use timeclock_engine::geofence::great_circle_distance_meters;
/// use timeclock_engine::models::GeoPoint;
///
/// let a = GeoPoint::new(19.08934, 72.878176);
/// let b = GeoPoint::new(19.08934, 72.878176);
/// assert!(great_circle_distance_meters(a, b) < 1e-6);
/// ```
pub fn great_circle_distance_meters(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat_a = a.latitude.to_radians();
    let lat_b = b.latitude.to_radians();
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lng = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().asin();

    EARTH_RADIUS_METERS * c
}

/// Tests whether a point lies inside a closed polygon ring.
///
/// Standard ray-casting over the ring treated as planar. The crossing test
/// uses a half-open rule (`(y_i > p.y) != (y_j > p.y)`), so a point exactly
/// on a horizontal edge counts as inside for the edge's lower side and
/// outside for the upper side; the convention is consistent and not
/// special-cased. The ring is closed implicitly: the last vertex connects
/// back to the first.
///
/// Rings with fewer than three vertices contain nothing.
pub fn point_in_polygon(p: GeoPoint, ring: &[GeoPoint]) -> bool {
    if ring.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = ring.len() - 1;
    for i in 0..ring.len() {
        let (xi, yi) = (ring[i].longitude, ring[i].latitude);
        let (xj, yj) = (ring[j].longitude, ring[j].latitude);

        let crosses = (yi > p.latitude) != (yj > p.latitude)
            && p.longitude < (xj - xi) * (p.latitude - yi) / (yj - yi) + xi;
        if crosses {
            inside = !inside;
        }
        j = i;
    }

    inside
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_ring() -> Vec<GeoPoint> {
        vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(0.0, 1.0),
            GeoPoint::new(1.0, 1.0),
            GeoPoint::new(1.0, 0.0),
        ]
    }

    #[test]
    fn test_distance_zero_for_identical_points() {
        let p = GeoPoint::new(19.08934, 72.878176);
        assert!(great_circle_distance_meters(p, p) < 1e-6);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let a = GeoPoint::new(19.08934, 72.878176);
        let b = GeoPoint::new(19.09034, 72.879176);
        let ab = great_circle_distance_meters(a, b);
        let ba = great_circle_distance_meters(b, a);
        assert!((ab - ba).abs() < 1e-9);
    }

    #[test]
    fn test_distance_known_value() {
        // One degree of latitude is roughly 111.19 km on the spherical model.
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(1.0, 0.0);
        let d = great_circle_distance_meters(a, b);
        assert!((d - 111_194.9).abs() < 10.0, "got {}", d);
    }

    #[test]
    fn test_distance_short_range() {
        // ~0.001 degrees of latitude is roughly 111 meters.
        let a = GeoPoint::new(19.089, 72.878);
        let b = GeoPoint::new(19.090, 72.878);
        let d = great_circle_distance_meters(a, b);
        assert!((d - 111.2).abs() < 1.0, "got {}", d);
    }

    #[test]
    fn test_point_inside_square() {
        assert!(point_in_polygon(GeoPoint::new(0.5, 0.5), &square_ring()));
    }

    #[test]
    fn test_point_outside_square() {
        assert!(!point_in_polygon(GeoPoint::new(1.5, 0.5), &square_ring()));
        assert!(!point_in_polygon(GeoPoint::new(-0.5, 0.5), &square_ring()));
    }

    #[test]
    fn test_point_outside_near_corner() {
        assert!(!point_in_polygon(GeoPoint::new(1.01, 1.01), &square_ring()));
    }

    #[test]
    fn test_degenerate_ring_contains_nothing() {
        let ring = vec![GeoPoint::new(0.0, 0.0), GeoPoint::new(1.0, 1.0)];
        assert!(!point_in_polygon(GeoPoint::new(0.5, 0.5), &ring));
    }

    #[test]
    fn test_concave_polygon() {
        // A "U" shape: the notch carved out of the top is outside.
        let ring = vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(3.0, 0.0),
            GeoPoint::new(3.0, 1.0),
            GeoPoint::new(1.0, 1.0),
            GeoPoint::new(1.0, 2.0),
            GeoPoint::new(3.0, 2.0),
            GeoPoint::new(3.0, 3.0),
            GeoPoint::new(0.0, 3.0),
        ];
        // Inside the left arm and below the notch.
        assert!(point_in_polygon(GeoPoint::new(1.5, 0.5), &ring));
        assert!(point_in_polygon(GeoPoint::new(0.5, 1.5), &ring));
        // In the notch.
        assert!(!point_in_polygon(GeoPoint::new(2.0, 1.5), &ring));
    }
}
