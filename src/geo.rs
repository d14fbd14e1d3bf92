//! Great-circle distance and containment primitives.
//!
//! Every distance in the crate derives from [`distance_meters`]; the
//! kilometer variant is the same formula scaled, so the two never drift.
//! Inputs are not validated here. NaN or infinite coordinates yield a NaN
//! distance and a `false` containment test.

use serde::{Deserialize, Serialize};

/// Earth radius in meters.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// True when both coordinates are finite and within their ranges.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Mean of two points weighted by `wa` and `wb`.
    pub fn weighted_mean(a: GeoPoint, wa: f64, b: GeoPoint, wb: f64) -> GeoPoint {
        let total = wa + wb;
        GeoPoint {
            latitude: (a.latitude * wa + b.latitude * wb) / total,
            longitude: (a.longitude * wa + b.longitude * wb) / total,
        }
    }
}

/// Haversine distance between two points in meters.
pub fn distance_meters(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat1_rad = a.latitude.to_radians();
    let lat2_rad = b.latitude.to_radians();
    let delta_lat = (b.latitude - a.latitude).to_radians();
    let delta_lng = (b.longitude - a.longitude).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    // Rounding can push h a hair past 1 for antipodal points; clamp keeps NaN.
    let c = 2.0 * h.sqrt().clamp(0.0, 1.0).asin();

    EARTH_RADIUS_M * c
}

/// Haversine distance between two points in kilometers.
pub fn distance_km(a: GeoPoint, b: GeoPoint) -> f64 {
    distance_meters(a, b) / 1000.0
}

/// Inclusive containment test: a point exactly `radius_meters` away is inside.
pub fn is_within(point: GeoPoint, center: GeoPoint, radius_meters: f64) -> bool {
    distance_meters(point, center) <= radius_meters
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_point_is_zero() {
        let p = GeoPoint::new(9.01, 38.761);
        assert_eq!(distance_meters(p, p), 0.0);
    }

    #[test]
    fn test_known_distance() {
        // Addis Ababa (9.03, 38.74) to Adama (8.54, 39.27), ~80 km straight line
        let km = distance_km(GeoPoint::new(9.03, 38.74), GeoPoint::new(8.54, 39.27));
        assert!(km > 75.0 && km < 85.0, "expected ~80km, got {}", km);
    }

    #[test]
    fn test_symmetric() {
        let pairs = [
            (GeoPoint::new(9.01, 38.76), GeoPoint::new(9.3, 38.9)),
            (GeoPoint::new(-33.9, 151.2), GeoPoint::new(51.5, -0.12)),
            (GeoPoint::new(0.0, 179.9), GeoPoint::new(0.0, -179.9)),
        ];
        for (a, b) in pairs {
            let ab = distance_meters(a, b);
            let ba = distance_meters(b, a);
            assert!((ab - ba).abs() <= ab.abs() * 1e-6, "{} vs {}", ab, ba);
        }
    }

    #[test]
    fn test_km_matches_meters() {
        let a = GeoPoint::new(9.01, 38.76);
        let b = GeoPoint::new(9.02, 38.77);
        assert!((distance_km(a, b) * 1000.0 - distance_meters(a, b)).abs() < 1e-9);
    }

    #[test]
    fn test_triangle_inequality() {
        let a = GeoPoint::new(9.0, 38.7);
        let b = GeoPoint::new(9.1, 38.8);
        let c = GeoPoint::new(9.05, 39.0);
        assert!(distance_meters(a, c) <= distance_meters(a, b) + distance_meters(b, c) + 1e-6);
    }

    #[test]
    fn test_boundary_is_inclusive() {
        let center = GeoPoint::new(0.0, 0.0);
        let point = GeoPoint::new(0.0, 0.001);
        let radius = distance_meters(point, center);
        assert!(is_within(point, center, radius));
        assert!(!is_within(point, center, radius - 0.01));
    }

    #[test]
    fn test_nan_is_never_within() {
        let center = GeoPoint::new(0.0, 0.0);
        let point = GeoPoint::new(f64::NAN, 0.0);
        assert!(distance_meters(point, center).is_nan());
        assert!(!is_within(point, center, 1_000_000.0));
    }

    #[test]
    fn test_validity() {
        assert!(GeoPoint::new(90.0, -180.0).is_valid());
        assert!(!GeoPoint::new(90.5, 0.0).is_valid());
        assert!(!GeoPoint::new(0.0, 181.0).is_valid());
        assert!(!GeoPoint::new(f64::INFINITY, 0.0).is_valid());
    }

    #[test]
    fn test_weighted_mean() {
        let m = GeoPoint::weighted_mean(
            GeoPoint::new(0.0, 0.0),
            3.0,
            GeoPoint::new(4.0, 8.0),
            1.0,
        );
        assert_eq!(m, GeoPoint::new(1.0, 2.0));
    }
}
