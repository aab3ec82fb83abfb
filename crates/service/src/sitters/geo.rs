//! Great-circle helpers in statute miles.

/// Mean Earth radius in miles.
pub const EARTH_RADIUS_MILES: f64 = 3959.0;

/// Degrees of latitude/longitude treated as one mile by the bounding box.
pub const DEGREES_PER_MILE: f64 = 0.0145;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Both coordinates must be present for a point to exist.
    pub fn from_parts(latitude: Option<f64>, longitude: Option<f64>) -> Option<Self> {
        Some(Self::new(latitude?, longitude?))
    }
}

/// Haversine distance between two points.
pub fn haversine_miles(a: GeoPoint, b: GeoPoint) -> f64 {
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + a.latitude.to_radians().cos() * b.latitude.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_MILES * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Square approximation of a radius: both coordinate deltas within
/// `radius * DEGREES_PER_MILE`.
pub fn within_box(center: GeoPoint, other: GeoPoint, radius_miles: f64) -> bool {
    let delta = radius_miles * DEGREES_PER_MILE;
    (other.latitude - center.latitude).abs() <= delta && (other.longitude - center.longitude).abs() <= delta
}

#[cfg(test)]
mod tests {
    use super::*;

    const DENVER: GeoPoint = GeoPoint { latitude: 39.7392, longitude: -104.9903 };
    const BOULDER: GeoPoint = GeoPoint { latitude: 40.0150, longitude: -105.2705 };

    #[test]
    fn zero_on_identical_points() {
        assert_eq!(haversine_miles(DENVER, DENVER), 0.0);
    }

    #[test]
    fn symmetric() {
        let ab = haversine_miles(DENVER, BOULDER);
        let ba = haversine_miles(BOULDER, DENVER);
        assert!((ab - ba).abs() < 1e-9);
    }

    #[test]
    fn known_distance() {
        // Denver to Boulder is roughly 24 miles as the crow flies.
        let d = haversine_miles(DENVER, BOULDER);
        assert!((23.0..26.0).contains(&d), "got {d}");
    }

    #[test]
    fn one_degree_of_latitude() {
        let d = haversine_miles(GeoPoint::new(0.0, 0.0), GeoPoint::new(1.0, 0.0));
        assert!((d - 69.09).abs() < 0.1, "got {d}");
    }

    #[test]
    fn bounding_box_is_square() {
        // 10 miles -> 0.145 degrees on each axis.
        let c = GeoPoint::new(0.0, 0.0);
        assert!(within_box(c, GeoPoint::new(0.14, -0.14), 10.0));
        assert!(!within_box(c, GeoPoint::new(0.15, 0.0), 10.0));
        assert!(!within_box(c, GeoPoint::new(0.0, 0.2), 10.0));
    }

    #[test]
    fn point_needs_both_parts() {
        assert!(GeoPoint::from_parts(Some(1.0), None).is_none());
        assert!(GeoPoint::from_parts(None, Some(1.0)).is_none());
        assert_eq!(GeoPoint::from_parts(Some(1.0), Some(2.0)), Some(GeoPoint::new(1.0, 2.0)));
    }
}
