//! Haversine great-circle distance.

use super::coordinate::Coordinate;

/// Mean Earth radius used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two coordinates in kilometres.
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    let (lat1, lat2) = (a.lat().to_radians(), b.lat().to_radians());
    let d_lat = lat2 - lat1;
    let d_lon = (b.lon() - a.lon()).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    // Rounding can push h a hair above 1 for antipodal points.
    let c = 2.0 * h.sqrt().min(1.0).asin();

    EARTH_RADIUS_KM * c
}

/// Whether two optional coordinates lie within `threshold_km` of each other.
///
/// An absent coordinate is never close to anything, including another absent
/// coordinate.
pub fn are_close(a: Option<Coordinate>, b: Option<Coordinate>, threshold_km: f64) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => distance_km(a, b) <= threshold_km,
        _ => false,
    }
}
